//! Core state types for the ball-pit simulation.
//!
//! Defines the body/system structs:
//! - `Body`   - one circular mass-bearing particle, positions as `NVec2`
//! - `System` - the body list plus the held-body slot and current time
//!
//! The system owns all mutable simulation state and is passed by reference
//! into the integrator and the constraint solver.

use nalgebra::Vector2;
pub type NVec2 = Vector2<f64>;

#[derive(Debug, Clone)]
pub struct Body {
    pub pos: NVec2, // current position
    pub prev_pos: NVec2, // position one step ago (velocity is implicit in the delta)
    pub radius: f64, // radius, fixed at creation
    pub mass: f64, // derived mass = radius^2
    pub colour: [f32; 3], // display attribute, not used by the physics
}

impl Body {
    /// Create a body at rest: `prev_pos` starts equal to `pos`
    pub fn new(pos: NVec2, radius: f64, colour: [f32; 3]) -> Self {
        Self {
            pos,
            prev_pos: pos,
            radius,
            mass: radius * radius,
            colour,
        }
    }

    /// Pointer hit test: is `point` strictly inside this body?
    pub fn contains(&self, point: NVec2) -> bool {
        (self.pos - point).norm() < self.radius
    }
}

#[derive(Debug, Clone)]
pub struct System {
    pub bodies: Vec<Body>, // collection of bodies
    pub held: Option<usize>, // index of the pointer-held body, if any
    pub t: f64, // time
}
