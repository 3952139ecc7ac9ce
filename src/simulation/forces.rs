//! Acceleration contributors for the ball-pit engine
//!
//! Defines the 2D acceleration trait and the constant-gravity term
//! that drives the toy

use crate::simulation::states::{System, NVec2};

/// Collection of 2D acceleration terms (gravity, drag, etc.)
/// Each term implements [`Acceleration`] and their contributions are summed
/// into a single acceleration vector per body
pub struct AccelSet {
    terms: Vec<Box<dyn Acceleration + Send + Sync>>,
}

impl AccelSet {
    /// Create an empty acceleration set
    pub fn new() -> Self {
        Self {
            terms: Vec::new()
        }
    }

    /// Add an acceleration term
    pub fn with<T>(mut self, term: T) -> Self
    where
        T: Acceleration + Send + Sync + 'static,
    {
        self.terms.push(Box::new(term));
        self
    }

    /// Compute total accelerations at time `t` for all bodies in `sys`
    /// - `out[i]` will be set to the sum of contributions from all terms
    pub fn accumulate_accels(&self, t: f64, sys: &System, out: &mut [NVec2]) {
        // Zero buffer
        for a in out.iter_mut() {
            *a = NVec2::zeros();
        }
        // Iterate over all acceration contributors
        for term in &self.terms {
            term.acceleration(t, sys, out);
        }
    }
}

/// Trait for 2D acceleration sources operating on [`System`]
/// Implementations add their contribution into `out[i]` for each body
pub trait Acceleration {
    fn acceleration(&self, t: f64, sys: &System, out: &mut [NVec2]);
}

/// Uniform constant acceleration field
/// Mass-independent: every body receives the same contribution, so the toy's
/// gravity pulls large and small balls identically
pub struct ConstantGravity {
    pub g: NVec2, // acceleration vector, y points down in domain coordinates
}

impl Acceleration for ConstantGravity {
    fn acceleration(&self, _t: f64, sys: &System, out: &mut [NVec2]) {
        for a in out.iter_mut().take(sys.bodies.len()) {
            *a += self.g;
        }
    }
}
