//! Build fully-initialized simulation scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces the runtime bundle
//! (`Scenario`) containing:
//! - engine settings (`Engine`)
//! - numerical parameters (`Parameters`)
//! - system state (`System` with bodies at t = 0)
//! - active force set (`AccelSet`)
//!
//! The scenario is inserted into Bevy as a `Resource` and consumed by the
//! physics-step and pointer-interaction systems. It also carries the whole
//! driver surface the viewer talks to: `step`, `try_grab`, `set_held_target`,
//! `release_held`, `bodies`

use bevy::prelude::Resource;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::configuration::config::{ScenarioConfig, BodyConfig};
use crate::simulation::engine::Engine;
use crate::simulation::forces::{AccelSet, ConstantGravity};
use crate::simulation::integrator::verlet_integrator;
use crate::simulation::math::mix;
use crate::simulation::params::Parameters;
use crate::simulation::solver::solve_constraints;
use crate::simulation::states::{System, Body, NVec2};

/// Hue step between consecutive spawned bodies as a fraction of the colour
/// wheel, (sqrt(5) - 1) / 2; an irrational step spreads hues evenly
const GOLDEN_RATIO: f64 = 0.618_033_988_749_894_8;

/// Bevy resource representing a fully-initialized ball-pit scenario
///
/// This is the main “runtime bundle” constructed from a [`ScenarioConfig`]:
/// it contains the engine settings, parameters, current system
/// state, and the set of active accelerations
///
/// In Bevy terms, this is inserted as a `Resource` and then read by systems
/// responsible for integration, pointer interaction, and visualization
#[derive(Resource)]
pub struct Scenario {
    pub engine: Engine,
    pub parameters: Parameters,
    pub system: System,
    pub forces: AccelSet,
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig) -> Self {
        // Parameters (runtime) from ParametersConfig
        let p_cfg = cfg.parameters;
        let parameters = Parameters {
            dt: p_cfg.dt,
            gravity: NVec2::new(p_cfg.gravity[0], p_cfg.gravity[1]),
            stiffness: p_cfg.stiffness,
            damping: p_cfg.damping,
            width: p_cfg.width,
            height: p_cfg.height,
            min_radius: p_cfg.min_radius,
            max_radius: p_cfg.max_radius,
            bucket_factor: p_cfg.bucket_factor,
            seed: p_cfg.seed,
        };

        // Engine (runtime) from EngineConfig
        let e_cfg = cfg.engine;
        let engine = Engine {
            broad_phase: e_cfg.broad_phase,
            iterations: e_cfg.iterations,
        };

        // Bodies: explicit placements first, then the random spawn batch
        let mut bodies: Vec<Body> = cfg.bodies.iter().enumerate().map(|(i, bc): (usize, &BodyConfig)| Body::new(
            NVec2::new(bc.pos[0], bc.pos[1]),
            bc.radius,
            hue_colour(i),
        )).collect();

        if let Some(spawn) = &cfg.spawn {
            spawn_random(&mut bodies, spawn.count, &parameters);
        }

        // Initial system state: bodies at t = 0, nothing held
        let system = System {
            bodies,
            held: None,
            t: 0.0,
        };

        // Forces: construct an AccelSet and register constant gravity
        let mut forces = AccelSet::new();
        forces = forces.with(ConstantGravity {
            g: parameters.gravity,
        });

        Self {
            engine,
            parameters,
            system,
            forces,
        }
    }

    /// Advance the simulation by one fixed tick of length `dt`:
    /// integrate, then run the constraint passes
    pub fn step(&mut self, dt: f64) {
        verlet_integrator(&mut self.system, &self.forces, dt);
        solve_constraints(&mut self.system, &self.engine, &self.parameters);
    }

    /// Grab the first body (index order) containing `point`, if any,
    /// recording it in the held slot
    pub fn try_grab(&mut self, point: NVec2) -> Option<usize> {
        let hit = self.system.bodies.iter().position(|b| b.contains(point));
        if hit.is_some() {
            self.system.held = hit;
        }
        hit
    }

    /// While a body is held, overwrite its position with the pointer
    /// location; no-op when nothing is held
    ///
    /// The old position shifts into `prev_pos`, so the implied velocity
    /// tracks the pointer with one update of lag and release throws the
    /// body along the drag direction
    pub fn set_held_target(&mut self, point: NVec2) {
        if let Some(i) = self.system.held {
            let b = &mut self.system.bodies[i];
            b.prev_pos = b.pos;
            b.pos = point;
        }
    }

    /// Clear the held-body slot; the body resumes Verlet motion with the
    /// velocity implied by its lagging prev_pos (the "thrown" effect)
    pub fn release_held(&mut self) {
        self.system.held = None;
    }

    /// Read-only view of the bodies for rendering
    pub fn bodies(&self) -> &[Body] {
        &self.system.bodies
    }
}

/// Append `count` random bodies: radius mixed through the configured range,
/// position mixed through the in-bounds range for that radius. No overlap
/// rejection is attempted; the solver separates any initial overlaps over
/// the first few frames.
fn spawn_random(bodies: &mut Vec<Body>, count: usize, params: &Parameters) {
    let mut rng = StdRng::seed_from_u64(params.seed);
    let offset = bodies.len();

    for i in 0..count {
        let radius = mix(params.min_radius, params.max_radius, rng.gen::<f64>());
        let pos = NVec2::new(
            mix(radius, params.width - radius, rng.gen::<f64>()),
            mix(radius, params.height - radius, rng.gen::<f64>()),
        );
        bodies.push(Body::new(pos, radius, hue_colour(offset + i)));
    }
}

/// Golden-ratio hue cycling: body `i` gets hue `i * GOLDEN_RATIO mod 1`,
/// converted once to linear RGB for the renderer
fn hue_colour(i: usize) -> [f32; 3] {
    let hue = (i as f64 * GOLDEN_RATIO) % 1.0;
    let srgba = bevy::prelude::Color::hsl(hue as f32 * 360.0, 0.5, 0.7).to_srgba();
    [srgba.red, srgba.green, srgba.blue]
}
