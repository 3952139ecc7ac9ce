pub mod simulation;
pub mod configuration;
pub mod visualization;
pub mod benchmark;

pub use simulation::states::{Body, System, NVec2};
pub use simulation::forces::{Acceleration, AccelSet, ConstantGravity};
pub use simulation::integrator::verlet_integrator;
pub use simulation::solver::solve_constraints;
pub use simulation::spatial_hash::{CollisionGrid, direct_pairs};
pub use simulation::scenario::Scenario;

pub use configuration::config::{BroadPhaseConfig, EngineConfig, ParametersConfig, BodyConfig, SpawnConfig, ScenarioConfig};

pub use visualization::ballpit_vis2d::run_2d;

pub use benchmark::benchmark::{bench_pairs, bench_step_curve};
