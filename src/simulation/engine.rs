//! High-level runtime engine settings
//!
//! Selects the broad-phase (direct or grid) and the number of constraint
//! passes used when building and running a `Scenario`

use crate::configuration::config::BroadPhaseConfig;

#[derive(Debug, Clone)]
pub struct Engine {
    pub broad_phase: BroadPhaseConfig, // direct n^2 scan or spatial-hash grid
    pub iterations: usize, // constraint solver passes per step
}
