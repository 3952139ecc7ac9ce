//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! simulation scenario. A scenario consists of:
//!
//! - [`EngineConfig`]     – global engine options (broad-phase, solver passes)
//! - [`ParametersConfig`] – numerical parameters and domain constants
//! - [`BodyConfig`]       – explicit initial state for one body
//! - [`SpawnConfig`]      – random scene spawning on top of explicit bodies
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//! An example scenario YAML matching these types:
//!
//! ```yaml
//! engine:
//!   broad_phase: "grid"     # or "direct"
//!   iterations: 5
//!
//! parameters:
//!   dt: 0.0166667           # fixed step size, nominally one 60 Hz frame
//!   gravity: [0.0, 2000.0]  # y points down
//!   stiffness: 0.5          # fraction of each violation corrected per pass
//!   damping: 0.001          # prev_pos blend on wall contact
//!   width: 500.0
//!   height: 375.0
//!   min_radius: 12.5
//!   max_radius: 41.6667
//!   bucket_factor: 1.1      # bucket edge = bucket_factor * max_radius
//!   seed: 42
//!
//! bodies:                   # optional explicit placements
//!   - pos: [ 100.0, 100.0 ]
//!     radius: 20.0
//!
//! spawn:                    # optional random batch, appended after `bodies`
//!   count: 30
//! ```
//!
//! The engine then maps this configuration into its internal runtime scenario
//! representation, which may use different structs optimized for performance.

use serde::Deserialize;

/// Which broad-phase the constraint solver uses to find overlapping pairs
/// `broad_phase: "grid"` or `broad_phase: "direct"`
#[derive(Deserialize, Debug, Clone)]
pub enum BroadPhaseConfig {
    #[serde(rename = "direct")] // All-pairs O(n^2) scan. Simple, fine for small scenes
    Direct,

    #[serde(rename = "grid")] // Uniform-bucket spatial hash, scales to much larger scenes without algorithmic change
    Grid,
}

/// High-level engine configuration
/// Controls the structure of the simulation
#[derive(Deserialize, Debug)]
pub struct EngineConfig {
    pub broad_phase: BroadPhaseConfig, // pair-finding strategy used each solver pass
    pub iterations: usize, // constraint solver passes per step
}

/// Global numerical and physical parameters for a scenario
#[derive(Deserialize, Debug, Clone)]
pub struct ParametersConfig {
    pub dt: f64,            // fixed step size
    pub gravity: [f64; 2],  // constant acceleration, y down
    pub stiffness: f64,     // fractional constraint correction per pass (0-1)
    pub damping: f64,       // prev_pos blend on boundary contact
    pub width: f64,         // domain extent along x
    pub height: f64,        // domain extent along y
    pub min_radius: f64,    // smallest spawnable body radius
    pub max_radius: f64,    // largest spawnable body radius
    pub bucket_factor: f64, // bucket edge = bucket_factor * max_radius
    pub seed: u64,          // deterministic seed to make spawned scenes reproducable
}

/// Configuration for a single explicitly-placed body
#[derive(Deserialize, Debug)]
pub struct BodyConfig {
    pub pos: [f64; 2], // initial position in domain units
    pub radius: f64,   // radius; mass is derived as radius^2
}

/// Random scene spawning
/// Placement is best-effort in-bounds; initial overlaps are allowed and
/// separate over the first few frames
#[derive(Deserialize, Debug)]
pub struct SpawnConfig {
    pub count: usize, // number of random bodies to append
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug)]
pub struct ScenarioConfig {
    pub engine: EngineConfig, // engine-level configuration (broad-phase, iterations)
    pub parameters: ParametersConfig, // global numerical and domain parameters
    #[serde(default)]
    pub bodies: Vec<BodyConfig>, // explicitly-placed bodies, may be empty
    pub spawn: Option<SpawnConfig>, // optional random batch on top
}
