//! Numerical and physical parameters for the simulation
//!
//! `Parameters` holds runtime settings:
//! - fixed integration step size,
//! - gravity, stiffness, and boundary damping,
//! - domain extents and the body radius range,
//! - broad-phase bucket sizing and random seed

use super::states::NVec2;

#[derive(Debug, Clone)]
pub struct Parameters {
    pub dt: f64, // fixed step size
    pub gravity: NVec2, // constant acceleration, y points down
    pub stiffness: f64, // fractional constraint correction per pass (0-1)
    pub damping: f64, // prev_pos blend factor on boundary contact
    pub width: f64, // domain extent along x
    pub height: f64, // domain extent along y
    pub min_radius: f64, // smallest spawnable body radius
    pub max_radius: f64, // largest spawnable body radius
    pub bucket_factor: f64, // bucket edge = bucket_factor * max_radius
    pub seed: u64, // deterministic seed to make spawned scenes reproducable
}
