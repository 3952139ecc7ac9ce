//! Iterative position-based constraint solver
//!
//! Each pass resolves pairwise overlaps with mass-weighted separation, then
//! blends out-of-bounds bodies back inside the domain. A single pass can
//! reintroduce overlap with a third body or push a body back out of bounds,
//! so several passes run per frame and converge toward a jointly
//! non-overlapping, in-bounds configuration. No simultaneous analytic solve
//! is attempted; this is position-based dynamics.

use crate::configuration::config::BroadPhaseConfig;

use super::engine::Engine;
use super::math::{clamp_vec2, mix_vec2};
use super::params::Parameters;
use super::spatial_hash::{direct_pairs, CollisionGrid};
use super::states::{System, NVec2};

/// Run the configured number of constraint passes over the system
///
/// Overlapping pairs are recomputed every pass: positions move between
/// passes, so a stale pair list would miss overlaps the previous pass
/// created and re-resolve pairs it already separated
pub fn solve_constraints(sys: &mut System, engine: &Engine, params: &Parameters) {
    for _ in 0..engine.iterations {
        let pairs = match engine.broad_phase {
            BroadPhaseConfig::Direct => direct_pairs(sys),
            BroadPhaseConfig::Grid => {
                let bucket_size = params.bucket_factor * params.max_radius;
                CollisionGrid::build(sys, bucket_size).overlapping_pairs(sys)
            }
        };

        resolve_overlaps(sys, &pairs, params.stiffness);
        contain_in_bounds(sys, params);
    }
}

/// Push each overlapping pair apart along the line of centres
///
/// Sign convention: the axis is the unit vector from `a` toward `b`; `a`
/// retreats along it and `b` advances along it. Each body moves by
/// `stiffness * overlap * (other mass / combined mass)`, so the lighter
/// body of the pair moves proportionally more.
fn resolve_overlaps(sys: &mut System, pairs: &[(usize, usize)], stiffness: f64) {
    for &(i, j) in pairs {
        let a = &sys.bodies[i];
        let b = &sys.bodies[j];

        let delta = b.pos - a.pos;
        let distance = delta.norm();
        if distance == 0.0 {
            // Coincident centres give no axis to separate along; skip the
            // pair this pass rather than normalise a zero vector. A NaN
            // position would never recover under Verlet.
            continue;
        }

        let a2b = delta / distance;
        let overlap = (a.radius + b.radius) - distance;
        let combined_mass = a.mass + b.mass;
        let push_a = a2b * (stiffness * overlap * (b.mass / combined_mass));
        let push_b = a2b * (stiffness * overlap * (a.mass / combined_mass));

        sys.bodies[i].pos -= push_a;
        sys.bodies[j].pos += push_b;
    }
}

/// Clamp-and-blend boundary containment
///
/// An out-of-bounds body is blended toward its clamped position by
/// `stiffness` rather than snapped, which softens edge collisions over the
/// passes. `prev_pos` is additionally blended toward the new position by
/// `damping`, bleeding implied velocity on wall contact so bounces lose
/// energy instead of gaining it.
fn contain_in_bounds(sys: &mut System, params: &Parameters) {
    for b in sys.bodies.iter_mut() {
        let min = NVec2::new(b.radius, b.radius);
        let max = NVec2::new(params.width - b.radius, params.height - b.radius);
        let clamped = clamp_vec2(b.pos, min, max);

        if clamped != b.pos {
            b.pos = mix_vec2(b.pos, clamped, params.stiffness);
            // damping
            b.prev_pos = mix_vec2(b.prev_pos, b.pos, params.damping);
        }
    }
}
