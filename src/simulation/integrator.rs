//! Fixed-step time integrator for the ball-pit system
//!
//! Provides a position (Stormer) Verlet step driven by `AccelSet`. Velocity
//! is never stored: it lives implicitly in the `pos`/`prev_pos` delta, which
//! is what lets the constraint solver correct positions directly without
//! fighting a velocity state.

use super::states::{System, NVec2};
use super::forces::AccelSet;

/// Advance the system by one step of length `dt` using position Verlet
/// Uses one force evaluation per step and updates positions and `sys.t`
/// in-place; a pointer-held body is skipped, its position belongs to the
/// pointer until release
pub fn verlet_integrator(sys: &mut System, forces: &AccelSet, dt: f64) {
    let n = sys.bodies.len();
    if n == 0 { // no bodies, return
        return;
    }

    let dt2 = dt * dt; // dt^2, position update term
    let held = sys.held; // pointer-owned body, if any

    // a[i] will hold the acceleration for body i at the current time t = sys.t
    let mut a = vec![NVec2::zeros(); n];

    // Ask the force set to accumulate accelerations at time t_n,
    // based on the current system state sys
    forces.accumulate_accels(sys.t, &*sys, &mut a);

    // For each body and its acceleration a_n:
    // x_n+1 = 2 x_n - x_n-1 + dt^2 a_n
    // then shift: prev_pos <- x_n, pos <- x_n+1
    for (i, (b, acc)) in sys.bodies.iter_mut().zip(a.iter()).enumerate() {
        if held == Some(i) {
            // The pointer writes this body's position directly; prev_pos is
            // left lagging so release resumes motion with the drag velocity
            continue;
        }
        let next = 2.0 * b.pos - b.prev_pos + dt2 * *acc;
        b.prev_pos = b.pos;
        b.pos = next;
    }

    // Increment the system time by one full step
    sys.t += dt;
}
