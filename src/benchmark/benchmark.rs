use std::time::Instant;
use crate::configuration::config::BroadPhaseConfig;
use crate::simulation::engine::Engine;
use crate::simulation::forces::{AccelSet, ConstantGravity};
use crate::simulation::integrator::verlet_integrator;
use crate::simulation::params::Parameters;
use crate::simulation::solver::solve_constraints;
use crate::simulation::spatial_hash::{direct_pairs, CollisionGrid};
use crate::simulation::states::{Body, System, NVec2};

/// Helper to build benchmark `Parameters` for a system of size `n`
/// The domain side grows with sqrt(n) so body density stays roughly constant
/// across sizes; otherwise large n would just measure a solid block of balls
fn make_params(n: usize) -> Parameters {
    let side = (n as f64).sqrt() * 40.0;
    Parameters {
        dt: 1.0 / 60.0,
        gravity: NVec2::new(0.0, 2000.0),
        stiffness: 0.5,
        damping: 0.001,
        width: side,
        height: side,
        min_radius: 5.0,
        max_radius: 12.0,
        bucket_factor: 1.1,
        seed: 42,
    }
}

/// Helper to build a manual System of size `n`
fn make_system(n: usize, params: &Parameters) -> System {
    let mut bodies = Vec::with_capacity(n);

    for i in 0..n {
        let i_f = i as f64;
        // deterministic positions, no rand needed
        let pos = NVec2::new(
            ((i_f * 0.37).sin() * 0.5 + 0.5) * params.width,
            ((i_f * 0.13).cos() * 0.5 + 0.5) * params.height,
        );
        let radius = params.min_radius
            + (params.max_radius - params.min_radius) * ((i_f * 0.07).sin() * 0.5 + 0.5);

        bodies.push(Body::new(pos, radius, [1.0, 1.0, 1.0]));
    }

    System { bodies, held: None, t: 0.0 }
}

pub fn bench_pairs() {
    // Different system sizes to test
    let ns = [200, 400, 800, 1600, 3200, 6400]; //, 12800, 25600, 51200];

    for n in ns {
        let params = make_params(n);
        let sys = make_system(n, &params);
        let bucket_size = params.bucket_factor * params.max_radius;

        // Warm up
        let _ = direct_pairs(&sys);
        let _ = CollisionGrid::build(&sys, bucket_size).overlapping_pairs(&sys);

        // Time direct
        let t0 = Instant::now();
        let pairs_direct = direct_pairs(&sys);
        let dt_direct = t0.elapsed().as_secs_f64();

        // Time grid
        let t1 = Instant::now();
        let pairs_grid = CollisionGrid::build(&sys, bucket_size).overlapping_pairs(&sys);
        let dt_grid = t1.elapsed().as_secs_f64();

        println!(
            "N = {n:5}, direct = {:8.6} s ({} pairs), grid = {:8.6} s ({} pairs)",
            dt_direct,
            pairs_direct.len(),
            dt_grid,
            pairs_grid.len()
        );
    }
}

/// Benchmark one full step (integrate + solve) for a range of n, once per
/// broad-phase
/// Paste output directly into a spreadsheet to graph
pub fn bench_step_curve() {
    println!("N,direct_ms,grid_ms");

    // Steps of 200 to give a smoother graph
    for n in (200..=6400).step_by(200) {
        // Small n: average over a few steps to smooth noise
        // Large n: only 1 step to avoid minutes of runtime
        let steps = if n <= 800 { 5 } else { 1 };

        let params = make_params(n);
        let sys_template = make_system(n, &params);
        let forces = AccelSet::new().with(ConstantGravity { g: params.gravity });

        // Direct broad-phase
        let mut sys_direct = sys_template.clone();
        let engine_direct = Engine {
            broad_phase: BroadPhaseConfig::Direct,
            iterations: 5,
        };

        let t0 = Instant::now();
        for _ in 0..steps {
            verlet_integrator(&mut sys_direct, &forces, params.dt);
            solve_constraints(&mut sys_direct, &engine_direct, &params);
        }
        let ms_direct = t0.elapsed().as_secs_f64() * 1000.0 / steps as f64;

        // Grid broad-phase
        let mut sys_grid = sys_template.clone();
        let engine_grid = Engine {
            broad_phase: BroadPhaseConfig::Grid,
            iterations: 5,
        };

        let t1 = Instant::now();
        for _ in 0..steps {
            verlet_integrator(&mut sys_grid, &forces, params.dt);
            solve_constraints(&mut sys_grid, &engine_grid, &params);
        }
        let ms_grid = t1.elapsed().as_secs_f64() * 1000.0 / steps as f64;

        println!("{},{:.6},{:.6}", n, ms_direct, ms_grid);
    }
}
