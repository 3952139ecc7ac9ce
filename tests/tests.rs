use ballpit::simulation::states::{Body, System, NVec2};
use ballpit::simulation::params::Parameters;
use ballpit::simulation::engine::Engine;
use ballpit::simulation::forces::{AccelSet, ConstantGravity};
use ballpit::simulation::integrator::verlet_integrator;
use ballpit::simulation::solver::solve_constraints;
use ballpit::simulation::spatial_hash::{CollisionGrid, direct_pairs};
use ballpit::simulation::scenario::Scenario;
use ballpit::configuration::config::{
    BroadPhaseConfig, BodyConfig, EngineConfig, ParametersConfig, ScenarioConfig, SpawnConfig,
};

/// Build a System from (position, radius) tuples, nothing held
pub fn system_of(specs: &[((f64, f64), f64)]) -> System {
    let bodies = specs
        .iter()
        .map(|&((x, y), radius)| Body::new(NVec2::new(x, y), radius, [1.0, 1.0, 1.0]))
        .collect();
    System {
        bodies,
        held: None,
        t: 0.0,
    }
}

/// Default physics parameters for tests, matching the classic toy constants
pub fn test_params() -> Parameters {
    Parameters {
        dt: 1.0 / 60.0,
        gravity: NVec2::new(0.0, 2000.0),
        stiffness: 0.5,
        damping: 0.001,
        width: 500.0,
        height: 375.0,
        min_radius: 10.0,
        max_radius: 45.0,
        bucket_factor: 1.1,
        seed: 42,
    }
}

/// Build a gravity term + AccelSet
pub fn gravity_set(p: &Parameters) -> AccelSet {
    AccelSet::new().with(ConstantGravity { g: p.gravity })
}

/// Engine with the given broad-phase and pass count
pub fn engine(broad_phase: BroadPhaseConfig, iterations: usize) -> Engine {
    Engine {
        broad_phase,
        iterations,
    }
}

/// Grid pair query with the bucket sizing the solver uses
pub fn grid_pairs(sys: &System, p: &Parameters) -> Vec<(usize, usize)> {
    CollisionGrid::build(sys, p.bucket_factor * p.max_radius).overlapping_pairs(sys)
}

/// Scenario config for driver tests: one body, no spawning, direct pairs
pub fn one_body_config(gravity: [f64; 2]) -> ScenarioConfig {
    ScenarioConfig {
        engine: EngineConfig {
            broad_phase: BroadPhaseConfig::Direct,
            iterations: 1,
        },
        parameters: ParametersConfig {
            dt: 1.0 / 60.0,
            gravity,
            stiffness: 0.5,
            damping: 0.001,
            width: 500.0,
            height: 375.0,
            min_radius: 10.0,
            max_radius: 45.0,
            bucket_factor: 1.1,
            seed: 42,
        },
        bodies: vec![BodyConfig {
            pos: [100.0, 100.0],
            radius: 20.0,
        }],
        spawn: None,
    }
}

// ==================================================================================
// Body / state tests
// ==================================================================================

#[test]
fn mass_is_radius_squared() {
    for radius in [1.0, 7.0, 12.5, 41.6667] {
        let b = Body::new(NVec2::new(0.0, 0.0), radius, [0.0, 0.0, 0.0]);
        assert_eq!(b.mass, radius * radius, "mass must derive from radius");
        assert!(b.mass > 0.0);
    }
}

#[test]
fn new_body_starts_at_rest() {
    let b = Body::new(NVec2::new(3.0, 4.0), 10.0, [0.0, 0.0, 0.0]);
    assert_eq!(b.pos, b.prev_pos, "implied velocity must start at zero");
}

#[test]
fn contains_is_a_strict_radius_test() {
    let b = Body::new(NVec2::new(100.0, 100.0), 10.0, [0.0, 0.0, 0.0]);
    assert!(b.contains(NVec2::new(105.0, 100.0)));
    assert!(!b.contains(NVec2::new(110.0, 100.0)), "boundary is outside");
    assert!(!b.contains(NVec2::new(111.0, 100.0)));
}

// ==================================================================================
// Integrator tests
// ==================================================================================

#[test]
fn verlet_matches_hand_computed_step() {
    let mut sys = system_of(&[((100.0, 100.0), 10.0)]);
    sys.bodies[0].prev_pos = NVec2::new(98.0, 101.0);

    let p = test_params();
    let forces = gravity_set(&p);
    verlet_integrator(&mut sys, &forces, p.dt);

    // next = 2*pos - prev + g*dt^2, with dt = 1/60 so g*dt^2 = (0, 5/9)
    let expected = NVec2::new(102.0, 99.0 + 2000.0 / 3600.0);
    assert!((sys.bodies[0].pos - expected).norm() < 1e-12);
    assert_eq!(sys.bodies[0].prev_pos, NVec2::new(100.0, 100.0));
    assert!((sys.t - p.dt).abs() < 1e-15, "time advances by one step");
}

#[test]
fn integrator_is_deterministic() {
    let p = test_params();

    let build = || {
        let mut sys = system_of(&[((100.0, 100.0), 10.0), ((200.0, 50.0), 15.0)]);
        sys.bodies[0].prev_pos = NVec2::new(99.5, 100.2);
        sys
    };

    let mut sys_a = build();
    let mut sys_b = build();
    verlet_integrator(&mut sys_a, &gravity_set(&p), p.dt);
    verlet_integrator(&mut sys_b, &gravity_set(&p), p.dt);

    for (a, b) in sys_a.bodies.iter().zip(sys_b.bodies.iter()) {
        assert_eq!(a.pos, b.pos, "same inputs must give identical outputs");
        assert_eq!(a.prev_pos, b.prev_pos);
    }
}

#[test]
fn held_body_is_skipped_by_integration() {
    let mut sys = system_of(&[((100.0, 100.0), 10.0), ((200.0, 100.0), 10.0)]);
    sys.held = Some(0);

    let p = test_params();
    verlet_integrator(&mut sys, &gravity_set(&p), p.dt);

    assert_eq!(sys.bodies[0].pos, NVec2::new(100.0, 100.0), "held body must not fall");
    assert_eq!(sys.bodies[0].prev_pos, NVec2::new(100.0, 100.0));
    assert!(sys.bodies[1].pos.y > 100.0, "free body must fall");
}

// ==================================================================================
// Broad-phase tests
// ==================================================================================

#[test]
fn broadphase_includes_overlapping_and_touching_pairs() {
    let p = test_params();

    // Just inside the touching threshold
    let sys = system_of(&[((100.0, 100.0), 10.0), ((119.9, 100.0), 10.0)]);
    assert_eq!(grid_pairs(&sys, &p), vec![(0, 1)]);

    // Exactly touching: distance == sum of radii is still a pair
    let sys = system_of(&[((100.0, 100.0), 10.0), ((120.0, 100.0), 10.0)]);
    assert_eq!(grid_pairs(&sys, &p), vec![(0, 1)]);
}

#[test]
fn broadphase_finds_pairs_across_bucket_boundaries() {
    let p = test_params();
    let bucket_size = p.bucket_factor * p.max_radius;

    // Two small bodies straddling a bucket boundary
    let x_edge = bucket_size;
    let sys = system_of(&[((x_edge - 1.5, 100.0), 2.0), ((x_edge + 1.5, 100.0), 2.0)]);
    assert_eq!(grid_pairs(&sys, &p), vec![(0, 1)]);
}

#[test]
fn broadphase_excludes_separated_pairs() {
    let p = test_params();

    let sys = system_of(&[((100.0, 100.0), 10.0), ((120.1, 100.0), 10.0)]);
    assert!(grid_pairs(&sys, &p).is_empty(), "no false positives past the threshold");
    assert!(direct_pairs(&sys).is_empty());
}

#[test]
fn broadphase_emits_each_pair_once_and_never_self_pairs() {
    let p = test_params();

    // A large body spans several buckets; the overlapping small body shares
    // more than one of them, but the pair must still come out once
    let sys = system_of(&[((100.0, 100.0), 45.0), ((130.0, 100.0), 10.0)]);
    let pairs = grid_pairs(&sys, &p);
    assert_eq!(pairs, vec![(0, 1)]);
    assert!(pairs.iter().all(|&(i, j)| i != j));
}

#[test]
fn grid_agrees_with_direct_scan() {
    let p = test_params();

    // Deterministic spread of mixed-radius bodies, dense enough to overlap
    let mut specs = Vec::new();
    for i in 0..150 {
        let i_f = f64::from(i);
        specs.push((
            (
                ((i_f * 0.37).sin() * 0.5 + 0.5) * p.width,
                ((i_f * 0.13).cos() * 0.5 + 0.5) * p.height,
            ),
            10.0 + ((i_f * 0.07).sin() * 0.5 + 0.5) * 30.0,
        ));
    }
    let sys = system_of(&specs);

    let direct = direct_pairs(&sys);
    assert!(!direct.is_empty(), "scene should produce overlaps");
    assert_eq!(grid_pairs(&sys, &p), direct, "same pairs, same order");
}

// ==================================================================================
// Constraint solver tests
// ==================================================================================

#[test]
fn equal_masses_split_the_correction_evenly() {
    let mut sys = system_of(&[((100.0, 100.0), 10.0), ((115.0, 100.0), 10.0)]);
    let p = test_params();

    // overlap = 20 - 15 = 5; each side moves stiffness * overlap / 2 = 1.25
    solve_constraints(&mut sys, &engine(BroadPhaseConfig::Grid, 1), &p);

    assert!((sys.bodies[0].pos.x - 98.75).abs() < 1e-12);
    assert!((sys.bodies[1].pos.x - 116.25).abs() < 1e-12);
    assert_eq!(sys.bodies[0].pos.y, 100.0);
    assert_eq!(sys.bodies[1].pos.y, 100.0);
}

#[test]
fn deeply_overlapping_pair_separates_along_x() {
    // Two radius-10 bodies 5 apart: overlap = 15, stiffness 0.5 moves each
    // centre 3.75 along the x axis, a retreating and b advancing
    let mut sys = system_of(&[((100.0, 100.0), 10.0), ((105.0, 100.0), 10.0)]);
    let p = test_params();

    solve_constraints(&mut sys, &engine(BroadPhaseConfig::Grid, 1), &p);

    assert!((sys.bodies[0].pos.x - 96.25).abs() < 1e-12);
    assert!((sys.bodies[1].pos.x - 108.75).abs() < 1e-12);
}

#[test]
fn lighter_body_moves_proportionally_more() {
    // masses 100 and 400; distance 25, radii sum 30, overlap 5
    let mut sys = system_of(&[((100.0, 100.0), 10.0), ((125.0, 100.0), 20.0)]);
    let p = test_params();

    solve_constraints(&mut sys, &engine(BroadPhaseConfig::Direct, 1), &p);

    let light_moved = (sys.bodies[0].pos.x - 100.0).abs();
    let heavy_moved = (sys.bodies[1].pos.x - 125.0).abs();
    assert!((light_moved - 2.0).abs() < 1e-12);
    assert!((heavy_moved - 0.5).abs() < 1e-12);
    // displacement ratio equals the inverse mass ratio
    assert!((light_moved / heavy_moved - 4.0).abs() < 1e-9);
}

#[test]
fn boundary_containment_blends_instead_of_snapping() {
    let mut sys = system_of(&[((-5.0, 100.0), 10.0)]);
    let p = test_params();

    solve_constraints(&mut sys, &engine(BroadPhaseConfig::Grid, 1), &p);

    // clamp target is x = radius = 10; one pass blends halfway there
    assert!((sys.bodies[0].pos.x - 2.5).abs() < 1e-12, "blend, not snap");
    // prev_pos bleeds toward the new position by the damping factor
    let expected_prev_x = -5.0 + p.damping * (2.5 - -5.0);
    assert!((sys.bodies[0].prev_pos.x - expected_prev_x).abs() < 1e-12);
}

#[test]
fn coincident_centres_do_not_poison_positions() {
    let mut sys = system_of(&[((100.0, 100.0), 10.0), ((100.0, 100.0), 10.0)]);
    let p = test_params();

    solve_constraints(&mut sys, &engine(BroadPhaseConfig::Grid, 3), &p);

    for b in &sys.bodies {
        assert!(b.pos.x.is_finite() && b.pos.y.is_finite(), "no NaN may enter state");
        assert_eq!(b.pos, NVec2::new(100.0, 100.0), "zero-distance pair is skipped");
    }
}

#[test]
fn repeated_passes_reduce_total_overlap() {
    // Three bodies squashed into a row; one pass cannot satisfy all pairs
    let mut sys = system_of(&[
        ((100.0, 100.0), 10.0),
        ((112.0, 100.0), 10.0),
        ((124.0, 100.0), 10.0),
    ]);
    let p = test_params();

    let total_overlap = |sys: &System| -> f64 {
        direct_pairs(sys)
            .iter()
            .map(|&(i, j)| {
                let a = &sys.bodies[i];
                let b = &sys.bodies[j];
                (a.radius + b.radius) - (b.pos - a.pos).norm()
            })
            .sum()
    };

    let before = total_overlap(&sys);
    solve_constraints(&mut sys, &engine(BroadPhaseConfig::Grid, 5), &p);
    let after = total_overlap(&sys);

    assert!(before > 0.0);
    assert!(after < before * 0.25, "five passes should mostly separate the row");
}

// ==================================================================================
// Driver / scenario tests
// ==================================================================================

#[test]
fn grab_drag_release_throws_the_body() {
    let mut scenario = Scenario::build_scenario(one_body_config([0.0, 0.0]));
    let dt = scenario.parameters.dt;

    assert_eq!(scenario.try_grab(NVec2::new(105.0, 100.0)), Some(0));

    // Dragged: the body follows the pointer and ignores integration
    scenario.set_held_target(NVec2::new(110.0, 100.0));
    scenario.step(dt);
    assert_eq!(scenario.bodies()[0].pos, NVec2::new(110.0, 100.0));

    scenario.set_held_target(NVec2::new(120.0, 100.0));
    scenario.step(dt);
    assert_eq!(scenario.bodies()[0].pos, NVec2::new(120.0, 100.0));

    // Released: Verlet resumes from the lagging prev_pos, so the body keeps
    // moving along the drag direction
    scenario.release_held();
    scenario.step(dt);
    assert!((scenario.bodies()[0].pos.x - 130.0).abs() < 1e-9, "drag velocity carries over");
}

#[test]
fn grab_misses_empty_space() {
    let mut scenario = Scenario::build_scenario(one_body_config([0.0, 2000.0]));

    assert_eq!(scenario.try_grab(NVec2::new(400.0, 300.0)), None);
    assert_eq!(scenario.system.held, None);

    // A pointer update with nothing held must be tolerated
    scenario.set_held_target(NVec2::new(400.0, 300.0));
    assert_eq!(scenario.bodies()[0].pos, NVec2::new(100.0, 100.0));
}

#[test]
fn spawned_scenes_are_reproducible_and_in_range() {
    let config = || {
        let mut cfg = one_body_config([0.0, 2000.0]);
        cfg.bodies.clear();
        cfg.spawn = Some(SpawnConfig { count: 12 });
        cfg
    };

    let a = Scenario::build_scenario(config());
    let b = Scenario::build_scenario(config());

    assert_eq!(a.bodies().len(), 12);
    for (ba, bb) in a.bodies().iter().zip(b.bodies().iter()) {
        assert_eq!(ba.pos, bb.pos, "same seed, same scene");
        assert_eq!(ba.radius, bb.radius);
    }

    let p = &a.parameters;
    for body in a.bodies() {
        assert!(body.radius >= p.min_radius && body.radius <= p.max_radius);
        assert!(body.pos.x >= body.radius && body.pos.x <= p.width - body.radius);
        assert!(body.pos.y >= body.radius && body.pos.y <= p.height - body.radius);
    }
}

#[test]
fn settled_pit_stays_inside_the_domain() {
    let mut cfg = one_body_config([0.0, 2000.0]);
    cfg.engine.iterations = 5;
    cfg.engine.broad_phase = BroadPhaseConfig::Grid;
    cfg.bodies.clear();
    cfg.spawn = Some(SpawnConfig { count: 20 });

    let mut scenario = Scenario::build_scenario(cfg);
    let dt = scenario.parameters.dt;
    for _ in 0..120 {
        scenario.step(dt);
    }

    let p = scenario.parameters.clone();
    for body in scenario.bodies() {
        assert!(body.pos.x.is_finite() && body.pos.y.is_finite());
        // containment is a blend, so allow a small transient margin, but no
        // body may have committed fully outside the domain
        assert!(body.pos.x > -body.radius && body.pos.x < p.width + body.radius);
        assert!(body.pos.y > -body.radius && body.pos.y < p.height + body.radius);
    }
}
