use galaxysim::simulation::camera::{Camera, Chase, Display, Projection};
use galaxysim::simulation::forces::{AccelSet, AttractorGravity};
use galaxysim::simulation::integrator::euler_integrator;
use galaxysim::simulation::params::Parameters;
use galaxysim::simulation::seeding::seed_population;
use galaxysim::simulation::states::{Attractor, System};
use galaxysim::simulation::vecmath::{Frame, NVec3};
use galaxysim::simulation::engine::{BodyKind, EngineState};
use galaxysim::configuration::config::{
    CameraConfig, ColorModeConfig, DisplayConfig, EngineConfig, PaletteConfig, ParametersConfig,
    ProjectionConfig, ScenarioConfig,
};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Default physics parameters for tests
fn test_params() -> Parameters {
    Parameters {
        G: 6.67259e-11,
        m_bh: 1e14,
        r_min: 0.1,
        dt: 0.1,
        cosmo_size: 500.0,
        galaxy_size: 100.0,
        galaxy_center_radius: 25.0,
        vel_max_bh: 12.0,
        seed: 42,
    }
}

/// Build a simple two-attractor system separated along the x axis
fn two_attractor_system(dist: f64) -> System {
    let bh = |x: f64| Attractor {
        x: NVec3::new(x, 0.0, 0.0),
        v: NVec3::zeros(),
        spin: Frame::identity(),
    };
    System {
        particles: Vec::new(),
        attractors: vec![bh(-dist / 2.0), bh(dist / 2.0)],
        t: 0.0,
    }
}

/// Build a gravity term + AccelSet
fn gravity_set(p: &Parameters) -> AccelSet {
    AccelSet::new().with(AttractorGravity {
        G: p.G,
        m_bh: p.m_bh,
        r_min: p.r_min,
    })
}

/// A valid scenario config tests can mutate into invalid shapes
fn test_config() -> ScenarioConfig {
    ScenarioConfig {
        engine: EngineConfig {
            projection: ProjectionConfig::Perspective,
            palette: PaletteConfig::Bluesea,
            color_mode: ColorModeConfig::Identity,
        },
        parameters: ParametersConfig {
            particle_num: 50,
            attractor_num: 3,
            cosmo_size: 500.0,
            galaxy_size: 100.0,
            galaxy_center_radius: 25.0,
            G: 6.67259e-11,
            attractor_mass: 1e14,
            dt: 0.1,
            r_min: 0.1,
            vel_max_bh: 12.0,
            seed: 42,
        },
        camera: CameraConfig {
            focal_length: 1000.0,
            z_scale: 1.0,
            view_scale: 1.0,
            rotation_degree: 3600.0,
            core_size: 8.0,
            position: vec![0.0, 0.0, -2000.0],
            yaw: None,
            pitch: None,
        },
        display: DisplayConfig {
            width: 800.0,
            height: 600.0,
        },
    }
}

// ==================================================================================
// Frame / vector math tests
// ==================================================================================

#[test]
fn frame_stays_orthonormal_under_many_rotations() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut frame = Frame::identity();

    for _ in 0..10_000 {
        let yaw = 0.01 * (rng.gen::<f64>() - 0.5);
        let pitch = 0.01 * (rng.gen::<f64>() - 0.5);
        frame = frame.rotated(yaw, pitch);
    }

    for axis in [frame.x, frame.y, frame.z] {
        assert!((axis.norm() - 1.0).abs() < 1e-9, "axis drifted off unit length");
    }
    assert!(frame.x.dot(&frame.y).abs() < 1e-9);
    assert!(frame.x.dot(&frame.z).abs() < 1e-9);
    assert!(frame.y.dot(&frame.z).abs() < 1e-9);
}

#[test]
fn rotation_round_trip_restores_frame() {
    let original = Frame::identity();
    let there = original.rotated(0.3, 0.0);
    let back = there.rotated(-0.3, 0.0);

    for (a, b) in [
        (original.x, back.x),
        (original.y, back.y),
        (original.z, back.z),
    ] {
        assert!((a - b).norm() < 1e-9, "round trip did not restore the frame");
    }
}

// ==================================================================================
// Seeding tests
// ==================================================================================

#[test]
fn seeding_deals_ids_round_robin() {
    let p = test_params();
    let mut rng = StdRng::seed_from_u64(p.seed);
    let mut sys = System::empty();
    seed_population(&mut sys, &p, &mut rng, 10, 3);

    let mut counts = [0usize; 3];
    for particle in &sys.particles {
        assert!(particle.id < 3);
        counts[particle.id] += 1;
    }
    // ceil(10/3) = 4 for the first id, floor(10/3) = 3 for the rest
    assert_eq!(counts, [4, 3, 3]);
}

#[test]
fn seeded_particles_stay_near_their_attractor() {
    let p = test_params();
    let mut rng = StdRng::seed_from_u64(p.seed);
    let mut sys = System::empty();
    seed_population(&mut sys, &p, &mut rng, 200, 2);

    for particle in &sys.particles {
        let bh = &sys.attractors[particle.id];
        let offset = (particle.x - bh.x).norm();
        assert!(
            offset < p.galaxy_size,
            "particle seeded {offset} away from its attractor"
        );
    }
}

#[test]
fn seeding_is_deterministic_given_seed() {
    let p = test_params();

    let mut rng_a = StdRng::seed_from_u64(p.seed);
    let mut sys_a = System::empty();
    seed_population(&mut sys_a, &p, &mut rng_a, 100, 3);

    let mut rng_b = StdRng::seed_from_u64(p.seed);
    let mut sys_b = System::empty();
    seed_population(&mut sys_b, &p, &mut rng_b, 100, 3);

    for (a, b) in sys_a.particles.iter().zip(sys_b.particles.iter()) {
        assert_eq!(a.x, b.x);
        assert_eq!(a.v, b.v);
        assert_eq!(a.id, b.id);
    }
    for (a, b) in sys_a.attractors.iter().zip(sys_b.attractors.iter()) {
        assert_eq!(a.x, b.x);
        assert_eq!(a.v, b.v);
    }
}

#[test]
fn growing_preserves_already_seeded_bodies() {
    let p = test_params();
    let mut rng = StdRng::seed_from_u64(p.seed);
    let mut sys = System::empty();
    seed_population(&mut sys, &p, &mut rng, 10, 2);

    let snapshot = sys.clone();
    seed_population(&mut sys, &p, &mut rng, 20, 2);

    assert_eq!(sys.particles.len(), 20);
    for (before, after) in snapshot.particles.iter().zip(sys.particles.iter()) {
        assert_eq!(before.x, after.x);
        assert_eq!(before.v, after.v);
    }
    for (before, after) in snapshot.attractors.iter().zip(sys.attractors.iter()) {
        assert_eq!(before.x, after.x);
    }
}

// ==================================================================================
// Force / integrator tests
// ==================================================================================

#[test]
fn attractor_pair_gets_equal_and_opposite_kicks() {
    let p = test_params();
    let mut sys = two_attractor_system(100.0);
    let forces = gravity_set(&p);

    euler_integrator(&mut sys, &forces, &p);

    let v0 = sys.attractors[0].v;
    let v1 = sys.attractors[1].v;

    // momentum symmetry
    assert!((v0 + v1).norm() < 1e-12, "net momentum not zero: {:?}", v0 + v1);

    // closed form: |v| = G * m_bh * d / (d^2)^1.5 * dt for d = 100
    let d = 100.0_f64;
    let expected = p.G * p.m_bh * d / (d * d).powf(1.5) * p.dt;
    assert!((v0.norm() - expected).abs() < 1e-12 * expected.max(1.0));

    // each pulled toward the other
    assert!(v0.x > 0.0);
    assert!(v1.x < 0.0);
}

#[test]
fn squared_separation_floor_activates_below_r_min() {
    let p = test_params();
    let sys = two_attractor_system(0.2); // d^2 = 0.04, under the 0.1 floor
    let forces = gravity_set(&p);

    let mut acc = vec![NVec3::zeros(); 2];
    forces.accumulate_attractor_accels(&sys, &mut acc);

    let expected = p.G * p.m_bh * 0.2 / p.r_min.powf(1.5);
    assert!((acc[0].norm() - expected).abs() < 1e-9 * expected);
}

#[test]
fn near_zero_separation_does_not_blow_up() {
    let p = test_params();
    let sys = two_attractor_system(1e-9);
    let forces = gravity_set(&p);

    let mut acc = vec![NVec3::zeros(); 2];
    forces.accumulate_attractor_accels(&sys, &mut acc);

    assert!(acc[0].norm().is_finite());
    assert!(acc[0].norm() < 1e9, "softening failed; acceleration too large");
}

#[test]
fn particles_never_pull_attractors() {
    let p = test_params();
    let mut rng = StdRng::seed_from_u64(p.seed);
    let mut sys = System::empty();
    seed_population(&mut sys, &p, &mut rng, 100, 1);
    let forces = gravity_set(&p);

    let bh_before = sys.attractors[0].clone();
    euler_integrator(&mut sys, &forces, &p);

    // a lone attractor feels nothing, however many particles orbit it,
    // so it keeps its seeded drift exactly
    assert_eq!(sys.attractors[0].v, bh_before.v);

    // while the particles themselves were kicked and moved
    assert!(sys.t > 0.0);
    assert!(sys.particles[0].x != NVec3::zeros());
}

// ==================================================================================
// Camera / projection tests
// ==================================================================================

#[test]
fn perspective_clips_at_the_focal_plane() {
    let cam = Camera::new(NVec3::new(1.0, 2.0, 3.0), Frame::identity(), 10.0);
    let proj = Projection::Perspective { z_scale: 1.0 };
    let display = Display::new(0.0, 0.0);

    // just past the focal plane: visible, finite
    let ahead = cam.pos + cam.view.z * (cam.focal + 1.0);
    let pp = cam.project(ahead, &proj, &display).expect("should be visible");
    assert!(pp.depth > cam.focal);
    assert!(pp.x.is_finite() && pp.y.is_finite());

    // at the camera: clipped
    assert!(cam.project(cam.pos, &proj, &display).is_none());

    // exactly on the focal plane: clipped
    let on_plane = cam.pos + cam.view.z * cam.focal;
    assert!(cam.project(on_plane, &proj, &display).is_none());
}

#[test]
fn orthographic_maps_origin_to_display_center() {
    let cam = Camera::new(NVec3::zeros(), Frame::identity(), 1000.0);
    let proj = Projection::Orthographic { scale: 2.0 };
    let display = Display::new(800.0, 600.0);

    let pp = cam.project(NVec3::zeros(), &proj, &display).unwrap();
    assert_eq!(pp.x, 400.0);
    assert_eq!(pp.y, 300.0);

    // no clipping, even behind the camera
    let behind = NVec3::new(10.0, 5.0, -20.0);
    let pp = cam.project(behind, &proj, &display).unwrap();
    assert_eq!(pp.x, 400.0 + 2.0 * 10.0);
    assert_eq!(pp.y, 300.0 + 2.0 * 5.0);
    assert_eq!(pp.depth, -20.0);
}

#[test]
fn translate_follows_the_rotated_basis() {
    let mut cam = Camera::new(NVec3::zeros(), Frame::identity(), 10.0);
    cam.translate(1.0, 2.0, 3.0);
    assert!((cam.pos - NVec3::new(1.0, 2.0, 3.0)).norm() < 1e-12);

    // quarter yaw turn swings the look axis onto -X
    let mut cam = Camera::new(NVec3::zeros(), Frame::identity(), 10.0);
    cam.rotate(std::f64::consts::FRAC_PI_2, 0.0);
    cam.translate(0.0, 0.0, 1.0);
    assert!((cam.pos - NVec3::new(-1.0, 0.0, 0.0)).norm() < 1e-12);
}

#[test]
fn chase_eases_with_square_root_steps() {
    let mut cam = Camera::new(NVec3::zeros(), Frame::identity(), 10.0);
    let chase = Chase {
        target: 0,
        distance: 10.0,
    };

    // goal is (100, 0, 0): the target minus distance along the look axis
    cam.chase_toward(NVec3::new(100.0, 0.0, 10.0), &chase);

    assert!((cam.pos.x - 10.0).abs() < 1e-12); // sqrt(100)
    assert!(cam.pos.y.abs() < 1e-12);
    assert!(cam.pos.z.abs() < 1e-12);
}

// ==================================================================================
// Engine tests
// ==================================================================================

#[test]
fn initialize_rejects_invalid_configuration() {
    let mut cfg = test_config();
    cfg.parameters.dt = 0.0;
    assert!(EngineState::initialize(cfg).is_err());

    let mut cfg = test_config();
    cfg.parameters.attractor_num = 0;
    assert!(EngineState::initialize(cfg).is_err());

    let mut cfg = test_config();
    cfg.parameters.G = -1.0;
    assert!(EngineState::initialize(cfg).is_err());

    let mut cfg = test_config();
    cfg.camera.focal_length = 0.0;
    assert!(EngineState::initialize(cfg).is_err());

    let mut cfg = test_config();
    cfg.camera.position = vec![0.0, 0.0];
    assert!(EngineState::initialize(cfg).is_err());
}

#[test]
fn initialize_is_deterministic_given_seed() {
    let a = EngineState::initialize(test_config()).unwrap();
    let b = EngineState::initialize(test_config()).unwrap();

    for (pa, pb) in a.system.particles.iter().zip(b.system.particles.iter()) {
        assert_eq!(pa.x, pb.x);
        assert_eq!(pa.v, pb.v);
    }
}

#[test]
fn step_is_dropped_while_one_is_in_flight() {
    let mut engine = EngineState::initialize(test_config()).unwrap();

    engine.in_flight = true;
    engine.step();
    assert_eq!(engine.system.t, 0.0, "tick should have been dropped");

    engine.in_flight = false;
    engine.step();
    assert!((engine.system.t - engine.parameters.dt).abs() < 1e-15);
}

#[test]
fn every_seeded_body_projects_from_the_default_pose() {
    let engine = EngineState::initialize(test_config()).unwrap();

    let points: Vec<_> = engine.project().collect();
    assert_eq!(
        points.len(),
        engine.system.particles.len() + engine.system.attractors.len()
    );

    // particles first, then attractors
    assert_eq!(points[0].kind, BodyKind::Particle);
    assert_eq!(points.last().unwrap().kind, BodyKind::Attractor);

    for pt in &points {
        assert!(pt.radius >= 1.0);
        assert!(pt.color_index < galaxysim::COLORMAP_QUANTIZE);
        assert!(pt.depth > engine.camera.focal);
    }
}

#[test]
fn selection_toggles_the_chase_target() {
    let mut engine = EngineState::initialize(test_config()).unwrap();

    // click exactly on attractor 0's projection
    let bh = engine.system.attractors[0].x;
    let pp = engine
        .camera
        .project(bh, &engine.projection, &engine.display)
        .unwrap();

    assert_eq!(engine.on_select_point(pp.x, pp.y), Some(0));
    let chase = engine.chase.expect("chase should be set");
    assert_eq!(chase.target, 0);
    assert!(chase.distance > engine.camera.focal + 1.0 - 1e-9);

    // second click on the same target clears it
    assert_eq!(engine.on_select_point(pp.x, pp.y), None);
    assert!(engine.chase.is_none());
}

#[test]
fn wheel_shortens_chase_distance_down_to_the_focal_plane() {
    let mut engine = EngineState::initialize(test_config()).unwrap();
    let focal = engine.camera.focal;

    engine.chase = Some(Chase {
        target: 0,
        distance: focal + 50.0,
    });

    engine.on_wheel(10.0);
    assert_eq!(engine.chase.unwrap().distance, focal + 40.0);

    engine.on_wheel(1e6);
    assert_eq!(engine.chase.unwrap().distance, focal + 1.0);
}

#[test]
fn wheel_dollies_the_free_camera() {
    let mut engine = EngineState::initialize(test_config()).unwrap();
    let before = engine.camera.pos;

    engine.on_wheel(25.0);
    let moved = engine.camera.pos - before;
    assert!((moved - engine.camera.view.z * 25.0).norm() < 1e-12);
}

#[test]
fn resize_applies_at_the_next_step() {
    let mut engine = EngineState::initialize(test_config()).unwrap();
    assert_eq!(engine.system.particles.len(), 50);
    assert_eq!(engine.system.attractors.len(), 3);

    engine.chase = Some(Chase {
        target: 2,
        distance: 1500.0,
    });

    engine.resize_population(20, 2).unwrap();

    // staged, not yet applied
    assert_eq!(engine.system.particles.len(), 50);

    engine.step();
    assert_eq!(engine.system.particles.len(), 20);
    assert_eq!(engine.system.attractors.len(), 2);

    // the chased attractor no longer exists
    assert!(engine.chase.is_none());
}

#[test]
fn resize_rejects_an_empty_attractor_population() {
    let mut engine = EngineState::initialize(test_config()).unwrap();
    assert!(engine.resize_population(100, 0).is_err());
}

#[test]
fn display_recenters_on_resize() {
    let mut engine = EngineState::initialize(test_config()).unwrap();
    engine.on_resize(1920.0, 1080.0);
    assert_eq!(engine.display.offset_x, 960.0);
    assert_eq!(engine.display.offset_y, 540.0);
}
