use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::simulation::forces::{AccelSet, AttractorGravity};
use crate::simulation::integrator::euler_integrator;
use crate::simulation::params::Parameters;
use crate::simulation::seeding::seed_population;
use crate::simulation::states::System;
use crate::simulation::vecmath::NVec3;

/// Shared parameter template for the benchmark systems
fn make_params() -> Parameters {
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

/// Helper to build a seeded system of the given size
fn make_system(particle_num: usize, attractor_num: usize, params: &Parameters) -> System {
    let mut rng = StdRng::seed_from_u64(params.seed);
    let mut sys = System::empty();
    seed_population(&mut sys, params, &mut rng, particle_num, attractor_num);
    sys
}

fn gravity_set(params: &Parameters) -> AccelSet {
    AccelSet::new().with(AttractorGravity {
        G: params.G,
        m_bh: params.m_bh,
        r_min: params.r_min,
    })
}

/// Time one brute-force accumulation pass over a range of population sizes
pub fn bench_forces() {
    let particle_counts = [1000, 2000, 4000, 8000, 16000, 32000];
    let attractor_num = 3;

    let params = make_params();
    let forces = gravity_set(&params);

    for n in particle_counts {
        let sys = make_system(n, attractor_num, &params);
        let mut out = vec![NVec3::zeros(); n];

        // Warm up
        forces.accumulate_particle_accels(&sys, &mut out);

        let t0 = Instant::now();
        forces.accumulate_particle_accels(&sys, &mut out);
        let dt_forces = t0.elapsed().as_secs_f64();

        println!("N = {n:6}, force pass = {dt_forces:8.6} s");
    }
}

/// Time full integration steps over a range of population sizes
/// Paste output directly into a spreadsheet to graph
pub fn bench_step() {
    println!("N,step_ms");

    let attractor_num = 3;
    let steps = 5;

    let params = make_params();
    let forces = gravity_set(&params);

    for n in (1000..=16000).step_by(1000) {
        let mut sys = make_system(n, attractor_num, &params);

        // Warm-up one step
        euler_integrator(&mut sys, &forces, &params);

        let t0 = Instant::now();
        for _ in 0..steps {
            euler_integrator(&mut sys, &forces, &params);
        }
        let ms_step = t0.elapsed().as_secs_f64() * 1000.0 / steps as f64;

        println!("{n},{ms_step:.6}");
    }
}
