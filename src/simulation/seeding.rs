//! Orbit-seeded initial conditions
//!
//! Attractors are scattered through a cube with random drift velocities and
//! a private random "torque frame" that fixes the plane of their satellite
//! disk. Particles are dealt round-robin across attractors and placed on
//! randomized disk orbits with the circular-orbit speed for their radius,
//! which is what produces the spiral-galaxy look
//!
//! Seeding only ever fills slots past the current population length, so a
//! grow leaves every existing body untouched

use std::f64::consts::{FRAC_PI_2, TAU};

use rand::rngs::StdRng;
use rand::Rng;

use crate::simulation::params::Parameters;
use crate::simulation::states::{Attractor, Particle, System};
use crate::simulation::vecmath::{normalize_guarded, Frame, NVec3};

/// Thin-disk jitter as a fraction of `galaxy_size`, outside the bulge
const DISK_THICKNESS: f64 = 0.0625;

/// Grow both populations up to the requested counts, seeding only the new
/// tail. Attractors are seeded first so new particles have orbits to join
pub fn seed_population(
    sys: &mut System,
    params: &Parameters,
    rng: &mut StdRng,
    particle_target: usize,
    attractor_target: usize,
) {
    seed_attractors(sys, params, rng, attractor_target);
    seed_particles(sys, params, rng, particle_target);
}

/// Seed attractor slots `sys.attractors.len()..target`
pub fn seed_attractors(sys: &mut System, params: &Parameters, rng: &mut StdRng, target: usize) {
    for _ in sys.attractors.len()..target {
        let x = NVec3::new(
            params.cosmo_size * (rng.gen::<f64>() - 0.5),
            params.cosmo_size * (rng.gen::<f64>() - 0.5),
            params.cosmo_size * (rng.gen::<f64>() - 0.5),
        );
        let v = NVec3::new(
            params.vel_max_bh * (rng.gen::<f64>() - 0.5),
            params.vel_max_bh * (rng.gen::<f64>() - 0.5),
            params.vel_max_bh * (rng.gen::<f64>() - 0.5),
        );
        sys.attractors.push(Attractor {
            x,
            v,
            spin: random_spin_frame(rng),
        });
    }
}

/// Seed particle slots `sys.particles.len()..target` on disk orbits
pub fn seed_particles(sys: &mut System, params: &Parameters, rng: &mut StdRng, target: usize) {
    let attractor_num = sys.attractors.len();

    for n in sys.particles.len()..target {
        // Deal particles round-robin across the attractors
        let id = n % attractor_num;
        let bh = &sys.attractors[id];

        // Disk-local offset: uniform in the disk plane, z from the
        // bulge/thin-disk rule below
        let gx = params.galaxy_size * (rng.gen::<f64>() - 0.5);
        let gy = params.galaxy_size * (rng.gen::<f64>() - 0.5);
        let r_xy = (gx * gx + gy * gy).sqrt();
        let gz = if r_xy > params.galaxy_center_radius {
            // Thin disk past the bulge
            DISK_THICKNESS * params.galaxy_size * (rng.gen::<f64>() - 0.5)
        } else {
            // Thick bulge near the center, tapering with a cosine profile
            (FRAC_PI_2 * r_xy / params.galaxy_center_radius).cos()
                * params.galaxy_center_radius
                * (rng.gen::<f64>() - 0.5)
        };

        // Into world space through the attractor's torque frame
        let r = gx * bh.spin.x + gy * bh.spin.y + gz * bh.spin.z;
        let r_abs = r.norm();

        // Circular-orbit speed from balancing centripetal and gravitational
        // acceleration. r_abs == 0 divides by zero; the draws above never
        // land exactly on the attractor
        let speed = (params.G * params.m_bh / r_abs).sqrt();
        let dir = normalize_guarded(bh.spin.z.cross(&r));

        sys.particles.push(Particle {
            x: bh.x + r,
            v: speed * dir + bh.v,
            id,
        });
    }
}

/// Random orthonormal frame: the identity frame put through three
/// independent yaw/pitch rotations, orthonormalized after each
fn random_spin_frame(rng: &mut StdRng) -> Frame {
    let mut frame = Frame::identity();
    for _ in 0..3 {
        let yaw = TAU * rng.gen::<f64>();
        let pitch = TAU * rng.gen::<f64>();
        frame = frame.rotated(yaw, pitch);
    }
    frame
}
