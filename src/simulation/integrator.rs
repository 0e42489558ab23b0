//! Fixed-step time integrator for the galaxy system
//!
//! Semi-implicit Euler: accelerations are evaluated at the current
//! positions, applied to velocities, and the new velocities advance the
//! positions. Particles are advanced first, then attractors; both passes
//! read attractor positions from before this step

use super::forces::AccelSet;
use super::params::Parameters;
use super::states::System;
use super::vecmath::NVec3;

/// Advance the system by one step of `params.dt`
///
/// Ordering contract:
/// 1. every particle's acceleration is computed from the pre-step attractor
///    positions,
/// 2. particle velocities are kicked, new positions are staged and then
///    committed in a second pass,
/// 3. the attractor pass repeats 1-2 against the pre-step attractor
///    positions (position commits happen after the whole force pass).
///
/// No body ever reads another body's mid-step position.
pub fn euler_integrator(sys: &mut System, forces: &AccelSet, params: &Parameters) {
    let dt = params.dt;

    // Particle pass
    let n = sys.particles.len();
    if n > 0 {
        let mut acc = vec![NVec3::zeros(); n];
        forces.accumulate_particle_accels(&*sys, &mut acc);

        // Kick: v += a dt, then stage x + v dt with the updated velocity
        let mut x_new = vec![NVec3::zeros(); n];
        for (i, (p, a)) in sys.particles.iter_mut().zip(acc.iter()).enumerate() {
            p.v += *a * dt;
            x_new[i] = p.x + p.v * dt;
        }

        // Commit staged positions
        for (p, x) in sys.particles.iter_mut().zip(x_new.iter()) {
            p.x = *x;
        }
    }

    // Attractor pass, forces from the positions all of this tick saw
    let m = sys.attractors.len();
    if m > 0 {
        let mut acc = vec![NVec3::zeros(); m];
        forces.accumulate_attractor_accels(&*sys, &mut acc);

        let mut x_new = vec![NVec3::zeros(); m];
        for (i, (bh, a)) in sys.attractors.iter_mut().zip(acc.iter()).enumerate() {
            bh.v += *a * dt;
            x_new[i] = bh.x + bh.v * dt;
        }

        for (bh, x) in sys.attractors.iter_mut().zip(x_new.iter()) {
            bh.x = *x;
        }
    }

    // Increment the system time by one full step
    sys.t += dt;
}
