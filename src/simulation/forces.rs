//! Force / acceleration contributors for the galaxy engine
//!
//! Only attractors act as gravity sources: particles feel every attractor
//! but not each other, and attractors feel each other. Terms implement
//! [`Acceleration`] and their contributions are summed per body

use crate::simulation::states::System;
use crate::simulation::vecmath::NVec3;

/// Collection of acceleration terms
/// Each term implements [`Acceleration`] and their contributions are summed
/// into a single acceleration vector per body
pub struct AccelSet {
    terms: Vec<Box<dyn Acceleration + Send + Sync>>,
}

impl AccelSet {
    /// Create an empty acceleration set
    pub fn new() -> Self {
        Self {
            terms: Vec::new(),
        }
    }

    /// Add an acceleration term
    pub fn with(mut self, term: impl Acceleration + Send + Sync + 'static) -> Self {
        self.terms.push(Box::new(term));
        self
    }

    /// Compute total accelerations for all particles in `sys`
    /// - `out[n]` will be set to the sum of contributions from all terms
    pub fn accumulate_particle_accels(&self, sys: &System, out: &mut [NVec3]) {
        // Zero buffer
        for a in out.iter_mut() {
            *a = NVec3::zeros();
        }
        // Iterate over all acceleration contributors
        for term in &self.terms {
            term.particle_acceleration(sys, out);
        }
    }

    /// Compute total accelerations for all attractors in `sys`
    /// - `out[i]` will be set to the sum of contributions from all terms
    pub fn accumulate_attractor_accels(&self, sys: &System, out: &mut [NVec3]) {
        for a in out.iter_mut() {
            *a = NVec3::zeros();
        }
        for term in &self.terms {
            term.attractor_acceleration(sys, out);
        }
    }
}

/// Trait for acceleration sources operating on [`System`]
/// Implementations add their contribution into `out[i]` for each body of
/// the respective population
pub trait Acceleration {
    fn particle_acceleration(&self, sys: &System, out: &mut [NVec3]);
    fn attractor_acceleration(&self, sys: &System, out: &mut [NVec3]);
}

/// Newtonian point-mass gravity from the attractor population
///
/// The squared separation is floored at `r_min` before the 3/2 power, so
/// the floor only activates when `|d|^2 < r_min`. This is not Plummer
/// softening; the floor replaces the squared distance outright
#[allow(non_snake_case)]
pub struct AttractorGravity {
    pub G: f64, // gravitional constant
    pub m_bh: f64, // mass of every attractor
    pub r_min: f64, // minimum squared separation
}

impl AttractorGravity {
    /// Acceleration at `pos` from all attractors, skipping index `skip`
    /// All attractors are summed before scaling by `G * m_bh`; no culling,
    /// no early termination
    fn accel_at(&self, sys: &System, pos: NVec3, skip: Option<usize>) -> NVec3 {
        let mut f = NVec3::zeros();
        for (i, bh) in sys.attractors.iter().enumerate() {
            if Some(i) == skip {
                continue; // don't self-interact
            }

            // r points from the target toward the attractor, so the pull
            // is along +r
            let r = bh.x - pos;

            // Squared separation, floored at r_min
            let d2 = r.dot(&r).max(self.r_min);

            // 1 / d^3 for the point-mass law a = r / |r|^3
            let inv_r = d2.sqrt().recip();
            let inv_r3 = inv_r * inv_r * inv_r;

            f += inv_r3 * r;
        }
        self.G * self.m_bh * f
    }
}

impl Acceleration for AttractorGravity {
    fn particle_acceleration(&self, sys: &System, out: &mut [NVec3]) {
        for (n, p) in sys.particles.iter().enumerate() {
            out[n] += self.accel_at(sys, p.x, None);
        }
    }

    fn attractor_acceleration(&self, sys: &System, out: &mut [NVec3]) {
        for i in 0..sys.attractors.len() {
            out[i] += self.accel_at(sys, sys.attractors[i].x, Some(i));
        }
    }
}
