//! Core state types for the galaxy simulation.
//!
//! Two body populations share the system:
//! - `Particle`: massless test bodies, pulled by attractors only
//! - `Attractor`: massive bodies ("black holes") that pull each other and
//!   every particle
//!
//! The system holds both collections and the current simulation time `t`.

use crate::simulation::vecmath::{Frame, NVec3};

#[derive(Debug, Clone)]
pub struct Particle {
    pub x: NVec3, // position
    pub v: NVec3, // velocity
    pub id: usize, // attractor this particle was seeded around
}

#[derive(Debug, Clone)]
pub struct Attractor {
    pub x: NVec3, // position
    pub v: NVec3, // velocity
    pub spin: Frame, // orientation of this attractor's satellite disk
}

#[derive(Debug, Clone)]
pub struct System {
    pub particles: Vec<Particle>,
    pub attractors: Vec<Attractor>,
    pub t: f64, // time
}

impl System {
    /// Empty system at t = 0; populations are filled in by the seeder
    pub fn empty() -> Self {
        Self {
            particles: Vec::new(),
            attractors: Vec::new(),
            t: 0.0,
        }
    }
}
