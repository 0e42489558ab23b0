//! Numerical and physical parameters for the simulation
//!
//! `Parameters` holds runtime settings:
//! - gravitational constant and attractor mass (`G`, `m_bh`),
//! - softening floor on squared separation (`r_min`) and step size (`dt`),
//! - seeding geometry (`cosmo_size`, `galaxy_size`, `galaxy_center_radius`),
//! - attractor drift speed range and random seed

#[allow(non_snake_case)]
#[derive(Debug, Clone)]
pub struct Parameters {
    pub G: f64, // gravitational constant
    pub m_bh: f64, // mass shared by every attractor
    pub r_min: f64, // floor on squared separation in the force law
    pub dt: f64, // step size
    pub cosmo_size: f64, // side of the cube attractors are scattered in
    pub galaxy_size: f64, // diameter of each satellite disk
    pub galaxy_center_radius: f64, // in-plane radius of the thick central bulge
    pub vel_max_bh: f64, // attractor drift velocity range per axis
    pub seed: u64, // deterministic seed to make runs reproducable
}
