//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! scenario. A scenario consists of:
//!
//! - [`EngineConfig`]     – projection mode, palette, color mode
//! - [`ParametersConfig`] – numerical parameters and physical constants
//! - [`CameraConfig`]     – starting camera pose and projection constants
//! - [`DisplayConfig`]    – initial screen size
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//! An example scenario YAML matching these types:
//!
//! ```yaml
//! engine:
//!   projection: "perspective"   # or "orthographic"
//!   palette: "bluesea"          # or "normal"
//!   color_mode: "identity"      # or "velocity"
//!
//! parameters:
//!   particle_num: 1000
//!   attractor_num: 3
//!   cosmo_size: 500.0           # attractor scatter cube side
//!   galaxy_size: 100.0          # satellite disk diameter
//!   galaxy_center_radius: 25.0  # bulge radius
//!   G: 6.67259e-11              # gravitational constant
//!   attractor_mass: 1.0e14
//!   dt: 0.1                     # fixed step size
//!   r_min: 0.1                  # softening floor on squared separation
//!   vel_max_bh: 12.0            # attractor drift velocity range
//!   seed: 42                    # deterministic seed
//!
//! camera:
//!   focal_length: 1000.0
//!   z_scale: 1.0
//!   view_scale: 1.0             # orthographic magnification
//!   rotation_degree: 3600.0     # drag pixels per full turn
//!   core_size: 8.0              # attractor screen radius cap
//!   position: [0.0, 0.0, -2000.0]
//!
//! display:
//!   width: 1024.0
//!   height: 768.0
//! ```
//!
//! Validation is fail-fast: a scenario with a non-positive step size, an
//! empty attractor population or a degenerate projection constant is
//! rejected at load, never clamped. Physics-level degeneracies at runtime
//! are a separate policy and are floored silently.

use anyhow::{bail, Result};
use serde::Deserialize;

/// Which projection maps world to screen
/// `projection: "perspective"` or `projection: "orthographic"`
#[derive(Deserialize, Debug, Clone)]
pub enum ProjectionConfig {
    #[serde(rename = "perspective")] // Pinhole projection with near-plane clip at the focal length
    Perspective,

    #[serde(rename = "orthographic")] // Flat pseudo-3D view, no clipping, fixed radii
    Orthographic,
}

/// Which precomputed palette is active
#[derive(Deserialize, Debug, Clone)]
pub enum PaletteConfig {
    #[serde(rename = "normal")] // Two-segment blue -> green -> red ramp
    Normal,

    #[serde(rename = "bluesea")] // Single-segment blue ramp
    Bluesea,
}

/// How bodies pick their palette index
#[derive(Deserialize, Debug, Clone)]
pub enum ColorModeConfig {
    #[serde(rename = "identity")] // Stable hash of the seeding attractor id
    Identity,

    #[serde(rename = "velocity")] // Index proportional to speed
    Velocity,
}

/// High-level engine configuration
#[derive(Deserialize, Debug)]
pub struct EngineConfig {
    pub projection: ProjectionConfig,
    pub palette: PaletteConfig,
    pub color_mode: ColorModeConfig,
}

/// Global numerical and physical parameters for a scenario
#[allow(non_snake_case)]
#[derive(Deserialize, Debug, Clone)]
pub struct ParametersConfig {
    pub particle_num: usize,       // particle population
    pub attractor_num: usize,      // attractor population, at least 1
    pub cosmo_size: f64,           // side of the attractor scatter cube
    pub galaxy_size: f64,          // satellite disk diameter
    pub galaxy_center_radius: f64, // in-plane bulge radius
    pub G: f64,                    // gravitational constant
    pub attractor_mass: f64,       // mass shared by every attractor
    pub dt: f64,                   // time step size
    pub r_min: f64,                // softening floor on squared separation
    pub vel_max_bh: f64,           // attractor drift velocity range per axis
    pub seed: u64,                 // deterministic seed to make runs reproducable
}

/// Starting camera pose and projection constants
#[derive(Deserialize, Debug, Clone)]
pub struct CameraConfig {
    pub focal_length: f64,   // pinhole projection distance
    pub z_scale: f64,        // perspective depth compression
    pub view_scale: f64,     // orthographic magnification
    pub rotation_degree: f64, // drag pixels per full turn
    pub core_size: f64,      // attractor screen radius cap
    pub position: Vec<f64>,  // initial world position, three components
    pub yaw: Option<f64>,    // initial view rotation, radians
    pub pitch: Option<f64>,
}

/// Initial screen size; the viewer updates it on window resize
#[derive(Deserialize, Debug, Clone)]
pub struct DisplayConfig {
    pub width: f64,
    pub height: f64,
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug)]
pub struct ScenarioConfig {
    pub engine: EngineConfig,
    pub parameters: ParametersConfig,
    pub camera: CameraConfig,
    pub display: DisplayConfig,
}

impl ScenarioConfig {
    /// Reject configurations the engine could not run
    /// Invalid configuration fails here, it is never silently clamped
    pub fn validate(&self) -> Result<()> {
        let p = &self.parameters;
        if p.attractor_num == 0 {
            bail!("attractor_num must be at least 1");
        }
        if p.dt <= 0.0 {
            bail!("dt must be positive, got {}", p.dt);
        }
        if p.G <= 0.0 {
            bail!("G must be positive, got {}", p.G);
        }
        if p.attractor_mass <= 0.0 {
            bail!("attractor_mass must be positive, got {}", p.attractor_mass);
        }
        if p.r_min <= 0.0 {
            bail!("r_min must be positive, got {}", p.r_min);
        }
        if p.cosmo_size <= 0.0 || p.galaxy_size <= 0.0 || p.galaxy_center_radius <= 0.0 {
            bail!("cosmo_size, galaxy_size and galaxy_center_radius must be positive");
        }

        let c = &self.camera;
        if c.focal_length <= 0.0 {
            bail!("focal_length must be positive, got {}", c.focal_length);
        }
        if c.z_scale <= 0.0 || c.view_scale <= 0.0 {
            bail!("z_scale and view_scale must be positive");
        }
        if c.rotation_degree <= 0.0 {
            bail!("rotation_degree must be positive, got {}", c.rotation_degree);
        }
        if c.core_size < 1.0 {
            bail!("core_size must be at least 1, got {}", c.core_size);
        }
        if c.position.len() != 3 {
            bail!("camera position needs exactly three components");
        }

        let d = &self.display;
        if d.width <= 0.0 || d.height <= 0.0 {
            bail!("display width and height must be positive");
        }

        Ok(())
    }
}
