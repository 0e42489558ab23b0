//! Build a fully-initialized engine from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces the runtime
//! [`EngineState`] bundle:
//! - numerical parameters ([`Parameters`](crate::simulation::params::Parameters))
//! - seeded system state (attractors plus orbiting particles at t = 0)
//! - active force set ([`AccelSet`])
//! - camera, projection, palettes and input-facing flags
//!
//! Validation happens before any state is built, so a bad scenario never
//! produces a half-constructed engine

use anyhow::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::configuration::config::{
    ColorModeConfig, PaletteConfig, ProjectionConfig, ScenarioConfig,
};
use crate::simulation::camera::{Camera, Display, Projection};
use crate::simulation::colormap::{ColorMode, Colormap, Palette};
use crate::simulation::engine::EngineState;
use crate::simulation::forces::{AccelSet, AttractorGravity};
use crate::simulation::params::Parameters;
use crate::simulation::seeding::seed_population;
use crate::simulation::states::System;
use crate::simulation::vecmath::{Frame, NVec3};

impl EngineState {
    /// Validate the scenario and build the runtime engine
    pub fn initialize(cfg: ScenarioConfig) -> Result<Self> {
        cfg.validate()?;

        // Parameters (runtime) from ParametersConfig
        let p_cfg = &cfg.parameters;
        let parameters = Parameters {
            G: p_cfg.G,
            m_bh: p_cfg.attractor_mass,
            r_min: p_cfg.r_min,
            dt: p_cfg.dt,
            cosmo_size: p_cfg.cosmo_size,
            galaxy_size: p_cfg.galaxy_size,
            galaxy_center_radius: p_cfg.galaxy_center_radius,
            vel_max_bh: p_cfg.vel_max_bh,
            seed: p_cfg.seed,
        };

        // All randomness flows through this one generator, so a run is
        // reproducible given the seed
        let mut rng = StdRng::seed_from_u64(parameters.seed);

        // System state: seed attractors and their orbiting particles
        let mut system = System::empty();
        seed_population(
            &mut system,
            &parameters,
            &mut rng,
            p_cfg.particle_num,
            p_cfg.attractor_num,
        );

        // Forces: construct an AccelSet and register attractor gravity
        let forces = AccelSet::new().with(AttractorGravity {
            G: parameters.G,
            m_bh: parameters.m_bh,
            r_min: parameters.r_min,
        });

        // Camera pose from config; the optional yaw/pitch pre-rotate the
        // identity frame through the same path interactive rotation uses
        let c_cfg = &cfg.camera;
        let pos = NVec3::new(c_cfg.position[0], c_cfg.position[1], c_cfg.position[2]);
        let view = Frame::identity().rotated(
            c_cfg.yaw.unwrap_or(0.0),
            c_cfg.pitch.unwrap_or(0.0),
        );
        let camera = Camera::new(pos, view, c_cfg.focal_length);

        let projection = match cfg.engine.projection {
            ProjectionConfig::Perspective => Projection::Perspective {
                z_scale: c_cfg.z_scale,
            },
            ProjectionConfig::Orthographic => Projection::Orthographic {
                scale: c_cfg.view_scale,
            },
        };

        let colormap = Colormap::new(match cfg.engine.palette {
            PaletteConfig::Normal => Palette::Normal,
            PaletteConfig::Bluesea => Palette::Bluesea,
        });
        let color_mode = match cfg.engine.color_mode {
            ColorModeConfig::Identity => ColorMode::Identity,
            ColorModeConfig::Velocity => ColorMode::Velocity,
        };

        Ok(Self {
            system,
            parameters,
            forces,
            camera,
            projection,
            display: Display::new(cfg.display.width, cfg.display.height),
            colormap,
            color_mode,
            rot_degree: c_cfg.rotation_degree,
            core_size: c_cfg.core_size,
            chase: None,
            in_flight: false,
            pending_resize: None,
            rng,
        })
    }
}
