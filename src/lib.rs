pub mod simulation;
pub mod configuration;
pub mod visualization;
pub mod benchmark;

pub use simulation::states::{Particle, Attractor, System};
pub use simulation::vecmath::{Frame, NVec3, normalize_guarded, rotate_yx};
pub use simulation::params::Parameters;
pub use simulation::forces::{Acceleration, AccelSet, AttractorGravity};
pub use simulation::integrator::euler_integrator;
pub use simulation::seeding::seed_population;
pub use simulation::camera::{Camera, Chase, Display, Projection, ProjectedPoint};
pub use simulation::colormap::{Colormap, ColorMode, Palette, Rgb, COLORMAP_QUANTIZE};
pub use simulation::engine::{BodyKind, EngineState, PointerButton, RenderPoint};

pub use configuration::config::{
    ColorModeConfig, CameraConfig, DisplayConfig, EngineConfig, PaletteConfig, ParametersConfig,
    ProjectionConfig, ScenarioConfig,
};

pub use visualization::galaxy_vis::run_galaxy;

pub use benchmark::benchmark::{bench_forces, bench_step};
