pub mod galaxy_vis;
