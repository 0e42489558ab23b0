//! Runtime engine state and the per-tick operations
//!
//! `EngineState` is the whole simulation bundle: body state, parameters,
//! force set, camera, palettes and the input-facing flags. It is inserted
//! into Bevy as a `Resource` and driven by the viewer systems, but nothing
//! here depends on the renderer beyond that derive
//!
//! Tick discipline: `step` owns the body arrays while it runs; `project`
//! reads them afterwards. A step requested while one is in flight is
//! dropped, and population resizes are staged until the next step so no
//! pass ever iterates a half-seeded array

use anyhow::{bail, Result};
use bevy::prelude::Resource;
use rand::rngs::StdRng;

use std::f64::consts::TAU;

use crate::simulation::camera::{Camera, Chase, Display, Projection};
use crate::simulation::colormap::{self, ColorMode, Colormap};
use crate::simulation::forces::AccelSet;
use crate::simulation::integrator::euler_integrator;
use crate::simulation::params::Parameters;
use crate::simulation::seeding::seed_population;
use crate::simulation::states::System;

/// Which body population a render point came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    Particle,
    Attractor,
}

/// One visible body, ready for the external rasterizer
#[derive(Debug, Clone, Copy)]
pub struct RenderPoint {
    pub x: f64,
    pub y: f64,
    pub depth: f64,
    pub color_index: usize,
    pub radius: f64,
    pub kind: BodyKind,
}

/// Pointer button driving a drag gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    /// Rotates the view
    Primary,
    /// Pans the camera in the screen plane
    Middle,
}

/// Full runtime state for one simulation session
#[derive(Resource)]
pub struct EngineState {
    pub system: System,
    pub parameters: Parameters,
    pub forces: AccelSet,
    pub camera: Camera,
    pub projection: Projection,
    pub display: Display,
    pub colormap: Colormap,
    pub color_mode: ColorMode,
    pub rot_degree: f64, // drag pixels per full turn
    pub core_size: f64, // attractor screen radius cap
    pub chase: Option<Chase>,
    pub in_flight: bool, // a step is running; further ticks are dropped
    pub pending_resize: Option<(usize, usize)>, // applied at next step entry
    pub rng: StdRng,
}

impl EngineState {
    /// Advance the simulation by one `dt`
    ///
    /// Drops the tick outright if the previous one is still in flight.
    /// A staged population resize is applied first, then the integrator
    /// runs, then the chase camera eases toward its target
    pub fn step(&mut self) {
        if self.in_flight {
            return;
        }
        self.in_flight = true;

        if let Some((particles, attractors)) = self.pending_resize.take() {
            self.apply_resize(particles, attractors);
        }

        euler_integrator(&mut self.system, &self.forces, &self.parameters);

        if let Some(chase) = self.chase {
            if let Some(bh) = self.system.attractors.get(chase.target) {
                self.camera.chase_toward(bh.x, &chase);
            }
        }

        self.in_flight = false;
    }

    /// Screen-space primitives for every visible body, particles first
    /// then attractors. Lazy; recomputed each tick and consumed once
    pub fn project(&self) -> impl Iterator<Item = RenderPoint> + '_ {
        let particles = self.system.particles.iter().filter_map(move |p| {
            let pp = self.camera.project(p.x, &self.projection, &self.display)?;
            Some(RenderPoint {
                x: pp.x,
                y: pp.y,
                depth: pp.depth,
                color_index: self.color_index_for(p.id, p.v.norm()),
                radius: colormap::particle_radius(&self.projection, self.camera.focal, pp.depth),
                kind: BodyKind::Particle,
            })
        });

        let attractors = self
            .system
            .attractors
            .iter()
            .enumerate()
            .filter_map(move |(i, bh)| {
                let pp = self.camera.project(bh.x, &self.projection, &self.display)?;
                Some(RenderPoint {
                    x: pp.x,
                    y: pp.y,
                    depth: pp.depth,
                    color_index: self.color_index_for(i, bh.v.norm()),
                    radius: colormap::attractor_radius(
                        &self.projection,
                        self.camera.focal,
                        pp.depth,
                        self.core_size,
                    ),
                    kind: BodyKind::Attractor,
                })
            });

        particles.chain(attractors)
    }

    fn color_index_for(&self, id: usize, speed: f64) -> usize {
        match self.color_mode {
            ColorMode::Identity => colormap::identity_index(id),
            ColorMode::Velocity => colormap::velocity_index(speed),
        }
    }

    /// Pointer drag in screen pixels
    /// Primary rotates the view frame (pixels scaled by `rot_degree` into
    /// radians), middle pans the camera opposite the drag so the content
    /// follows the pointer
    pub fn on_pointer_drag(&mut self, dx: f64, dy: f64, button: PointerButton) {
        match button {
            PointerButton::Primary => {
                let yaw = TAU * dx / self.rot_degree;
                let pitch = TAU * dy / self.rot_degree;
                self.camera.rotate(yaw, pitch);
            }
            PointerButton::Middle => {
                self.camera.translate(-dx, -dy, 0.0);
            }
        }
    }

    /// Wheel / pinch dolly
    /// While chasing, this shortens the follow distance instead of moving
    /// the camera directly; the distance never drops to the focal plane
    pub fn on_wheel(&mut self, dz: f64) {
        match &mut self.chase {
            Some(chase) => {
                chase.distance = (chase.distance - dz).max(self.camera.focal + 1.0);
            }
            None => self.camera.translate(0.0, 0.0, dz),
        }
    }

    /// Display surface changed size; projected points re-center
    pub fn on_resize(&mut self, width: f64, height: f64) {
        self.display = Display::new(width, height);
    }

    /// Click selection: the nearest projected attractor becomes the chase
    /// target. Clicking the currently chased attractor clears the chase
    ///
    /// Returns the new target, or `None` when nothing was hit or the chase
    /// was toggled off
    pub fn on_select_point(&mut self, x: f64, y: f64) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (i, bh) in self.system.attractors.iter().enumerate() {
            if let Some(pp) = self.camera.project(bh.x, &self.projection, &self.display) {
                let d2 = (pp.x - x) * (pp.x - x) + (pp.y - y) * (pp.y - y);
                if best.map_or(true, |(_, best_d2)| d2 < best_d2) {
                    best = Some((i, d2));
                }
            }
        }
        let (target, _) = best?;

        match self.chase {
            Some(chase) if chase.target == target => {
                self.chase = None; // toggle off
                None
            }
            _ => {
                let distance = (self.system.attractors[target].x - self.camera.pos)
                    .norm()
                    .max(self.camera.focal + 1.0);
                self.chase = Some(Chase { target, distance });
                Some(target)
            }
        }
    }

    /// Stage a population resize for the next step
    /// Fails fast on a configuration that could never seed; the counts are
    /// not clamped silently
    pub fn resize_population(&mut self, particles: usize, attractors: usize) -> Result<()> {
        if attractors == 0 {
            bail!("population resize needs at least one attractor");
        }
        self.pending_resize = Some((particles, attractors));
        Ok(())
    }

    /// Apply a staged resize: shrink truncates survivors in place, grow
    /// seeds only the new tail. A chase pointing past the new attractor
    /// count is cleared
    fn apply_resize(&mut self, particles: usize, attractors: usize) {
        self.system.attractors.truncate(attractors);
        self.system.particles.truncate(particles);

        if let Some(chase) = self.chase {
            if chase.target >= attractors {
                self.chase = None;
            }
        }

        seed_population(
            &mut self.system,
            &self.parameters,
            &mut self.rng,
            particles,
            attractors,
        );
    }
}
