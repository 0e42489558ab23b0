//! Camera and projection model
//!
//! The camera is a world-space position plus an orthonormal view frame
//! (right/up/forward) and a pinhole focal length. Projection comes in two
//! flavors, selected by [`Projection`]:
//! - `Perspective`: pinhole division by depth, with a near-plane clip at
//!   the focal distance
//! - `Orthographic`: the flat pseudo-3D view, a scaled basis projection
//!   with no clipping

use crate::simulation::vecmath::{Frame, NVec3};

/// Guard for the perspective divisor
const PROJ_EPS: f64 = 1e-6;

/// How world coordinates map to the screen plane
#[derive(Debug, Clone, Copy)]
pub enum Projection {
    /// Pinhole projection: `screen = cam_xy * focal / (z_scale * depth)`
    /// `z_scale` tunes perceived depth compression
    Perspective { z_scale: f64 },
    /// Flat view: `screen = scale * cam_xy`, every body visible
    Orthographic { scale: f64 },
}

/// Screen geometry: size and the offset added to every projected point
/// (the display center)
#[derive(Debug, Clone, Copy)]
pub struct Display {
    pub width: f64,
    pub height: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl Display {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            offset_x: width / 2.0,
            offset_y: height / 2.0,
        }
    }
}

/// A world point carried into screen space
/// `depth` is the camera-space distance along the look axis
#[derive(Debug, Clone, Copy)]
pub struct ProjectedPoint {
    pub x: f64,
    pub y: f64,
    pub depth: f64,
}

/// Chase target and the eased follow distance
#[derive(Debug, Clone, Copy)]
pub struct Chase {
    pub target: usize, // attractor index being followed
    pub distance: f64, // current follow distance, kept above focal + 1
}

#[derive(Debug, Clone)]
pub struct Camera {
    pub pos: NVec3, // world-space location
    pub view: Frame, // view basis; `view.z` is the look direction
    pub focal: f64, // pinhole projection distance
}

impl Camera {
    pub fn new(pos: NVec3, view: Frame, focal: f64) -> Self {
        Self { pos, view, focal }
    }

    /// Project a world point to screen coordinates
    ///
    /// The point is translated into camera space, rotated into the view
    /// basis by inner products, then mapped by the active projection.
    /// Perspective returns `None` for points at or behind the focal plane
    /// (`depth <= focal`); orthographic never clips
    pub fn project(
        &self,
        world: NVec3,
        projection: &Projection,
        display: &Display,
    ) -> Option<ProjectedPoint> {
        let rel = world - self.pos;
        let cam_x = rel.dot(&self.view.x);
        let cam_y = rel.dot(&self.view.y);
        let cam_z = rel.dot(&self.view.z);

        match projection {
            Projection::Perspective { z_scale } => {
                if cam_z <= self.focal {
                    return None; // behind or inside the focal plane
                }
                let div = (z_scale * cam_z).max(PROJ_EPS);
                Some(ProjectedPoint {
                    x: cam_x * self.focal / div + display.offset_x,
                    y: cam_y * self.focal / div + display.offset_y,
                    depth: cam_z,
                })
            }
            Projection::Orthographic { scale } => Some(ProjectedPoint {
                x: scale * cam_x + display.offset_x,
                y: scale * cam_y + display.offset_y,
                depth: cam_z,
            }),
        }
    }

    /// Apply incremental yaw/pitch to the view frame
    /// The frame comes back orthonormalized; callers never observe a
    /// half-corrected basis
    pub fn rotate(&mut self, yaw: f64, pitch: f64) {
        self.view = self.view.rotated(yaw, pitch);
    }

    /// Move along the current basis vectors
    /// Screen-space pan maps to x/y, dolly maps to z
    pub fn translate(&mut self, dx: f64, dy: f64, dz: f64) {
        self.pos += dx * self.view.x + dy * self.view.y + dz * self.view.z;
    }

    /// One tick of chase easing: pull the position toward a point
    /// `chase.distance` behind the target along the look axis
    ///
    /// The per-axis step is `sign(d) * sqrt(|d|)`; this exact formula
    /// defines the feel of the follow behavior
    pub fn chase_toward(&mut self, target: NVec3, chase: &Chase) {
        let goal = target - chase.distance * self.view.z;
        for k in 0..3 {
            let d = goal[k] - self.pos[k];
            self.pos[k] += d.signum() * d.abs().sqrt();
        }
    }

    /// Screen-space directions of the three world axes, for the
    /// orientation triad overlay. Each entry is the 2D image of a unit
    /// world axis under the view basis
    pub fn axis_triad(&self) -> [(f64, f64); 3] {
        [
            (self.view.x.x, self.view.y.x),
            (self.view.x.y, self.view.y.y),
            (self.view.x.z, self.view.y.z),
        ]
    }
}
