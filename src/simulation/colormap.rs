//! Precomputed palettes and the state-to-color / state-to-radius mapping
//!
//! Two palettes of [`COLORMAP_QUANTIZE`] discrete colors are built once at
//! startup: a two-segment "normal" ramp and a single-segment "bluesea"
//! ramp. Bodies map to an index either by seeding identity (a fixed
//! multiplicative hash of the attractor id) or by speed

use crate::simulation::camera::Projection;

/// Number of discrete colors per palette
pub const COLORMAP_QUANTIZE: usize = 200;

/// Spreading constant for the identity hash. Any fixed odd constant
/// coprime with the palette size gives the same visual spread; 29 is a
/// required literal for compatibility with existing scenes
const ID_SPREAD: usize = 29;

/// Fixed radii used by the flat orthographic view
const ORTHO_PARTICLE_RADIUS: f64 = 1.0;
const ORTHO_ATTRACTOR_RADIUS: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Which precomputed ramp is active
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Palette {
    Normal,
    Bluesea,
}

/// How bodies pick their palette index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    /// `palette[(id * 29) % Q]`, stable per seeding identity
    Identity,
    /// `palette[min(Q - 1, floor(100 * |v|))]`
    Velocity,
}

#[derive(Debug, Clone)]
pub struct Colormap {
    pub normal: Vec<Rgb>,
    pub bluesea: Vec<Rgb>,
    current: Palette,
}

impl Colormap {
    /// Build both ramps and select the active one
    pub fn new(current: Palette) -> Self {
        let q = COLORMAP_QUANTIZE;
        let dc = (255.0 / (q as f64 / 2.0)).ceil() as i64;

        // Make colormap normal: blue to green over the first half, then
        // into red over the second. The half-way entry is written by both
        // segments; the second one wins
        let mut normal = vec![Rgb { r: 0, g: 0, b: 0 }; q];
        for i in 0..=q / 2 {
            normal[i] = Rgb {
                r: 0,
                g: (dc * i as i64).min(255) as u8,
                b: (255 - dc * i as i64).max(0) as u8,
            };
        }
        for i in q / 2..q {
            normal[i] = Rgb {
                r: (dc * i as i64).min(255) as u8,
                g: (255 - dc * i as i64).max(0) as u8,
                b: 0,
            };
        }

        // Make colormap bluesea
        let mut bluesea = vec![Rgb { r: 0, g: 0, b: 0 }; q];
        for i in 0..q {
            bluesea[i] = Rgb {
                r: 0,
                g: (dc * i as i64).min(255) as u8,
                b: 255,
            };
        }

        Self {
            normal,
            bluesea,
            current,
        }
    }

    /// The active palette
    pub fn current(&self) -> &[Rgb] {
        match self.current {
            Palette::Normal => &self.normal,
            Palette::Bluesea => &self.bluesea,
        }
    }

    /// Color at `index` in the active palette
    pub fn color(&self, index: usize) -> Rgb {
        self.current()[index]
    }
}

/// Palette index for a seeding identity
pub fn identity_index(id: usize) -> usize {
    (id * ID_SPREAD) % COLORMAP_QUANTIZE
}

/// Palette index for a body speed
pub fn velocity_index(speed: f64) -> usize {
    ((100.0 * speed) as usize).min(COLORMAP_QUANTIZE - 1)
}

/// Screen radius for a particle at the given projected depth
/// Shrinks with depth, never below one pixel
pub fn particle_radius(projection: &Projection, focal: f64, depth: f64) -> f64 {
    match projection {
        Projection::Perspective { .. } => (focal / depth).max(1.0),
        Projection::Orthographic { .. } => ORTHO_PARTICLE_RADIUS,
    }
}

/// Screen radius for an attractor: shrinks with depth but stays inside
/// `[1, core_size]` no matter how close it gets
pub fn attractor_radius(projection: &Projection, focal: f64, depth: f64, core_size: f64) -> f64 {
    match projection {
        Projection::Perspective { .. } => (core_size * focal / depth).clamp(1.0, core_size),
        Projection::Orthographic { .. } => ORTHO_ATTRACTOR_RADIUS,
    }
}
