//! 3D vector helpers and the orthonormal view frame
//!
//! Provides the guarded normalization, the yaw-then-pitch rotation used for
//! every orientation change, and `Frame`, the right/up/forward basis kept
//! orthonormal across thousands of incremental rotations

use nalgebra::Vector3;
pub type NVec3 = Vector3<f64>;

/// Norm below which a vector is returned unchanged instead of normalized
pub const NORM_GUARD: f64 = 0.1;

/// Scale `v` to unit length, unless its norm is at or below [`NORM_GUARD`]
/// Near-zero vectors pass through untouched instead of being forced onto
/// an arbitrary direction
pub fn normalize_guarded(v: NVec3) -> NVec3 {
    let norm = v.norm();
    if norm > NORM_GUARD {
        v / norm
    } else {
        v
    }
}

/// Rotate `v` by `yaw` about the Y axis, then by `pitch` about the X axis
/// that results from the first rotation
///
/// Two sequential plane rotations, not a single axis-angle rotation. The
/// two do not commute, so the Y-then-X order is part of the contract
pub fn rotate_yx(v: NVec3, yaw: f64, pitch: f64) -> NVec3 {
    let (sin_yaw, cos_yaw) = yaw.sin_cos();
    let (sin_pitch, cos_pitch) = pitch.sin_cos();

    // yaw: mix x and z
    let x = v.x * cos_yaw - v.z * sin_yaw;
    let z_mid = v.z * cos_yaw + v.x * sin_yaw;

    // pitch: mix y and the intermediate z
    let y = v.y * cos_pitch - z_mid * sin_pitch;
    let z = z_mid * cos_pitch + v.y * sin_pitch;

    NVec3::new(x, y, z)
}

/// Orthonormal basis, used both for the display axes and the camera view
/// - `x`: right
/// - `y`: up
/// - `z`: forward / look direction
#[derive(Debug, Clone, Copy)]
pub struct Frame {
    pub x: NVec3,
    pub y: NVec3,
    pub z: NVec3,
}

impl Frame {
    /// The world-aligned identity basis
    pub fn identity() -> Self {
        Self {
            x: NVec3::new(1.0, 0.0, 0.0),
            y: NVec3::new(0.0, 1.0, 0.0),
            z: NVec3::new(0.0, 0.0, 1.0),
        }
    }

    /// Rotate all three axes with [`rotate_yx`], then run one
    /// orthonormalization pass:
    ///
    /// 1. guarded-normalize each axis,
    /// 2. remove the projection of Y onto X,
    /// 3. remove the projection of Z onto X and onto the corrected Y.
    ///
    /// A single pass in that fixed order, not iterated to convergence. It is
    /// enough to keep the frame usable across thousands of incremental
    /// updates despite floating-point drift
    pub fn rotated(&self, yaw: f64, pitch: f64) -> Frame {
        let x = normalize_guarded(rotate_yx(self.x, yaw, pitch));
        let mut y = normalize_guarded(rotate_yx(self.y, yaw, pitch));
        let mut z = normalize_guarded(rotate_yx(self.z, yaw, pitch));

        // Reduce residue of Y
        let a = x.dot(&y);
        y -= a * x;

        // Reduce residue of Z
        let a = x.dot(&z);
        z -= a * x;
        let a = y.dot(&z);
        z -= a * y;

        Frame { x, y, z }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotate_yx_quarter_turn_about_y() {
        let v = NVec3::new(1.0, 0.0, 0.0);
        let r = rotate_yx(v, std::f64::consts::FRAC_PI_2, 0.0);
        // +X swings into +Z
        assert!((r.x - 0.0).abs() < 1e-12);
        assert!((r.z - 1.0).abs() < 1e-12);
    }

    #[test]
    fn normalize_guard_passes_small_vectors_through() {
        let v = NVec3::new(0.05, 0.0, 0.0);
        assert_eq!(normalize_guarded(v), v);

        let w = normalize_guarded(NVec3::new(3.0, 0.0, 0.0));
        assert!((w.norm() - 1.0).abs() < 1e-12);
    }
}
