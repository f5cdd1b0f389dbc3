#![warn(missing_docs)]

//! Geometry primitives for helixmesh.
//!
//! Double-precision nalgebra aliases, the homogeneous transform used to
//! place and transport section loops, and the grid used to weld vertices.

use nalgebra::{Matrix4, Rotation3, Translation3, Unit, Vector3};

/// A point in 3D space.
pub type Point3 = nalgebra::Point3<f64>;

/// A vector in 3D space.
pub type Vec3 = Vector3<f64>;

/// A unit direction.
pub type Dir3 = Unit<Vector3<f64>>;

/// Affine transform stored as a homogeneous 4x4 matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    /// Homogeneous matrix, column vectors.
    pub matrix: Matrix4<f64>,
}

impl Transform {
    /// Shift by `(dx, dy, dz)`.
    pub fn translation(dx: f64, dy: f64, dz: f64) -> Self {
        Self {
            matrix: Translation3::new(dx, dy, dz).to_homogeneous(),
        }
    }

    /// Counter-clockwise turn about +Z, seen from above.
    pub fn rotation_z(angle: f64) -> Self {
        Self::rotation_about_axis(&Vec3::z_axis(), angle)
    }

    /// Right-handed turn by `angle` about `axis` through the origin.
    pub fn rotation_about_axis(axis: &Dir3, angle: f64) -> Self {
        Self {
            matrix: Rotation3::from_axis_angle(axis, angle).to_homogeneous(),
        }
    }

    /// Right-handed turn by `angle` about the line through `pivot` along `axis`.
    ///
    /// `pivot` is a fixed point of the result.
    pub fn rotation_about_line(pivot: &Point3, axis: &Dir3, angle: f64) -> Self {
        let shift = pivot.coords;
        Self::translation(shift.x, shift.y, shift.z)
            .then(&Self::rotation_about_axis(axis, angle))
            .then(&Self::translation(-shift.x, -shift.y, -shift.z))
    }

    /// Matrix product `self * other`: `other` acts first.
    pub fn then(&self, other: &Transform) -> Self {
        Self {
            matrix: self.matrix * other.matrix,
        }
    }

    /// Map a point.
    pub fn apply_point(&self, p: &Point3) -> Point3 {
        self.matrix.transform_point(p)
    }
}

/// Welding grid for mesh vertices.
#[derive(Debug, Clone, Copy)]
pub struct Tolerance {
    /// Grid spacing in model units.
    pub linear: f64,
}

impl Tolerance {
    /// A 1e-9 grid.
    pub const DEFAULT: Self = Self { linear: 1e-9 };

    /// Integer grid cell of `p`. Points in the same cell weld together.
    pub fn quantize(&self, p: &Point3) -> [i64; 3] {
        let scale = self.linear.recip();
        p.coords.map(|c| (c * scale).round() as i64).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_translation_moves_points() {
        let p = Transform::translation(-1.0, 0.5, 4.0).apply_point(&Point3::new(1.0, 1.0, 1.0));
        assert_eq!(p, Point3::new(0.0, 1.5, 5.0));
    }

    #[test]
    fn test_quarter_turn_about_z() {
        let p = Transform::rotation_z(FRAC_PI_2).apply_point(&Point3::new(2.0, 0.0, 3.0));
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(p.y, 2.0, epsilon = 1e-12);
        assert_relative_eq!(p.z, 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_turn_about_x_is_right_handed() {
        let p = Transform::rotation_about_axis(&Vec3::x_axis(), FRAC_PI_2)
            .apply_point(&Point3::new(0.0, 0.0, 1.0));
        assert_relative_eq!(p.y, -1.0, epsilon = 1e-12);
        assert_relative_eq!(p.z, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_then_applies_right_operand_first() {
        // (1,0,0) shifted to (2,0,0), then turned to (0,2,0)
        let t = Transform::rotation_z(FRAC_PI_2).then(&Transform::translation(1.0, 0.0, 0.0));
        let p = t.apply_point(&Point3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(p.y, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_line_rotation_fixes_pivot() {
        let pivot = Point3::new(10.0, 0.0, 0.0);
        let t = Transform::rotation_about_line(&pivot, &Vec3::z_axis(), FRAC_PI_2);
        assert!((t.apply_point(&pivot) - pivot).norm() < 1e-12);

        let p = t.apply_point(&Point3::new(11.0, 0.0, 5.0));
        assert_relative_eq!(p.x, 10.0, epsilon = 1e-12);
        assert_relative_eq!(p.y, 1.0, epsilon = 1e-12);
        assert_relative_eq!(p.z, 5.0, epsilon = 1e-12);
    }

    #[test]
    fn test_quantize_welds_nearby_points() {
        let tol = Tolerance { linear: 1e-6 };
        let a = Point3::new(0.1, 0.2, 0.3);
        let b = Point3::new(0.1 + 1e-9, 0.2, 0.3 - 1e-9);
        assert_eq!(tol.quantize(&a), tol.quantize(&b));
        assert_ne!(tol.quantize(&a), tol.quantize(&Point3::new(0.1, 0.2, 0.31)));
        assert_eq!(Tolerance::DEFAULT.quantize(&Point3::new(-2e-9, 0.0, 1.0)), [-2, 0, 1_000_000_000]);
    }
}
