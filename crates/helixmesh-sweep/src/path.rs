//! Circular helix path evaluation.
//!
//! The helix winds around the local Z axis. Its parameter `t` is raw axial
//! distance, so `path(t).z == t` and `t` runs over `[0, length]`:
//!
//! ```text
//! x(t) = R cos(2π · turns · t / length)
//! y(t) = R sin(2π · turns · t / length)
//! z(t) = t
//! ```

use std::f64::consts::PI;

use helixmesh_math::{Point3, Vec3};

/// Number of revolutions over `length` for a fiber at `angle` radians from
/// the cylinder axis on a former of radius `radius`.
///
/// This is the one place the running angle is converted into turns.
pub fn angle_to_turns(angle: f64, length: f64, radius: f64) -> f64 {
    angle.tan() * length / (2.0 * PI * radius)
}

/// Running angle of a helix making `turns` revolutions over `length`.
///
/// Inverse of [`angle_to_turns`] on `(-π/2, π/2)`.
pub fn turns_to_angle(turns: f64, length: f64, radius: f64) -> f64 {
    (2.0 * PI * radius * turns / length).atan()
}

/// Position on the helix at axial distance `t`.
pub fn path(t: f64, turns: f64, radius: f64, length: f64) -> Point3 {
    let phase = 2.0 * PI * turns * t / length;
    let (s, c) = phase.sin_cos();
    Point3::new(radius * c, radius * s, t)
}

/// Derivative of [`path`] with respect to `t`.
pub fn path_tangent(t: f64, turns: f64, radius: f64, length: f64) -> Vec3 {
    let rate = 2.0 * PI * turns / length;
    let (s, c) = (rate * t).sin_cos();
    Vec3::new(-radius * rate * s, radius * rate * c, 1.0)
}
