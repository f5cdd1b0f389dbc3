//! Orienting and transporting cross-section loops along the helix.
//!
//! The first loop is tilted once so that its plane is normal to the helix
//! tangent at the start. Every later loop comes from [`advance`], which
//! moves the previous loop one step along the path and turns it with the
//! helix, so the tilt is carried forward without being recomputed.

use std::f64::consts::PI;

use helixmesh_math::{Dir3, Point3, Transform, Vec3};

use crate::path::{angle_to_turns, path, turns_to_angle};
use crate::section::{Loop, SectionProfile};

/// Rotate `lp` about the radial axis through `center` so its +Z normal
/// leans toward the direction of travel by `angle`.
///
/// The radial axis is +X in the helix local frame. A normal of `+Z` becomes
/// `(0, sin angle, cos angle)`.
pub fn tilt(lp: &Loop, center: Point3, angle: f64) -> Loop {
    let rot = Transform::rotation_about_line(&center, &Vec3::x_axis(), -angle);
    lp.map(|p| rot.apply_point(p))
}

/// Transport `lp` one step along the helix.
///
/// Each point is first moved by the path offset between its own axial
/// coordinate and one step further, then rotated about the Z-parallel axis
/// through the path at its new axial coordinate by `2π · turns / steps`.
/// For a loop lying in a `z = const` plane every pivot is the path position
/// of the loop's first point. The net effect on any point is a rotation
/// about the helix axis plus one step of axial travel, so tilted loops move
/// rigidly.
///
/// With `steps == 0` or `turns == 0` the loop is only translated along Z,
/// by `length` or `length / steps` respectively.
pub fn advance(lp: &Loop, turns: f64, steps: u32, radius: f64, length: f64) -> Loop {
    if steps == 0 || turns == 0.0 {
        let step = if steps == 0 { length } else { length / f64::from(steps) };
        return lp.translated(&Vec3::new(0.0, 0.0, step));
    }

    let step = length / f64::from(steps);
    let angle = 2.0 * PI / f64::from(steps) * turns;
    let axis = Vec3::z_axis();

    lp.map(|p| {
        let offset = path(p.z + step, turns, radius, length) - path(p.z, turns, radius, length);
        let moved = p + offset;
        let pivot = path(moved.z, turns, radius, length);
        Transform::rotation_about_line(&pivot, &axis, angle).apply_point(&moved)
    })
}

/// Per-build constants derived from a helix's shape.
///
/// Turns are computed once; the start tilt and the per-step rotation are
/// both derived from that one value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HelixFrame {
    /// Former radius.
    pub radius: f64,
    /// Axial length.
    pub length: f64,
    /// Number of sweep steps.
    pub steps: u32,
    /// Revolutions over `length`.
    pub turns: f64,
    /// Tilt applied to the first loop.
    pub tilt_angle: f64,
    /// Rotation about the helix axis per step.
    pub step_angle: f64,
    /// Axial advance per step.
    pub step_length: f64,
}

impl HelixFrame {
    /// Frame for a fiber at `running_angle` radians from the axis.
    pub fn new(radius: f64, length: f64, steps: u32, running_angle: f64) -> Self {
        let turns = angle_to_turns(running_angle, length, radius);
        let (step_angle, step_length) = if steps == 0 {
            (0.0, length)
        } else {
            (2.0 * PI / f64::from(steps) * turns, length / f64::from(steps))
        };
        Self {
            radius,
            length,
            steps,
            turns,
            tilt_angle: turns_to_angle(turns, length, radius),
            step_angle,
            step_length,
        }
    }

    /// Where the fiber centerline starts, `(radius, 0, 0)`.
    pub fn start_point(&self) -> Point3 {
        path(0.0, self.turns, self.radius, self.length)
    }

    /// Fiber centerline position at axial distance `t`.
    pub fn point_at(&self, t: f64) -> Point3 {
        path(t, self.turns, self.radius, self.length)
    }

    /// Unit tangent of the centerline at the start.
    pub fn start_tangent(&self) -> Dir3 {
        Dir3::new_normalize(Vec3::new(0.0, self.tilt_angle.sin(), self.tilt_angle.cos()))
    }

    /// First cross-section, built at the start point and tilted.
    pub fn initial_loop(&self, profile: &dyn SectionProfile) -> Loop {
        let start = self.start_point();
        tilt(&profile.section(start), start, self.tilt_angle)
    }

    /// Transport `lp` one step.
    pub fn advance(&self, lp: &Loop) -> Loop {
        advance(lp, self.turns, self.steps, self.radius, self.length)
    }
}
