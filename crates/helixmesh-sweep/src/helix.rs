//! Helix configuration and mesh assembly.

use std::f64::consts::FRAC_PI_2;

use helixmesh_math::Point3;
use helixmesh_mesh::Mesh;
use serde::{Deserialize, Serialize};
use tracing::{debug, debug_span, trace};

use crate::cap::extrude_cap;
use crate::error::SweepError;
use crate::frame::HelixFrame;
use crate::path::angle_to_turns;
use crate::section::{SectionProfile, Square};
use crate::triangulate::{cap_triangles, side_triangles};

/// Parameters for one helical fiber.
///
/// The fiber winds around the Z axis of its local frame, starting at
/// `(radius, 0, 0)`. `center` only places that frame; it plays no part in
/// the helix shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HelixConfig {
    /// Identifier carried through to sinks and exports.
    pub name: String,
    /// Placement of the helix local frame.
    pub center: Point3,
    /// Radius of the former the fiber is wound on.
    pub radius: f64,
    /// Side of the square cross-section.
    pub size: f64,
    /// Angle between the fiber and the former axis, in radians.
    pub running_angle: f64,
    /// Axial length.
    pub length: f64,
    /// Number of sweep steps.
    pub steps: u32,
    /// Extra axial length added at both ends; 0 disables extrusion.
    pub extrusion: f64,
}

impl Default for HelixConfig {
    fn default() -> Self {
        Self {
            name: "helix".into(),
            center: Point3::origin(),
            radius: 1.0,
            size: 0.1,
            running_angle: 0.0,
            length: 10.0,
            steps: 32,
            extrusion: 0.0,
        }
    }
}

impl HelixConfig {
    /// Fiber of the given shape, centered at the origin, without extrusion.
    pub fn new(
        name: impl Into<String>,
        radius: f64,
        size: f64,
        running_angle: f64,
        length: f64,
        steps: u32,
    ) -> Self {
        Self {
            name: name.into(),
            radius,
            size,
            running_angle,
            length,
            steps,
            ..Self::default()
        }
    }

    /// Set the placement of the local frame.
    #[must_use]
    pub fn with_center(mut self, center: Point3) -> Self {
        self.center = center;
        self
    }

    /// Set the end extrusion length.
    #[must_use]
    pub fn with_extrusion(mut self, extrusion: f64) -> Self {
        self.extrusion = extrusion;
        self
    }

    /// Set the running angle in degrees.
    #[must_use]
    pub fn with_running_angle_deg(mut self, degrees: f64) -> Self {
        self.running_angle = degrees.to_radians();
        self
    }

    /// Revolutions over the full length.
    pub fn turns(&self) -> f64 {
        angle_to_turns(self.running_angle, self.length, self.radius)
    }

    /// Derived per-build constants.
    pub fn frame(&self) -> HelixFrame {
        HelixFrame::new(self.radius, self.length, self.steps, self.running_angle)
    }

    /// Whether the ends are extruded.
    pub fn is_extruded(&self) -> bool {
        self.extrusion != 0.0
    }

    /// Triangles a square-section build of this configuration produces.
    pub fn expected_triangles(&self) -> usize {
        triangle_count(4, self.steps, self.is_extruded())
    }

    /// Check that the configuration describes a finite helix.
    ///
    /// # Errors
    ///
    /// Returns [`SweepError::InvalidHelixConfiguration`] naming the first
    /// offending field.
    pub fn validate(&self) -> Result<(), SweepError> {
        positive("length", self.length)?;
        positive("radius", self.radius)?;
        positive("size", self.size)?;
        if self.size >= 2.0 * self.radius {
            return Err(SweepError::config(
                "size",
                format!("{} must be smaller than the former diameter {}", self.size, 2.0 * self.radius),
            ));
        }
        if self.steps < 1 {
            return Err(SweepError::config("steps", "must be at least 1"));
        }
        if !self.running_angle.is_finite() || self.running_angle.abs() >= FRAC_PI_2 {
            return Err(SweepError::config(
                "running_angle",
                format!("{} must lie strictly between -π/2 and π/2", self.running_angle),
            ));
        }
        if !self.turns().is_finite() {
            return Err(SweepError::config("running_angle", "gives a non-finite turn count"));
        }
        if !self.extrusion.is_finite() {
            return Err(SweepError::config("extrusion", "must be finite"));
        }
        if !self.center.coords.iter().all(|c| c.is_finite()) {
            return Err(SweepError::config("center", "must be finite"));
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), SweepError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SweepError::config(field, format!("{value} must be finite and positive")))
    }
}

/// Triangles produced by sweeping an `n`-vertex section over `steps` steps.
///
/// A plain cap has `n - 2` triangles, an extruded cap adds a `2n` strip, and
/// every step contributes a `2n` strip.
///
/// Counts below three vertices do not describe a sweepable section; the cap
/// term saturates at zero for them.
pub fn triangle_count(vertex_count: usize, steps: u32, extruded: bool) -> usize {
    let cap = if extruded {
        (3 * vertex_count).saturating_sub(2)
    } else {
        vertex_count.saturating_sub(2)
    };
    2 * cap + 2 * vertex_count * steps as usize
}

/// Build the closed mesh of a square-section helix.
///
/// Triangles are ordered start cap, side strips in sweep order, end cap.
/// Vertices are absolute, placed by `config.center`.
///
/// # Errors
///
/// Returns an error if the configuration is invalid. No triangles are built
/// in that case.
///
/// # Example
///
/// ```
/// use helixmesh_sweep::{build_helix, HelixConfig};
///
/// let config = HelixConfig::new("fiber", 10.0, 1.0, 0.5, 100.0, 10);
/// let mesh = build_helix(&config).unwrap();
/// assert_eq!(mesh.len(), 84);
/// assert!(mesh.is_closed());
/// ```
pub fn build_helix(config: &HelixConfig) -> Result<Mesh, SweepError> {
    build_helix_with(config, &Square::new(config.size))
}

/// Build a helix mesh with a custom cross-section.
///
/// `config.size` is still validated against the former radius, so set it to
/// the profile's extent.
pub fn build_helix_with(config: &HelixConfig, profile: &dyn SectionProfile) -> Result<Mesh, SweepError> {
    config.validate()?;
    let frame = config.frame();

    let span = debug_span!("build_helix", name = %config.name, turns = frame.turns, steps = frame.steps);
    let _enter = span.enter();

    let declared = profile.vertex_count();
    if declared < 3 {
        return Err(SweepError::InvalidProfile(format!(
            "profile declares {declared} points, need at least 3"
        )));
    }

    let start = frame.initial_loop(profile);
    let n = start.len();
    if !start.is_polygon() || n != declared {
        return Err(SweepError::InvalidProfile(format!(
            "section has {n} points, profile declares {declared}"
        )));
    }
    trace!("start {start}");

    let extrusion = config.extrusion.abs();
    let mut mesh = Mesh::with_capacity(triangle_count(n, frame.steps, config.is_extruded()));

    if config.is_extruded() {
        mesh.extend(extrude_cap(&start, -extrusion));
    } else {
        mesh.extend(cap_triangles(&start));
    }

    let mut current = start;
    for _ in 0..frame.steps {
        let next = frame.advance(&current);
        mesh.extend(side_triangles(&current, &next));
        current = next;
    }
    trace!("end {current}");

    let end = current.flip();
    if config.is_extruded() {
        mesh.extend(extrude_cap(&end, extrusion));
    } else {
        mesh.extend(cap_triangles(&end));
    }

    let mesh = if config.center == Point3::origin() {
        mesh
    } else {
        mesh.translated(&config.center.coords)
    };

    debug!(triangles = mesh.len(), "built helix");
    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::section::{make_square, Loop};
    use approx::assert_relative_eq;
    use helixmesh_math::Vec3;

    fn fiber(angle_deg: f64, steps: u32) -> HelixConfig {
        HelixConfig::new("fiber", 10.0, 1.0, angle_deg.to_radians(), 100.0, steps)
    }

    #[test]
    fn test_triangle_counts() {
        let mesh = build_helix(&fiber(30.0, 10)).unwrap();
        assert_eq!(mesh.len(), 84);

        let mesh = build_helix(&fiber(30.0, 10).with_extrusion(0.5)).unwrap();
        assert_eq!(mesh.len(), 100);

        assert_eq!(triangle_count(4, 10, false), 84);
        assert_eq!(triangle_count(4, 10, true), 100);
        assert_eq!(triangle_count(6, 3, false), 44);
    }

    #[test]
    fn test_single_step() {
        let mesh = build_helix(&fiber(20.0, 1)).unwrap();
        assert_eq!(mesh.len(), 12);
        assert!(mesh.is_closed());
    }

    #[test]
    fn test_mesh_is_watertight_and_outward() {
        for angle in [0.0, 15.0, 45.0, 70.0, -30.0] {
            for extrusion in [0.0, 0.3] {
                let config = fiber(angle, 40).with_extrusion(extrusion);
                let mesh = build_helix(&config).unwrap();
                assert!(mesh.is_closed(), "open mesh at {angle}° / {extrusion}");
                assert!(mesh.is_consistently_oriented());
                assert!(mesh.signed_volume() > 0.0);
            }
        }
    }

    #[test]
    fn test_volume_matches_prism() {
        // A rigidly swept square keeps its area along the centerline
        let config = fiber(0.0, 8);
        let mesh = build_helix(&config).unwrap();
        assert_relative_eq!(mesh.signed_volume(), 100.0, epsilon = 1e-9);
    }

    #[test]
    fn test_side_normals_point_away_from_centerline() {
        let config = fiber(35.0, 20);
        let frame = config.frame();
        let mesh = build_helix(&config).unwrap();
        let tris = mesh.triangles();

        for k in 0..config.steps {
            let z0 = frame.step_length * f64::from(k);
            let a = frame.point_at(z0);
            let b = frame.point_at(z0 + frame.step_length);
            let mid = a + 0.5 * (b - a);
            for tri in &tris[2 + 8 * k as usize..2 + 8 * (k as usize + 1)] {
                let out = tri.centroid() - mid;
                assert!(tri.normal().dot(&out) > 0.0, "inward side facet in step {k}");
            }
        }
    }

    #[test]
    fn test_cap_normals_point_out_of_ends() {
        let config = fiber(35.0, 20);
        let frame = config.frame();
        let mesh = build_helix(&config).unwrap();
        let tris = mesh.triangles();

        let start_dir = frame.start_tangent().into_inner();
        for tri in &tris[..2] {
            assert!(tri.unit_normal().unwrap().dot(&start_dir) < -0.99);
        }

        let end_tangent = crate::path::path_tangent(config.length, frame.turns, config.radius, config.length)
            .normalize();
        for tri in &tris[tris.len() - 2..] {
            assert!(tri.unit_normal().unwrap().dot(&end_tangent) > 0.99);
        }
    }

    #[test]
    fn test_straight_fiber_keeps_xy() {
        let config = fiber(0.0, 6);
        assert_eq!(config.turns(), 0.0);
        let mesh = build_helix(&config).unwrap();

        let start = make_square(Point3::new(10.0, 0.0, 0.0), 1.0);
        let xy = |p: &Point3| (p.x, p.y);
        for tri in &mesh {
            for p in &tri.vertices {
                assert!(start.iter().any(|q| xy(q) == xy(p)));
            }
        }
    }

    #[test]
    fn test_extrusion_is_symmetric() {
        let e = 0.4;
        let plain = build_helix(&fiber(25.0, 12)).unwrap();
        let extruded = build_helix(&fiber(25.0, 12).with_extrusion(e)).unwrap();

        // Sweep strips are unchanged, only the caps grow
        assert_eq!(&plain.triangles()[2..98], &extruded.triangles()[10..106]);

        let start_cap = &extruded.triangles()[8..10];
        let plain_start = &plain.triangles()[..2];
        for (a, b) in start_cap.iter().zip(plain_start) {
            for (p, q) in a.vertices.iter().zip(&b.vertices) {
                assert_relative_eq!(p.z, q.z - e, epsilon = 1e-12);
            }
        }

        let n = extruded.len();
        let end_cap = &extruded.triangles()[n - 2..];
        let plain_end = &plain.triangles()[plain.len() - 2..];
        for (a, b) in end_cap.iter().zip(plain_end) {
            for (p, q) in a.vertices.iter().zip(&b.vertices) {
                assert_relative_eq!(p.z, q.z + e, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_negative_extrusion_uses_magnitude() {
        let pos = build_helix(&fiber(25.0, 5).with_extrusion(0.4)).unwrap();
        let neg = build_helix(&fiber(25.0, 5).with_extrusion(-0.4)).unwrap();
        assert_eq!(pos, neg);
    }

    #[test]
    fn test_center_only_places() {
        let base = build_helix(&fiber(40.0, 16)).unwrap();
        let offset = Vec3::new(3.0, -7.0, 12.0);
        let placed = build_helix(&fiber(40.0, 16).with_center(Point3::from(offset))).unwrap();

        assert_eq!(placed.len(), base.len());
        for (a, b) in placed.iter().zip(base.iter()) {
            for (p, q) in a.vertices.iter().zip(&b.vertices) {
                assert!((p - (q + offset)).norm() < 1e-12);
            }
        }
        assert_relative_eq!(placed.signed_volume(), base.signed_volume(), epsilon = 1e-6);
    }

    #[test]
    fn test_build_is_deterministic() {
        let config = fiber(33.0, 25).with_extrusion(0.2);
        assert_eq!(build_helix(&config).unwrap(), build_helix(&config).unwrap());
    }

    #[test]
    fn test_rejects_invalid_configuration() {
        let cases = [
            ("length", HelixConfig { length: 0.0, ..fiber(30.0, 10) }),
            ("length", HelixConfig { length: f64::NAN, ..fiber(30.0, 10) }),
            ("radius", HelixConfig { radius: -1.0, ..fiber(30.0, 10) }),
            ("size", HelixConfig { size: 0.0, ..fiber(30.0, 10) }),
            ("size", HelixConfig { size: 25.0, ..fiber(30.0, 10) }),
            ("steps", fiber(30.0, 0)),
            ("running_angle", HelixConfig { running_angle: FRAC_PI_2, ..fiber(30.0, 10) }),
            ("running_angle", HelixConfig { running_angle: -FRAC_PI_2, ..fiber(30.0, 10) }),
            ("running_angle", HelixConfig { running_angle: f64::INFINITY, ..fiber(30.0, 10) }),
            ("extrusion", fiber(30.0, 10).with_extrusion(f64::NAN)),
            ("center", fiber(30.0, 10).with_center(Point3::new(f64::NAN, 0.0, 0.0))),
        ];
        for (field, config) in cases {
            let err = build_helix(&config).unwrap_err();
            assert_eq!(err.kind(), "invalid-helix-configuration");
            assert!(
                matches!(&err, SweepError::InvalidHelixConfiguration { field: f, .. } if *f == field),
                "expected {field}, got {err}"
            );
        }
    }

    struct Hexagon(f64);

    impl SectionProfile for Hexagon {
        fn section(&self, center: Point3) -> Loop {
            Loop::new(
                (0..6)
                    .map(|i| {
                        let a = std::f64::consts::PI / 3.0 * f64::from(i);
                        center + Vec3::new(self.0 * a.cos(), self.0 * a.sin(), 0.0)
                    })
                    .collect(),
            )
        }

        fn vertex_count(&self) -> usize {
            6
        }
    }

    #[test]
    fn test_custom_profile() {
        let config = fiber(30.0, 9).with_extrusion(0.1);
        let mesh = build_helix_with(&config, &Hexagon(0.5)).unwrap();
        assert_eq!(mesh.len(), triangle_count(6, 9, true));
        assert!(mesh.is_closed());
        assert!(mesh.is_consistently_oriented());
        assert!(mesh.signed_volume() > 0.0);
    }

    struct Liar;

    impl SectionProfile for Liar {
        fn section(&self, center: Point3) -> Loop {
            make_square(center, 0.5)
        }

        fn vertex_count(&self) -> usize {
            5
        }
    }

    #[test]
    fn test_profile_count_mismatch_rejected() {
        let err = build_helix_with(&fiber(30.0, 4), &Liar).unwrap_err();
        assert_eq!(err.kind(), "invalid-section-profile");
    }

    struct Segment;

    impl SectionProfile for Segment {
        fn section(&self, center: Point3) -> Loop {
            Loop::new(vec![center, center + Vec3::x()])
        }

        fn vertex_count(&self) -> usize {
            2
        }
    }

    /// Declares a quad but yields only two points.
    struct Truncated;

    impl SectionProfile for Truncated {
        fn section(&self, center: Point3) -> Loop {
            Loop::new(vec![center, center + Vec3::y()])
        }

        fn vertex_count(&self) -> usize {
            4
        }
    }

    #[test]
    fn test_short_profile_rejected() {
        let err = build_helix_with(&fiber(30.0, 4), &Segment).unwrap_err();
        assert_eq!(err.kind(), "invalid-section-profile");

        let err = build_helix_with(&fiber(30.0, 4), &Truncated).unwrap_err();
        assert_eq!(err.kind(), "invalid-section-profile");
        assert!(err.to_string().contains("section has 2 points"), "{err}");
    }

    #[test]
    fn test_triangle_count_saturates_for_short_sections() {
        assert_eq!(triangle_count(0, 5, false), 0);
        assert_eq!(triangle_count(1, 0, false), 0);
        assert_eq!(triangle_count(1, 0, true), 2);
        assert_eq!(triangle_count(2, 3, false), 12);
    }

    #[test]
    fn test_config_serde_defaults() {
        let config: HelixConfig =
            serde_json::from_str(r#"{"name": "f", "radius": 5.0, "size": 0.5, "length": 20.0, "steps": 4}"#)
                .unwrap();
        assert_eq!(config.extrusion, 0.0);
        assert_eq!(config.center, Point3::origin());
        assert_eq!(config.running_angle, 0.0);
        assert!(build_helix(&config).is_ok());
    }
}
