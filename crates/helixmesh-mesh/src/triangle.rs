//! Oriented triangles.

use helixmesh_math::{Point3, Vec3};
use serde::{Deserialize, Serialize};

/// An ordered triple of points.
///
/// The vertex order defines the facet's outward normal by the right-hand
/// rule and is preserved exactly as produced; triangles are never re-sorted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Triangle {
    /// Vertices in winding order.
    pub vertices: [Point3; 3],
}

impl Triangle {
    /// Create a triangle from three points in winding order.
    pub fn new(a: Point3, b: Point3, c: Point3) -> Self {
        Self {
            vertices: [a, b, c],
        }
    }

    /// Unnormalized normal `(b - a) × (c - a)`.
    ///
    /// Its length is twice the triangle area.
    pub fn normal(&self) -> Vec3 {
        let [a, b, c] = self.vertices;
        (b - a).cross(&(c - a))
    }

    /// Unit normal, or `None` for a degenerate triangle.
    pub fn unit_normal(&self) -> Option<Vec3> {
        self.normal().try_normalize(1e-15)
    }

    /// Triangle area.
    pub fn area(&self) -> f64 {
        0.5 * self.normal().norm()
    }

    /// Centroid of the three vertices.
    pub fn centroid(&self) -> Point3 {
        let [a, b, c] = self.vertices;
        Point3::from((a.coords + b.coords + c.coords) / 3.0)
    }

    /// Whether every coordinate is finite.
    pub fn is_finite(&self) -> bool {
        self.vertices
            .iter()
            .all(|p| p.x.is_finite() && p.y.is_finite() && p.z.is_finite())
    }

    /// Copy of this triangle moved by `offset`.
    pub fn translated(&self, offset: &Vec3) -> Self {
        let [a, b, c] = self.vertices;
        Self::new(a + offset, b + offset, c + offset)
    }

    /// Directed edges `(a, b)`, `(b, c)`, `(c, a)`.
    pub fn edges(&self) -> [(Point3, Point3); 3] {
        let [a, b, c] = self.vertices;
        [(a, b), (b, c), (c, a)]
    }

    /// Signed volume of the tetrahedron spanned with the origin.
    ///
    /// Summed over a closed, outward-wound mesh this gives the enclosed
    /// volume.
    pub fn signed_volume(&self) -> f64 {
        let [a, b, c] = self.vertices;
        a.coords.dot(&b.coords.cross(&c.coords)) / 6.0
    }
}
