//! Cross-section loops and the profiles that build them.

use std::fmt;
use std::ops::Index;

use helixmesh_math::{Point3, Vec3};

/// One cross-sectional ring of vertices.
///
/// Order is load-bearing: triangulation derives facet normals from it.
/// A square section is wound bottom-left, bottom-right, top-right,
/// top-left in its local frame, counter-clockwise seen from +Z.
#[derive(Debug, Clone, PartialEq)]
pub struct Loop {
    points: Vec<Point3>,
}

impl Loop {
    /// Create a loop from points in winding order.
    ///
    /// Any number of points is accepted; only loops of three or more can be
    /// triangulated. Use [`Loop::try_new`] to enforce that up front.
    pub fn new(points: Vec<Point3>) -> Self {
        Self { points }
    }

    /// Create a loop, or `None` if it has fewer than three points.
    pub fn try_new(points: Vec<Point3>) -> Option<Self> {
        (points.len() >= 3).then(|| Self { points })
    }

    /// Whether the loop has enough points to be triangulated.
    pub fn is_polygon(&self) -> bool {
        self.points.len() >= 3
    }

    /// Points in winding order.
    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the loop has no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterate over points in winding order.
    pub fn iter(&self) -> std::slice::Iter<'_, Point3> {
        self.points.iter()
    }

    /// Apply `f` to every point, keeping the order.
    pub fn map(&self, f: impl FnMut(&Point3) -> Point3) -> Self {
        Self {
            points: self.points.iter().map(f).collect(),
        }
    }

    /// Copy of this loop moved by `offset`.
    pub fn translated(&self, offset: &Vec3) -> Self {
        self.map(|p| p + offset)
    }

    /// Reverse the winding, keeping points 0 and 1 adjacent.
    ///
    /// Maps index `i` to `(n + 1 - i) mod n`, which for a quad gives the
    /// order `{1, 0, 3, 2}`.
    pub fn flip(&self) -> Self {
        let n = self.points.len();
        Self {
            points: (0..n).map(|i| self.points[(n + 1 - i) % n]).collect(),
        }
    }

    /// Average of the loop's points.
    pub fn centroid(&self) -> Point3 {
        let sum = self
            .points
            .iter()
            .fold(Vec3::zeros(), |acc, p| acc + p.coords);
        Point3::from(sum / self.points.len() as f64)
    }
}

impl Index<usize> for Loop {
    type Output = Point3;

    fn index(&self, i: usize) -> &Point3 {
        &self.points[i]
    }
}

impl<'a> IntoIterator for &'a Loop {
    type Item = &'a Point3;
    type IntoIter = std::slice::Iter<'a, Point3>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

impl fmt::Display for Loop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "loop of {} vertices", self.points.len())?;
        for p in &self.points {
            writeln!(f, "  vertex: {} {} {}", p.x, p.y, p.z)?;
        }
        Ok(())
    }
}

/// A cross-section factory.
///
/// Implementations return a convex loop centered at `center`, lying in the
/// plane `z = center.z`, wound counter-clockwise seen from +Z.
pub trait SectionProfile: Send + Sync {
    /// Build the loop centered at `center`.
    fn section(&self, center: Point3) -> Loop;

    /// Number of points in every loop this profile builds.
    fn vertex_count(&self) -> usize;
}

/// Axis-aligned square cross-section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Square {
    /// Side length.
    pub size: f64,
}

impl Square {
    /// Square of side `size`.
    pub fn new(size: f64) -> Self {
        Self { size }
    }
}

impl SectionProfile for Square {
    fn section(&self, center: Point3) -> Loop {
        make_square(center, self.size)
    }

    fn vertex_count(&self) -> usize {
        4
    }
}

/// Corners of a square of side `size` centered at `center`, in the plane
/// normal to Z.
pub fn make_square(center: Point3, size: f64) -> Loop {
    let h = size * 0.5;
    Loop::new(vec![
        center + Vec3::new(-h, -h, 0.0),
        center + Vec3::new(h, -h, 0.0),
        center + Vec3::new(h, h, 0.0),
        center + Vec3::new(-h, h, 0.0),
    ])
}
