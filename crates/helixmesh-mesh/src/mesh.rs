//! Ordered triangle lists and closure analysis.

use std::collections::HashMap;

use helixmesh_math::{Point3, Tolerance, Vec3};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::sink::MeshSink;
use crate::triangle::Triangle;

/// Quantized endpoints of an edge, smaller endpoint first.
pub type EdgeKey = ([i64; 3], [i64; 3]);

/// An ordered, append-only list of triangles.
///
/// The order is the order in which facets were produced. It does not affect
/// the solid a sink builds but is kept for reproducible output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    triangles: Vec<Triangle>,
}

impl Mesh {
    /// Create an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty mesh with room for `n` triangles.
    pub fn with_capacity(n: usize) -> Self {
        Self {
            triangles: Vec::with_capacity(n),
        }
    }

    /// Append a triangle.
    pub fn push(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    /// Number of triangles.
    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    /// Whether the mesh has no triangles.
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Triangles in production order.
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Iterate over triangles in production order.
    pub fn iter(&self) -> std::slice::Iter<'_, Triangle> {
        self.triangles.iter()
    }

    /// Consume the mesh, returning its triangles.
    pub fn into_triangles(self) -> Vec<Triangle> {
        self.triangles
    }

    /// Copy of this mesh with every vertex moved by `offset`.
    pub fn translated(&self, offset: &Vec3) -> Self {
        self.iter().map(|t| t.translated(offset)).collect()
    }

    /// How many triangles use each undirected edge.
    pub fn edge_use_counts(&self) -> HashMap<EdgeKey, usize> {
        let tol = Tolerance::DEFAULT;
        let mut counts = HashMap::with_capacity(self.len() * 3 / 2);
        for tri in &self.triangles {
            for (a, b) in tri.edges() {
                let (ka, kb) = (tol.quantize(&a), tol.quantize(&b));
                let key = if ka <= kb { (ka, kb) } else { (kb, ka) };
                *counts.entry(key).or_insert(0) += 1;
            }
        }
        counts
    }

    /// Number of edges used once (open) and more than twice (over-shared).
    pub fn edge_defects(&self) -> (usize, usize) {
        self.edge_use_counts()
            .values()
            .fold((0, 0), |(open, over), &n| match n {
                1 => (open + 1, over),
                2 => (open, over),
                _ => (open, over + 1),
            })
    }

    /// Whether every edge is shared by exactly two triangles.
    pub fn is_closed(&self) -> bool {
        !self.is_empty() && self.edge_use_counts().values().all(|&n| n == 2)
    }

    /// Whether every directed edge appears once and is matched by its
    /// reverse, i.e. neighbouring facets agree on orientation.
    pub fn is_consistently_oriented(&self) -> bool {
        let tol = Tolerance::DEFAULT;
        let mut directed: HashMap<EdgeKey, usize> = HashMap::with_capacity(self.len() * 3);
        for tri in &self.triangles {
            for (a, b) in tri.edges() {
                *directed.entry((tol.quantize(&a), tol.quantize(&b))).or_insert(0) += 1;
            }
        }
        directed
            .iter()
            .all(|(&(a, b), &n)| n == 1 && directed.get(&(b, a)) == Some(&1))
    }

    /// Signed enclosed volume; positive for a closed mesh wound outward.
    pub fn signed_volume(&self) -> f64 {
        self.iter().map(Triangle::signed_volume).sum()
    }

    /// Total surface area.
    pub fn surface_area(&self) -> f64 {
        self.iter().map(Triangle::area).sum()
    }

    /// Axis-aligned bounding box `(min, max)`, or `None` when empty.
    pub fn bounding_box(&self) -> Option<(Point3, Point3)> {
        let mut points = self.iter().flat_map(|t| t.vertices.iter());
        let first = *points.next()?;
        Some(points.fold((first, first), |(lo, hi), p| {
            (
                Point3::new(lo.x.min(p.x), lo.y.min(p.y), lo.z.min(p.z)),
                Point3::new(hi.x.max(p.x), hi.y.max(p.y), hi.z.max(p.z)),
            )
        }))
    }

    /// Feed every triangle, in order, to `sink` and close it.
    pub fn emit_into<S: MeshSink + ?Sized>(&self, sink: &mut S) -> Result<()> {
        for tri in &self.triangles {
            sink.add_facet(*tri)?;
        }
        sink.close()
    }
}

impl FromIterator<Triangle> for Mesh {
    fn from_iter<I: IntoIterator<Item = Triangle>>(iter: I) -> Self {
        Self {
            triangles: iter.into_iter().collect(),
        }
    }
}

impl Extend<Triangle> for Mesh {
    fn extend<I: IntoIterator<Item = Triangle>>(&mut self, iter: I) {
        self.triangles.extend(iter);
    }
}

impl<'a> IntoIterator for &'a Mesh {
    type Item = &'a Triangle;
    type IntoIter = std::slice::Iter<'a, Triangle>;

    fn into_iter(self) -> Self::IntoIter {
        self.triangles.iter()
    }
}
