//! The boundary through which generated triangles become a solid.

use std::collections::HashMap;

use helixmesh_math::{Point3, Tolerance};
use tracing::debug;

use crate::error::{MeshError, Result};
use crate::mesh::Mesh;
use crate::triangle::Triangle;

/// Consumer of generated facets.
///
/// Facets are given with absolute vertices in the solid's local frame and
/// in final winding order. After the last facet the producer calls
/// [`MeshSink::close`].
pub trait MeshSink {
    /// Add one facet.
    fn add_facet(&mut self, triangle: Triangle) -> Result<()>;

    /// Mark the surface as complete.
    fn close(&mut self) -> Result<()>;
}

impl MeshSink for Mesh {
    fn add_facet(&mut self, triangle: Triangle) -> Result<()> {
        self.push(triangle);
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        Ok(())
    }
}

/// A named, indexed triangle solid.
///
/// Coincident vertices are welded on insertion, so facets produced from
/// shared loop corners share vertex indices. Closing verifies that every
/// edge is shared by exactly two facets.
#[derive(Debug, Clone)]
pub struct TessellatedSolid {
    name: String,
    vertices: Vec<Point3>,
    facets: Vec<[u32; 3]>,
    closed: bool,
    tolerance: Tolerance,
    weld: HashMap<[i64; 3], u32>,
}

impl TessellatedSolid {
    /// Create an empty, open solid.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            vertices: Vec::new(),
            facets: Vec::new(),
            closed: false,
            tolerance: Tolerance::DEFAULT,
            weld: HashMap::new(),
        }
    }

    /// Use a custom weld tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: Tolerance) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Solid name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Welded vertex positions.
    pub fn vertices(&self) -> &[Point3] {
        &self.vertices
    }

    /// Facets as vertex index triples, in insertion order.
    pub fn facets(&self) -> &[[u32; 3]] {
        &self.facets
    }

    /// Whether [`MeshSink::close`] succeeded.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Number of facets.
    pub fn num_facets(&self) -> usize {
        self.facets.len()
    }

    /// Number of distinct vertices.
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Facet `i` as a triangle with absolute vertices.
    pub fn facet(&self, i: usize) -> Option<Triangle> {
        let [a, b, c] = *self.facets.get(i)?;
        Some(Triangle::new(
            self.vertices[a as usize],
            self.vertices[b as usize],
            self.vertices[c as usize],
        ))
    }

    /// Euler characteristic `V - E + F`; 2 for a closed genus-0 surface.
    pub fn euler_characteristic(&self) -> i64 {
        let mut edges = std::collections::HashSet::new();
        for &[a, b, c] in &self.facets {
            for (u, v) in [(a, b), (b, c), (c, a)] {
                edges.insert((u.min(v), u.max(v)));
            }
        }
        self.vertices.len() as i64 - edges.len() as i64 + self.facets.len() as i64
    }

    fn vertex_index(&mut self, key: [i64; 3], p: Point3) -> u32 {
        if let Some(&idx) = self.weld.get(&key) {
            return idx;
        }
        let idx = self.vertices.len() as u32;
        self.vertices.push(p);
        self.weld.insert(key, idx);
        idx
    }

    fn edge_defects(&self) -> (usize, usize) {
        let mut counts: HashMap<(u32, u32), usize> = HashMap::new();
        for &[a, b, c] in &self.facets {
            for (u, v) in [(a, b), (b, c), (c, a)] {
                *counts.entry((u.min(v), u.max(v))).or_insert(0) += 1;
            }
        }
        counts.values().fold((0, 0), |(open, over), &n| match n {
            1 => (open + 1, over),
            2 => (open, over),
            _ => (open, over + 1),
        })
    }
}

impl MeshSink for TessellatedSolid {
    fn add_facet(&mut self, triangle: Triangle) -> Result<()> {
        if self.closed {
            return Err(MeshError::SolidClosed(self.name.clone()));
        }
        let index = self.facets.len();
        if !triangle.is_finite() {
            return Err(MeshError::NonFiniteFacet(index));
        }

        // Keys are compared before welding so a rejected facet adds no vertices.
        let [a, b, c] = triangle.vertices;
        let [ka, kb, kc] = [a, b, c].map(|p| self.tolerance.quantize(&p));
        if ka == kb || kb == kc || kc == ka {
            return Err(MeshError::DegenerateFacet(index));
        }

        let ia = self.vertex_index(ka, a);
        let ib = self.vertex_index(kb, b);
        let ic = self.vertex_index(kc, c);

        self.facets.push([ia, ib, ic]);
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        let (open, overshared) = self.edge_defects();
        if self.facets.is_empty() || open > 0 || overshared > 0 {
            return Err(MeshError::NotWatertight {
                name: self.name.clone(),
                open,
                overshared,
            });
        }
        self.closed = true;
        debug!(
            solid = %self.name,
            facets = self.facets.len(),
            vertices = self.vertices.len(),
            "closed tessellated solid"
        );
        Ok(())
    }
}
