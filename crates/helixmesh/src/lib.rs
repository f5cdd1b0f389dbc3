#![warn(missing_docs)]

//! helixmesh: watertight meshes of helically wound square fibers.
//!
//! Re-exports the sweep kernel and mesh types, and adds the pieces around
//! them: feeding a build into a [`MeshSink`], TOML fiber sets, parallel
//! batch builds, per-helix reports and file export.
//!
//! # Example
//!
//! ```rust,no_run
//! use helixmesh::{build_solid, export, HelixConfig};
//!
//! let config = HelixConfig::new("fiber_0", 10.0, 1.0, 0.5, 200.0, 100).with_extrusion(0.5);
//! let solid = build_solid(&config).unwrap();
//! assert!(solid.is_closed());
//!
//! let mesh = helixmesh::build_helix(&config).unwrap();
//! export::write_mesh(&mesh, &config.name, export::ExportFormat::Stl, "fiber_0.stl").unwrap();
//! ```

use rayon::prelude::*;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

pub mod config;
pub mod export;

pub use config::{ConfigError, FiberSet, HelixEntry};
pub use helixmesh_math::{Point3, Tolerance, Transform, Vec3};
pub use helixmesh_mesh::{stl, Mesh, MeshError, MeshSink, TessellatedSolid, Triangle};
pub use helixmesh_sweep::{
    angle_to_turns, build_helix, build_helix_with, make_square, path, triangle_count,
    turns_to_angle, HelixConfig, HelixFrame, Loop, SectionProfile, Square, SweepError,
};

/// Errors returned by helixmesh operations.
#[derive(Error, Debug)]
pub enum HelixError {
    /// The helix could not be built.
    #[error(transparent)]
    Sweep(#[from] SweepError),
    /// A sink rejected the mesh, or export failed.
    #[error(transparent)]
    Mesh(#[from] MeshError),
    /// A fiber set could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// An I/O error occurred during export.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Build `config` and feed every triangle, in order, into `sink`, then
/// close it.
///
/// An invalid configuration is rejected before the sink sees any facet.
pub fn emit_helix(config: &HelixConfig, sink: &mut dyn MeshSink) -> Result<(), HelixError> {
    let mesh = build_helix(config)?;
    mesh.emit_into(sink)?;
    Ok(())
}

/// Build `config` into a closed, welded [`TessellatedSolid`] named after it.
pub fn build_solid(config: &HelixConfig) -> Result<TessellatedSolid, HelixError> {
    let mut solid = TessellatedSolid::new(config.name.clone());
    emit_helix(config, &mut solid)?;
    Ok(solid)
}

/// Build many helices in parallel.
///
/// Results keep the order of `configs`; each build is independent.
pub fn build_all(configs: &[HelixConfig]) -> Vec<Result<Mesh, SweepError>> {
    debug!(helices = configs.len(), "building helix batch");
    configs.par_iter().map(build_helix).collect()
}

/// Build every helix of a fiber set, failing on the first error.
pub fn build_set(set: &FiberSet) -> Result<Vec<Mesh>, SweepError> {
    build_all(set.helices()).into_iter().collect()
}

/// Summary of one built helix.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HelixReport {
    /// Helix name.
    pub name: String,
    /// Revolutions over the full length.
    pub turns: f64,
    /// Number of triangles.
    pub triangles: usize,
    /// Whether every edge is shared by exactly two triangles.
    pub closed: bool,
    /// Whether neighbouring triangles agree on orientation.
    pub oriented: bool,
    /// Enclosed volume.
    pub volume: f64,
    /// Surface area.
    pub area: f64,
    /// Bounding box `(min, max)`.
    pub bounds: Option<(Point3, Point3)>,
}

impl HelixReport {
    /// Analyse `mesh`, built from `config`.
    pub fn new(config: &HelixConfig, mesh: &Mesh) -> Self {
        Self {
            name: config.name.clone(),
            turns: config.turns(),
            triangles: mesh.len(),
            closed: mesh.is_closed(),
            oriented: mesh.is_consistently_oriented(),
            volume: mesh.signed_volume(),
            area: mesh.surface_area(),
            bounds: mesh.bounding_box(),
        }
    }
}
