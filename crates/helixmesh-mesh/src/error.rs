//! Error types for mesh sinks and export.

use thiserror::Error;

/// Errors that can occur while building or exporting a mesh.
#[derive(Error, Debug)]
pub enum MeshError {
    /// A facet was added to a solid that is already closed.
    #[error("solid '{0}' is closed; no more facets can be added")]
    SolidClosed(String),

    /// A facet collapses to fewer than three distinct vertices.
    #[error("facet {0} is degenerate")]
    DegenerateFacet(usize),

    /// A facet has a NaN or infinite coordinate.
    #[error("facet {0} has non-finite coordinates")]
    NonFiniteFacet(usize),

    /// The solid cannot be closed because its surface has boundary or
    /// over-shared edges.
    #[error("solid '{name}' is not watertight: {open} open edges, {overshared} over-shared edges")]
    NotWatertight {
        /// Solid name.
        name: String,
        /// Edges used by a single facet.
        open: usize,
        /// Edges used by more than two facets.
        overshared: usize,
    },

    /// I/O failure while writing an export.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for mesh operations.
pub type Result<T> = std::result::Result<T, MeshError>;
