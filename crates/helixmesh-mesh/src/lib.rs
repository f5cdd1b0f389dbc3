#![warn(missing_docs)]

//! Triangle meshes for the helixmesh kernel.
//!
//! Provides the ordered [`Triangle`] list produced by the sweep kernel,
//! watertightness and orientation checks over it, the [`MeshSink`]
//! boundary through which solids are built facet by facet, and STL export.
//!
//! # Example
//!
//! ```
//! use helixmesh_math::Point3;
//! use helixmesh_mesh::{Mesh, Triangle};
//!
//! let mut mesh = Mesh::new();
//! mesh.push(Triangle::new(
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(0.0, 1.0, 0.0),
//! ));
//! assert_eq!(mesh.len(), 1);
//! assert!(!mesh.is_closed());
//! ```

mod error;
mod mesh;
mod sink;
pub mod stl;
mod triangle;

pub use error::{MeshError, Result};
pub use mesh::{EdgeKey, Mesh};
pub use sink::{MeshSink, TessellatedSolid};
pub use triangle::Triangle;
