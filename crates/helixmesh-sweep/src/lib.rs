#![warn(missing_docs)]

//! Helical sweep of a prism cross-section.
//!
//! A square section is built at the start of a circular helix, tilted to
//! follow the helix tangent, and transported step by step along the path.
//! Consecutive loops are stitched into side strips and both ends are capped,
//! optionally with a short axial extrusion, giving a closed outward-facing
//! triangle mesh.
//!
//! # Example
//!
//! ```
//! use helixmesh_sweep::{build_helix, HelixConfig};
//!
//! let config = HelixConfig::new("fiber_0", 10.0, 1.0, 30f64.to_radians(), 200.0, 50)
//!     .with_extrusion(0.5);
//! let mesh = build_helix(&config).unwrap();
//! assert_eq!(mesh.len(), config.expected_triangles());
//! assert!(mesh.is_closed());
//! assert!(mesh.signed_volume() > 0.0);
//! ```

mod cap;
mod error;
mod frame;
mod helix;
mod path;
mod section;
mod triangulate;

pub use cap::extrude_cap;
pub use error::SweepError;
pub use frame::{advance, tilt, HelixFrame};
pub use helix::{build_helix, build_helix_with, triangle_count, HelixConfig};
pub use path::{angle_to_turns, path, path_tangent, turns_to_angle};
pub use section::{make_square, Loop, SectionProfile, Square};
pub use triangulate::{cap_triangles, side_triangles};
