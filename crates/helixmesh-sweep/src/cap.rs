//! Extruded end caps.

use helixmesh_math::Vec3;
use helixmesh_mesh::Triangle;

use crate::section::Loop;
use crate::triangulate::{cap_triangles, side_triangles};

/// Extend `lp` axially by `extrusion` and close the far end.
///
/// Returns the side strip between the flipped loop and the flipped offset
/// loop, followed by the cap of the offset loop. The flips reverse the side
/// winding relative to a plain sweep step, so both ends face outward when
/// the start is extruded by `-e` and the flipped end loop by `+e`.
///
/// A zero extrusion yields a degenerate strip; callers cap directly instead.
pub fn extrude_cap(lp: &Loop, extrusion: f64) -> Vec<Triangle> {
    let offset = lp.translated(&Vec3::new(0.0, 0.0, extrusion));

    let mut tris = side_triangles(&lp.flip(), &offset.flip());
    tris.extend(cap_triangles(&offset));
    tris
}
