//! Cap and side-strip triangulation of loops.
//!
//! Triangle vertex order is the facet orientation; nothing downstream
//! re-sorts it.

use helixmesh_mesh::Triangle;

use crate::section::Loop;

/// Close a loop with a fan from its last vertex.
///
/// For a loop wound counter-clockwise seen from +Z the cap faces -Z, which
/// is outward at the start of a tube running toward +Z. A quad yields
/// `(v3, v1, v0)` and `(v3, v2, v1)`.
pub fn cap_triangles(lp: &Loop) -> Vec<Triangle> {
    let n = lp.len();
    debug_assert!(n >= 3);
    let apex = lp[n - 1];
    (0..n - 2)
        .map(|i| Triangle::new(apex, lp[i + 1], lp[i]))
        .collect()
}

/// Stitch loop `a` to the next loop `b` with two triangles per edge.
///
/// For each `i` with `j = (i + 1) mod n` this emits `(a[i], a[j], b[i])`
/// and `(a[j], b[j], b[i])`, including the wrap-around edge, so the strip
/// is closed. Both loops must have the same length.
pub fn side_triangles(a: &Loop, b: &Loop) -> Vec<Triangle> {
    let n = a.len();
    debug_assert_eq!(n, b.len(), "side strip between loops of different length");

    let mut tris = Vec::with_capacity(2 * n);
    for i in 0..n {
        let j = (i + 1) % n;
        tris.push(Triangle::new(a[i], a[j], b[i]));
        tris.push(Triangle::new(a[j], b[j], b[i]));
    }
    tris
}
