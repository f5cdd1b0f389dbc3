//! STL export.
//!
//! Binary STL stores each facet as a normal, three vertices (all `f32`)
//! and a zero attribute count, after an 80-byte header and a facet count.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::mesh::Mesh;
use crate::triangle::Triangle;

fn facet_normal(tri: &Triangle) -> [f32; 3] {
    match tri.unit_normal() {
        Some(n) => [n.x as f32, n.y as f32, n.z as f32],
        None => [0.0, 0.0, 1.0],
    }
}

/// Encode a mesh as binary STL.
///
/// `header` is truncated or space-padded to 80 bytes.
pub fn to_binary(mesh: &Mesh, header: &str) -> Vec<u8> {
    let mut data = Vec::with_capacity(84 + mesh.len() * 50);

    let mut head = [b' '; 80];
    let bytes = header.as_bytes();
    let n = bytes.len().min(80);
    head[..n].copy_from_slice(&bytes[..n]);
    data.extend_from_slice(&head);
    data.extend_from_slice(&(mesh.len() as u32).to_le_bytes());

    for tri in mesh {
        for c in facet_normal(tri) {
            data.extend_from_slice(&c.to_le_bytes());
        }
        for v in &tri.vertices {
            data.extend_from_slice(&(v.x as f32).to_le_bytes());
            data.extend_from_slice(&(v.y as f32).to_le_bytes());
            data.extend_from_slice(&(v.z as f32).to_le_bytes());
        }
        // Attribute byte count
        data.extend_from_slice(&0u16.to_le_bytes());
    }

    data
}

/// Encode a mesh as ASCII STL with solid name `name`.
pub fn to_ascii(mesh: &Mesh, name: &str) -> String {
    let mut out = String::with_capacity(mesh.len() * 256);
    let _ = writeln!(out, "solid {name}");
    for tri in mesh {
        let [nx, ny, nz] = facet_normal(tri);
        let _ = writeln!(out, "  facet normal {nx:e} {ny:e} {nz:e}");
        let _ = writeln!(out, "    outer loop");
        for v in &tri.vertices {
            let _ = writeln!(out, "      vertex {:e} {:e} {:e}", v.x, v.y, v.z);
        }
        let _ = writeln!(out, "    endloop");
        let _ = writeln!(out, "  endfacet");
    }
    let _ = writeln!(out, "endsolid {name}");
    out
}

/// Write a mesh to `path` as binary STL.
pub fn write_binary(mesh: &Mesh, header: &str, path: impl AsRef<Path>) -> Result<()> {
    fs::write(path, to_binary(mesh, header))?;
    Ok(())
}

/// Write a mesh to `path` as ASCII STL.
pub fn write_ascii(mesh: &Mesh, name: &str, path: impl AsRef<Path>) -> Result<()> {
    fs::write(path, to_ascii(mesh, name))?;
    Ok(())
}
