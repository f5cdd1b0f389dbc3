//! Writing built meshes to disk.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use helixmesh_mesh::{stl, Mesh};
use tracing::info;

use crate::{HelixError, HelixReport};

/// Output file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    /// Binary STL.
    #[default]
    Stl,
    /// ASCII STL.
    AsciiStl,
    /// JSON list of triangles.
    Json,
}

impl ExportFormat {
    /// File extension, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Stl | Self::AsciiStl => "stl",
            Self::Json => "json",
        }
    }

    /// Guess the format from a path's extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "stl" => Some(Self::Stl),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    /// Pick `explicit` if given, else guess from `path`.
    pub fn resolve(explicit: Option<Self>, path: &Path) -> Option<Self> {
        explicit.or_else(|| Self::from_path(path))
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Stl => "stl",
            Self::AsciiStl => "ascii-stl",
            Self::Json => "json",
        })
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "stl" => Ok(Self::Stl),
            "ascii-stl" | "ascii" => Ok(Self::AsciiStl),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown format '{other}' (expected stl, ascii-stl or json)")),
        }
    }
}

/// Serialize a mesh's triangles as pretty JSON.
pub fn mesh_to_json(mesh: &Mesh) -> Result<String, HelixError> {
    Ok(serde_json::to_string_pretty(mesh.triangles())?)
}

/// Serialize helix reports as pretty JSON.
pub fn reports_to_json(reports: &[HelixReport]) -> Result<String, HelixError> {
    Ok(serde_json::to_string_pretty(reports)?)
}

/// Write `mesh` to `path` in `format`, using `name` as the solid name.
pub fn write_mesh(
    mesh: &Mesh,
    name: &str,
    format: ExportFormat,
    path: impl AsRef<Path>,
) -> Result<(), HelixError> {
    let path = path.as_ref();
    match format {
        ExportFormat::Stl => stl::write_binary(mesh, &format!("helixmesh {name}"), path)?,
        ExportFormat::AsciiStl => stl::write_ascii(mesh, name, path)?,
        ExportFormat::Json => fs::write(path, mesh_to_json(mesh)?)?,
    }
    info!(solid = name, triangles = mesh.len(), path = %path.display(), "wrote {format}");
    Ok(())
}

/// Path of the file for solid `name` inside `dir`.
pub fn output_path(dir: &Path, name: &str, format: ExportFormat) -> PathBuf {
    dir.join(format!("{name}.{}", format.extension()))
}
