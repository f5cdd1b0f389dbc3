//! Fiber set files.
//!
//! A fiber set is a TOML document with one `[[helix]]` table per fiber:
//!
//! ```toml
//! [[helix]]
//! name = "fiber_0"
//! radius = 10.0
//! size = 1.0
//! running_angle_deg = 30.0
//! length = 200.0
//! steps = 200
//! extrusion = 0.5
//! ```
//!
//! The running angle is given either in radians (`running_angle`) or in
//! degrees (`running_angle_deg`), not both. `center` defaults to the origin
//! and `extrusion` to zero.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use helixmesh_math::Point3;
use helixmesh_sweep::{HelixConfig, SweepError};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Errors returned while loading a fiber set.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The document is not valid TOML or has the wrong shape.
    #[error("failed to parse fiber set: {0}")]
    Parse(#[from] toml::de::Error),

    /// The set has no `[[helix]]` entries.
    #[error("fiber set has no helix entries")]
    Empty,

    /// Two entries share a name.
    #[error("duplicate helix name '{0}'")]
    DuplicateName(String),

    /// An entry gives the running angle in both units.
    #[error("helix '{0}' sets both running_angle and running_angle_deg")]
    ConflictingAngles(String),

    /// An entry does not describe a valid helix.
    #[error("helix '{name}': {source}")]
    Invalid {
        /// Entry name.
        name: String,
        /// Why the entry was rejected.
        #[source]
        source: SweepError,
    },
}

/// One `[[helix]]` table as written in the file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HelixEntry {
    /// Fiber name.
    pub name: String,
    /// Placement `[x, y, z]` of the helix frame.
    #[serde(default)]
    pub center: Option<[f64; 3]>,
    /// Former radius.
    pub radius: f64,
    /// Cross-section side.
    pub size: f64,
    /// Running angle in radians.
    #[serde(default)]
    pub running_angle: Option<f64>,
    /// Running angle in degrees.
    #[serde(default)]
    pub running_angle_deg: Option<f64>,
    /// Axial length.
    pub length: f64,
    /// Sweep steps.
    pub steps: u32,
    /// End extrusion.
    #[serde(default)]
    pub extrusion: f64,
}

impl HelixEntry {
    /// Convert into a validated [`HelixConfig`].
    pub fn to_config(&self) -> Result<HelixConfig, ConfigError> {
        let running_angle = match (self.running_angle, self.running_angle_deg) {
            (Some(_), Some(_)) => return Err(ConfigError::ConflictingAngles(self.name.clone())),
            (Some(rad), None) => rad,
            (None, Some(deg)) => deg.to_radians(),
            (None, None) => 0.0,
        };
        let [x, y, z] = self.center.unwrap_or([0.0; 3]);

        let config = HelixConfig {
            name: self.name.clone(),
            center: Point3::new(x, y, z),
            radius: self.radius,
            size: self.size,
            running_angle,
            length: self.length,
            steps: self.steps,
            extrusion: self.extrusion,
        };
        config.validate().map_err(|source| ConfigError::Invalid {
            name: self.name.clone(),
            source,
        })?;
        Ok(config)
    }
}

#[derive(Debug, Deserialize)]
struct FiberSetFile {
    #[serde(default)]
    helix: Vec<HelixEntry>,
}

/// A validated, ordered collection of helix configurations.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FiberSet {
    helices: Vec<HelixConfig>,
}

impl FiberSet {
    /// Build a set from configurations, validating each.
    pub fn new(helices: Vec<HelixConfig>) -> Result<Self, ConfigError> {
        if helices.is_empty() {
            return Err(ConfigError::Empty);
        }
        let mut seen = HashSet::new();
        for config in &helices {
            if !seen.insert(config.name.as_str()) {
                return Err(ConfigError::DuplicateName(config.name.clone()));
            }
            config.validate().map_err(|source| ConfigError::Invalid {
                name: config.name.clone(),
                source,
            })?;
        }
        Ok(Self { helices })
    }

    /// Parse a fiber set from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let file: FiberSetFile = toml::from_str(text)?;
        let helices = file
            .helix
            .iter()
            .map(HelixEntry::to_config)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(helices)
    }

    /// Read and parse a fiber set file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let set = Self::from_toml_str(&text)?;
        debug!(path = %path.display(), helices = set.len(), "loaded fiber set");
        Ok(set)
    }

    /// Configurations in file order.
    pub fn helices(&self) -> &[HelixConfig] {
        &self.helices
    }

    /// Number of helices.
    pub fn len(&self) -> usize {
        self.helices.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.helices.is_empty()
    }

    /// Iterate over configurations in file order.
    pub fn iter(&self) -> std::slice::Iter<'_, HelixConfig> {
        self.helices.iter()
    }
}

impl<'a> IntoIterator for &'a FiberSet {
    type Item = &'a HelixConfig;
    type IntoIter = std::slice::Iter<'a, HelixConfig>;

    fn into_iter(self) -> Self::IntoIter {
        self.helices.iter()
    }
}
