use thiserror::Error;

/// Errors that can occur while building a helix mesh.
///
/// All of them are raised before the first triangle is produced.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SweepError {
    /// A configuration field is out of range or would make the helix
    /// geometry non-finite.
    #[error("invalid helix configuration: {field} {reason}")]
    InvalidHelixConfiguration {
        /// Name of the offending field.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },

    /// A cross-section profile produced an unusable loop.
    #[error("invalid section profile: {0}")]
    InvalidProfile(String),
}

impl SweepError {
    /// Stable identifier for the error class.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidHelixConfiguration { .. } => "invalid-helix-configuration",
            Self::InvalidProfile(_) => "invalid-section-profile",
        }
    }

    pub(crate) fn config(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidHelixConfiguration {
            field,
            reason: reason.into(),
        }
    }
}
