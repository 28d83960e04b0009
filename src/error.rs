//! Crate error types.
//!
//! The simulation itself has no fatal runtime errors; these cover loading
//! settings and rejecting degenerate entity construction.

use std::path::PathBuf;

use thiserror::Error;

/// Failure to load or validate [`crate::Settings`].
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid setting `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: String,
    },
}

impl SettingsError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        SettingsError::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

/// Rejected simulation requests.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum SimError {
    /// A projectile was asked to travel along a zero-length direction.
    #[error("projectile direction has zero length (at {x}, {y})")]
    DegenerateDirection { x: f32, y: f32 },
}
