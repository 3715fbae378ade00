//! Error types
//!
//! Only construction can fail. Once a `Simulation` exists every domain
//! operation is total.

use std::path::PathBuf;

use thiserror::Error;

/// Invalid or unreadable game configuration. Fatal at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A setting is out of range or inconsistent with the others
    #[error("invalid setting `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },

    /// The settings file could not be read
    #[error("failed to read settings file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The settings file is not valid JSON for `Settings`
    #[error("failed to parse settings file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl ConfigError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}
