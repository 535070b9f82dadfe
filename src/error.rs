//! Typed errors for layer discovery and loading.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while discovering and loading configuration layers.
///
/// None of these abort resolver construction: they are logged, captured
/// on the resolver for inspection, and the affected layer slot stays
/// absent. Lookups against a degraded resolver fall back to the
/// caller's default.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The root configuration directory does not exist.
    #[error("config base directory not found: {path}")]
    MissingBaseDirectory { path: PathBuf },

    /// An environment was specified but its directory does not exist.
    #[error("config directory for environment '{code}' not found: {path}")]
    MissingEnvironmentDirectory { code: String, path: PathBuf },

    /// A category directory expected by the layout is missing.
    #[error("config directory not found: {path}")]
    MissingDirectory { path: PathBuf },

    /// A properties file was listed but could not be read.
    #[error("failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A locale tag could not be parsed.
    #[error("invalid locale tag: {tag:?}")]
    InvalidLocale { tag: String },
}
