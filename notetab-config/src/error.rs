//! Typed error variants for the notetab-config crate.
//!
//! Provides structured error types for config I/O and validation operations
//! so callers can match on specific failure modes instead of opaque strings.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when loading, validating or saving configuration.
///
/// # Example
///
/// ```rust,no_run
/// use notetab_config::{Config, ConfigError};
///
/// match Config::load() {
///     Ok(config) => println!("default title: {}", config.default_title),
///     Err(ConfigError::Parse { path, .. }) => eprintln!("bad YAML in {}", path.display()),
///     Err(e) => eprintln!("{e}"),
/// }
/// ```
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An I/O error occurred reading or writing the config file.
    #[error("I/O error on config file '{}': {source}", path.display())]
    Io {
        /// File that could not be read or written.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file contained invalid YAML that could not be parsed.
    #[error("YAML parse error in config '{}': {source}", path.display())]
    Parse {
        /// File that failed to parse.
        path: PathBuf,
        #[source]
        source: serde_yaml_ng::Error,
    },

    /// The in-memory config could not be serialised back to YAML.
    #[error("Failed to serialise config: {0}")]
    Serialize(#[source] serde_yaml_ng::Error),

    /// A field value failed semantic validation.
    ///
    /// The inner string describes which field is invalid and why.
    #[error("Config validation error: {0}")]
    Validation(String),
}
