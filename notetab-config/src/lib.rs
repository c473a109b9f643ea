//! Configuration system for the notetab editor.
//!
//! This crate provides configuration loading, saving, and default values
//! for the editor. It includes:
//!
//! - The [`Config`] struct and its YAML persistence
//! - Default value functions used by serde
//! - The [`LogLevel`] setting shared with the logging bridge
//! - Typed [`ConfigError`] variants

pub mod config;
pub mod defaults;
pub mod error;
mod types;

// Re-export main types for convenience
pub use config::Config;
pub use error::ConfigError;
pub use types::LogLevel;
