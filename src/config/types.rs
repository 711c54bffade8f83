// Configuration types module
// Defines the immutable configuration built once at startup

use serde::Deserialize;
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Interface to bind, `0.0.0.0` listens on all of them
    pub host: String,
    pub port: u16,
    /// Directory requests are resolved against; set from the caller, never
    /// from a config source, so non-UTF-8 paths survive unchanged
    #[serde(skip)]
    pub root: PathBuf,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// Echo one line per handled request
    pub access_log: bool,
}
