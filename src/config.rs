//! Configuration for cqlwire tooling
//!
//! Centralized configuration with sensible defaults.

use crate::types::ProtocolVersion;

/// Protocol version used when none is given
pub const DEFAULT_PROTOCOL_VERSION: ProtocolVersion = 4;

/// Newest protocol version the codecs know about
pub const MAX_PROTOCOL_VERSION: ProtocolVersion = 5;

/// Main configuration
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Protocol Configuration
    // -------------------------------------------------------------------------
    /// Native protocol version to resolve codecs for
    pub protocol_version: ProtocolVersion,

    /// Fail with `UnsupportedType` instead of logging and returning nothing
    /// when a descriptor cannot be resolved
    pub strict_resolution: bool,

    // -------------------------------------------------------------------------
    // Logging Configuration
    // -------------------------------------------------------------------------
    /// Default `tracing` filter directive, used when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            protocol_version: DEFAULT_PROTOCOL_VERSION,
            strict_resolution: false,
            log_filter: "info,cqlwire=debug".to_string(),
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the native protocol version
    pub fn protocol_version(mut self, version: ProtocolVersion) -> Self {
        self.config.protocol_version = version;
        self
    }

    /// Set strict resolution
    pub fn strict_resolution(mut self, strict: bool) -> Self {
        self.config.strict_resolution = strict;
        self
    }

    /// Set the default log filter
    pub fn log_filter(mut self, filter: impl Into<String>) -> Self {
        self.config.log_filter = filter.into();
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
