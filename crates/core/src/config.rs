//! Bridge configuration
//!
//! Loaded once at module initialisation. Every field has a default, so an
//! absent or partial configuration is valid.
//!
//! ```json
//! {
//!   "log_filter": "cvbridge=debug",
//!   "log_format": "json",
//!   "native_error_prefix": "OpenCV error: ",
//!   "generic_error_prefix": "Error: ",
//!   "unknown_error_message": "Unknown error occurred"
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Environment variable holding a JSON configuration document
pub const CONFIG_ENV_VAR: &str = "CVBRIDGE_CONFIG";

/// Output format of the tracing subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per event
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is not set
    pub log_filter: String,

    pub log_format: LogFormat,

    /// Prepended to messages of failures raised by the native library
    pub native_error_prefix: String,

    /// Prepended to messages of every other reported failure
    pub generic_error_prefix: String,

    /// Message reported when a call panics
    pub unknown_error_message: String,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            log_filter: "info".to_string(),
            log_format: LogFormat::Text,
            native_error_prefix: "OpenCV error: ".to_string(),
            generic_error_prefix: "Error: ".to_string(),
            unknown_error_message: "Unknown error occurred".to_string(),
        }
    }
}

impl BridgeConfig {
    /// Parse a JSON document; missing fields keep their defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a JSON configuration file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            Error::ConfigError(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_json_str(&text)
    }

    /// Configuration from `CVBRIDGE_CONFIG`, or defaults when unset
    pub fn from_env() -> Result<Self> {
        match std::env::var(CONFIG_ENV_VAR) {
            Ok(json) if !json.trim().is_empty() => Self::from_json_str(&json),
            _ => Ok(Self::default()),
        }
    }
}
