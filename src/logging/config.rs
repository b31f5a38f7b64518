//! Logging configuration
//!
//! Output destinations and the log level applied to this crate's targets.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const VALID_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub global_level: String,

    /// Enable console output
    pub console_output: bool,

    /// Directory for JSON log files (None = no file logging)
    pub log_directory: Option<PathBuf>,

    /// Include file location in console logs
    pub include_file_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            global_level: "info".to_string(),
            console_output: true,
            log_directory: None,
            include_file_location: false,
        }
    }
}

impl LoggingConfig {
    /// Verbose console logging with per-alignment traces
    pub fn development() -> Self {
        Self {
            global_level: "trace".to_string(),
            console_output: true,
            log_directory: Some(PathBuf::from("logs")),
            include_file_location: true,
        }
    }

    /// Warnings only, written to files
    pub fn production() -> Self {
        Self {
            global_level: "warn".to_string(),
            console_output: false,
            log_directory: Some(PathBuf::from("/var/log/trajectory-geometry")),
            include_file_location: false,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if !VALID_LEVELS.contains(&self.global_level.as_str()) {
            return Err(format!(
                "Invalid global_level: {}. Must be one of: {:?}",
                self.global_level, VALID_LEVELS
            ));
        }

        if let Some(ref log_dir) = self.log_directory {
            if let Some(parent) = log_dir.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    return Err(format!("Log directory parent does not exist: {:?}", parent));
                }
            }
        }

        Ok(())
    }
}
