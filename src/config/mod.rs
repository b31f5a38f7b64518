use crate::geometry::{self, GeometryError, SimilarityTransform};
use crate::logging::LoggingConfig;
use crate::Result;
use anyhow::Context;
use ndarray::{ArrayBase, Data, Ix2};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub alignment: AlignmentConfig,
    pub logging: LoggingConfig,
}

/// Caller-facing alignment defaults. The numeric tolerances are fixed and
/// deliberately not part of this struct.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AlignmentConfig {
    pub with_scale: bool,
}

impl AlignmentConfig {
    pub fn align<S1, S2>(
        &self,
        x: &ArrayBase<S1, Ix2>,
        y: &ArrayBase<S2, Ix2>,
    ) -> std::result::Result<SimilarityTransform, GeometryError>
    where
        S1: Data<Elem = f64>,
        S2: Data<Elem = f64>,
    {
        geometry::umeyama_alignment(x, y, self.with_scale)
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;

        if content.trim_start().starts_with('{') {
            Ok(serde_json::from_str(&content)?)
        } else {
            Ok(toml::from_str(&content)?)
        }
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P, format: ConfigFormat) -> Result<()> {
        let content = match format {
            ConfigFormat::Json => serde_json::to_string_pretty(self)?,
            ConfigFormat::Toml => toml::to_string_pretty(self)?,
        };

        fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> std::result::Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if let Err(e) = self.logging.validate() {
            errors.push(e);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum ConfigFormat {
    Json,
    Toml,
}

pub fn load_config_or_default(config_path: Option<&str>) -> Config {
    let Some(path) = config_path else {
        return Config::default();
    };

    match Config::load_from_file(path) {
        Ok(config) => match config.validate() {
            Ok(()) => config,
            Err(errors) => {
                for error in errors {
                    tracing::warn!(%error, "configuration validation error");
                }
                tracing::warn!("using default configuration instead");
                Config::default()
            }
        },
        Err(e) => {
            tracing::warn!(path, error = %e, "failed to load config, using defaults");
            Config::default()
        }
    }
}
