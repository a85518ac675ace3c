//! Atelier configuration
//!
//! Loaded from a TOML file; every field has a default so an empty file
//! (or no file at all) yields a working setup.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::blueprints::filter::FilterKind;
use crate::core::error::{BlueprintError, Result};

/// Configuration for the blueprint service and its front end
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AtelierConfig {
    /// Preload the built-in sample catalogue into a fresh store
    pub seed_samples: bool,

    /// Filter applied by `BlueprintService::filter_blueprint`
    pub default_filter: FilterKind,

    /// `tracing_subscriber::EnvFilter` directive used when `RUST_LOG` is unset
    pub log_filter: String,

    /// Additional blueprint files loaded at startup
    ///
    /// Each file holds `[[blueprints]]` tables; a key collision with an
    /// already loaded blueprint aborts startup.
    pub blueprint_files: Vec<PathBuf>,
}

impl Default for AtelierConfig {
    fn default() -> Self {
        Self {
            seed_samples: true,
            default_filter: FilterKind::DedupeAdjacent,
            log_filter: "blueprint_atelier=info".to_string(),
            blueprint_files: Vec::new(),
        }
    }
}

impl AtelierConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| BlueprintError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a TOML file on disk
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content).map_err(|e| match e {
            BlueprintError::Parse(msg) => {
                BlueprintError::Parse(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.log_filter.trim().is_empty() {
            return Err(BlueprintError::InvalidState(
                "log_filter must not be empty".into(),
            ));
        }
        Ok(())
    }
}
