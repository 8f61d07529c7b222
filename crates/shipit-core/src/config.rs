//! Project configuration module
//!
//! A project is configured by an optional `shipit.toml` in its root
//! directory. A missing file yields the defaults.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Name of the configuration file looked up in the project root
pub const CONFIG_FILE: &str = "shipit.toml";

/// Highest deflate level accepted in `archive.compression_level`
const MAX_COMPRESSION_LEVEL: i64 = 9;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Project name (defaults to the directory name)
    #[serde(default)]
    pub name: Option<String>,
    /// Build settings
    #[serde(default)]
    pub build: BuildConfig,
    /// Archive settings
    #[serde(default)]
    pub archive: ArchiveConfig,
}

/// Build configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Shell commands run in order before packaging
    #[serde(default)]
    pub hooks: Vec<String>,
}

/// Archive configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchiveConfig {
    /// Glob patterns, relative to the project root, excluded from the archive
    #[serde(default = "default_ignore")]
    pub ignore: Vec<String>,
    /// Deflate compression level (0-9)
    #[serde(default = "default_compression_level")]
    pub compression_level: i64,
    /// Follow symlinks (pack link targets instead of skipping links)
    #[serde(default)]
    pub follow_symlinks: bool,
}

fn default_ignore() -> Vec<String> {
    vec![".git/**".to_string()]
}

fn default_compression_level() -> i64 {
    6
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            ignore: default_ignore(),
            compression_level: default_compression_level(),
            follow_symlinks: false,
        }
    }
}

impl Config {
    /// Get the configuration file path for a project directory
    pub fn config_path<P: AsRef<Path>>(project_dir: P) -> PathBuf {
        project_dir.as_ref().join(CONFIG_FILE)
    }

    /// Load the configuration of a project, falling back to defaults
    /// when the project has no configuration file
    pub fn load<P: AsRef<Path>>(project_dir: P) -> Result<Self> {
        let path = Self::config_path(&project_dir);

        if !path.exists() {
            debug!("No {} found in {:?}, using defaults", CONFIG_FILE, project_dir.as_ref());
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)?;
        Self::from_toml(&contents)
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges and ignore patterns
    pub fn validate(&self) -> Result<()> {
        let level = self.archive.compression_level;
        if !(0..=MAX_COMPRESSION_LEVEL).contains(&level) {
            return Err(Error::Config(format!(
                "compression_level must be between 0 and {}, got {}",
                MAX_COMPRESSION_LEVEL, level
            )));
        }

        for pattern in &self.archive.ignore {
            glob::Pattern::new(pattern)?;
        }

        if self.build.hooks.iter().any(|hook| hook.trim().is_empty()) {
            return Err(Error::Config("build hooks must not be empty".to_string()));
        }

        Ok(())
    }
}
