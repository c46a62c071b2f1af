//! Configuration file support.
//!
//! Two configuration file locations are read:
//! - Global: `<config dir>/config.toml` - User-wide defaults
//! - Project: `.catkin-env/config.toml` - Project-specific overrides
//!
//! Project config takes precedence over global config.
//!
//! ```toml
//! [database]
//! sources = ["/etc/catkin-env/base.toml", "db/local.toml"]
//! enabled = true
//!
//! [workspace]
//! paths = ["src", "/opt/ros/noetic/share"]
//! follow_links = false
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::util::fs::resolve_path;

/// Tool configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Dependency database settings
    pub database: DatabaseConfig,

    /// Workspace settings
    pub workspace: WorkspaceConfig,
}

/// Dependency database configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Index files, in precedence order
    pub sources: Vec<PathBuf>,

    /// Whether to consult the database at all (default: true)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

impl DatabaseConfig {
    /// Whether the database is enabled, defaulting to true.
    pub fn is_enabled(&self) -> bool {
        self.enabled.unwrap_or(true)
    }
}

/// Workspace configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkspaceConfig {
    /// Paths registered when none are given on the command line
    pub paths: Vec<PathBuf>,

    /// Whether discovery follows symlinked directories (default: true)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub follow_links: Option<bool>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if file doesn't exist.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Resolve relative paths against `base`.
    pub fn resolve_paths(mut self, base: &Path) -> Self {
        self.database.sources = self
            .database
            .sources
            .iter()
            .map(|p| resolve_path(base, p))
            .collect();
        self.workspace.paths = self
            .workspace
            .paths
            .iter()
            .map(|p| resolve_path(base, p))
            .collect();
        self
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        if !other.database.sources.is_empty() {
            self.database.sources = other.database.sources;
        }
        if other.database.enabled.is_some() {
            self.database.enabled = other.database.enabled;
        }

        if !other.workspace.paths.is_empty() {
            self.workspace.paths = other.workspace.paths;
        }
        if other.workspace.follow_links.is_some() {
            self.workspace.follow_links = other.workspace.follow_links;
        }
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (`.catkin-env/config.toml`, relative paths resolved
///    against the project root)
/// 2. Global config
/// 3. Defaults
pub fn load_config(global_path: &Path, project_path: &Path, project_root: &Path) -> Config {
    let mut config = Config::default();

    // Load global config first
    if global_path.exists() {
        let base = global_path.parent().unwrap_or(Path::new("."));
        let global = Config::load_or_default(global_path).resolve_paths(base);
        config.merge(global);
    }

    // Project config overrides global
    if project_path.exists() {
        let project = Config::load_or_default(project_path).resolve_paths(project_root);
        config.merge(project);
    }

    config
}
