//! Global context for catkin-env operations.
//!
//! Provides centralized access to configuration, paths, and environment.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use anyhow::{Context, Result};
use directories::ProjectDirs;

use crate::util::config::{load_config, Config};

/// Name of the project-local configuration directory.
pub const PROJECT_DIR_NAME: &str = ".catkin-env";

/// Environment variable overriding the global configuration directory.
pub const HOME_ENV: &str = "CATKIN_ENV_HOME";

/// Project directories for catkin-env
static PROJECT_DIRS: LazyLock<Option<ProjectDirs>> =
    LazyLock::new(|| ProjectDirs::from("org", "ros", "catkin-env"));

/// Global context containing configuration and paths.
#[derive(Debug, Clone)]
pub struct GlobalContext {
    /// Current working directory
    cwd: PathBuf,

    /// Directory holding the global config.toml
    home: PathBuf,
}

impl GlobalContext {
    /// Create a new GlobalContext with defaults.
    pub fn new() -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to get current directory")?;

        let home = if let Some(home) = std::env::var_os(HOME_ENV) {
            PathBuf::from(home)
        } else if let Some(dirs) = PROJECT_DIRS.as_ref() {
            dirs.config_dir().to_path_buf()
        } else {
            // Fallback to ~/.catkin-env
            directories::BaseDirs::new()
                .map(|b| b.home_dir().join(PROJECT_DIR_NAME))
                .unwrap_or_else(|| PathBuf::from(PROJECT_DIR_NAME))
        };

        Ok(GlobalContext { cwd, home })
    }

    /// Create a GlobalContext with a specific working directory.
    pub fn with_cwd(cwd: PathBuf) -> Result<Self> {
        let mut ctx = Self::new()?;
        ctx.cwd = cwd;
        Ok(ctx)
    }

    /// Use a specific global configuration directory.
    pub fn with_home(mut self, home: PathBuf) -> Self {
        self.home = home;
        self
    }

    /// Get the current working directory.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Get the global configuration file path.
    pub fn config_path(&self) -> PathBuf {
        self.home.join("config.toml")
    }

    /// Find the project root: the nearest ancestor of cwd with a
    /// `.catkin-env` directory, or cwd itself.
    pub fn project_root(&self) -> PathBuf {
        self.cwd
            .ancestors()
            .find(|dir| dir.join(PROJECT_DIR_NAME).is_dir())
            .unwrap_or(self.cwd.as_path())
            .to_path_buf()
    }

    /// Get the project configuration file path.
    pub fn project_config_path(&self) -> PathBuf {
        self.project_root().join(PROJECT_DIR_NAME).join("config.toml")
    }

    /// Load the merged global and project configuration.
    pub fn load_config(&self) -> Config {
        load_config(
            &self.config_path(),
            &self.project_config_path(),
            &self.project_root(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_context_paths() {
        let ctx = GlobalContext::new().unwrap();
        assert!(ctx.cwd().is_absolute());
        assert!(ctx.config_path().ends_with("config.toml"));
    }

    #[test]
    fn test_project_root_search() {
        let tmp = TempDir::new().unwrap();
        let nested = tmp.path().join("src/nav/planner");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::create_dir_all(tmp.path().join(PROJECT_DIR_NAME)).unwrap();

        let ctx = GlobalContext::with_cwd(nested).unwrap();
        assert_eq!(ctx.project_root(), tmp.path());
        assert_eq!(
            ctx.project_config_path(),
            tmp.path().join(".catkin-env/config.toml")
        );
    }

    #[test]
    fn test_load_config_from_project() {
        let tmp = TempDir::new().unwrap();
        let home = tmp.path().join("home");
        let project = tmp.path().join("ws");
        std::fs::create_dir_all(project.join(PROJECT_DIR_NAME)).unwrap();
        std::fs::write(
            project.join(".catkin-env/config.toml"),
            "[workspace]\npaths = [\"src\"]\n",
        )
        .unwrap();

        let ctx = GlobalContext::with_cwd(project.clone()).unwrap().with_home(home);
        let config = ctx.load_config();
        assert_eq!(config.workspace.paths, vec![project.join("src")]);
    }
}
