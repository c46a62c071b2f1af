//! Building an environment from configuration.

use std::path::PathBuf;

use crate::core::Environment;
use crate::sources::{EmptyView, FsDiscovery, IndexLoader};
use crate::util::Config;

/// Options that override the configured database.
#[derive(Debug, Clone, Default)]
pub struct EnvironmentOptions {
    /// Index files to use instead of the configured ones
    pub database: Vec<PathBuf>,

    /// Do not load or consult any dependency database
    pub no_database: bool,
}

/// Database index files selected by config and options.
pub fn database_sources(config: &Config, options: &EnvironmentOptions) -> Vec<PathBuf> {
    if options.database.is_empty() {
        config.database.sources.clone()
    } else {
        options.database.clone()
    }
}

/// Create an environment, loading the dependency database unless disabled.
///
/// A database that fails to load only degrades the environment.
pub fn open_environment(config: &Config, options: &EnvironmentOptions) -> Environment {
    let env = if database_disabled(config, options) {
        tracing::debug!("Dependency database disabled");
        Environment::with_view(Box::new(EmptyView))
    } else {
        let loader = IndexLoader::new(database_sources(config, options));
        Environment::new(None, &loader)
    };

    let follow_links = config.workspace.follow_links.unwrap_or(true);
    env.with_discovery(Box::new(FsDiscovery::new().with_follow_links(follow_links)))
}

/// Whether config or options turn the dependency database off.
pub fn database_disabled(config: &Config, options: &EnvironmentOptions) -> bool {
    options.no_database || !config.database.is_enabled()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{write_index, write_package};
    use tempfile::TempDir;

    #[test]
    fn test_open_environment_with_configured_sources() {
        let tmp = TempDir::new().unwrap();
        let index = write_index(tmp.path(), &[("boost", Some(false))]);

        let mut config = Config::default();
        config.database.sources = vec![index];

        let env = open_environment(&config, &EnvironmentOptions::default());
        assert!(env.has_dependency_database());
        assert!(env.is_system_package("boost"));
    }

    #[test]
    fn test_options_override_sources() {
        let tmp = TempDir::new().unwrap();
        let index = write_index(tmp.path(), &[("roscpp", Some(true))]);

        let mut config = Config::default();
        config.database.sources = vec![tmp.path().join("missing.toml")];
        let options = EnvironmentOptions {
            database: vec![index.clone()],
            no_database: false,
        };

        assert_eq!(database_sources(&config, &options), vec![index]);
        let env = open_environment(&config, &options);
        assert!(env.is_buildable_package("roscpp"));
    }

    #[test]
    fn test_no_database_disables() {
        let tmp = TempDir::new().unwrap();
        let index = write_index(tmp.path(), &[("boost", Some(false))]);

        let mut config = Config::default();
        config.database.sources = vec![index];
        let options = EnvironmentOptions {
            database: vec![],
            no_database: true,
        };

        let env = open_environment(&config, &options);
        assert!(!env.has_dependency_database());
        assert!(!env.is_known_package("boost"));
    }

    #[test]
    fn test_missing_database_degrades() {
        let env = open_environment(&Config::default(), &EnvironmentOptions::default());
        assert!(!env.has_dependency_database());
    }

    #[test]
    fn test_config_disables_database() {
        let tmp = TempDir::new().unwrap();
        let index = write_index(tmp.path(), &[("boost", Some(false))]);

        let mut config = Config::default();
        config.database.sources = vec![index];
        config.database.enabled = Some(false);

        assert!(database_disabled(&config, &EnvironmentOptions::default()));
        let env = open_environment(&config, &EnvironmentOptions::default());
        assert!(!env.has_dependency_database());
    }

    #[cfg(unix)]
    #[test]
    fn test_follow_links_setting() {
        let tmp = TempDir::new().unwrap();
        let ws = tmp.path().join("ws");
        write_package(&tmp.path().join("shared/nav"), "nav", None);
        std::fs::create_dir_all(ws.join("src")).unwrap();
        std::os::unix::fs::symlink(tmp.path().join("shared"), ws.join("src/shared")).unwrap();

        let options = EnvironmentOptions {
            database: vec![],
            no_database: true,
        };

        let mut env = open_environment(&Config::default(), &options);
        let found = env.register(&ws).unwrap();
        assert_eq!(found[0].0, PathBuf::from("src/shared/nav"));

        let mut config = Config::default();
        config.workspace.follow_links = Some(false);
        let mut env = open_environment(&config, &options);
        assert!(env.register(&ws).unwrap().is_empty());
    }
}
