//! Environment - package classification hub.
//!
//! An `Environment` remembers every workspace path registered with it,
//! sorts the discovered packages into source-built ("buildable") and
//! pre-installed ("other") sets, and falls back to a dependency database
//! for names it has not seen locally.
//!
//! All state is owned by the instance. Registration takes `&mut self`;
//! callers that share an environment across threads must serialize access.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::core::manifest::{Manifest, BUILD_TYPE_TAG, CATKIN_BUILD_TYPE};
use crate::sources::database::{DatabaseLoader, DependencyView, EmptyView};
use crate::sources::discovery::{FsDiscovery, PackageDiscovery};

/// Outcome of classifying a manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageKind {
    /// Built from source in this workspace.
    Buildable,
    /// Built by some other tool or assumed to be pre-installed.
    Other,
}

/// Classify a manifest by its `build_type` exports.
///
/// A package is buildable unless any `build_type` export names something
/// other than `catkin`. Packages without a `build_type` are buildable.
pub fn classify(manifest: &Manifest) -> PackageKind {
    let foreign = manifest
        .exports
        .iter()
        .any(|e| e.tagname == BUILD_TYPE_TAG && e.content != CATKIN_BUILD_TYPE);

    if foreign {
        PackageKind::Other
    } else {
        PackageKind::Buildable
    }
}

/// A registered buildable package: path relative to the registered root,
/// and its manifest.
pub type FoundPackage = (PathBuf, Manifest);

/// Package classification state for one or more workspaces.
pub struct Environment {
    /// Manifest discovery collaborator
    discovery: Box<dyn PackageDiscovery>,

    /// Fallback dependency database
    view: Box<dyn DependencyView>,

    /// Buildable packages per canonical registered path
    cache: HashMap<PathBuf, Vec<FoundPackage>>,

    /// Buildable package name -> (package directory, manifest)
    manifests: HashMap<String, (PathBuf, Manifest)>,

    known_buildable: HashSet<String>,
    known_other: HashSet<String>,
}

impl Environment {
    /// Create an environment.
    ///
    /// When `view` is `None` the loader is asked for a database. A loader
    /// failure is logged and leaves the environment without a database;
    /// construction itself never fails.
    pub fn new(view: Option<Box<dyn DependencyView>>, loader: &dyn DatabaseLoader) -> Self {
        let view = match view {
            Some(view) => view,
            None => match loader.load() {
                Ok(view) => view,
                Err(e) => {
                    tracing::warn!("cannot load dependency database: {}", e);
                    tracing::warn!("unknown dependencies will be ignored");
                    Box::new(EmptyView)
                }
            },
        };

        Environment::with_view(view)
    }

    /// Create an environment around an explicit dependency view.
    pub fn with_view(view: Box<dyn DependencyView>) -> Self {
        Environment {
            discovery: Box::new(FsDiscovery::new()),
            view,
            cache: HashMap::new(),
            manifests: HashMap::new(),
            known_buildable: HashSet::new(),
            known_other: HashSet::new(),
        }
    }

    /// Replace the manifest discovery collaborator.
    pub fn with_discovery(mut self, discovery: Box<dyn PackageDiscovery>) -> Self {
        self.discovery = discovery;
        self
    }

    /// Register a workspace path and return the buildable packages under it.
    ///
    /// Paths that are not existing directories yield an empty list. A path
    /// is scanned only once; later registrations of the same canonical path
    /// return the cached list.
    pub fn register(&mut self, path: &Path) -> Result<Vec<FoundPackage>> {
        if !path.is_dir() {
            return Ok(Vec::new());
        }

        let realpath = path.canonicalize()?;
        if let Some(found) = self.cache.get(&realpath) {
            tracing::debug!("Using cached scan of {}", realpath.display());
            return Ok(found.clone());
        }

        tracing::debug!("Scanning {}", realpath.display());
        let packages = self.discovery.discover(path)?;

        let mut found = Vec::new();
        for (relative, manifest) in packages {
            match classify(&manifest) {
                PackageKind::Buildable => {
                    self.known_other.remove(&manifest.name);
                    self.known_buildable.insert(manifest.name.clone());
                    self.manifests.insert(
                        manifest.name.clone(),
                        (realpath.join(&relative), manifest.clone()),
                    );
                    found.push((relative, manifest));
                }
                PackageKind::Other => {
                    tracing::debug!("Package {} is not built from source", manifest.name);
                    self.known_buildable.remove(&manifest.name);
                    self.manifests.remove(&manifest.name);
                    self.known_other.insert(manifest.name);
                }
            }
        }

        self.cache.insert(realpath, found.clone());
        Ok(found)
    }

    /// Check whether `name` is built from source.
    ///
    /// Local classification wins; otherwise the database's `ros` flag
    /// decides, defaulting to `false`.
    pub fn is_buildable_package(&self, name: &str) -> bool {
        if self.known_buildable.contains(name) {
            return true;
        }
        if self.known_other.contains(name) {
            return false;
        }
        // FIXME: `ros` is also set for ROS packages with a non-catkin build type
        self.view
            .lookup(name)
            .and_then(|data| data.ros_flag(name))
            .unwrap_or(false)
    }

    /// Check whether `name` is a system (pre-installed) package.
    pub fn is_system_package(&self, name: &str) -> bool {
        if self.known_other.contains(name) {
            return true;
        }
        if self.known_buildable.contains(name) {
            return false;
        }
        if self.view.contains(name) {
            return match self.view.lookup(name).and_then(|data| data.ros_flag(name)) {
                Ok(ros) => !ros,
                Err(_) => true,
            };
        }
        false
    }

    /// Check whether `name` is known locally or to the database.
    pub fn is_known_package(&self, name: &str) -> bool {
        self.view.contains(name)
            || self.known_buildable.contains(name)
            || self.known_other.contains(name)
    }

    /// Check whether a non-empty dependency database is available.
    pub fn has_dependency_database(&self) -> bool {
        !self.view.is_empty()
    }

    /// Drop the dependency database for the rest of this environment's life.
    pub fn disable_dependency_database(&mut self) {
        self.view = Box::new(EmptyView);
    }

    /// Get the directory and manifest of a registered buildable package.
    pub fn manifest(&self, name: &str) -> Option<&(PathBuf, Manifest)> {
        self.manifests.get(name)
    }

    /// Names of all locally known buildable packages, sorted.
    pub fn known_buildable_packages(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.known_buildable.iter().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Names of all locally known non-buildable packages, sorted.
    pub fn known_other_packages(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.known_other.iter().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl std::fmt::Debug for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Environment")
            .field("paths", &self.cache.keys().collect::<Vec<_>>())
            .field("known_buildable", &self.known_buildable)
            .field("known_other", &self.known_other)
            .field("has_dependency_database", &self.has_dependency_database())
            .finish()
    }
}
