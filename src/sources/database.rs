//! Dependency database - fallback package metadata.
//!
//! A dependency view maps package names to metadata about them, most
//! importantly whether the name belongs to the ROS source ecosystem. It is
//! only consulted for names the environment has not classified locally.
//!
//! The on-disk database is a set of TOML index files:
//!
//! ```toml
//! [packages.roscpp]
//! ros = true
//!
//! [packages.boost]
//! ros = false
//! description = "Boost C++ libraries"
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error looking up a single name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("`{0}` is not in the dependency database")]
    NotFound(String),

    #[error("entry for `{name}` has no `{field}` field")]
    MissingField { name: String, field: &'static str },
}

/// Error loading a dependency database.
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("no dependency database sources configured")]
    NoSources,

    #[error("failed to read dependency database `{path}`")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse dependency database `{path}`")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("dependency database sources contain no packages")]
    Empty,
}

/// Metadata for one database entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyData {
    /// Whether the package belongs to the ROS source ecosystem
    #[serde(default)]
    pub ros: Option<bool>,

    /// Free-form description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl DependencyData {
    /// Create an entry with the ecosystem flag set.
    pub fn with_ros(ros: bool) -> Self {
        DependencyData {
            ros: Some(ros),
            description: None,
        }
    }

    /// Get the ecosystem flag, failing if the entry does not carry one.
    pub fn ros_flag(&self, name: &str) -> Result<bool, LookupError> {
        self.ros.ok_or_else(|| LookupError::MissingField {
            name: name.to_string(),
            field: "ros",
        })
    }
}

/// Read access to a dependency database.
pub trait DependencyView {
    /// All names known to the database.
    fn keys(&self) -> Box<dyn Iterator<Item = &str> + '_>;

    /// Look up metadata for a name.
    fn lookup(&self, name: &str) -> Result<&DependencyData, LookupError>;

    /// Check if the database knows a name.
    fn contains(&self, name: &str) -> bool {
        self.keys().any(|k| k == name)
    }

    /// Check if the database knows no names at all.
    fn is_empty(&self) -> bool {
        self.keys().next().is_none()
    }
}

/// Produces a dependency view, e.g. by reading database files.
pub trait DatabaseLoader {
    /// Load the database.
    fn load(&self) -> Result<Box<dyn DependencyView>, DatabaseError>;
}

/// A database that knows nothing.
///
/// Used when no database could be loaded and after the database has been
/// disabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyView;

impl DependencyView for EmptyView {
    fn keys(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        Box::new(std::iter::empty())
    }

    fn lookup(&self, name: &str) -> Result<&DependencyData, LookupError> {
        Err(LookupError::NotFound(name.to_string()))
    }

    fn contains(&self, _name: &str) -> bool {
        false
    }

    fn is_empty(&self) -> bool {
        true
    }
}

/// On-disk layout of one index file.
#[derive(Debug, Default, Deserialize)]
struct IndexFile {
    #[serde(default)]
    packages: BTreeMap<String, DependencyData>,
}

/// Dependency database merged from TOML index files.
#[derive(Debug, Clone, Default)]
pub struct IndexDatabase {
    packages: BTreeMap<String, DependencyData>,
}

impl IndexDatabase {
    /// Create an empty database.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry, keeping any existing entry for the same name.
    pub fn insert(&mut self, name: impl Into<String>, data: DependencyData) {
        self.packages.entry(name.into()).or_insert(data);
    }

    /// Read one index file and merge it in.
    ///
    /// Entries already present take precedence over the new file's.
    pub fn merge_file(&mut self, path: &Path) -> Result<usize, DatabaseError> {
        let contents = std::fs::read_to_string(path).map_err(|source| DatabaseError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let index: IndexFile = toml::from_str(&contents).map_err(|source| DatabaseError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        let count = index.packages.len();
        for (name, data) in index.packages {
            self.insert(name, data);
        }

        tracing::debug!("Loaded {} entries from {}", count, path.display());
        Ok(count)
    }

    /// Number of known names.
    pub fn len(&self) -> usize {
        self.packages.len()
    }

    /// Check if the database has no entries.
    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}

impl DependencyView for IndexDatabase {
    fn keys(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        Box::new(self.packages.keys().map(String::as_str))
    }

    fn lookup(&self, name: &str) -> Result<&DependencyData, LookupError> {
        self.packages
            .get(name)
            .ok_or_else(|| LookupError::NotFound(name.to_string()))
    }

    fn contains(&self, name: &str) -> bool {
        self.packages.contains_key(name)
    }

    fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}

/// Loads an [`IndexDatabase`] from a list of index files.
///
/// Sources are read in order; for names listed in several files the
/// first file wins.
#[derive(Debug, Clone, Default)]
pub struct IndexLoader {
    sources: Vec<PathBuf>,
}

impl IndexLoader {
    /// Create a loader for the given index files.
    pub fn new(sources: Vec<PathBuf>) -> Self {
        IndexLoader { sources }
    }
}

impl DatabaseLoader for IndexLoader {
    fn load(&self) -> Result<Box<dyn DependencyView>, DatabaseError> {
        if self.sources.is_empty() {
            return Err(DatabaseError::NoSources);
        }

        let mut db = IndexDatabase::new();
        for source in &self.sources {
            db.merge_file(source)?;
        }

        if db.is_empty() {
            return Err(DatabaseError::Empty);
        }

        tracing::debug!(
            "Dependency database has {} entries from {} source(s)",
            db.len(),
            self.sources.len()
        );
        Ok(Box::new(db))
    }
}
