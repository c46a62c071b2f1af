//! Test utilities and mocks for catkin-env unit tests.
//!
//! Provides in-memory stand-ins for the two collaborators of
//! [`Environment`](crate::core::Environment): manifest discovery and the
//! dependency database. Both keep call counters so tests can assert how
//! often a collaborator was consulted.

pub mod fixtures;

use std::cell::Cell;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::Result;

use crate::core::Manifest;
use crate::sources::database::{
    DatabaseError, DatabaseLoader, DependencyData, DependencyView, LookupError,
};
use crate::sources::discovery::{FsDiscovery, PackageDiscovery};

// Re-export fixtures for convenience
pub use fixtures::*;

/// Filesystem discovery that counts its invocations.
#[derive(Debug)]
pub struct CountingDiscovery {
    inner: FsDiscovery,
    calls: Rc<Cell<usize>>,
}

impl CountingDiscovery {
    /// Create a discovery and a handle to its call counter.
    pub fn new() -> (Self, Rc<Cell<usize>>) {
        let calls = Rc::new(Cell::new(0));
        let discovery = CountingDiscovery {
            inner: FsDiscovery::new(),
            calls: Rc::clone(&calls),
        };
        (discovery, calls)
    }
}

impl PackageDiscovery for CountingDiscovery {
    fn discover(&self, path: &Path) -> Result<BTreeMap<PathBuf, Manifest>> {
        self.calls.set(self.calls.get() + 1);
        self.inner.discover(path)
    }
}

/// In-memory dependency database.
#[derive(Debug, Clone, Default)]
pub struct MemoryView {
    packages: BTreeMap<String, DependencyData>,
    queries: Rc<Cell<usize>>,
}

impl MemoryView {
    /// Create an empty view.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry.
    pub fn with_package(mut self, name: &str, data: DependencyData) -> Self {
        self.packages.insert(name.to_string(), data);
        self
    }

    /// Counter of `lookup` and `contains` calls.
    pub fn query_counter(&self) -> Rc<Cell<usize>> {
        Rc::clone(&self.queries)
    }

    fn bump(&self) {
        self.queries.set(self.queries.get() + 1);
    }
}

impl DependencyView for MemoryView {
    fn keys(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        Box::new(self.packages.keys().map(String::as_str))
    }

    fn lookup(&self, name: &str) -> Result<&DependencyData, LookupError> {
        self.bump();
        self.packages
            .get(name)
            .ok_or_else(|| LookupError::NotFound(name.to_string()))
    }

    fn contains(&self, name: &str) -> bool {
        self.bump();
        self.packages.contains_key(name)
    }
}

impl DatabaseLoader for MemoryView {
    fn load(&self) -> Result<Box<dyn DependencyView>, DatabaseError> {
        Ok(Box::new(self.clone()))
    }
}

/// Loader that always fails with the error built by the given function.
pub struct FailingLoader(pub fn() -> DatabaseError);

impl DatabaseLoader for FailingLoader {
    fn load(&self) -> Result<Box<dyn DependencyView>, DatabaseError> {
        Err((self.0)())
    }
}
