//! Package sources.
//!
//! Sources supply what the environment cannot know by itself: the
//! manifests present in a directory tree, and the dependency database
//! consulted for everything else.

pub mod database;
pub mod discovery;

pub use database::{
    DatabaseError, DatabaseLoader, DependencyData, DependencyView, EmptyView, IndexDatabase,
    IndexLoader, LookupError,
};
pub use discovery::{FsDiscovery, PackageDiscovery};
