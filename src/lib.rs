//! catkin-env - workspace package classification for ROS catkin workspaces
//!
//! This crate finds the packages in one or more workspace paths, tells
//! packages built from source apart from packages expected to be
//! installed on the system, and falls back to a rosdep-style dependency
//! database for names it has not seen locally.

pub mod core;
pub mod ops;
pub mod sources;
pub mod util;

/// Test utilities and mocks for catkin-env unit tests.
///
/// This module is only available when compiling with `--cfg test` or
/// running tests. It provides in-memory discovery and database
/// implementations and fixture writers.
#[cfg(test)]
pub mod test_support;

pub use crate::core::{
    environment::{classify, Environment, PackageKind},
    manifest::{Export, Manifest},
};

pub use crate::sources::{DatabaseLoader, DependencyView, FsDiscovery, PackageDiscovery};
pub use crate::util::context::GlobalContext;
