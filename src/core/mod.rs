//! Core data structures for catkin-env.
//!
//! This module contains the foundational types:
//! - Package manifests and their export declarations
//! - The classification environment

pub mod environment;
pub mod manifest;

pub use environment::{classify, Environment, FoundPackage, PackageKind};
pub use manifest::{Export, Manifest, ManifestError, MANIFEST_NAME};
