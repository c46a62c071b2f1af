//! Manifest discovery - finding packages in a directory tree.

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use walkdir::{DirEntry, WalkDir};

use crate::core::manifest::{Manifest, ManifestError, MANIFEST_NAME};
use crate::util::fs::relative_path;

/// Marker files that exclude a directory and everything below it.
pub const IGNORE_MARKERS: &[&str] = &["CATKIN_IGNORE", "COLCON_IGNORE", "AMENT_IGNORE"];

/// Finds package manifests below a root directory.
pub trait PackageDiscovery {
    /// Discover all packages below `path`.
    ///
    /// Keys are package directories relative to `path`. An empty or
    /// package-less directory yields an empty map.
    fn discover(&self, path: &Path) -> Result<BTreeMap<PathBuf, Manifest>>;
}

/// Filesystem discovery of `package.xml` manifests.
///
/// A directory holding a manifest is a package and is not searched any
/// further. Hidden directories and directories with an ignore marker are
/// skipped together with their subtrees.
#[derive(Debug, Clone)]
pub struct FsDiscovery {
    follow_links: bool,
}

impl FsDiscovery {
    /// Create a discovery that follows symlinked directories.
    pub fn new() -> Self {
        FsDiscovery { follow_links: true }
    }

    /// Set whether symlinked directories are followed.
    pub fn with_follow_links(mut self, follow_links: bool) -> Self {
        self.follow_links = follow_links;
        self
    }
}

impl Default for FsDiscovery {
    fn default() -> Self {
        Self::new()
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry
            .file_name()
            .to_str()
            .map_or(false, |s| s.starts_with('.'))
}

fn is_ignored(dir: &Path) -> bool {
    IGNORE_MARKERS.iter().any(|m| dir.join(m).exists())
}

/// Dangling symlinks and symlink loops are skipped; other walk errors are
/// real access failures.
fn is_broken_link(err: &walkdir::Error) -> bool {
    if err.loop_ancestor().is_some() {
        return true;
    }

    let not_found = err
        .io_error()
        .map_or(false, |e| e.kind() == io::ErrorKind::NotFound);
    not_found
        && err
            .path()
            .and_then(|p| p.symlink_metadata().ok())
            .map_or(false, |m| m.file_type().is_symlink())
}

impl PackageDiscovery for FsDiscovery {
    fn discover(&self, path: &Path) -> Result<BTreeMap<PathBuf, Manifest>> {
        let mut packages: BTreeMap<PathBuf, Manifest> = BTreeMap::new();
        let mut names: BTreeMap<String, PathBuf> = BTreeMap::new();

        let mut walker = WalkDir::new(path)
            .follow_links(self.follow_links)
            .sort_by_file_name()
            .into_iter();

        while let Some(entry) = walker.next() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) if is_broken_link(&err) => {
                    tracing::debug!("Skipping broken link: {}", err);
                    continue;
                }
                Err(err) => {
                    return Err(err)
                        .with_context(|| format!("failed to scan directory: {}", path.display()))
                }
            };

            if !entry.file_type().is_dir() {
                continue;
            }

            if is_hidden(&entry) || is_ignored(entry.path()) {
                tracing::debug!("Skipping {}", entry.path().display());
                walker.skip_current_dir();
                continue;
            }

            let manifest_path = entry.path().join(MANIFEST_NAME);
            if !manifest_path.is_file() {
                continue;
            }

            // Packages do not nest.
            walker.skip_current_dir();

            let manifest = Manifest::load(&manifest_path)?;
            let relative = relative_path(path, entry.path());

            if let Some(first) = names.get(&manifest.name) {
                return Err(ManifestError::DuplicateName {
                    name: manifest.name.clone(),
                    first: first.display().to_string(),
                    second: relative.display().to_string(),
                }
                .into());
            }

            tracing::debug!("Found package {} at {}", manifest.name, entry.path().display());
            names.insert(manifest.name.clone(), relative.clone());
            packages.insert(relative, manifest);
        }

        Ok(packages)
    }
}
