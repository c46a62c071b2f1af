//! Workspace registration reports.

use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Serialize;

use crate::core::Environment;

/// A buildable package found by a scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScannedPackage {
    /// Package name
    pub name: String,

    /// Directory relative to the registered path
    pub path: PathBuf,

    /// Absolute package directory
    pub location: PathBuf,
}

/// Buildable packages found under one registered path.
#[derive(Debug, Clone, Serialize)]
pub struct ScanResult {
    /// The path as given
    pub root: PathBuf,

    /// Buildable packages, ordered by relative path
    pub packages: Vec<ScannedPackage>,
}

/// Register each path with the environment and report what was found.
pub fn scan(env: &mut Environment, paths: &[PathBuf]) -> Result<Vec<ScanResult>> {
    let mut results = Vec::with_capacity(paths.len());

    for root in paths {
        if !root.is_dir() {
            tracing::warn!("Not a directory, skipping: {}", root.display());
        }

        let found = env.register(root)?;
        tracing::info!("Found {} buildable package(s) in {}", found.len(), root.display());

        let base = if found.is_empty() {
            root.clone()
        } else {
            root.canonicalize()?
        };

        let packages = found
            .into_iter()
            .map(|(path, manifest)| ScannedPackage {
                name: manifest.name,
                location: base.join(&path),
                path,
            })
            .collect();

        results.push(ScanResult {
            root: root.clone(),
            packages,
        });
    }

    Ok(results)
}

/// Render scan results as plain text.
pub fn format_scan(results: &[ScanResult]) -> String {
    use std::fmt::Write;

    let mut output = String::new();

    for result in results {
        writeln!(output, "{}:", result.root.display()).unwrap();
        if result.packages.is_empty() {
            writeln!(output, "  (no buildable packages)").unwrap();
            continue;
        }
        for pkg in &result.packages {
            writeln!(output, "  {} ({})", pkg.name, display_relative(&pkg.path)).unwrap();
        }
    }

    output
}

fn display_relative(path: &Path) -> String {
    if path.as_os_str().is_empty() {
        ".".to_string()
    } else {
        path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::EmptyView;
    use crate::test_support::write_package;
    use tempfile::TempDir;

    #[test]
    fn test_scan_reports_buildable_packages() {
        let tmp = TempDir::new().unwrap();
        write_package(&tmp.path().join("src/a"), "A", None);
        write_package(&tmp.path().join("src/b"), "B", Some("cmake"));

        let mut env = Environment::with_view(Box::new(EmptyView));
        let results = scan(&mut env, &[tmp.path().to_path_buf()]).unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].packages.len(), 1);
        let pkg = &results[0].packages[0];
        assert_eq!(pkg.name, "A");
        assert_eq!(pkg.path, PathBuf::from("src/a"));
        assert!(pkg.location.is_absolute());
        assert!(env.is_system_package("B"));

        let text = format_scan(&results);
        assert!(text.contains("  A (src/a)"));
        assert!(!text.contains("  B ("));
    }

    #[test]
    fn test_scan_locations_follow_their_root() {
        let tmp = TempDir::new().unwrap();
        let first = tmp.path().join("first");
        let second = tmp.path().join("second");
        write_package(&first.join("a"), "A", None);
        write_package(&second.join("a"), "A", None);

        let mut env = Environment::with_view(Box::new(EmptyView));
        let results = scan(&mut env, &[first.clone(), second.clone()]).unwrap();

        let first_real = first.canonicalize().unwrap();
        let second_real = second.canonicalize().unwrap();
        assert_eq!(results[0].packages[0].location, first_real.join("a"));
        assert_eq!(results[1].packages[0].location, second_real.join("a"));
        assert_eq!(env.manifest("A").unwrap().0, second_real.join("a"));
    }

    #[test]
    fn test_scan_missing_path() {
        let tmp = TempDir::new().unwrap();
        let mut env = Environment::with_view(Box::new(EmptyView));
        let results = scan(&mut env, &[tmp.path().join("nope")]).unwrap();

        assert!(results[0].packages.is_empty());
        assert!(format_scan(&results).contains("(no buildable packages)"));
    }

    #[test]
    fn test_display_root_package() {
        assert_eq!(display_relative(Path::new("")), ".");
        assert_eq!(display_relative(Path::new("src/a")), "src/a");
    }
}
