//! Test fixtures for common test scenarios.
//!
//! Helpers that lay out `package.xml` trees and database index files on
//! disk.

use std::fmt::Write;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::manifest::MANIFEST_NAME;

/// Render a minimal `package.xml`.
pub fn package_xml(name: &str, build_type: Option<&str>) -> String {
    let mut xml = format!(
        r#"<?xml version="1.0"?>
<package format="2">
  <name>{name}</name>
  <version>0.1.0</version>
  <description>Test package {name}</description>
  <maintainer email="dev@example.com">Dev</maintainer>
  <license>BSD</license>
"#
    );

    if let Some(build_type) = build_type {
        writeln!(xml, "  <export>").unwrap();
        writeln!(xml, "    <build_type>{build_type}</build_type>").unwrap();
        writeln!(xml, "  </export>").unwrap();
    }

    xml.push_str("</package>\n");
    xml
}

/// Write a package directory with a `package.xml`.
pub fn write_package(dir: &Path, name: &str, build_type: Option<&str>) {
    fs::create_dir_all(dir).unwrap();
    fs::write(dir.join(MANIFEST_NAME), package_xml(name, build_type)).unwrap();
}

/// Write `index.toml` in `dir` with the given `ros` flags.
pub fn write_index(dir: &Path, entries: &[(&str, Option<bool>)]) -> PathBuf {
    let mut contents = String::new();
    for (name, ros) in entries {
        writeln!(contents, "[packages.{name}]").unwrap();
        if let Some(ros) = ros {
            writeln!(contents, "ros = {ros}").unwrap();
        }
        writeln!(contents).unwrap();
    }

    let path = dir.join("index.toml");
    fs::create_dir_all(dir).unwrap();
    fs::write(&path, contents).unwrap();
    path
}
