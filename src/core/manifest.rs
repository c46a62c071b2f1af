//! `package.xml` manifest model and extraction.
//!
//! Only the parts of a manifest that classification needs are modelled:
//! the package name and the children of its `<export>` block.

use std::path::Path;
use std::sync::LazyLock;

use anyhow::{Context, Result};
use regex::Regex;
use serde::Serialize;
use thiserror::Error;

/// File name of a package manifest.
pub const MANIFEST_NAME: &str = "package.xml";

/// Export tag that selects the build tool of a package.
pub const BUILD_TYPE_TAG: &str = "build_type";

/// Build type of packages built from source in the workspace.
pub const CATKIN_BUILD_TYPE: &str = "catkin";

static COMMENT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<!--[\s\S]*?-->").unwrap());

static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<name(?:\s[^>]*)?>\s*([^<]*?)\s*</name>").unwrap());

static EXPORT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<export(?:\s[^>]*)?>([\s\S]*?)</export>").unwrap());

// Matches either `<tag attr.../>` or `<tag attr...>content</tag>`.
static ELEMENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<([A-Za-z_][\w.:-]*)((?:\s[^>]*?)?)(?:/>|>([\s\S]*?)</([A-Za-z_][\w.:-]*)\s*>)")
        .unwrap()
});

/// Errors produced while reading a manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("manifest has no <name> element")]
    MissingName,

    #[error("package name `{name}` is declared by both `{first}` and `{second}`")]
    DuplicateName {
        name: String,
        first: String,
        second: String,
    },
}

/// A single declaration inside the `<export>` block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Export {
    /// Element name, e.g. `build_type`
    pub tagname: String,

    /// Trimmed text content (empty for self-closing elements)
    pub content: String,
}

impl Export {
    /// Create a new export declaration.
    pub fn new(tagname: impl Into<String>, content: impl Into<String>) -> Self {
        Export {
            tagname: tagname.into(),
            content: content.into(),
        }
    }
}

/// A discovered package manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Manifest {
    /// Package name, unique within a workspace
    pub name: String,

    /// Export declarations in document order
    pub exports: Vec<Export>,
}

impl Manifest {
    /// Create a manifest with no exports.
    pub fn new(name: impl Into<String>) -> Self {
        Manifest {
            name: name.into(),
            exports: Vec::new(),
        }
    }

    /// Add an export declaration.
    pub fn with_export(mut self, tagname: impl Into<String>, content: impl Into<String>) -> Self {
        self.exports.push(Export::new(tagname, content));
        self
    }

    /// Load a manifest from a `package.xml` file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read manifest: {}", path.display()))?;

        Self::parse(&contents)
            .with_context(|| format!("failed to parse manifest: {}", path.display()))
    }

    /// Extract name and exports from manifest text.
    pub fn parse(contents: &str) -> Result<Self, ManifestError> {
        let contents = COMMENT_RE.replace_all(contents, "");

        let name = NAME_RE
            .captures(&contents)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string())
            .filter(|n| !n.is_empty())
            .ok_or(ManifestError::MissingName)?;

        let mut exports = Vec::new();
        for block in EXPORT_RE.captures_iter(&contents) {
            let body = &block[1];
            for element in ELEMENT_RE.captures_iter(body) {
                let tagname = element[1].to_string();
                let content = element
                    .get(3)
                    .map(|m| m.as_str().trim().to_string())
                    .unwrap_or_default();
                exports.push(Export { tagname, content });
            }
        }

        Ok(Manifest { name, exports })
    }

    /// Content of the first export with the given tag.
    pub fn export(&self, tagname: &str) -> Option<&str> {
        self.exports
            .iter()
            .find(|e| e.tagname == tagname)
            .map(|e| e.content.as_str())
    }
}
