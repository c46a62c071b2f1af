//! Package name queries.

use serde::Serialize;

use crate::core::Environment;

/// Classification of a single package name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageStatus {
    pub name: String,
    pub buildable: bool,
    pub system: bool,
    pub known: bool,
}

impl PackageStatus {
    /// Short label for text output.
    pub fn label(&self) -> &'static str {
        if self.buildable {
            "buildable"
        } else if self.system {
            "system"
        } else if self.known {
            "known"
        } else {
            "unknown"
        }
    }
}

/// Classify each name against the environment.
pub fn query(env: &Environment, names: &[String]) -> Vec<PackageStatus> {
    names
        .iter()
        .map(|name| PackageStatus {
            name: name.clone(),
            buildable: env.is_buildable_package(name),
            system: env.is_system_package(name),
            known: env.is_known_package(name),
        })
        .collect()
}

/// Render statuses as aligned `name  label` lines.
pub fn format_statuses(statuses: &[PackageStatus]) -> String {
    let width = statuses
        .iter()
        .map(|s| s.name.chars().count())
        .max()
        .unwrap_or(0);
    statuses
        .iter()
        .map(|s| format!("{:width$}  {}\n", s.name, s.label(), width = width))
        .collect()
}
