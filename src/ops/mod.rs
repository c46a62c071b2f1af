//! High-level operations.
//!
//! This module contains the implementation of catkin-env commands.

pub mod doctor;
pub mod load;
pub mod query;
pub mod scan;

pub use doctor::{doctor, format_report, CheckResult, DoctorReport};
pub use load::{database_disabled, database_sources, open_environment, EnvironmentOptions};
pub use query::{format_statuses, query, PackageStatus};
pub use scan::{format_scan, scan, ScanResult, ScannedPackage};
