//! Command implementations

pub mod completions;
pub mod doctor;
pub mod query;
pub mod scan;
