//! CLI command implementations

pub mod details;
pub mod list;
pub mod run;
