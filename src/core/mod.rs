//! Core module for the domain logic shared by every command

pub mod config;
pub mod files;
pub mod models;
pub mod planner;
pub mod srs;

/// Returns the current version of the `hs-study-tools` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
