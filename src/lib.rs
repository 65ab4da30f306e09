// ABOUTME: Library root for elastic-package - exposes public types for testing.
// ABOUTME: The main binary is in main.rs.

pub mod config;
pub mod diagnostics;
pub mod docker;
pub mod error;
pub mod files;
pub mod output;
pub mod packages;
pub mod process;
pub mod profile;
pub mod stack;
pub mod types;
