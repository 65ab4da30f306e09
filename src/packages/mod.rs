// ABOUTME: Package directory tooling: manifest flattening and queries.
// ABOUTME: Also locates build output and checks the integrations project root.

mod build;
mod manifest;
mod project;
mod query;

pub use build::{BUILD_PACKAGES_DIR, find_build_packages_directory};
pub use manifest::{FlatConfig, ManifestError, PACKAGE_MANIFEST_FILE};
pub use project::{INTEGRATIONS_MODULE, ProjectError, check_project_root, module_path};
pub use query::{PACKAGES_DIR, QueryError, QueryReport, SkippedPackage, query_manifest};
