// ABOUTME: Query command implementation.
// ABOUTME: Runs manifest queries from the integrations project root.

use crate::cli::QueryCommand;
use elastic_package::error::Result;
use elastic_package::output::Output;
use elastic_package::packages::{PACKAGES_DIR, check_project_root, query_manifest};
use std::env;

pub fn query(command: QueryCommand, output: &Output) -> Result<()> {
    match command {
        QueryCommand::Manifest { key, values } => {
            let cwd = env::current_dir()?;
            check_project_root(&cwd)?;

            let report = query_manifest(&cwd.join(PACKAGES_DIR), &key, &values)?;

            for skipped in &report.skipped {
                output.warning(&format!(
                    "skipped package {}: {}",
                    skipped.package, skipped.reason
                ));
            }

            if report.matched.is_empty() {
                output.progress("key with value not found in any packages");
            }
            output.result(&report.matched, &report);
            Ok(())
        }
    }
}
