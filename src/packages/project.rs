// ABOUTME: Checks that a command runs from the integrations repository root.
// ABOUTME: The root is recognised by the module path declared in go.mod.

use std::path::{Path, PathBuf};

use thiserror::Error;

pub const INTEGRATIONS_MODULE: &str = "github.com/elastic/integrations";

const GO_MOD_FILE: &str = "go.mod";

#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("query must be executed from the integrations project root directory")]
    NotProjectRoot,

    #[error("reading {path} failed: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Module path from the `module` directive of a go.mod file.
pub fn module_path(go_mod: &str) -> Option<String> {
    go_mod.lines().find_map(|line| {
        let line = line.split("//").next().unwrap_or("").trim();
        let rest = line.strip_prefix("module")?;
        if !rest.starts_with(char::is_whitespace) {
            return None;
        }
        let path = rest.trim().trim_matches('"');
        (!path.is_empty()).then(|| path.to_string())
    })
}

pub fn check_project_root(dir: &Path) -> Result<(), ProjectError> {
    let path = dir.join(GO_MOD_FILE);
    let content = match std::fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ProjectError::NotProjectRoot);
        }
        Err(source) => return Err(ProjectError::Read { path, source }),
    };

    match module_path(&content) {
        Some(module) if module == INTEGRATIONS_MODULE => Ok(()),
        module => {
            tracing::debug!("go.mod declares module {:?}", module);
            Err(ProjectError::NotProjectRoot)
        }
    }
}
