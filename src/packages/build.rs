// ABOUTME: Locates a custom build/packages directory above the working directory.
// ABOUTME: Its contents are copied into the stack before images are built.

use std::io;
use std::path::{Path, PathBuf};

pub const BUILD_PACKAGES_DIR: &str = "build/packages";

/// Walk from `start` up through its ancestors and return the first
/// `build/packages` directory found.
pub fn find_build_packages_directory(start: &Path) -> io::Result<Option<PathBuf>> {
    let start = if start.is_absolute() {
        start.to_path_buf()
    } else {
        std::env::current_dir()?.join(start)
    };

    for dir in start.ancestors() {
        let candidate = dir.join(BUILD_PACKAGES_DIR);
        match std::fs::metadata(&candidate) {
            Ok(meta) if meta.is_dir() => return Ok(Some(candidate)),
            Ok(_) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e),
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_directory_in_ancestor() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("build/packages")).unwrap();
        let nested = dir.path().join("packages/nginx/data_stream");
        std::fs::create_dir_all(&nested).unwrap();

        let found = find_build_packages_directory(&nested).unwrap();
        assert_eq!(found, Some(dir.path().join("build/packages")));
    }

    #[test]
    fn regular_file_is_not_a_match() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("build")).unwrap();
        std::fs::write(dir.path().join("build/packages"), "").unwrap();

        let found = find_build_packages_directory(dir.path()).unwrap();
        assert_ne!(found, Some(dir.path().join("build/packages")));
    }
}
