// ABOUTME: Directory helpers for preparing stack package directories.
// ABOUTME: Recursive copy via walkdir and destructive clearing.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use walkdir::WalkDir;

#[derive(Debug, Error)]
pub enum FilesError {
    #[error("walking {root} failed: {source}")]
    Walk {
        root: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("{action} {path} failed: {source}")]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

fn io_error<'a>(
    action: &'static str,
    path: &'a Path,
) -> impl FnOnce(io::Error) -> FilesError + 'a {
    move |source| FilesError::Io {
        action,
        path: path.to_path_buf(),
        source,
    }
}

/// Remove everything in `dir` and leave it as an empty directory.
pub fn clear_dir(dir: &Path) -> Result<(), FilesError> {
    match fs::remove_dir_all(dir) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(io_error("removing", dir)(e)),
    }
    fs::create_dir_all(dir).map_err(io_error("creating", dir))
}

/// Copy the contents of `src` into `dst`, creating directories as needed.
///
/// Symlinks are followed: linked files are copied as regular files and
/// linked directories as real directories.
pub fn copy_all(src: &Path, dst: &Path) -> Result<(), FilesError> {
    fs::create_dir_all(dst).map_err(io_error("creating", dst))?;

    for entry in WalkDir::new(src)
        .follow_links(true)
        .min_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|source| FilesError::Walk {
            root: src.to_path_buf(),
            source,
        })?;
        let Ok(relative) = entry.path().strip_prefix(src) else {
            continue;
        };
        let target = dst.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).map_err(io_error("creating", &target))?;
        } else {
            fs::copy(entry.path(), &target).map_err(io_error("copying to", &target))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_dir_empties_existing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("development");
        fs::create_dir_all(target.join("old/nested")).unwrap();
        fs::write(target.join("old/nested/file"), "x").unwrap();

        clear_dir(&target).unwrap();

        assert!(target.is_dir());
        assert_eq!(fs::read_dir(&target).unwrap().count(), 0);
    }

    #[test]
    fn clear_dir_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("a/b");
        clear_dir(&target).unwrap();
        assert!(target.is_dir());
    }

    #[test]
    fn copy_all_preserves_tree() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("src");
        fs::create_dir_all(src.join("nginx/1.0.0/data_stream")).unwrap();
        fs::write(src.join("nginx/1.0.0/manifest.yml"), "name: nginx").unwrap();
        fs::create_dir_all(src.join("empty")).unwrap();

        let dst = dir.path().join("dst");
        copy_all(&src, &dst).unwrap();

        assert_eq!(
            fs::read_to_string(dst.join("nginx/1.0.0/manifest.yml")).unwrap(),
            "name: nginx"
        );
        assert!(dst.join("nginx/1.0.0/data_stream").is_dir());
        assert!(dst.join("empty").is_dir());
    }

    #[cfg(unix)]
    #[test]
    fn copy_all_follows_symlinked_directories() {
        let dir = tempfile::tempdir().unwrap();
        let real = dir.path().join("real");
        fs::create_dir_all(&real).unwrap();
        fs::write(real.join("manifest.yml"), "name: nginx").unwrap();

        let src = dir.path().join("src");
        fs::create_dir_all(&src).unwrap();
        std::os::unix::fs::symlink(&real, src.join("nginx")).unwrap();
        std::os::unix::fs::symlink(real.join("manifest.yml"), src.join("linked.yml")).unwrap();

        let dst = dir.path().join("dst");
        copy_all(&src, &dst).unwrap();

        assert!(dst.join("nginx").is_dir());
        assert!(!fs::symlink_metadata(dst.join("nginx")).unwrap().file_type().is_symlink());
        assert_eq!(
            fs::read_to_string(dst.join("nginx/manifest.yml")).unwrap(),
            "name: nginx"
        );
        assert_eq!(fs::read_to_string(dst.join("linked.yml")).unwrap(), "name: nginx");
    }

    #[test]
    fn copy_all_missing_source_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = copy_all(&dir.path().join("missing"), &dir.path().join("dst")).unwrap_err();
        assert!(matches!(err, FilesError::Walk { .. }));
    }
}
