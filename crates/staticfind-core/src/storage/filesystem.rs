//! Local filesystem storage backend.

use std::fs;
use std::path::{Path, PathBuf};

use super::{Storage, StorageError};

/// Storage over a base directory on the local filesystem.
///
/// Asset paths are joined strictly below the base: `..` components and any
/// other attempt to step outside the base fail with
/// [`StorageError::PathEscapesBase`].
#[derive(Debug, Clone)]
pub struct FileSystemStorage {
    location: PathBuf,
}

impl FileSystemStorage {
    pub fn new(location: impl Into<PathBuf>) -> Self {
        Self {
            location: location.into(),
        }
    }

    /// The base directory this storage serves from.
    pub fn location(&self) -> &Path {
        &self.location
    }

    fn safe_join(&self, path: &str) -> Result<PathBuf, StorageError> {
        let mut full = self.location.clone();
        for part in path.split('/') {
            match part {
                "" | "." => {}
                ".." => {
                    return Err(StorageError::PathEscapesBase {
                        path: path.to_string(),
                    });
                }
                part => full.push(part),
            }
        }
        Ok(full)
    }
}

impl Storage for FileSystemStorage {
    fn exists(&self, path: &str) -> bool {
        self.safe_join(path).is_ok_and(|full| full.exists())
    }

    fn local_path(&self, path: &str) -> Result<PathBuf, StorageError> {
        self.safe_join(path)
    }

    fn listdir(&self, path: &str) -> Result<(Vec<String>, Vec<String>), StorageError> {
        let full = self.safe_join(path)?;
        let entries = fs::read_dir(&full).map_err(|e| StorageError::Io {
            path: full.clone(),
            reason: e.to_string(),
        })?;

        let mut dirs = Vec::new();
        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| StorageError::Io {
                path: full.clone(),
                reason: e.to_string(),
            })?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if entry.path().is_dir() {
                dirs.push(name);
            } else {
                files.push(name);
            }
        }
        Ok((dirs, files))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn storage_with_files() -> (tempfile::TempDir, FileSystemStorage) {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("css")).unwrap();
        fs::write(dir.path().join("css/base.css"), b"body {}").unwrap();
        fs::write(dir.path().join("robots.txt"), b"Disallow:").unwrap();
        let storage = FileSystemStorage::new(dir.path());
        (dir, storage)
    }

    #[test]
    fn exists_reports_files_and_directories() {
        let (_dir, storage) = storage_with_files();
        assert!(storage.exists("robots.txt"));
        assert!(storage.exists("css"));
        assert!(storage.exists("css/base.css"));
        assert!(!storage.exists("missing.txt"));
    }

    #[test]
    fn local_path_joins_below_base_without_touching_disk() {
        let (dir, storage) = storage_with_files();
        let path = storage.local_path("js/app.js").unwrap();
        assert_eq!(path, dir.path().join("js/app.js"));
    }

    #[test]
    fn traversal_components_are_rejected() {
        let (_dir, storage) = storage_with_files();
        assert!(matches!(
            storage.local_path("../etc/passwd"),
            Err(StorageError::PathEscapesBase { .. })
        ));
        assert!(!storage.exists("css/../../etc/passwd"));
    }

    #[test]
    fn listdir_splits_dirs_and_files() {
        let (_dir, storage) = storage_with_files();
        let (mut dirs, mut files) = storage.listdir("").unwrap();
        dirs.sort();
        files.sort();
        assert_eq!(dirs, vec!["css"]);
        assert_eq!(files, vec!["robots.txt"]);
    }

    #[test]
    fn listdir_on_missing_directory_is_an_io_error() {
        let (_dir, storage) = storage_with_files();
        assert!(matches!(
            storage.listdir("nope"),
            Err(StorageError::Io { .. })
        ));
    }
}
