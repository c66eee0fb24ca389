//! The configured finder chain and its registration table.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::{AppDirectoriesFinder, AssetSource, FileSystemFinder, Finder, StorageFinder};
use crate::config::{ConfigError, StaticConfig};
use crate::storage::{FileSystemStorage, Storage};

/// Kind key for [`FileSystemFinder`].
pub const FILESYSTEM_FINDER: &str = "filesystem";
/// Kind key for [`AppDirectoriesFinder`].
pub const APP_DIRS_FINDER: &str = "app-dirs";
/// Kind key for [`StorageFinder`].
pub const STORAGE_FINDER: &str = "storage";

/// Every finder kind the registration table knows.
pub const KNOWN_FINDER_KINDS: &[&str] = &[FILESYSTEM_FINDER, APP_DIRS_FINDER, STORAGE_FINDER];

/// Kind key for [`FileSystemStorage`].
pub const FILESYSTEM_STORAGE: &str = "filesystem";

/// Every storage backend kind the registration table knows.
pub const KNOWN_STORAGE_KINDS: &[&str] = &[FILESYSTEM_STORAGE];

/// Construct a storage backend from its registration key.
pub fn build_storage(kind: &str, root: &Path) -> Result<Arc<dyn Storage>, ConfigError> {
    match kind {
        FILESYSTEM_STORAGE => Ok(Arc::new(FileSystemStorage::new(root))),
        other => Err(ConfigError::UnknownStorage {
            kind: other.to_string(),
        }),
    }
}

struct RegisteredFinder {
    kind: String,
    finder: Box<dyn Finder>,
}

/// The ordered chain of configured finders.
///
/// Built once by the process entry point via [`FinderRegistry::from_config`]
/// and shared by reference or `Arc` afterwards; finders carry no mutable
/// state, so lookups need no locking.
pub struct FinderRegistry {
    entries: Vec<RegisteredFinder>,
}

impl std::fmt::Debug for FinderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FinderRegistry")
            .field(
                "kinds",
                &self.entries.iter().map(|e| &e.kind).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl FinderRegistry {
    /// Build the chain described by `config.finders`.
    ///
    /// Each kind key is resolved through the registration table; an unknown
    /// key is a fatal configuration error naming the key.
    pub fn from_config(config: &StaticConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut entries = Vec::with_capacity(config.finders.len());
        for kind in &config.finders {
            let finder: Box<dyn Finder> = match kind.as_str() {
                FILESYSTEM_FINDER => Box::new(FileSystemFinder::from_config(config)),
                APP_DIRS_FINDER => Box::new(AppDirectoriesFinder::from_config(config)),
                STORAGE_FINDER => {
                    let root = config.root.as_ref().ok_or(ConfigError::MissingRoot {
                        finder: STORAGE_FINDER,
                    })?;
                    Box::new(StorageFinder::new(build_storage(&config.storage, root)?))
                }
                other => {
                    return Err(ConfigError::UnknownFinder {
                        kind: other.to_string(),
                    });
                }
            };
            entries.push(RegisteredFinder {
                kind: kind.clone(),
                finder,
            });
        }
        tracing::debug!(finders = ?entries.iter().map(|e| e.kind.as_str()).collect::<Vec<_>>(),
            "finder registry built");
        Ok(Self { entries })
    }

    /// First matching absolute path across the chain, in registration order
    /// then match order within each finder.
    pub fn find(&self, path: &str) -> Option<PathBuf> {
        self.entries
            .iter()
            .find_map(|entry| entry.finder.find(path, false).into_iter().next())
    }

    /// All matching absolute paths, concatenated in the same order
    /// [`find`](Self::find) would visit them.
    pub fn find_all(&self, path: &str) -> Vec<PathBuf> {
        self.entries
            .iter()
            .flat_map(|entry| entry.finder.find(path, true))
            .collect()
    }

    /// Merged `(directories, files)` directly under `path`, aggregated over
    /// every source whose prefix admits the path. Entries are deduplicated,
    /// first-seen order. Sources that cannot list the path contribute
    /// nothing.
    pub fn listdir(&self, path: &str) -> (Vec<String>, Vec<String>) {
        let mut dirs = Vec::new();
        let mut files = Vec::new();
        for entry in &self.entries {
            for source in entry.finder.sources() {
                let Some((source_dirs, source_files)) = source_listdir(source, path) else {
                    continue;
                };
                combine(&mut dirs, source_dirs);
                combine(&mut files, source_files);
            }
        }
        (dirs, files)
    }

    /// The finders in registration order.
    pub fn finders(&self) -> impl Iterator<Item = &dyn Finder> {
        self.entries.iter().map(|entry| entry.finder.as_ref())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One source's contribution to a directory listing, or `None` when the
/// prefix rule excludes it or the directory is absent.
fn source_listdir(source: &AssetSource, path: &str) -> Option<(Vec<String>, Vec<String>)> {
    let rest = source.strip(path)?;
    if !source.storage.exists(rest) {
        return None;
    }
    source.storage.listdir(rest).ok()
}

/// Merge a partial listing into the running one, keeping first-seen order.
fn combine(all: &mut Vec<String>, partial: Vec<String>) {
    for name in partial {
        if !all.contains(&name) {
            all.push(name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AppDir, StaticDir};
    use std::fs;
    use tempfile::{TempDir, tempdir};

    /// Extra dir + one app, both holding `test/file1.txt`; the extra dir
    /// additionally holds `extra-only.txt`.
    fn fixture() -> (TempDir, StaticConfig) {
        let base = tempdir().unwrap();

        let extra = base.path().join("extra/static");
        fs::create_dir_all(extra.join("test")).unwrap();
        fs::write(extra.join("test/file1.txt"), b"extra copy").unwrap();
        fs::write(extra.join("extra-only.txt"), b"only here").unwrap();

        let app = base.path().join("app");
        fs::create_dir_all(app.join("static/test")).unwrap();
        fs::write(app.join("static/test/file1.txt"), b"app copy").unwrap();
        fs::write(app.join("static/test/file2.txt"), b"app only").unwrap();

        let config = StaticConfig {
            dirs: vec![StaticDir::Plain(extra)],
            apps: vec![AppDir {
                name: "test".to_string(),
                path: app,
                prefix: None,
            }],
            ..StaticConfig::default()
        };
        (base, config)
    }

    #[test]
    fn unknown_finder_kind_names_the_key() {
        let config = StaticConfig {
            finders: vec!["filesystem".to_string(), "cloud-bucket".to_string()],
            ..StaticConfig::default()
        };
        let err = FinderRegistry::from_config(&config).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownFinder { ref kind } if kind == "cloud-bucket"));
        assert!(err.to_string().contains("cloud-bucket"));
    }

    #[test]
    fn unknown_storage_kind_names_the_key() {
        let root = tempdir().unwrap();
        let config = StaticConfig {
            finders: vec![STORAGE_FINDER.to_string()],
            storage: "s3".to_string(),
            root: Some(root.path().to_path_buf()),
            ..StaticConfig::default()
        };
        let err = FinderRegistry::from_config(&config).unwrap_err();
        assert!(err.to_string().contains("s3"));
    }

    #[test]
    fn repeated_builds_resolve_identically() {
        let (_base, config) = fixture();
        let first = FinderRegistry::from_config(&config).unwrap();
        let second = FinderRegistry::from_config(&config).unwrap();
        assert_eq!(first.find("test/file1.txt"), second.find("test/file1.txt"));
        assert_eq!(first.len(), 2);
    }

    #[test]
    fn first_match_prefers_extra_dirs_over_apps() {
        let (base, config) = fixture();
        let registry = FinderRegistry::from_config(&config).unwrap();

        // Present in both: the extra-static copy wins.
        assert_eq!(
            registry.find("test/file1.txt"),
            Some(base.path().join("extra/static/test/file1.txt"))
        );
        // Present only in the app: falls through.
        assert_eq!(
            registry.find("test/file2.txt"),
            Some(base.path().join("app/static/test/file2.txt"))
        );
        assert_eq!(registry.find("test/absent.txt"), None);
    }

    #[test]
    fn find_all_concatenates_in_finder_order() {
        let (base, config) = fixture();
        let registry = FinderRegistry::from_config(&config).unwrap();

        assert_eq!(
            registry.find_all("test/file1.txt"),
            vec![
                base.path().join("extra/static/test/file1.txt"),
                base.path().join("app/static/test/file1.txt"),
            ]
        );
    }

    #[test]
    fn find_all_equals_manual_concatenation() {
        let (_base, config) = fixture();
        let registry = FinderRegistry::from_config(&config).unwrap();

        for path in ["test/file1.txt", "test/file2.txt", "absent.txt"] {
            let manual: Vec<_> = registry
                .finders()
                .flat_map(|finder| finder.find(path, true))
                .collect();
            assert_eq!(registry.find_all(path), manual, "path {path:?}");
        }
    }

    #[test]
    fn listdir_merges_and_dedupes_across_sources() {
        let (_base, config) = fixture();
        let registry = FinderRegistry::from_config(&config).unwrap();

        let (dirs, mut files) = registry.listdir("");
        assert_eq!(dirs, vec!["test"]);
        files.sort();
        assert_eq!(files, vec!["extra-only.txt"]);

        let (dirs, mut files) = registry.listdir("test");
        assert!(dirs.is_empty());
        files.sort();
        // file1.txt exists in both sources but is listed once.
        assert_eq!(files, vec!["file1.txt", "file2.txt"]);
    }

    #[test]
    fn storage_finder_serves_collected_root() {
        let root = tempdir().unwrap();
        fs::write(root.path().join("collected.css"), b"c").unwrap();

        let config = StaticConfig {
            finders: vec![FILESYSTEM_FINDER.to_string(), STORAGE_FINDER.to_string()],
            root: Some(root.path().to_path_buf()),
            ..StaticConfig::default()
        };
        let registry = FinderRegistry::from_config(&config).unwrap();
        assert_eq!(
            registry.find("collected.css"),
            Some(root.path().join("collected.css"))
        );
    }
}
