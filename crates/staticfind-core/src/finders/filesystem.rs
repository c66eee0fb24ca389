//! Finder over the extra asset directories.

use std::path::PathBuf;
use std::sync::Arc;

use super::{AssetSource, Finder, find_in_sources};
use crate::config::StaticConfig;
use crate::storage::FileSystemStorage;

/// Looks for files in the extra asset directories from `config.dirs`,
/// honoring each directory's optional namespace prefix.
pub struct FileSystemFinder {
    sources: Vec<AssetSource>,
}

impl FileSystemFinder {
    pub fn from_config(config: &StaticConfig) -> Self {
        let sources = config
            .dirs
            .iter()
            .map(|dir| AssetSource {
                prefix: dir.prefix().map(str::to_owned),
                storage: Arc::new(FileSystemStorage::new(dir.path())),
            })
            .collect();
        Self { sources }
    }
}

impl Finder for FileSystemFinder {
    fn find(&self, path: &str, all: bool) -> Vec<PathBuf> {
        find_in_sources(&self.sources, path, all)
    }

    fn sources(&self) -> &[AssetSource] {
        &self.sources
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn config_with_dirs(dirs: Vec<crate::config::StaticDir>) -> StaticConfig {
        StaticConfig {
            dirs,
            ..StaticConfig::default()
        }
    }

    #[test]
    fn finds_files_in_configured_order() {
        let first = tempdir().unwrap();
        let second = tempdir().unwrap();
        fs::write(first.path().join("shared.txt"), b"first copy").unwrap();
        fs::write(second.path().join("shared.txt"), b"second copy").unwrap();

        let config = config_with_dirs(vec![
            crate::config::StaticDir::Plain(first.path().to_path_buf()),
            crate::config::StaticDir::Plain(second.path().to_path_buf()),
        ]);
        let finder = FileSystemFinder::from_config(&config);

        let matches = finder.find("shared.txt", true);
        assert_eq!(
            matches,
            vec![
                first.path().join("shared.txt"),
                second.path().join("shared.txt")
            ]
        );
        assert_eq!(
            finder.find("shared.txt", false),
            vec![first.path().join("shared.txt")]
        );
    }

    #[test]
    fn prefixed_dir_only_matches_prefixed_paths() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("lib.js"), b"js").unwrap();

        let config = config_with_dirs(vec![crate::config::StaticDir::Prefixed {
            prefix: "vendor".to_string(),
            path: dir.path().to_path_buf(),
        }]);
        let finder = FileSystemFinder::from_config(&config);

        assert_eq!(
            finder.find("vendor/lib.js", false),
            vec![dir.path().join("lib.js")]
        );
        assert!(finder.find("lib.js", false).is_empty());
    }

    #[test]
    fn missing_paths_yield_no_match() {
        let dir = tempdir().unwrap();
        let config = config_with_dirs(vec![crate::config::StaticDir::Plain(
            dir.path().to_path_buf(),
        )]);
        let finder = FileSystemFinder::from_config(&config);
        assert!(finder.find("absent.txt", true).is_empty());
    }
}
