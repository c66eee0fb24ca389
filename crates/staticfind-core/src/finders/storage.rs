//! Last-resort finder over the collected assets root.

use std::path::PathBuf;
use std::sync::Arc;

use super::{AssetSource, Finder, find_in_sources};
use crate::storage::{Storage, StorageError};

/// Looks for files in the configured storage backend over the assets root.
///
/// Only participates when the backend is locally representable: the finder
/// probes `local_path("")` and treats [`StorageError::NotLocal`] as
/// "cannot help" rather than an error.
pub struct StorageFinder {
    sources: [AssetSource; 1],
}

impl StorageFinder {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            sources: [AssetSource {
                prefix: None,
                storage,
            }],
        }
    }
}

impl Finder for StorageFinder {
    fn find(&self, path: &str, all: bool) -> Vec<PathBuf> {
        if let Err(StorageError::NotLocal { .. }) = self.sources[0].storage.local_path("") {
            return Vec::new();
        }
        find_in_sources(&self.sources, path, all)
    }

    fn sources(&self) -> &[AssetSource] {
        &self.sources
    }

    // The assets root is the *destination* of collection, never a source.
    fn collect_sources(&self) -> &[AssetSource] {
        &[]
    }
}
