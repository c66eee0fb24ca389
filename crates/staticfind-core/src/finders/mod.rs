//! The finder chain: ordered lookup strategies from logical asset paths to
//! filesystem locations.
//!
//! Each [`Finder`] translates a relative path like `"css/base.css"` into
//! zero or more absolute locations. Finders are stateless per call beyond
//! their configuration, captured at construction. The
//! [`FinderRegistry`] holds the configured chain in order; ordering is
//! significant - the first finder to report a match wins when only the first
//! match is requested, and collect-all results concatenate in finder order.

mod app_dirs;
mod filesystem;
mod registry;
mod storage;

pub use app_dirs::{APP_STATIC_DIR, AppDirectoriesFinder};
pub use filesystem::FileSystemFinder;
pub use registry::{
    APP_DIRS_FINDER, FILESYSTEM_FINDER, FILESYSTEM_STORAGE, FinderRegistry, KNOWN_FINDER_KINDS,
    KNOWN_STORAGE_KINDS, STORAGE_FINDER, build_storage,
};
pub use storage::StorageFinder;

use std::path::PathBuf;
use std::sync::Arc;

use crate::storage::{Storage, StorageError};

/// A storage location, optionally namespaced under a path prefix.
#[derive(Clone)]
pub struct AssetSource {
    /// Namespace prefix; when set, only paths starting with `prefix/`
    /// participate, and the prefix is stripped before delegation.
    pub prefix: Option<String>,
    /// The backend holding this location's files.
    pub storage: Arc<dyn Storage>,
}

impl AssetSource {
    /// Apply the prefix rule: the remainder of `path` below this source's
    /// prefix, or `None` when the path does not participate.
    pub fn strip<'p>(&self, path: &'p str) -> Option<&'p str> {
        match self.prefix.as_deref() {
            None => Some(path),
            Some(prefix) => path
                .strip_prefix(prefix)
                .and_then(|rest| rest.strip_prefix('/')),
        }
    }
}

/// A lookup strategy over one or more asset sources.
pub trait Finder: Send + Sync {
    /// Locations matching `path`, in match order. When `all` is false the
    /// finder stops at its first match. Non-existent paths yield no match,
    /// never an error.
    fn find(&self, path: &str, all: bool) -> Vec<PathBuf>;

    /// The sources this finder consults, for directory listings.
    fn sources(&self) -> &[AssetSource];

    /// The sources eligible for collection into the assets root. The
    /// storage finder excludes itself here - its source *is* the root.
    fn collect_sources(&self) -> &[AssetSource] {
        self.sources()
    }
}

/// Shared match loop over a slice of sources.
fn find_in_sources(sources: &[AssetSource], path: &str, all: bool) -> Vec<PathBuf> {
    let mut matches = Vec::new();
    for source in sources {
        let Some(rest) = source.strip(path) else {
            continue;
        };
        if !source.storage.exists(rest) {
            continue;
        }
        match source.storage.local_path(rest) {
            Ok(location) => {
                matches.push(location);
                if !all {
                    break;
                }
            }
            // A backend without local paths cannot help this chain.
            Err(StorageError::NotLocal { .. }) => {}
            Err(e) => {
                tracing::debug!(path, error = %e, "skipping unmappable match");
            }
        }
    }
    matches
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::FileSystemStorage;

    fn source(prefix: Option<&str>) -> AssetSource {
        AssetSource {
            prefix: prefix.map(str::to_owned),
            storage: Arc::new(FileSystemStorage::new("/tmp")),
        }
    }

    #[test]
    fn unprefixed_source_admits_everything() {
        assert_eq!(source(None).strip("a/b.txt"), Some("a/b.txt"));
        assert_eq!(source(None).strip(""), Some(""));
    }

    #[test]
    fn prefixed_source_requires_full_component_match() {
        let s = source(Some("vendor"));
        assert_eq!(s.strip("vendor/lib.js"), Some("lib.js"));
        assert_eq!(s.strip("vendored/lib.js"), None);
        assert_eq!(s.strip("vendor"), None);
        assert_eq!(s.strip(""), None);
        assert_eq!(s.strip("other/lib.js"), None);
    }
}
