//! Finder over per-application asset directories.

use std::path::PathBuf;
use std::sync::Arc;

use super::{AssetSource, Finder, find_in_sources};
use crate::config::StaticConfig;
use crate::storage::FileSystemStorage;

/// Subdirectory of an application component that holds its assets.
pub const APP_STATIC_DIR: &str = "static";

/// Looks for files in the `static/` subdirectory of every configured
/// application component, honoring each component's optional namespace
/// prefix. Components without a `static/` directory are skipped at
/// construction.
pub struct AppDirectoriesFinder {
    sources: Vec<AssetSource>,
}

impl AppDirectoriesFinder {
    pub fn from_config(config: &StaticConfig) -> Self {
        let mut sources = Vec::with_capacity(config.apps.len());
        for app in &config.apps {
            let static_dir = app.path.join(APP_STATIC_DIR);
            if !static_dir.is_dir() {
                tracing::debug!(
                    app = %app.name,
                    dir = %static_dir.display(),
                    "app has no static directory, skipping"
                );
                continue;
            }
            sources.push(AssetSource {
                prefix: app.prefix.clone(),
                storage: Arc::new(FileSystemStorage::new(static_dir)),
            });
        }
        Self { sources }
    }
}

impl Finder for AppDirectoriesFinder {
    fn find(&self, path: &str, all: bool) -> Vec<PathBuf> {
        find_in_sources(&self.sources, path, all)
    }

    fn sources(&self) -> &[AssetSource] {
        &self.sources
    }
}
