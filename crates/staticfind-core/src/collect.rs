//! Collecting assets into the configured root.
//!
//! Copies every file visible through the finder chain into `config.root`,
//! so a single directory can serve what the chain resolves. Precedence
//! matches lookup: the first source to provide a logical path wins, and
//! later sources never overwrite it.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::StaticConfig;
use crate::finders::FinderRegistry;
use crate::storage::StorageError;
use crate::storage::walk::{IgnorePatterns, PatternError, collect_files};

/// Names skipped by default: version-control droppings, hidden files,
/// editor backups.
pub const DEFAULT_IGNORE_PATTERNS: &[&str] = &["CVS", ".*", "*~"];

/// Errors raised while collecting assets.
#[derive(Debug, Error)]
pub enum CollectError {
    /// No assets root is configured.
    #[error("Cannot collect static assets: no assets root is configured")]
    MissingRoot,

    /// The assets root is also one of the source directories.
    #[error("Assets root {root} is also a configured source directory")]
    RootIsSource { root: PathBuf },

    #[error(transparent)]
    Pattern(#[from] PatternError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    /// A copy into the root failed.
    #[error("Failed to copy {from} to {to}: {reason}")]
    Copy {
        from: PathBuf,
        to: PathBuf,
        reason: String,
    },
}

/// Options for a collection run.
#[derive(Debug, Clone)]
pub struct CollectorOptions {
    /// Extra fnmatch-style patterns to skip, on top of the defaults.
    pub ignore_patterns: Vec<String>,
    /// Whether [`DEFAULT_IGNORE_PATTERNS`] apply.
    pub use_default_ignore: bool,
    /// Report what would be copied without writing anything.
    pub dry_run: bool,
}

impl Default for CollectorOptions {
    fn default() -> Self {
        Self {
            ignore_patterns: Vec::new(),
            use_default_ignore: true,
            dry_run: false,
        }
    }
}

impl CollectorOptions {
    /// The compiled ignore set this run uses.
    pub fn ignore(&self) -> Result<IgnorePatterns, PatternError> {
        let mut patterns: Vec<String> = if self.use_default_ignore {
            DEFAULT_IGNORE_PATTERNS.iter().map(|p| (*p).to_string()).collect()
        } else {
            Vec::new()
        };
        patterns.extend(self.ignore_patterns.iter().cloned());
        IgnorePatterns::compile(&patterns)
    }
}

/// Copy everything the finder chain can see into `config.root`.
///
/// Returns the collected logical paths, sorted, whether or not anything was
/// written (`dry_run` collects the same list without copying).
pub fn collect(
    config: &StaticConfig,
    registry: &FinderRegistry,
    options: &CollectorOptions,
) -> Result<Vec<String>, CollectError> {
    let root = config.root.clone().ok_or(CollectError::MissingRoot)?;

    // Self-copy guard: collecting a source into itself would loop on the
    // next run and silently mask precedence bugs.
    for finder in registry.finders() {
        for source in finder.collect_sources() {
            if let Ok(base) = source.storage.local_path("") {
                if base == root {
                    return Err(CollectError::RootIsSource { root });
                }
            }
        }
    }

    let ignore = options.ignore()?;
    let mut seen: HashSet<String> = HashSet::new();
    let mut collected = Vec::new();

    for finder in registry.finders() {
        for source in finder.collect_sources() {
            if !source.storage.exists("") {
                continue;
            }
            for rel in collect_files(source.storage.as_ref(), &ignore, "")? {
                let logical = match source.prefix.as_deref() {
                    Some(prefix) => format!("{prefix}/{rel}"),
                    None => rel.clone(),
                };
                // First match wins, matching find() semantics.
                if !seen.insert(logical.clone()) {
                    continue;
                }
                let from = match source.storage.local_path(&rel) {
                    Ok(path) => path,
                    Err(StorageError::NotLocal { .. }) => {
                        tracing::warn!(path = %logical, "source has no local path, skipping");
                        continue;
                    }
                    Err(e) => return Err(e.into()),
                };
                if !options.dry_run {
                    copy_into_root(&from, &root, &logical)?;
                }
                tracing::debug!(path = %logical, dry_run = options.dry_run, "collected");
                collected.push(logical);
            }
        }
    }

    collected.sort();
    Ok(collected)
}

fn copy_into_root(from: &Path, root: &Path, logical: &str) -> Result<(), CollectError> {
    let to = root.join(logical);
    let copy_err = |reason: String| CollectError::Copy {
        from: from.to_path_buf(),
        to: to.clone(),
        reason,
    };
    if let Some(parent) = to.parent() {
        fs::create_dir_all(parent).map_err(|e| copy_err(e.to_string()))?;
    }
    fs::copy(from, &to).map_err(|e| copy_err(e.to_string()))?;
    Ok(())
}

/// Every logical path visible through the finder chain, deduplicated in
/// finder order. Unlike [`collect`], this walks *all* sources, including
/// the assets root itself.
pub fn visible_files(
    registry: &FinderRegistry,
    ignore: &IgnorePatterns,
) -> Result<Vec<String>, StorageError> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut out = Vec::new();
    for finder in registry.finders() {
        for source in finder.sources() {
            if !source.storage.exists("") {
                continue;
            }
            for rel in collect_files(source.storage.as_ref(), ignore, "")? {
                let logical = match source.prefix.as_deref() {
                    Some(prefix) => format!("{prefix}/{rel}"),
                    None => rel,
                };
                if seen.insert(logical.clone()) {
                    out.push(logical);
                }
            }
        }
    }
    Ok(out)
}
