//! Core static-asset resolution for staticfind.
//!
//! This crate provides the configuration surface, the storage abstraction,
//! and the finder chain that maps logical asset paths (`"css/base.css"`) to
//! absolute filesystem locations:
//!
//! - [`config::StaticConfig`] - explicit configuration, loaded once at the
//!   composition root and passed by reference to consumers
//! - [`storage::Storage`] - pluggable backend over where files physically
//!   live; backends that cannot map to local paths signal this distinctly
//! - [`finders::FinderRegistry`] - the ordered finder chain with
//!   first-match and collect-all resolution
//! - [`collect`] - copying everything the chain can see into the assets root
//!
//! No HTTP or CLI types live here; those belong to the adapter crates.

#![deny(unused_crate_dependencies)]

pub mod collect;
pub mod config;
pub mod finders;
pub mod storage;

// Re-export commonly used types for convenience
pub use collect::{CollectError, CollectorOptions, DEFAULT_IGNORE_PATTERNS, collect, visible_files};
pub use config::{AppDir, ConfigError, StaticConfig, StaticDir};
pub use finders::{
    AppDirectoriesFinder, AssetSource, FileSystemFinder, Finder, FinderRegistry, StorageFinder,
};
pub use storage::walk::{IgnorePatterns, PatternError, collect_files};
pub use storage::{FileSystemStorage, Storage, StorageError};
