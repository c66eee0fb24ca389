//! Storage abstraction over where asset files physically live.
//!
//! The [`Storage`] trait is the seam between the finder chain and the
//! filesystem. The built-in backend is [`FileSystemStorage`]; a backend that
//! cannot map asset paths to local filesystem paths signals this with the
//! distinct [`StorageError::NotLocal`] variant so the finder chain can skip
//! it instead of treating the whole chain as broken.

mod filesystem;
pub mod walk;

pub use filesystem::FileSystemStorage;

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by storage backends.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backend has no local filesystem representation.
    ///
    /// This is a "cannot help", not a failure: callers walking a finder
    /// chain skip the backend and move on.
    #[error("The {backend} storage backend does not expose local filesystem paths")]
    NotLocal { backend: &'static str },

    /// A relative asset path would resolve outside the storage base.
    #[error("Path {path:?} would escape the storage base directory")]
    PathEscapesBase { path: String },

    /// An underlying I/O failure.
    #[error("I/O error on {path}: {reason}")]
    Io { path: PathBuf, reason: String },
}

/// A backend exposing existence checks, path resolution, and listing.
///
/// Paths handed to a storage are logical asset paths: relative,
/// `/`-separated, with `""` meaning the storage base itself. Calls are
/// synchronous; the resource model is request-per-call filesystem I/O.
pub trait Storage: Send + Sync {
    /// Whether `path` exists in this storage. Never errors; an unreadable
    /// or unmappable path reads as absent.
    fn exists(&self, path: &str) -> bool;

    /// Absolute local filesystem path for `path`.
    ///
    /// Does not require the file to exist. Fails with
    /// [`StorageError::NotLocal`] when the backend has no local
    /// representation at all.
    fn local_path(&self, path: &str) -> Result<PathBuf, StorageError>;

    /// Entries directly under `path`, split into `(directories, files)`.
    fn listdir(&self, path: &str) -> Result<(Vec<String>, Vec<String>), StorageError>;
}
