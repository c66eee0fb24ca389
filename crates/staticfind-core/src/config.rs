//! Static asset configuration.
//!
//! A single explicit [`StaticConfig`] struct describes every recognized
//! option: the ordered finder kinds, the extra asset directories (optionally
//! namespaced under a prefix), the application directories, the collected
//! assets root, and the URL prefix the development server mounts under.
//!
//! The struct is loaded once by the process entry point (from a TOML file)
//! and passed by reference or `Arc` to consumers. There is no process-global
//! settings object.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Default URL prefix the serving view is mounted under.
pub const DEFAULT_URL_PREFIX: &str = "/static/";

/// Errors raised while loading or validating the configuration.
///
/// All of these are fatal at startup or first use; the message always names
/// the offending file, key, or value.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("Failed to read config file {path}: {reason}")]
    Read { path: PathBuf, reason: String },

    /// The config file could not be parsed as TOML.
    #[error("Failed to parse config file {path}: {reason}")]
    Parse { path: PathBuf, reason: String },

    /// A finder kind key is not in the registration table.
    #[error("Unknown finder kind {kind:?} (known kinds: filesystem, app-dirs, storage)")]
    UnknownFinder { kind: String },

    /// A storage backend kind key is not in the registration table.
    #[error("Unknown storage kind {kind:?} (known kinds: filesystem)")]
    UnknownStorage { kind: String },

    /// The same finder kind appears twice in the chain.
    #[error("Finder kind {kind:?} is configured more than once")]
    DuplicateFinder { kind: String },

    /// A finder that needs the assets root was configured without one.
    #[error("The {finder:?} finder requires the assets root to be set")]
    MissingRoot { finder: &'static str },

    /// The URL prefix is not a usable mount point.
    #[error("URL prefix {url:?} must start and end with '/'")]
    InvalidUrlPrefix { url: String },
}

/// An extra asset directory, optionally namespaced under a path prefix.
///
/// In TOML either form is accepted:
///
/// ```toml
/// dirs = [
///     "/srv/assets/shared",
///     { prefix = "vendor", path = "/srv/assets/vendor" },
/// ]
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum StaticDir {
    /// A bare directory; its files are addressable directly.
    Plain(PathBuf),
    /// A directory whose files are addressable only under `prefix/`.
    Prefixed { prefix: String, path: PathBuf },
}

impl StaticDir {
    /// The namespace prefix, if this directory has one.
    pub fn prefix(&self) -> Option<&str> {
        match self {
            Self::Plain(_) => None,
            Self::Prefixed { prefix, .. } => Some(prefix),
        }
    }

    /// The directory on disk.
    pub fn path(&self) -> &Path {
        match self {
            Self::Plain(path) | Self::Prefixed { path, .. } => path,
        }
    }
}

/// An application component contributing assets from its `static/` subdirectory.
#[derive(Debug, Clone, Deserialize)]
pub struct AppDir {
    /// Component name, used in diagnostics only.
    pub name: String,
    /// Root directory of the component; assets live under `<path>/static/`.
    pub path: PathBuf,
    /// Optional namespace prefix for this component's assets.
    #[serde(default)]
    pub prefix: Option<String>,
}

/// Recognized configuration options for the static asset pipeline.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StaticConfig {
    /// Development mode. The serving view refuses to start when this is off
    /// unless the insecure override is passed.
    pub debug: bool,
    /// URL prefix the serving view is mounted under.
    pub url: String,
    /// Root directory for collected static assets. Target of `collect` and
    /// source of the `"storage"` finder.
    pub root: Option<PathBuf>,
    /// Extra asset directories, in lookup order.
    pub dirs: Vec<StaticDir>,
    /// Application components, in lookup order.
    pub apps: Vec<AppDir>,
    /// Ordered finder kind keys making up the chain.
    pub finders: Vec<String>,
    /// Storage backend kind key for the assets root.
    pub storage: String,
}

impl Default for StaticConfig {
    fn default() -> Self {
        Self {
            debug: false,
            url: DEFAULT_URL_PREFIX.to_string(),
            root: None,
            dirs: Vec::new(),
            apps: Vec::new(),
            finders: vec![
                crate::finders::FILESYSTEM_FINDER.to_string(),
                crate::finders::APP_DIRS_FINDER.to_string(),
            ],
            storage: crate::finders::FILESYSTEM_STORAGE.to_string(),
        }
    }
}

impl StaticConfig {
    /// Load and validate a configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let config: Self = toml::from_str(&raw).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check the invariants that do not depend on the registration table.
    ///
    /// Unknown finder/storage kinds are rejected later, when
    /// [`FinderRegistry::from_config`](crate::finders::FinderRegistry::from_config)
    /// consults the table.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.url.starts_with('/') || !self.url.ends_with('/') {
            return Err(ConfigError::InvalidUrlPrefix {
                url: self.url.clone(),
            });
        }
        for (i, kind) in self.finders.iter().enumerate() {
            if self.finders[..i].contains(kind) {
                return Err(ConfigError::DuplicateFinder { kind: kind.clone() });
            }
        }
        if self
            .finders
            .iter()
            .any(|k| k == crate::finders::STORAGE_FINDER)
            && self.root.is_none()
        {
            return Err(ConfigError::MissingRoot {
                finder: crate::finders::STORAGE_FINDER,
            });
        }
        Ok(())
    }

    /// The URL prefix without its trailing slash, suitable for route nesting.
    pub fn url_mount(&self) -> &str {
        self.url.trim_end_matches('/')
    }
}
