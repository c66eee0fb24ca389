//! CLI context construction - the composition root helper.
//!
//! Loads the configuration once and builds the finder registry from it;
//! handlers receive the context by reference and never touch global state.

use std::path::Path;

use anyhow::Result;

use staticfind_core::{FinderRegistry, StaticConfig};

/// Everything a command handler needs.
pub struct CliContext {
    pub config: StaticConfig,
    pub registry: FinderRegistry,
}

impl std::fmt::Debug for CliContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CliContext")
            .field("config", &self.config)
            .field("finders", &self.registry.len())
            .finish()
    }
}

/// Load the configuration and build the finder registry.
///
/// A missing config file is not an error - the defaults apply, which gives
/// an empty finder chain - but a file that exists and fails to load or
/// validate is fatal.
pub fn bootstrap(config_path: &Path) -> Result<CliContext> {
    let config = if config_path.exists() {
        StaticConfig::load(config_path)?
    } else {
        tracing::warn!(
            path = %config_path.display(),
            "config file not found, using defaults"
        );
        StaticConfig::default()
    };

    let registry = FinderRegistry::from_config(&config)?;
    Ok(CliContext { config, registry })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn missing_config_falls_back_to_defaults() {
        let ctx = bootstrap(Path::new("/nonexistent/staticfind.toml")).unwrap();
        assert_eq!(ctx.config.url, "/static/");
        assert_eq!(ctx.registry.len(), 2);
    }

    #[test]
    fn config_file_is_loaded_and_validated() {
        let dir = tempdir().unwrap();
        let assets = dir.path().join("assets");
        fs::create_dir(&assets).unwrap();
        let config_path = dir.path().join("staticfind.toml");
        fs::write(
            &config_path,
            format!("debug = true\ndirs = [{:?}]\n", assets.display()),
        )
        .unwrap();

        let ctx = bootstrap(&config_path).unwrap();
        assert!(ctx.config.debug);
        assert_eq!(ctx.config.dirs.len(), 1);
    }

    #[test]
    fn broken_config_file_is_fatal() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("staticfind.toml");
        fs::write(&config_path, "finders = [\"no-such-finder\"]\n").unwrap();

        let err = bootstrap(&config_path).unwrap_err();
        assert!(err.to_string().contains("no-such-finder"));
    }
}
