//! Server bootstrap - the composition root for the development server.
//!
//! This is the only place where the finder registry is wired to the HTTP
//! adapter, and where the development-only safety policy is enforced:
//! serving refuses to start when debug mode is off unless the explicit
//! insecure override is set.

use std::path::PathBuf;

use anyhow::Result;
use staticfind_core::{FinderRegistry, StaticConfig};

/// Options for one `serve` invocation, alongside the static configuration.
#[derive(Debug, Clone)]
pub struct ServeConfig {
    /// Interface to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    /// Allow serving even when `config.debug` is off.
    pub insecure: bool,
    /// Render directory indexes instead of 404ing on directories.
    pub show_indexes: bool,
    /// Serve below a fixed directory instead of consulting the finders.
    pub document_root: Option<PathBuf>,
}

impl ServeConfig {
    /// Development defaults: localhost, port 8000, no overrides.
    pub fn with_defaults() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            insecure: false,
            show_indexes: false,
            document_root: None,
        }
    }
}

/// How requests are resolved to files.
#[derive(Debug)]
pub enum ServeMode {
    /// Consult the finder chain (the default).
    Finders,
    /// Join the request path below a fixed directory.
    DocumentRoot(PathBuf),
}

/// Everything the handlers need, built once and shared via `Arc`.
pub struct ServeContext {
    pub config: StaticConfig,
    pub registry: FinderRegistry,
    pub mode: ServeMode,
    pub show_indexes: bool,
}

impl std::fmt::Debug for ServeContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServeContext")
            .field("config", &self.config)
            .field("finders", &self.registry.len())
            .field("mode", &self.mode)
            .field("show_indexes", &self.show_indexes)
            .finish()
    }
}

/// Wire the finder registry to the HTTP adapter.
///
/// Fails fast - at startup, not per request - when the configuration is
/// invalid or when the development-only policy forbids serving.
pub fn bootstrap(config: StaticConfig, serve: &ServeConfig) -> Result<ServeContext> {
    if !config.debug && !serve.insecure {
        anyhow::bail!(
            "Static file serving is only available when debug mode is on \
             or the --insecure override is set"
        );
    }

    let registry = FinderRegistry::from_config(&config)?;
    let mode = match &serve.document_root {
        Some(root) => ServeMode::DocumentRoot(root.clone()),
        None => ServeMode::Finders,
    };

    tracing::info!(
        mount = config.url_mount(),
        finders = registry.len(),
        show_indexes = serve.show_indexes,
        mode = ?mode,
        "static serving bootstrapped"
    );

    Ok(ServeContext {
        config,
        registry,
        mode,
        show_indexes: serve.show_indexes,
    })
}

/// Start the development server.
pub async fn start_server(config: StaticConfig, serve: ServeConfig) -> Result<()> {
    use tokio::net::TcpListener;

    let ctx = bootstrap(config, &serve)?;
    let app = crate::routes::create_router(ctx);

    let addr = format!("{}:{}", serve.host, serve.port);
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("static asset server listening on http://{addr}");

    axum::serve(listener, app).await?;
    Ok(())
}
