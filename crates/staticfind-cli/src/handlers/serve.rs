//! Serve command handler.

use anyhow::Result;

use staticfind_axum::{ServeConfig, start_server};

use crate::bootstrap::CliContext;

/// Start the development server with the given options.
///
/// The debug/insecure safety policy is enforced inside
/// [`start_server`]; a refusal surfaces here as a startup error.
pub async fn execute(ctx: CliContext, serve: ServeConfig) -> Result<()> {
    println!(
        "Serving static assets at http://{}:{}{}",
        serve.host,
        serve.port,
        ctx.config.url
    );
    start_server(ctx.config, serve).await
}
