//! Route definitions and router construction.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use crate::bootstrap::ServeContext;
use crate::handlers;
use crate::state::AppState;

/// Build the serving router: `/health` plus the path-capturing asset route
/// nested under the configured URL prefix.
///
/// Axum 0.8 brace syntax: `{*path}` captures the rest of the path. The
/// bare mount (no trailing path) routes to the same handler with an empty
/// path so directory indexes work at the mount root.
pub fn create_router(ctx: ServeContext) -> Router {
    let mount = ctx.config.url_mount().to_string();
    let state: AppState = Arc::new(ctx);

    let assets = Router::new()
        .route("/", get(handlers::serve::index_root))
        .route("/{*path}", get(handlers::serve::asset));

    let router = Router::new().route("/health", get(health_check));
    let router = if mount.is_empty() {
        // URL prefix "/" - assets live at the root.
        router.merge(assets)
    } else {
        router.nest(&mount, assets)
    };

    router.layer(TraceLayer::new_for_http()).with_state(state)
}

/// Health check endpoint.
pub(crate) async fn health_check() -> &'static str {
    "OK"
}
