//! Development HTTP server for staticfind.
//!
//! Serves files resolved through the finder chain (or below a fixed
//! document root), with conditional-GET support and optional directory
//! indexes. This adapter exists for development workflows only:
//! [`bootstrap`] refuses to start unless debug mode is on or the explicit
//! insecure override is set.

pub mod bootstrap;
pub mod conditional;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use bootstrap::{ServeConfig, ServeContext, ServeMode, start_server};
pub use error::HttpError;
pub use routes::create_router;
pub use state::AppState;
