//! Shared application state type.

use crate::bootstrap::ServeContext;
use std::sync::Arc;

/// Application state shared across all handlers.
///
/// An `Arc`-wrapped [`ServeContext`] holding the configuration, the finder
/// registry, and the serving options. Read-only after bootstrap.
pub type AppState = Arc<ServeContext>;
