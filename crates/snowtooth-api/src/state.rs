//! Shared application state for the API server.
//!
//! [`AppState`] wraps the single [`ResortContext`] built at startup. It
//! is handed to the router behind an [`Arc`](std::sync::Arc), so every
//! handler and `WebSocket` session sees the same collections and the
//! same notification bus.

use snowtooth_core::ResortContext;

/// Shared state passed to all Axum handlers via [`axum::extract::State`].
#[derive(Debug)]
pub struct AppState {
    /// Collections plus notification bus.
    pub resort: ResortContext,
}

impl AppState {
    /// Wrap an initialized resort context.
    pub const fn new(resort: ResortContext) -> Self {
        Self { resort }
    }
}
