//! HTTP API server for the Snowtooth resort status service.
//!
//! This crate provides an Axum HTTP server that exposes:
//!
//! - **REST query endpoints** for lifts and trails, with optional status
//!   filters, counts, and cross-reference resolution
//! - **REST mutation endpoints** (`PUT /api/{lifts,trails}/{id}/status`)
//! - **`WebSocket` endpoint** (`/ws/{topic}`) streaming every status
//!   change published after the connection is accepted
//! - **Minimal HTML status page** (`GET /`) with per-status counts
//!
//! # Architecture
//!
//! Handlers share one [`ResortContext`] through [`AppState`]. Queries and
//! mutations are thin wrappers over the context's methods; the context
//! owns locking and notification ordering.
//!
//! [`ResortContext`]: snowtooth_core::ResortContext

pub mod error;
pub mod handlers;
pub mod mutations;
pub mod router;
pub mod server;
pub mod state;
pub mod ws;

// Re-export primary types for convenience.
pub use error::ApiError;
pub use router::build_router;
pub use server::{start_server, ServerError};
pub use state::AppState;
