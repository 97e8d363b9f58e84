//! Axum router construction for the API server.
//!
//! Assembles all routes (REST + `WebSocket`) into a single [`Router`]
//! with CORS middleware enabled for cross-origin dashboard access.

use std::sync::Arc;

use axum::routing::{get, put};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::mutations;
use crate::state::AppState;
use crate::ws;

/// Build the complete Axum router.
///
/// The router includes:
/// - `GET /` -- minimal HTML status page
/// - `GET /ws/{topic}` -- `WebSocket` status-change stream
/// - `GET /api/lifts`, `GET /api/lifts/count` -- list and count lifts
/// - `GET /api/lifts/{id}`, `GET /api/lifts/{id}/trail-access`
/// - `PUT /api/lifts/{id}/status` -- set a lift's status
/// - `GET /api/trails`, `GET /api/trails/count` -- list and count trails
/// - `GET /api/trails/{id}`, `GET /api/trails/{id}/lift-access`
/// - `PUT /api/trails/{id}/status` -- set a trail's status
///
/// CORS allows any origin.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Status page
        .route("/", get(handlers::index))
        // WebSocket
        .route("/ws/{topic}", get(ws::ws_subscribe))
        // Lifts
        .route("/api/lifts", get(handlers::list_lifts))
        .route("/api/lifts/count", get(handlers::lift_count))
        .route("/api/lifts/{id}", get(handlers::get_lift))
        .route("/api/lifts/{id}/trail-access", get(handlers::lift_trail_access))
        .route("/api/lifts/{id}/status", put(mutations::set_lift_status))
        // Trails
        .route("/api/trails", get(handlers::list_trails))
        .route("/api/trails/count", get(handlers::trail_count))
        .route("/api/trails/{id}", get(handlers::get_trail))
        .route("/api/trails/{id}/lift-access", get(handlers::trail_lift_access))
        .route("/api/trails/{id}/status", put(mutations::set_trail_status))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
