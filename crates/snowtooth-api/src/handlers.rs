//! REST query handlers.
//!
//! Every handler reads through the shared [`ResortContext`] and returns
//! a consistent point-in-time view. Lookups by unknown id answer `200`
//! with a JSON `null` body rather than an error.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/` | Minimal HTML status page |
//! | `GET` | `/api/lifts` | List lifts (`?status=OPEN`) |
//! | `GET` | `/api/lifts/count` | Count lifts (`?status=OPEN`) |
//! | `GET` | `/api/lifts/{id}` | Single lift or `null` |
//! | `GET` | `/api/lifts/{id}/trail-access` | Trails served by a lift |
//! | `GET` | `/api/trails` | List trails (`?status=OPEN`) |
//! | `GET` | `/api/trails/count` | Count trails (`?status=OPEN`) |
//! | `GET` | `/api/trails/{id}` | Single trail or `null` |
//! | `GET` | `/api/trails/{id}/lift-access` | Lifts serving a trail |
//!
//! [`ResortContext`]: snowtooth_core::ResortContext

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::response::{Html, IntoResponse};
use axum::Json;
use snowtooth_core::parse_status;
use snowtooth_types::Status;

use crate::error::ApiError;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Query parameter structs
// ---------------------------------------------------------------------------

/// Query parameters shared by the list and count endpoints.
#[derive(Debug, Default, serde::Deserialize)]
pub struct StatusQuery {
    /// Optional status filter. Must be exactly `OPEN`, `HOLD`, or `CLOSED`.
    pub status: Option<String>,
}

impl StatusQuery {
    fn filter(&self) -> Result<Option<Status>, ApiError> {
        self.status
            .as_deref()
            .map(parse_status)
            .transpose()
            .map_err(ApiError::from)
    }
}

// ---------------------------------------------------------------------------
// GET / -- minimal HTML status page
// ---------------------------------------------------------------------------

/// Serve a minimal HTML page with per-status counts and API links.
pub async fn index(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let counts = state.resort.status_counts().await;
    let metrics: String = counts
        .iter()
        .map(|(collection, status, count)| {
            format!(
                r#"
        <div class="metric">
            <div class="label">{collection}s {status}</div>
            <div class="value">{count}</div>
        </div>"#
            )
        })
        .collect();

    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>Snowtooth Mountain</title>
    <style>
        body {{
            background: #0d1117;
            color: #c9d1d9;
            font-family: 'Fira Code', 'Consolas', monospace;
            padding: 2rem;
            max-width: 800px;
            margin: 0 auto;
        }}
        h1 {{ color: #58a6ff; margin-bottom: 0.25rem; }}
        .subtitle {{ color: #8b949e; margin-top: 0; }}
        .metric {{
            display: inline-block;
            background: #161b22;
            border: 1px solid #30363d;
            border-radius: 6px;
            padding: 0.75rem 1.25rem;
            margin: 0.5rem 0.5rem 0.5rem 0;
            min-width: 110px;
        }}
        .metric .label {{ color: #8b949e; font-size: 0.85rem; text-transform: capitalize; }}
        .metric .value {{ color: #58a6ff; font-size: 1.5rem; font-weight: bold; }}
        a {{ color: #58a6ff; text-decoration: none; }}
        ul {{ list-style: none; padding: 0; }}
        li {{ padding: 0.3rem 0; }}
    </style>
</head>
<body>
    <h1>Snowtooth Mountain</h1>
    <p class="subtitle">Lift and trail status</p>

    <div>{metrics}
    </div>

    <h2>API</h2>
    <ul>
        <li>GET <a href="/api/lifts">/api/lifts</a> (?status=OPEN|HOLD|CLOSED)</li>
        <li>GET <a href="/api/lifts/count">/api/lifts/count</a></li>
        <li>GET /api/lifts/{{id}} and /api/lifts/{{id}}/trail-access</li>
        <li>PUT /api/lifts/{{id}}/status {{"status": "HOLD"}}</li>
        <li>GET <a href="/api/trails">/api/trails</a> (?status=OPEN|HOLD|CLOSED)</li>
        <li>GET <a href="/api/trails/count">/api/trails/count</a></li>
        <li>GET /api/trails/{{id}} and /api/trails/{{id}}/lift-access</li>
        <li>PUT /api/trails/{{id}}/status {{"status": "CLOSED"}}</li>
    </ul>

    <h2>WebSocket</h2>
    <ul>
        <li><code>ws://host:port/ws/lift-status-change</code></li>
        <li><code>ws://host:port/ws/trail-status-change</code></li>
    </ul>
</body>
</html>"#
    ))
}

// ---------------------------------------------------------------------------
// Lifts
// ---------------------------------------------------------------------------

/// List lifts, optionally filtered by status, in dataset order.
///
/// Responds with `{"count": n, "lifts": [...]}`.
pub async fn list_lifts(
    State(state): State<Arc<AppState>>,
    Query(query): Query<StatusQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let lifts = state.resort.all_lifts(query.filter()?).await;
    Ok(Json(serde_json::json!({
        "count": lifts.len(),
        "lifts": lifts,
    })))
}

/// Count lifts, optionally filtered by status.
pub async fn lift_count(
    State(state): State<Arc<AppState>>,
    Query(query): Query<StatusQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let count = state.resort.lift_count(query.filter()?).await;
    Ok(Json(serde_json::json!({ "count": count })))
}

/// Get a single lift by id. Unknown ids answer `null`.
pub async fn get_lift(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    Json(state.resort.lift(&id).await)
}

/// Resolve the trails a lift serves, skipping dangling ids.
///
/// Unknown lift ids answer `null`.
pub async fn lift_trail_access(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let body = state
        .resort
        .lift_with_trail_access(&id)
        .await
        .map(|(lift, trails)| {
            serde_json::json!({
                "lift": lift.id,
                "count": trails.len(),
                "trails": trails,
            })
        });
    Json(body)
}

// ---------------------------------------------------------------------------
// Trails
// ---------------------------------------------------------------------------

/// List trails, optionally filtered by status, in dataset order.
///
/// Responds with `{"count": n, "trails": [...]}`.
pub async fn list_trails(
    State(state): State<Arc<AppState>>,
    Query(query): Query<StatusQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let trails = state.resort.all_trails(query.filter()?).await;
    Ok(Json(serde_json::json!({
        "count": trails.len(),
        "trails": trails,
    })))
}

/// Count trails, optionally filtered by status.
pub async fn trail_count(
    State(state): State<Arc<AppState>>,
    Query(query): Query<StatusQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let count = state.resort.trail_count(query.filter()?).await;
    Ok(Json(serde_json::json!({ "count": count })))
}

/// Get a single trail by id. Unknown ids answer `null`.
pub async fn get_trail(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    Json(state.resort.trail(&id).await)
}

/// Resolve the lifts serving a trail, skipping dangling ids.
///
/// Unknown trail ids answer `null`.
pub async fn trail_lift_access(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let body = state
        .resort
        .trail_with_lift_access(&id)
        .await
        .map(|(trail, lifts)| {
            serde_json::json!({
                "trail": trail.id,
                "count": lifts.len(),
                "lifts": lifts,
            })
        });
    Json(body)
}
