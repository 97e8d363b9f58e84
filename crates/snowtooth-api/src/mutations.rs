//! Status mutation handlers.
//!
//! The only write endpoints. Each one validates the status string,
//! applies it through the [`ResortContext`], and answers with the
//! updated entity. By the time the response is built the change has
//! already been published to every open subscription on the
//! collection's topic.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `PUT` | `/api/lifts/{id}/status` | `setLiftStatus` |
//! | `PUT` | `/api/trails/{id}/status` | `setTrailStatus` |
//!
//! [`ResortContext`]: snowtooth_core::ResortContext

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use snowtooth_core::parse_status;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for both status mutation endpoints.
#[derive(Debug, serde::Deserialize)]
pub struct SetStatusRequest {
    /// The new status: `OPEN`, `HOLD`, or `CLOSED`.
    pub status: String,
}

/// Set a lift's status and return the updated lift.
///
/// Responds `404` for an unknown id and `400` for an invalid status.
pub async fn set_lift_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(body): Json<SetStatusRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let status = parse_status(&body.status)?;
    let lift = state.resort.set_lift_status(&id, status).await?;
    Ok(Json(lift))
}

/// Set a trail's status and return the updated trail.
///
/// Responds `404` for an unknown id and `400` for an invalid status.
pub async fn set_trail_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(body): Json<SetStatusRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let status = parse_status(&body.status)?;
    let trail = state.resort.set_trail_status(&id, status).await?;
    Ok(Json(trail))
}
