use axum::{extract::{Path, State}, response::IntoResponse, Json};
use std::sync::Arc;
use tracing::info;

use crate::api::dtos::requests::RedeemRequest;
use crate::error::AppError;
use crate::state::AppState;

pub async fn redeem(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RedeemRequest>,
) -> Result<impl IntoResponse, AppError> {
    info!(event_id = %payload.event_id, "redeeming scanned proof");

    let booking = state
        .attendance_service
        .redeem(&payload.token, &payload.event_id)
        .await?;

    Ok(Json(booking))
}

/// Roster of bookings for an event, for the attendance-taking operator.
pub async fn list_attendance(
    State(state): State<Arc<AppState>>,
    Path(event_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let event = state.event_repo.find_by_id(&event_id).await?
        .ok_or(AppError::EventNotFound(event_id))?;

    let bookings = state.booking_repo.list_by_event(&event.id).await?;
    Ok(Json(bookings))
}
