use axum::{extract::State, response::IntoResponse, Json};
use std::sync::Arc;
use tracing::info;

use crate::api::dtos::requests::ReserveRequest;
use crate::api::extractors::user::UserId;
use crate::error::AppError;
use crate::state::AppState;

pub async fn create_bookings(
    State(state): State<Arc<AppState>>,
    UserId(user_id): UserId,
    Json(payload): Json<ReserveRequest>,
) -> Result<impl IntoResponse, AppError> {
    info!(%user_id, batch_size = payload.event_ids.len(), "reservation requested");

    let bookings = state
        .reservation_service
        .reserve(&user_id, &payload.event_ids)
        .await?;

    Ok(Json(bookings))
}

pub async fn list_my_bookings(
    State(state): State<Arc<AppState>>,
    UserId(user_id): UserId,
) -> Result<impl IntoResponse, AppError> {
    let bookings = state.booking_repo.list_by_user(&user_id).await?;
    Ok(Json(bookings))
}
