use axum::{extract::State, response::IntoResponse, Json};
use std::sync::Arc;

use crate::api::dtos::requests::SelectionCheckRequest;
use crate::api::dtos::responses::SelectionCheckResponse;
use crate::domain::services::selection;
use crate::error::AppError;
use crate::state::AppState;

/// Advisory pre-check for the in-progress selection. Verdicts here are UX
/// only; the reservation engine re-validates against committed state when
/// the batch is actually submitted.
pub async fn check_selection(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<SelectionCheckRequest>,
) -> Result<impl IntoResponse, AppError> {
    let candidate = state.event_repo.find_by_id(&payload.candidate_id).await?
        .ok_or(AppError::EventNotFound(payload.candidate_id))?;

    let mut selected = Vec::with_capacity(payload.selected_ids.len());
    for id in &payload.selected_ids {
        // A selected event that has since been deleted simply drops out of
        // the advisory view.
        if let Some(event) = state.event_repo.find_by_id(id).await? {
            selected.push(event);
        }
    }

    let reason = selection::rejection_reason(&candidate, &selected, state.config.max_events_per_day);

    Ok(Json(SelectionCheckResponse {
        allowed: reason.is_none(),
        reason,
    }))
}
