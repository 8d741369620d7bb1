use axum::{extract::{Path, Query, State}, response::IntoResponse, Json};
use std::sync::Arc;
use tracing::info;

use crate::api::dtos::requests::{CreateEventRequest, ListEventsQuery};
use crate::domain::models::event::{Event, NewEventParams};
use crate::error::AppError;
use crate::state::AppState;

pub async fn create_event(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateEventRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.slot < Event::MIN_SLOT || payload.slot > Event::MAX_SLOT {
        return Err(AppError::Validation(format!(
            "slot must be between {} and {}",
            Event::MIN_SLOT,
            Event::MAX_SLOT
        )));
    }
    if payload.capacity < 1 {
        return Err(AppError::Validation("capacity must be at least 1".to_string()));
    }
    if payload.name.trim().is_empty() || payload.club_name.trim().is_empty() {
        return Err(AppError::Validation("name and club_name must not be empty".to_string()));
    }

    let event = Event::new(NewEventParams {
        name: payload.name,
        venue: payload.venue,
        club_name: payload.club_name,
        slot: payload.slot,
        capacity: payload.capacity,
        description: payload.description,
    });

    let created = state.event_repo.create(&event).await?;
    info!(event_id = %created.id, club = %created.club_name, "event created");
    Ok(Json(created))
}

pub async fn list_events(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListEventsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let events = match query.club {
        Some(club) => state.event_repo.list_by_club(&club).await?,
        None => state.event_repo.list().await?,
    };
    Ok(Json(events))
}

pub async fn get_event(
    State(state): State<Arc<AppState>>,
    Path(event_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let event = state.event_repo.find_by_id(&event_id).await?
        .ok_or(AppError::EventNotFound(event_id))?;
    Ok(Json(event))
}

pub async fn delete_event(
    State(state): State<Arc<AppState>>,
    Path(event_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.event_repo.delete(&event_id).await?;
    info!(%event_id, "event deleted");
    Ok(Json(serde_json::json!({ "status": "deleted" })))
}
