use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::domain::models::event::Event;
use crate::domain::services::proof;

/// A confirmed seat at an event.
///
/// The id is derived from `(user_id, event_id)`, so a repeated booking
/// attempt collides on identity instead of needing a uniqueness query.
/// `attended`/`attendance_time` are written once, by the attendance
/// redeemer's conditional update.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Booking {
    pub id: String,
    pub user_id: String,
    pub event_id: String,
    pub event_name: String,
    pub attended: bool,
    pub proof_token: String,
    pub created_at: DateTime<Utc>,
    pub attendance_time: Option<DateTime<Utc>>,
}

impl Booking {
    pub fn booking_id(user_id: &str, event_id: &str) -> String {
        format!("{}_{}", user_id, event_id)
    }

    pub fn new(user_id: &str, event: &Event) -> Self {
        let created_at = Utc::now();
        let id = Self::booking_id(user_id, &event.id);
        let proof_token = proof::issue(&id, user_id, &event.id, created_at);

        Self {
            id,
            user_id: user_id.to_string(),
            event_id: event.id.clone(),
            event_name: event.name.clone(),
            attended: false,
            proof_token,
            created_at,
            attendance_time: None,
        }
    }
}
