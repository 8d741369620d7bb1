use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// A club activity occupying one of the numbered time slots of the day.
///
/// `booked_count` is the only contended mutable field. It is incremented
/// exclusively inside the booking repository's reservation transaction and
/// never decremented (there is no cancellation flow).
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Event {
    pub id: String,
    pub name: String,
    pub venue: String,
    pub club_name: String,
    pub slot: i32,
    pub capacity: i32,
    pub booked_count: i32,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

pub struct NewEventParams {
    pub name: String,
    pub venue: String,
    pub club_name: String,
    pub slot: i32,
    pub capacity: i32,
    pub description: Option<String>,
}

impl Event {
    pub const MIN_SLOT: i32 = 1;
    pub const MAX_SLOT: i32 = 4;

    pub fn new(params: NewEventParams) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: params.name,
            venue: params.venue,
            club_name: params.club_name,
            slot: params.slot,
            capacity: params.capacity,
            booked_count: 0,
            description: params.description,
            created_at: Utc::now(),
        }
    }

    pub fn is_full(&self) -> bool {
        self.booked_count >= self.capacity
    }
}
