use crate::domain::models::{booking::Booking, event::Event};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn create(&self, event: &Event) -> Result<Event, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Event>, AppError>;
    async fn list(&self) -> Result<Vec<Event>, AppError>;
    async fn list_by_club(&self, club_name: &str) -> Result<Vec<Event>, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

/// The booking store. `reserve_batch` and `mark_attended` are the only
/// operations in the system that write `booked_count` and `attended`
/// respectively; both run their read-check-write inside storage-level
/// atomicity so concurrent callers cannot interleave.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Books every event in the batch for the user inside one transaction,
    /// or none of them. Re-reads each event's capacity at commit time.
    async fn reserve_batch(&self, user_id: &str, event_ids: &[String]) -> Result<Vec<Booking>, AppError>;
    async fn find_by_id(&self, booking_id: &str) -> Result<Option<Booking>, AppError>;
    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Booking>, AppError>;
    async fn list_by_event(&self, event_id: &str) -> Result<Vec<Booking>, AppError>;
    /// Flips `attended` to true, conditional on it still being false.
    /// Returns `None` when the condition failed, i.e. the caller lost the
    /// redemption race.
    async fn mark_attended(&self, booking_id: &str, at: DateTime<Utc>) -> Result<Option<Booking>, AppError>;
}
