use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use crate::domain::models::booking::Booking;
use crate::domain::ports::BookingRepository;
use crate::domain::services::proof;
use crate::error::AppError;

/// Converts a scanned proof into the terminal `attended` state, exactly once.
pub struct AttendanceService {
    booking_repo: Arc<dyn BookingRepository>,
}

impl AttendanceService {
    pub fn new(booking_repo: Arc<dyn BookingRepository>) -> Self {
        Self { booking_repo }
    }

    /// Validates a raw scan against the operator's currently selected event
    /// and marks the booking attended.
    ///
    /// The final write is conditional on `attended` still being false, so two
    /// devices scanning the same paper ticket race to a single winner; the
    /// loser gets `AlreadyAttended`.
    pub async fn redeem(&self, raw_token: &str, expected_event_id: &str) -> Result<Booking, AppError> {
        let claims = proof::parse(raw_token)?;

        let booking = self
            .booking_repo
            .find_by_id(&claims.booking_id)
            .await?
            .ok_or_else(|| AppError::BookingNotFound(claims.booking_id.clone()))?;

        if booking.event_id != expected_event_id {
            return Err(AppError::EventMismatch(format!(
                "proof belongs to event {}, not {}",
                booking.event_id, expected_event_id
            )));
        }

        if booking.attended {
            return Err(AppError::AlreadyAttended(booking.id));
        }

        match self.booking_repo.mark_attended(&booking.id, Utc::now()).await? {
            Some(updated) => {
                info!(booking_id = %updated.id, event_id = %updated.event_id, "attendance marked");
                Ok(updated)
            }
            // Lost the conditional update race to another scanner.
            None => Err(AppError::AlreadyAttended(booking.id)),
        }
    }
}
