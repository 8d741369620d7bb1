use crate::domain::{models::{booking::Booking, event::Event}, ports::BookingRepository};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

pub struct SqliteBookingRepo {
    pool: SqlitePool,
}

impl SqliteBookingRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingRepository for SqliteBookingRepo {
    async fn reserve_batch(&self, user_id: &str, event_ids: &[String]) -> Result<Vec<Booking>, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::from_sqlx)?;
        let mut created = Vec::with_capacity(event_ids.len());

        for event_id in event_ids {
            // Capacity must be judged against the freshest committed state,
            // never a row the caller read earlier.
            let event = sqlx::query_as::<_, Event>("SELECT * FROM events WHERE id = ?")
                .bind(event_id)
                .fetch_optional(&mut *tx).await.map_err(AppError::from_sqlx)?
                .ok_or_else(|| AppError::EventNotFound(event_id.clone()))?;

            if event.booked_count >= event.capacity {
                return Err(AppError::EventFull(event.name));
            }

            let booking_id = Booking::booking_id(user_id, event_id);
            let duplicate = sqlx::query("SELECT id FROM bookings WHERE id = ?")
                .bind(&booking_id)
                .fetch_optional(&mut *tx).await.map_err(AppError::from_sqlx)?;
            if duplicate.is_some() {
                return Err(AppError::DuplicateBooking(event.name));
            }

            let booking = Booking::new(user_id, &event);
            let inserted = sqlx::query_as::<_, Booking>(
                "INSERT INTO bookings (id, user_id, event_id, event_name, attended, proof_token, created_at, attendance_time)
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?)
                 RETURNING *"
            )
                .bind(&booking.id).bind(&booking.user_id).bind(&booking.event_id).bind(&booking.event_name)
                .bind(booking.attended).bind(&booking.proof_token).bind(booking.created_at).bind(booking.attendance_time)
                .fetch_one(&mut *tx).await.map_err(AppError::from_sqlx)?;

            // The guard re-checks capacity at write time. Zero rows means a
            // concurrent transaction took the last seat since our read.
            let result = sqlx::query(
                "UPDATE events SET booked_count = booked_count + 1 WHERE id = ? AND booked_count < capacity"
            )
                .bind(event_id)
                .execute(&mut *tx).await.map_err(AppError::from_sqlx)?;
            if result.rows_affected() == 0 {
                return Err(AppError::EventFull(event.name));
            }

            created.push(inserted);
        }

        tx.commit().await.map_err(AppError::from_sqlx)?;
        Ok(created)
    }

    async fn find_by_id(&self, booking_id: &str) -> Result<Option<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = ?").bind(booking_id).fetch_optional(&self.pool).await.map_err(AppError::from_sqlx)
    }
    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE user_id = ? ORDER BY created_at ASC").bind(user_id).fetch_all(&self.pool).await.map_err(AppError::from_sqlx)
    }
    async fn list_by_event(&self, event_id: &str) -> Result<Vec<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE event_id = ? ORDER BY created_at ASC").bind(event_id).fetch_all(&self.pool).await.map_err(AppError::from_sqlx)
    }
    async fn mark_attended(&self, booking_id: &str, at: DateTime<Utc>) -> Result<Option<Booking>, AppError> {
        sqlx::query_as::<_, Booking>(
            "UPDATE bookings SET attended = TRUE, attendance_time = ? WHERE id = ? AND attended = FALSE RETURNING *"
        )
            .bind(at).bind(booking_id)
            .fetch_optional(&self.pool).await.map_err(AppError::from_sqlx)
    }
}
