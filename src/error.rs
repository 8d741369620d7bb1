use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Event not found: {0}")]
    EventNotFound(String),
    #[error("Event is full: {0}")]
    EventFull(String),
    #[error("Already booked: {0}")]
    DuplicateBooking(String),
    #[error("Slot conflict: {0}")]
    SlotConflict(String),
    #[error("Club conflict: {0}")]
    ClubConflict(String),
    #[error("Daily booking cap exceeded: {0}")]
    DailyCapExceeded(String),
    #[error("Restricted window cap exceeded: {0}")]
    RestrictedWindowExceeded(String),
    #[error("Storage contention: {0}")]
    Contention(String),
    #[error("Invalid proof token: {0}")]
    InvalidToken(String),
    #[error("Booking not found: {0}")]
    BookingNotFound(String),
    #[error("Wrong event for this proof: {0}")]
    EventMismatch(String),
    #[error("Attendance already marked: {0}")]
    AlreadyAttended(String),
    #[error("Resource not found: {0}")]
    NotFound(String),
    #[error("Invalid input: {0}")]
    Validation(String),
    #[error("Internal server error")]
    Internal,
}

impl AppError {
    /// Machine-readable error kind, stable across message wording changes.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Database(_) => "DATABASE",
            AppError::EventNotFound(_) => "EVENT_NOT_FOUND",
            AppError::EventFull(_) => "EVENT_FULL",
            AppError::DuplicateBooking(_) => "DUPLICATE_BOOKING",
            AppError::SlotConflict(_) => "SLOT_CONFLICT",
            AppError::ClubConflict(_) => "CLUB_CONFLICT",
            AppError::DailyCapExceeded(_) => "DAILY_CAP_EXCEEDED",
            AppError::RestrictedWindowExceeded(_) => "RESTRICTED_WINDOW_EXCEEDED",
            AppError::Contention(_) => "CONTENTION",
            AppError::InvalidToken(_) => "INVALID_TOKEN",
            AppError::BookingNotFound(_) => "BOOKING_NOT_FOUND",
            AppError::EventMismatch(_) => "EVENT_MISMATCH",
            AppError::AlreadyAttended(_) => "ALREADY_ATTENDED",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Validation(_) => "VALIDATION",
            AppError::Internal => "INTERNAL",
        }
    }

    /// Classifies raw driver errors into the domain taxonomy.
    ///
    /// Duplicate-key violations collapse to `DuplicateBooking` since the
    /// deterministic booking id is the only key user requests can collide on.
    /// Busy/serialization failures become `Contention` so the reservation
    /// engine can retry them; everything else stays an opaque `Database` error.
    pub fn from_sqlx(e: sqlx::Error) -> Self {
        match &e {
            sqlx::Error::Database(db_err) => {
                let code = db_err.code().unwrap_or_default();

                // 1555 / 2067 = SQLite PK / unique constraint
                // 23505 = PostgreSQL unique violation
                if code == "1555" || code == "2067" || code == "23505" {
                    return AppError::DuplicateBooking(db_err.message().to_string());
                }

                // 5 / 6 / 261 / 517 = SQLite busy & locked family
                // 40001 / 40P01 = PostgreSQL serialization failure / deadlock
                if code == "5"
                    || code == "6"
                    || code == "261"
                    || code == "517"
                    || code == "40001"
                    || code == "40P01"
                {
                    return AppError::Contention(db_err.message().to_string());
                }

                AppError::Database(e)
            }
            sqlx::Error::PoolTimedOut => {
                AppError::Contention("connection pool exhausted".to_string())
            }
            _ => AppError::Database(e),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Database(e) => {
                error!("Database error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
            AppError::EventNotFound(msg) => (StatusCode::NOT_FOUND, format!("Event not found: {}", msg)),
            AppError::EventFull(msg) => (StatusCode::CONFLICT, format!("Event is full: {}", msg)),
            AppError::DuplicateBooking(msg) => (StatusCode::CONFLICT, format!("Already booked: {}", msg)),
            AppError::SlotConflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            AppError::ClubConflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            AppError::DailyCapExceeded(msg) => (StatusCode::CONFLICT, msg.clone()),
            AppError::RestrictedWindowExceeded(msg) => (StatusCode::CONFLICT, msg.clone()),
            AppError::Contention(msg) => {
                error!("Transaction contention not resolved by retries: {}", msg);
                (StatusCode::SERVICE_UNAVAILABLE, "Storage busy, please retry".to_string())
            }
            AppError::InvalidToken(msg) => (StatusCode::BAD_REQUEST, format!("Invalid proof token: {}", msg)),
            AppError::BookingNotFound(msg) => (StatusCode::NOT_FOUND, format!("Booking not found: {}", msg)),
            AppError::EventMismatch(msg) => (StatusCode::CONFLICT, msg.clone()),
            AppError::AlreadyAttended(msg) => (StatusCode::CONFLICT, format!("Attendance already marked: {}", msg)),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Internal => (StatusCode::INTERNAL_SERVER_ERROR, "Internal error".to_string()),
        };

        let body = Json(json!({
            "error": message,
            "kind": self.kind(),
        }));

        (status, body).into_response()
    }
}
