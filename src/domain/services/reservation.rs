use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use chrono::{Local, Timelike};
use tracing::{info, warn};

use crate::config::Config;
use crate::domain::models::{booking::Booking, event::Event};
use crate::domain::ports::{BookingRepository, EventRepository};
use crate::error::AppError;

/// Per-user booking constraints, wired in from configuration.
#[derive(Debug, Clone)]
pub struct ReservationRules {
    pub max_events_per_day: usize,
    pub restricted_time_start: u32,
    pub restricted_time_end: u32,
    pub restricted_slot_start: i32,
    pub restricted_slot_end: i32,
    pub max_events_during_restriction: usize,
}

impl ReservationRules {
    pub fn from_config(config: &Config) -> Self {
        Self {
            max_events_per_day: config.max_events_per_day,
            restricted_time_start: config.restricted_time_start,
            restricted_time_end: config.restricted_time_end,
            restricted_slot_start: config.restricted_slot_start,
            restricted_slot_end: config.restricted_slot_end,
            max_events_during_restriction: config.max_events_during_restriction,
        }
    }
}

const MAX_TX_ATTEMPTS: u32 = 3;
const RETRY_BACKOFF_MS: u64 = 25;

/// The authoritative path for creating bookings.
///
/// Business rules are checked up front against the caller's existing
/// bookings; the capacity and uniqueness checks are then re-done inside the
/// repository's storage transaction, which is the only code path allowed to
/// touch an event's `booked_count`.
pub struct ReservationService {
    event_repo: Arc<dyn EventRepository>,
    booking_repo: Arc<dyn BookingRepository>,
    rules: ReservationRules,
}

impl ReservationService {
    pub fn new(
        event_repo: Arc<dyn EventRepository>,
        booking_repo: Arc<dyn BookingRepository>,
        rules: ReservationRules,
    ) -> Self {
        Self { event_repo, booking_repo, rules }
    }

    pub async fn reserve(&self, user_id: &str, event_ids: &[String]) -> Result<Vec<Booking>, AppError> {
        if event_ids.is_empty() {
            return Err(AppError::Validation("batch must contain at least one event".to_string()));
        }

        let mut seen = HashSet::new();
        for id in event_ids {
            if !seen.insert(id.as_str()) {
                return Err(AppError::Validation(format!("event {} appears twice in the batch", id)));
            }
        }

        // Advisory read of the batch. The transaction re-reads every event,
        // so a stale row here can only cause an early, friendlier rejection.
        let mut batch = Vec::with_capacity(event_ids.len());
        for id in event_ids {
            let event = self
                .event_repo
                .find_by_id(id)
                .await?
                .ok_or_else(|| AppError::EventNotFound(id.clone()))?;
            batch.push(event);
        }

        let existing = self.booking_repo.list_by_user(user_id).await?;
        let mut held = Vec::with_capacity(existing.len());
        for booking in &existing {
            // A booking whose event was deleted cannot conflict on slot or
            // club, but it still counts toward the daily cap.
            if let Some(event) = self.event_repo.find_by_id(&booking.event_id).await? {
                held.push(event);
            }
        }

        validate_batch(&held, existing.len(), &batch, &self.rules, Local::now().hour())?;

        let mut attempt: u32 = 0;
        loop {
            match self.booking_repo.reserve_batch(user_id, event_ids).await {
                Err(AppError::Contention(detail)) => {
                    attempt += 1;
                    if attempt >= MAX_TX_ATTEMPTS {
                        warn!(user_id, attempts = attempt, "reservation gave up after contention");
                        return Err(AppError::Contention(detail));
                    }
                    warn!(user_id, attempt, "reservation transaction conflicted, retrying");
                    tokio::time::sleep(Duration::from_millis(RETRY_BACKOFF_MS * attempt as u64)).await;
                }
                Ok(bookings) => {
                    info!(user_id, count = bookings.len(), "reservation batch committed");
                    return Ok(bookings);
                }
                Err(other) => return Err(other),
            }
        }
    }
}

/// Application-level batch validation, run before the storage transaction.
///
/// `held` is the set of events behind the user's existing bookings,
/// `existing_count` the raw count of those bookings (which can exceed
/// `held.len()` when an event has since been deleted). `hour_of_day` is the
/// venue-local wall clock hour, injected so the window rule is testable.
pub fn validate_batch(
    held: &[Event],
    existing_count: usize,
    batch: &[Event],
    rules: &ReservationRules,
    hour_of_day: u32,
) -> Result<(), AppError> {
    let mut slots: HashMap<i32, &str> = HashMap::new();
    let mut clubs: HashMap<&str, &str> = HashMap::new();

    for event in held {
        slots.entry(event.slot).or_insert(event.name.as_str());
        clubs.entry(event.club_name.as_str()).or_insert(event.name.as_str());
    }

    for event in batch {
        if let Some(other) = slots.get(&event.slot) {
            return Err(AppError::SlotConflict(format!(
                "{} clashes with {} in slot {}",
                event.name, other, event.slot
            )));
        }
        slots.insert(event.slot, event.name.as_str());

        if let Some(other) = clubs.get(event.club_name.as_str()) {
            return Err(AppError::ClubConflict(format!(
                "{} clashes with {} from {}",
                event.name, other, event.club_name
            )));
        }
        clubs.insert(event.club_name.as_str(), event.name.as_str());
    }

    if existing_count + batch.len() > rules.max_events_per_day {
        return Err(AppError::DailyCapExceeded(format!(
            "at most {} events may be booked per day",
            rules.max_events_per_day
        )));
    }

    if hour_of_day >= rules.restricted_time_start && hour_of_day < rules.restricted_time_end {
        let restricted = batch
            .iter()
            .filter(|e| e.slot >= rules.restricted_slot_start && e.slot <= rules.restricted_slot_end)
            .count();
        if restricted > rules.max_events_during_restriction {
            return Err(AppError::RestrictedWindowExceeded(format!(
                "at most {} event(s) in slots {}-{} may be booked between {}:00 and {}:00",
                rules.max_events_during_restriction,
                rules.restricted_slot_start,
                rules.restricted_slot_end,
                rules.restricted_time_start,
                rules.restricted_time_end
            )));
        }
    }

    Ok(())
}
