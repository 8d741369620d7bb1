use std::sync::Arc;
use crate::config::Config;
use crate::domain::ports::{BookingRepository, EventRepository};
use crate::domain::services::attendance::AttendanceService;
use crate::domain::services::reservation::ReservationService;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub event_repo: Arc<dyn EventRepository>,
    pub booking_repo: Arc<dyn BookingRepository>,
    pub reservation_service: Arc<ReservationService>,
    pub attendance_service: Arc<AttendanceService>,
}
