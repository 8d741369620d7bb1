use club_booking_backend::{
    api::router::create_router,
    config::Config,
    domain::models::{booking::Booking, event::Event},
    domain::services::attendance::AttendanceService,
    domain::services::reservation::{ReservationRules, ReservationService},
    infra::repositories::{
        sqlite_booking_repo::SqliteBookingRepo,
        sqlite_event_repo::SqliteEventRepo,
    },
    state::AppState,
};
use axum::{
    body::Body,
    http::{header, Request, Response},
    Router,
};
use serde_json::{json, Value};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;
use uuid::Uuid;

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
}

impl TestApp {
    pub async fn new() -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        sqlx::migrate!("./migrations/sqlite")
            .run(&pool)
            .await
            .expect("Failed to migrate test db");

        // Restricted window start == end keeps the wall-clock-dependent rule
        // out of integration tests; the rule itself is unit tested with an
        // injected hour.
        let config = Config {
            database_url: db_url.clone(),
            port: 0,
            max_events_per_day: 4,
            restricted_time_start: 0,
            restricted_time_end: 0,
            restricted_slot_start: 1,
            restricted_slot_end: 2,
            max_events_during_restriction: 1,
        };

        let event_repo = Arc::new(SqliteEventRepo::new(pool.clone()));
        let booking_repo = Arc::new(SqliteBookingRepo::new(pool.clone()));
        let reservation_service = Arc::new(ReservationService::new(
            event_repo.clone(),
            booking_repo.clone(),
            ReservationRules::from_config(&config),
        ));
        let attendance_service = Arc::new(AttendanceService::new(booking_repo.clone()));

        let state = Arc::new(AppState {
            config,
            event_repo,
            booking_repo,
            reservation_service,
            attendance_service,
        });

        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
        }
    }

    /// Creates an event through the API and returns it.
    #[allow(dead_code)]
    pub async fn seed_event(&self, name: &str, club: &str, slot: i32, capacity: i32) -> Event {
        let payload = json!({
            "name": name,
            "venue": "Main Hall",
            "club_name": club,
            "slot": slot,
            "capacity": capacity
        });

        let response = self.router.clone().oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/events")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap()
        ).await.unwrap();

        assert!(
            response.status().is_success(),
            "seed_event failed: status {}",
            response.status()
        );

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[allow(dead_code)]
    pub async fn reserve<S: AsRef<str>>(&self, user_id: &str, event_ids: &[S]) -> Response<Body> {
        let ids: Vec<&str> = event_ids.iter().map(|id| id.as_ref()).collect();
        let payload = json!({ "event_ids": ids });

        self.router.clone().oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/bookings")
                .header(header::CONTENT_TYPE, "application/json")
                .header("X-User-Id", user_id)
                .body(Body::from(payload.to_string()))
                .unwrap()
        ).await.unwrap()
    }

    /// Reserves a batch and returns the created bookings, panicking on failure.
    #[allow(dead_code)]
    pub async fn reserve_ok<S: AsRef<str>>(&self, user_id: &str, event_ids: &[S]) -> Vec<Booking> {
        let response = self.reserve(user_id, event_ids).await;
        assert!(
            response.status().is_success(),
            "reserve_ok failed: status {}",
            response.status()
        );
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[allow(dead_code)]
    pub async fn get_event(&self, event_id: &str) -> Event {
        let response = self.router.clone().oneshot(
            Request::builder()
                .method("GET")
                .uri(format!("/api/v1/events/{}", event_id))
                .body(Body::empty())
                .unwrap()
        ).await.unwrap();

        assert!(response.status().is_success(), "get_event failed: status {}", response.status());
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[allow(dead_code)]
    pub async fn redeem(&self, token: &str, event_id: &str) -> Response<Body> {
        let payload = json!({ "token": token, "event_id": event_id });

        self.router.clone().oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/attendance/redeem")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap()
        ).await.unwrap()
    }
}

#[allow(dead_code)]
pub async fn parse_body(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
        let _ = std::fs::remove_file(format!("{}-wal", self.db_filename));
        let _ = std::fs::remove_file(format!("{}-shm", self.db_filename));
    }
}
