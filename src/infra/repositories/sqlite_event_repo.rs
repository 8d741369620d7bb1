use crate::domain::{models::event::Event, ports::EventRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteEventRepo {
    pool: SqlitePool,
}

impl SqliteEventRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventRepository for SqliteEventRepo {
    async fn create(&self, event: &Event) -> Result<Event, AppError> {
        sqlx::query_as::<_, Event>(
            "INSERT INTO events (id, name, venue, club_name, slot, capacity, booked_count, description, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *"
        )
            .bind(&event.id).bind(&event.name).bind(&event.venue).bind(&event.club_name)
            .bind(event.slot).bind(event.capacity).bind(event.booked_count)
            .bind(&event.description).bind(event.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::from_sqlx)
    }
    async fn find_by_id(&self, id: &str) -> Result<Option<Event>, AppError> {
        sqlx::query_as::<_, Event>("SELECT * FROM events WHERE id = ?").bind(id).fetch_optional(&self.pool).await.map_err(AppError::from_sqlx)
    }
    async fn list(&self) -> Result<Vec<Event>, AppError> {
        sqlx::query_as::<_, Event>("SELECT * FROM events ORDER BY slot ASC, name ASC").fetch_all(&self.pool).await.map_err(AppError::from_sqlx)
    }
    async fn list_by_club(&self, club_name: &str) -> Result<Vec<Event>, AppError> {
        sqlx::query_as::<_, Event>("SELECT * FROM events WHERE club_name = ? ORDER BY slot ASC, name ASC").bind(club_name).fetch_all(&self.pool).await.map_err(AppError::from_sqlx)
    }
    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM events WHERE id = ?").bind(id).execute(&self.pool).await.map_err(AppError::from_sqlx)?;
        if result.rows_affected() == 0 { return Err(AppError::EventNotFound(id.to_string())); }
        Ok(())
    }
}
