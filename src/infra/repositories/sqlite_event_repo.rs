use crate::domain::{models::event::Event, ports::{EventCounter, EventRepository}};
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
            "INSERT INTO events (id, name, date, venue, status, capacity, total_registrations, total_attendees, organizer_id, requires_approval, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *"
        )
            .bind(&event.id).bind(&event.name).bind(event.date).bind(&event.venue)
            .bind(&event.status).bind(event.capacity).bind(event.total_registrations)
            .bind(event.total_attendees).bind(&event.organizer_id)
            .bind(event.requires_approval).bind(event.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Event>, AppError> {
        sqlx::query_as::<_, Event>("SELECT * FROM events WHERE id = ?")
            .bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    // Single-statement increment; concurrent registrations never lose updates.
    async fn increment(&self, id: &str, counter: EventCounter, by: i64) -> Result<(), AppError> {
        let col = counter.column();
        let sql = format!("UPDATE events SET {col} = {col} + ? WHERE id = ?");
        let result = sqlx::query(&sql).bind(by).bind(id)
            .execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Event not found".into()));
        }
        Ok(())
    }

    async fn decrement(&self, id: &str, counter: EventCounter, by: i64) -> Result<(), AppError> {
        let col = counter.column();
        let sql = format!("UPDATE events SET {col} = {col} - ? WHERE id = ?");
        let result = sqlx::query(&sql).bind(by).bind(id)
            .execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Event not found".into()));
        }
        Ok(())
    }
}
