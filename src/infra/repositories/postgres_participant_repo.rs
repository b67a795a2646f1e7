use crate::domain::{models::participant::Participant, ports::{ParticipantQuery, ParticipantRepository}};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder, Row};

pub struct PostgresParticipantRepo {
    pool: PgPool,
}

impl PostgresParticipantRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn push_filters<'a>(qb: &mut QueryBuilder<'a, Postgres>, query: &'a ParticipantQuery) {
    qb.push(" WHERE event_id = ").push_bind(&query.event_id);

    if let Some(status) = &query.status {
        qb.push(" AND status = ").push_bind(status);
    }
    if let Some(checked_in) = query.checked_in {
        qb.push(" AND checked_in = ").push_bind(checked_in);
    }
    if let Some(search) = &query.search {
        let pattern = format!("%{}%", search.to_lowercase());
        qb.push(" AND (LOWER(first_name) LIKE ").push_bind(pattern.clone());
        qb.push(" OR LOWER(last_name) LIKE ").push_bind(pattern.clone());
        qb.push(" OR LOWER(email) LIKE ").push_bind(pattern);
        qb.push(")");
    }
}

#[async_trait]
impl ParticipantRepository for PostgresParticipantRepo {
    async fn create(&self, participant: &Participant) -> Result<Participant, AppError> {
        sqlx::query_as::<_, Participant>(
            "INSERT INTO participants (id, event_id, first_name, last_name, email, ticket_number, status, checked_in, check_in_time, check_in_method, registration_date)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             RETURNING *"
        )
            .bind(&participant.id).bind(&participant.event_id).bind(&participant.first_name)
            .bind(&participant.last_name).bind(&participant.email).bind(&participant.ticket_number)
            .bind(&participant.status).bind(participant.checked_in).bind(participant.check_in_time)
            .bind(&participant.check_in_method).bind(participant.registration_date)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Participant>, AppError> {
        sqlx::query_as::<_, Participant>("SELECT * FROM participants WHERE id = $1")
            .bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_ids(&self, ids: &[String]) -> Result<Vec<Participant>, AppError> {
        if ids.is_empty() {
            return Ok(vec![]);
        }
        let mut qb = QueryBuilder::<Postgres>::new("SELECT * FROM participants WHERE id IN (");
        let mut separated = qb.separated(", ");
        for id in ids {
            separated.push_bind(id);
        }
        qb.push(")");
        qb.build_query_as::<Participant>()
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_event_and_email(&self, event_id: &str, email: &str) -> Result<Option<Participant>, AppError> {
        sqlx::query_as::<_, Participant>("SELECT * FROM participants WHERE event_id = $1 AND email = $2")
            .bind(event_id).bind(email)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list(&self, query: &ParticipantQuery) -> Result<Vec<Participant>, AppError> {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT * FROM participants");
        push_filters(&mut qb, query);
        qb.push(" ORDER BY registration_date DESC LIMIT ").push_bind(query.limit);
        qb.push(" OFFSET ").push_bind(query.offset);
        qb.build_query_as::<Participant>()
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn count(&self, query: &ParticipantQuery) -> Result<i64, AppError> {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT COUNT(*) as count FROM participants");
        push_filters(&mut qb, query);
        let row = qb.build().fetch_one(&self.pool).await.map_err(AppError::Database)?;
        Ok(row.get::<i64, _>("count"))
    }

    async fn update(&self, participant: &Participant) -> Result<Participant, AppError> {
        sqlx::query_as::<_, Participant>(
            "UPDATE participants
             SET first_name = $1, last_name = $2, email = $3, status = $4, checked_in = $5, check_in_time = $6, check_in_method = $7
             WHERE id = $8
             RETURNING *"
        )
            .bind(&participant.first_name).bind(&participant.last_name).bind(&participant.email)
            .bind(&participant.status).bind(participant.checked_in).bind(participant.check_in_time)
            .bind(&participant.check_in_method).bind(&participant.id)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM participants WHERE id = $1")
            .bind(id).execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Participant not found".into()));
        }
        Ok(())
    }
}
