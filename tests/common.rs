use registration_backend::{
    api::router::create_router,
    state::AppState,
    config::Config,
    infra::repositories::{
        sqlite_event_repo::SqliteEventRepo,
        sqlite_job_repo::SqliteJobRepo,
        sqlite_participant_repo::SqliteParticipantRepo,
    },
    domain::models::event::{Event, NewEventParams},
    domain::ports::EmailService,
    background::start_background_worker,
    error::AppError,
};
use sqlx::{sqlite::{SqliteConnectOptions, SqlitePoolOptions}, Pool, Sqlite};
use std::str::FromStr;
use std::sync::Arc;
use async_trait::async_trait;
use axum::Router;
use chrono::{Duration, Utc};
use tera::Tera;
use uuid::Uuid;

pub const ORGANIZER_ID: &str = "org-1";

pub struct MockEmailService;

#[async_trait]
impl EmailService for MockEmailService {
    async fn send(&self, _recipient: &str, _subject: &str, _html_body: &str) -> Result<(), AppError> {
        Ok(())
    }
}

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
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        sqlx::migrate!("./migrations/sqlite")
            .run(&pool)
            .await
            .expect("Failed to migrate test db");

        let mut tera = Tera::default();
        tera.add_raw_template(
            "confirmation.html",
            "<html>Ticket {{ ticket_number }} for {{ participant_name }} at {{ event_name }}</html>",
        ).unwrap();
        let templates = Arc::new(tera);

        let config = Config {
            database_url: db_url.clone(),
            port: 0,
            mail_service_url: "http://localhost".to_string(),
            mail_service_token: "token".to_string(),
        };

        let state = Arc::new(AppState {
            config: config.clone(),
            event_repo: Arc::new(SqliteEventRepo::new(pool.clone())),
            participant_repo: Arc::new(SqliteParticipantRepo::new(pool.clone())),
            job_repo: Arc::new(SqliteJobRepo::new(pool.clone())),
            email_service: Arc::new(MockEmailService),
            templates,
        });

        // Start Background Worker
        let worker_state = state.clone();
        tokio::spawn(async move {
            start_background_worker(worker_state).await;
        });

        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
        }
    }

    pub async fn seed_event(&self, status: &str, capacity: Option<i32>, requires_approval: bool) -> Event {
        let event = Event::new(NewEventParams {
            name: "Rust Meetup".to_string(),
            date: Utc::now() + Duration::days(7),
            venue: "Hall A".to_string(),
            status: status.to_string(),
            capacity,
            organizer_id: ORGANIZER_ID.to_string(),
            requires_approval,
        });

        self.state.event_repo.create(&event).await.expect("Failed to seed event")
    }

    pub async fn event_counters(&self, event_id: &str) -> (i32, i32) {
        let event = self.state.event_repo.find_by_id(event_id).await.unwrap().unwrap();
        (event.total_registrations, event.total_attendees)
    }

    pub async fn job_count(&self) -> i64 {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM jobs")
            .fetch_one(&self.pool)
            .await
            .unwrap()
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
    }
}
