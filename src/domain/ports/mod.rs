use crate::domain::models::{event::Event, job::Job, participant::Participant};
use crate::error::AppError;
use async_trait::async_trait;

/// Counter columns on the event row. Moved only through single-statement
/// SQL increments so concurrent registrations never lose updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventCounter {
    Registrations,
    Attendees,
}

impl EventCounter {
    pub fn column(&self) -> &'static str {
        match self {
            EventCounter::Registrations => "total_registrations",
            EventCounter::Attendees => "total_attendees",
        }
    }
}

/// Filter and pagination arguments for the participant listing.
#[derive(Debug, Clone, Default)]
pub struct ParticipantQuery {
    pub event_id: String,
    pub status: Option<String>,
    pub checked_in: Option<bool>,
    pub search: Option<String>,
    pub limit: i64,
    pub offset: i64,
}

#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn create(&self, event: &Event) -> Result<Event, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Event>, AppError>;
    async fn increment(&self, id: &str, counter: EventCounter, by: i64) -> Result<(), AppError>;
    async fn decrement(&self, id: &str, counter: EventCounter, by: i64) -> Result<(), AppError>;
}

#[async_trait]
pub trait ParticipantRepository: Send + Sync {
    async fn create(&self, participant: &Participant) -> Result<Participant, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Participant>, AppError>;
    async fn find_by_ids(&self, ids: &[String]) -> Result<Vec<Participant>, AppError>;
    async fn find_by_event_and_email(&self, event_id: &str, email: &str) -> Result<Option<Participant>, AppError>;
    async fn list(&self, query: &ParticipantQuery) -> Result<Vec<Participant>, AppError>;
    async fn count(&self, query: &ParticipantQuery) -> Result<i64, AppError>;
    async fn update(&self, participant: &Participant) -> Result<Participant, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait JobRepository: Send + Sync {
    async fn create(&self, job: &Job) -> Result<Job, AppError>;
    async fn find_pending(&self, limit: i32) -> Result<Vec<Job>, AppError>;
    async fn update_status(&self, id: &str, status: &str, error_message: Option<String>) -> Result<(), AppError>;
}

#[async_trait]
pub trait EmailService: Send + Sync {
    async fn send(&self, recipient: &str, subject: &str, html_body: &str) -> Result<(), AppError>;
}
