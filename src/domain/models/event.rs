use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

pub const EVENT_STATUS_DRAFT: &str = "draft";
pub const EVENT_STATUS_PUBLISHED: &str = "published";
pub const EVENT_STATUS_CLOSED: &str = "closed";

/// An event open for registration. The registration/attendee counters are
/// only ever moved through the repository's atomic increment/decrement;
/// everything else is owned by the upstream event service.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub name: String,
    pub date: DateTime<Utc>,
    pub venue: String,
    pub status: String, // draft, published, closed
    pub capacity: Option<i32>,
    pub total_registrations: i32,
    pub total_attendees: i32,
    pub organizer_id: String,
    pub requires_approval: bool,
    pub created_at: DateTime<Utc>,
}

pub struct NewEventParams {
    pub name: String,
    pub date: DateTime<Utc>,
    pub venue: String,
    pub status: String,
    pub capacity: Option<i32>,
    pub organizer_id: String,
    pub requires_approval: bool,
}

impl Event {
    pub fn new(params: NewEventParams) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: params.name,
            date: params.date,
            venue: params.venue,
            status: params.status,
            capacity: params.capacity,
            total_registrations: 0,
            total_attendees: 0,
            organizer_id: params.organizer_id,
            requires_approval: params.requires_approval,
            created_at: Utc::now(),
        }
    }

    pub fn is_open_for_registration(&self) -> bool {
        self.status == EVENT_STATUS_PUBLISHED
    }

    pub fn is_full(&self) -> bool {
        match self.capacity {
            Some(cap) => self.total_registrations >= cap,
            None => false,
        }
    }
}
