use serde::Serialize;
use chrono::{DateTime, Utc};

use crate::domain::models::{event::Event, participant::Participant};

#[derive(Serialize)]
pub struct RegistrationResponse {
    pub participant: Participant,
    pub message: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantListResponse {
    pub participants: Vec<Participant>,
    pub total: i64,
    pub page: i64,
    pub total_pages: i64,
}

/// Restricted projection of the owning event, attached to detail responses.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSummary {
    pub id: String,
    pub name: String,
    pub date: DateTime<Utc>,
    pub venue: String,
}

impl From<&Event> for EventSummary {
    fn from(event: &Event) -> Self {
        Self {
            id: event.id.clone(),
            name: event.name.clone(),
            date: event.date,
            venue: event.venue.clone(),
        }
    }
}

#[derive(Serialize)]
pub struct ParticipantWithEvent {
    #[serde(flatten)]
    pub participant: Participant,
    pub event: EventSummary,
}

#[derive(Serialize)]
pub struct ParticipantDetailResponse {
    pub participant: ParticipantWithEvent,
}

#[derive(Serialize)]
pub struct ParticipantResponse {
    pub participant: Participant,
}

#[derive(Serialize)]
pub struct CheckInResponse {
    pub participant: Participant,
    pub message: String,
}

#[derive(Serialize)]
pub struct BulkCheckInResponse {
    pub message: String,
    pub updated: Vec<Participant>,
}
