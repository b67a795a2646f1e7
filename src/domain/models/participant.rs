use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::domain::services::ticket::generate_ticket_number;

pub const PARTICIPANT_STATUS_REGISTERED: &str = "registered";
pub const PARTICIPANT_STATUS_CONFIRMED: &str = "confirmed";
pub const PARTICIPANT_STATUS_ATTENDED: &str = "attended";

pub const DEFAULT_CHECK_IN_METHOD: &str = "manual";

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub id: String,
    pub event_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub ticket_number: String,
    pub status: String, // registered, confirmed, attended, cancelled
    pub checked_in: bool,
    pub check_in_time: Option<DateTime<Utc>>,
    pub check_in_method: String,
    pub registration_date: DateTime<Utc>,
}

pub struct NewParticipantParams {
    pub event_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub requires_approval: bool,
}

impl Participant {
    /// New registrations start pending when the event requires organizer
    /// approval, otherwise they are confirmed immediately.
    pub fn new(params: NewParticipantParams) -> Self {
        let status = if params.requires_approval {
            PARTICIPANT_STATUS_REGISTERED
        } else {
            PARTICIPANT_STATUS_CONFIRMED
        };

        Self {
            id: Uuid::new_v4().to_string(),
            event_id: params.event_id,
            first_name: params.first_name,
            last_name: params.last_name,
            email: params.email,
            ticket_number: generate_ticket_number(),
            status: status.to_string(),
            checked_in: false,
            check_in_time: None,
            check_in_method: DEFAULT_CHECK_IN_METHOD.to_string(),
            registration_date: Utc::now(),
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn mark_checked_in(&mut self, method: String) {
        self.checked_in = true;
        self.check_in_time = Some(Utc::now());
        self.check_in_method = method;
        self.status = PARTICIPANT_STATUS_ATTENDED.to_string();
    }
}
