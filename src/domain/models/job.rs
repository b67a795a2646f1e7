use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

/// A fully rendered email waiting for asynchronous delivery.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct EmailJobPayload {
    pub to: String,
    pub subject: String,
    pub html: String,
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Job {
    pub id: String,
    pub job_type: String, // "EMAIL"
    pub payload: Json<EmailJobPayload>,
    pub execute_at: DateTime<Utc>,
    pub status: String, // PENDING, COMPLETED, FAILED
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Job {
    pub fn email(payload: EmailJobPayload, execute_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            job_type: "EMAIL".to_string(),
            payload: Json(payload),
            execute_at,
            status: "PENDING".to_string(),
            error_message: None,
            created_at: Utc::now(),
        }
    }
}
