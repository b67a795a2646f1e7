use serde::{Deserialize, Serialize};

/// Identity attached to the request by the upstream auth gateway. Never
/// persisted by this service.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct User {
    pub id: String,
    pub role: String,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == "admin"
    }
}
