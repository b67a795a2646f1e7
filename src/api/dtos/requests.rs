use serde::Deserialize;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterParticipantRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// Partial update over an explicit allow-list. Ticket number and check-in
/// fields are never writable here; check-in goes through its own endpoint.
/// Unknown body fields are ignored.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateParticipantRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub status: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInRequest {
    pub check_in_method: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkCheckInRequest {
    pub participant_ids: Vec<String>,
    pub check_in_method: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParticipantsQuery {
    pub status: Option<String>,
    pub checked_in: Option<bool>,
    pub search: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}
