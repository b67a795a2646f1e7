use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};

use crate::api::dtos::requests::{
    BulkCheckInRequest, CheckInRequest, ListParticipantsQuery, RegisterParticipantRequest,
    UpdateParticipantRequest,
};
use crate::api::dtos::responses::{
    BulkCheckInResponse, CheckInResponse, EventSummary, ParticipantDetailResponse,
    ParticipantListResponse, ParticipantResponse, ParticipantWithEvent, RegistrationResponse,
};
use crate::api::extractors::auth::AuthUser;
use crate::domain::models::job::Job;
use crate::domain::models::participant::{NewParticipantParams, Participant, DEFAULT_CHECK_IN_METHOD};
use crate::domain::ports::{EventCounter, ParticipantQuery};
use crate::domain::services::authorization::ensure_event_access;
use crate::domain::services::notification::build_confirmation_email;
use crate::error::AppError;
use crate::state::AppState;

const DEFAULT_PAGE_SIZE: i64 = 50;

/// Public sign-up. Preconditions are checked in order so each failure mode
/// keeps its own message: missing event, not published, full, duplicate.
pub async fn register_participant(
    State(state): State<Arc<AppState>>,
    Path(event_id): Path<String>,
    Json(payload): Json<RegisterParticipantRequest>,
) -> Result<impl IntoResponse, AppError> {
    let event = state.event_repo.find_by_id(&event_id).await?
        .ok_or(AppError::NotFound("Event not found".into()))?;

    if !event.is_open_for_registration() {
        return Err(AppError::InvalidState("Event is not open for registration".into()));
    }

    // The capacity read and the later increment are separate statements;
    // two in-flight registrations can both pass this check. Known source
    // behavior, kept as-is.
    if event.is_full() {
        return Err(AppError::CapacityExceeded);
    }

    if state.participant_repo
        .find_by_event_and_email(&event.id, &payload.email)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict("Participant already registered for this event".into()));
    }

    let participant = Participant::new(NewParticipantParams {
        event_id: event.id.clone(),
        first_name: payload.first_name,
        last_name: payload.last_name,
        email: payload.email,
        requires_approval: event.requires_approval,
    });

    let created = state.participant_repo.create(&participant).await?;
    state.event_repo.increment(&event.id, EventCounter::Registrations, 1).await?;

    // Fire-and-forget: a failed enqueue must never undo the registration.
    match build_confirmation_email(&state.templates, &created, &event) {
        Ok(email) => {
            if let Err(e) = state.job_repo.create(&Job::email(email, Utc::now())).await {
                warn!("Failed to enqueue confirmation email for {}: {:?}", created.id, e);
            }
        }
        Err(e) => warn!("Failed to render confirmation email for {}: {:?}", created.id, e),
    }

    info!("Registered participant {} for event {} (ticket {})", created.id, event.id, created.ticket_number);

    Ok((
        StatusCode::CREATED,
        Json(RegistrationResponse {
            participant: created,
            message: "Registration successful".to_string(),
        }),
    ))
}

pub async fn list_participants(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(event_id): Path<String>,
    Query(params): Query<ListParticipantsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let event = state.event_repo.find_by_id(&event_id).await?
        .ok_or(AppError::NotFound("Event not found".into()))?;

    ensure_event_access(&user, &event)?;

    let page = params.page.unwrap_or(1).max(1);
    let limit = params.limit.unwrap_or(DEFAULT_PAGE_SIZE).max(1);

    let query = ParticipantQuery {
        event_id: event.id.clone(),
        status: params.status,
        checked_in: params.checked_in,
        search: params.search,
        limit,
        offset: (page - 1) * limit,
    };

    let participants = state.participant_repo.list(&query).await?;
    let total = state.participant_repo.count(&query).await?;

    Ok(Json(ParticipantListResponse {
        participants,
        total,
        page,
        total_pages: (total + limit - 1) / limit,
    }))
}

pub async fn get_participant(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let participant = state.participant_repo.find_by_id(&id).await?
        .ok_or(AppError::NotFound("Participant not found".into()))?;

    let event = state.event_repo.find_by_id(&participant.event_id).await?
        .ok_or(AppError::Internal)?;

    ensure_event_access(&user, &event)?;

    Ok(Json(ParticipantDetailResponse {
        participant: ParticipantWithEvent {
            participant,
            event: EventSummary::from(&event),
        },
    }))
}

pub async fn update_participant(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
    Json(payload): Json<UpdateParticipantRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut participant = state.participant_repo.find_by_id(&id).await?
        .ok_or(AppError::NotFound("Participant not found".into()))?;

    let event = state.event_repo.find_by_id(&participant.event_id).await?
        .ok_or(AppError::Internal)?;

    ensure_event_access(&user, &event)?;

    if let Some(first_name) = payload.first_name { participant.first_name = first_name; }
    if let Some(last_name) = payload.last_name { participant.last_name = last_name; }
    if let Some(email) = payload.email { participant.email = email; }
    if let Some(status) = payload.status { participant.status = status; }

    let updated = state.participant_repo.update(&participant).await?;
    info!("Updated participant: {}", updated.id);
    Ok(Json(ParticipantResponse { participant: updated }))
}

pub async fn delete_participant(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let participant = state.participant_repo.find_by_id(&id).await?
        .ok_or(AppError::NotFound("Participant not found".into()))?;

    let event = state.event_repo.find_by_id(&participant.event_id).await?
        .ok_or(AppError::Internal)?;

    ensure_event_access(&user, &event)?;

    state.participant_repo.delete(&participant.id).await?;
    state.event_repo.decrement(&event.id, EventCounter::Registrations, 1).await?;

    info!("Deleted participant {} from event {}", participant.id, event.id);
    Ok(Json(serde_json::json!({ "message": "Participant removed" })))
}

pub async fn check_in_participant(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
    Json(payload): Json<CheckInRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut participant = state.participant_repo.find_by_id(&id).await?
        .ok_or(AppError::NotFound("Participant not found".into()))?;

    let event = state.event_repo.find_by_id(&participant.event_id).await?
        .ok_or(AppError::Internal)?;

    ensure_event_access(&user, &event)?;

    if participant.checked_in {
        return Err(AppError::Conflict("Participant already checked in".into()));
    }

    let method = payload.check_in_method
        .unwrap_or_else(|| DEFAULT_CHECK_IN_METHOD.to_string());
    participant.mark_checked_in(method);

    let updated = state.participant_repo.update(&participant).await?;
    state.event_repo.increment(&event.id, EventCounter::Attendees, 1).await?;

    info!("Checked in participant {} for event {}", updated.id, event.id);

    Ok(Json(CheckInResponse {
        participant: updated,
        message: "Check-in successful".to_string(),
    }))
}

/// Batch check-in. All ids are assumed to belong to the same event, so
/// authorization is resolved from the first fetched participant only.
/// Already-checked-in participants are skipped without error.
pub async fn bulk_check_in(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    payload: Result<Json<BulkCheckInRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    // A malformed body (e.g. participantIds not an array) is a 400, not a 422.
    let Json(payload) = payload.map_err(|rejection| AppError::Validation(rejection.body_text()))?;

    if payload.participant_ids.is_empty() {
        return Err(AppError::Validation("participantIds must be a non-empty array".into()));
    }

    let participants = state.participant_repo.find_by_ids(&payload.participant_ids).await?;
    if participants.is_empty() {
        return Err(AppError::NotFound("No participants found".into()));
    }

    let event = state.event_repo.find_by_id(&participants[0].event_id).await?
        .ok_or(AppError::Internal)?;

    ensure_event_access(&user, &event)?;

    let method = payload.check_in_method
        .unwrap_or_else(|| DEFAULT_CHECK_IN_METHOD.to_string());

    let mut updated = Vec::new();
    for mut participant in participants {
        if participant.checked_in {
            continue;
        }
        participant.mark_checked_in(method.clone());
        updated.push(state.participant_repo.update(&participant).await?);
    }

    // One batched counter move instead of one per record.
    if !updated.is_empty() {
        state.event_repo
            .increment(&event.id, EventCounter::Attendees, updated.len() as i64)
            .await?;
    }

    info!("Bulk check-in: {} participants updated for event {}", updated.len(), event.id);

    Ok(Json(BulkCheckInResponse {
        message: format!("{} participants checked in", updated.len()),
        updated,
    }))
}
