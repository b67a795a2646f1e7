use tera::Tera;
use tracing::error;

use crate::domain::models::{event::Event, job::EmailJobPayload, participant::Participant};
use crate::error::AppError;

/// Renders the registration confirmation email from the bundled template.
/// Produces the full payload the dispatcher hands to the job queue.
pub fn build_confirmation_email(
    templates: &Tera,
    participant: &Participant,
    event: &Event,
) -> Result<EmailJobPayload, AppError> {
    let mut context = tera::Context::new();
    context.insert("participant_name", &participant.full_name());
    context.insert("event_name", &event.name);
    context.insert("event_date", &event.date.format("%Y-%m-%d %H:%M").to_string());
    context.insert("venue", &event.venue);
    context.insert("ticket_number", &participant.ticket_number);

    let html = templates.render("confirmation.html", &context).map_err(|e| {
        error!("Template render error: {:?}", e);
        AppError::InternalWithMsg(format!("Template render error: {:?}", e))
    })?;

    Ok(EmailJobPayload {
        to: participant.email.clone(),
        subject: format!("Registration Confirmed: {}", event.name),
        html,
    })
}
