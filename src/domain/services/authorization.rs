use crate::domain::models::{event::Event, user::User};
use crate::error::AppError;

/// Participant management is restricted to the event's organizer and admins.
pub fn ensure_event_access(user: &User, event: &Event) -> Result<(), AppError> {
    if user.is_admin() || user.id == event.organizer_id {
        Ok(())
    } else {
        Err(AppError::Forbidden(
            "Not authorized to manage participants for this event".to_string(),
        ))
    }
}
