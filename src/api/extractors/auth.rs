use axum::{
    extract::FromRequestParts,
    http::request::Parts,
};
use crate::domain::models::user::User;
use crate::error::AppError;
use tracing::Span;

/// Identity forwarded by the upstream auth gateway. Token verification
/// happens there; this service only consumes the resolved user.
pub struct AuthUser(pub User);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let id = parts.headers.get("x-user-id")
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .ok_or(AppError::Unauthorized)?
            .to_string();

        let role = parts.headers.get("x-user-role")
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .ok_or(AppError::Unauthorized)?
            .to_string();

        let user = User { id, role };

        Span::current().record("user_id", user.id.as_str());

        Ok(AuthUser(user))
    }
}
