use crate::application::error::{AppError, AppResult};
use crate::application::ports::device_session_repository::DeviceSessionRepository;
use crate::application::services::tokens::{TokenService, VerifiedRefresh};

/// Accepts a refresh token only while it is the latest issuance of a live
/// device session owned by the token's subject.
pub struct AuthenticateRefresh<'a, S: DeviceSessionRepository + ?Sized> {
    pub sessions: &'a S,
    pub tokens: &'a TokenService,
}

impl<'a, S: DeviceSessionRepository + ?Sized> AuthenticateRefresh<'a, S> {
    pub async fn execute(&self, token: &str) -> AppResult<VerifiedRefresh> {
        let claims = self
            .tokens
            .verify_refresh(token)
            .ok_or(AppError::Unauthorized)?;
        let session = self
            .sessions
            .find_by_device_id(claims.device_id)
            .await?
            .ok_or(AppError::Unauthorized)?;
        if session.user_id != claims.user_id || session.issued_at != claims.issued_at {
            return Err(AppError::Unauthorized);
        }
        Ok(claims)
    }
}
