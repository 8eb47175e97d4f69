use chrono::Utc;

use crate::application::dto::accounts::TokenPair;
use crate::application::error::{AppError, AppResult};
use crate::application::ports::device_session_repository::DeviceSessionRepository;
use crate::application::services::tokens::{TokenService, VerifiedRefresh};

pub struct RefreshSession<'a, S: DeviceSessionRepository + ?Sized> {
    pub sessions: &'a S,
    pub tokens: &'a TokenService,
}

impl<'a, S: DeviceSessionRepository + ?Sized> RefreshSession<'a, S> {
    /// Rotates the pair for the current device. The new `iat` is strictly
    /// greater than the old one so the previous refresh token stops matching
    /// even when both are issued within the same second.
    pub async fn execute(&self, current: &VerifiedRefresh) -> AppResult<TokenPair> {
        let issued_at = Utc::now().timestamp().max(current.issued_at + 1);
        let pair = self
            .tokens
            .issue_pair(current.user_id, current.device_id, issued_at)?;
        let updated = self
            .sessions
            .update_issuance(
                current.device_id,
                current.issued_at,
                issued_at,
                pair.refresh_expires_at,
            )
            .await?;
        if !updated {
            return Err(AppError::Unauthorized);
        }
        Ok(pair)
    }
}
