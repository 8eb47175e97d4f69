use crate::application::error::{AppError, AppResult};
use crate::application::ports::device_session_repository::DeviceSessionRepository;
use crate::application::services::tokens::VerifiedRefresh;

pub struct Logout<'a, S: DeviceSessionRepository + ?Sized> {
    pub sessions: &'a S,
}

impl<'a, S: DeviceSessionRepository + ?Sized> Logout<'a, S> {
    pub async fn execute(&self, current: &VerifiedRefresh) -> AppResult<()> {
        if !self.sessions.delete(current.device_id).await? {
            return Err(AppError::Unauthorized);
        }
        tracing::info!(user_id = %current.user_id, device_id = %current.device_id, "session_closed");
        Ok(())
    }
}
