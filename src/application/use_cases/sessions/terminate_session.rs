use uuid::Uuid;

use crate::application::error::{AppError, AppResult};
use crate::application::ports::device_session_repository::DeviceSessionRepository;

pub struct TerminateSession<'a, S: DeviceSessionRepository + ?Sized> {
    pub sessions: &'a S,
}

impl<'a, S: DeviceSessionRepository + ?Sized> TerminateSession<'a, S> {
    pub async fn execute(&self, user_id: Uuid, device_id: Uuid) -> AppResult<()> {
        let session = self
            .sessions
            .find_by_device_id(device_id)
            .await?
            .ok_or(AppError::NotFound("Session"))?;
        if session.user_id != user_id {
            return Err(AppError::Forbidden);
        }
        if !self.sessions.delete(device_id).await? {
            return Err(AppError::not_deleted());
        }
        Ok(())
    }
}
