use uuid::Uuid;

use crate::application::error::{AppError, AppResult};
use crate::application::ports::device_session_repository::DeviceSessionRepository;
use crate::application::ports::user_repository::UserRepository;

/// Removes the account together with every device session it still holds,
/// so outstanding refresh tokens die with it.
pub struct DeleteUser<'a, R, S>
where
    R: UserRepository + ?Sized,
    S: DeviceSessionRepository + ?Sized,
{
    pub repo: &'a R,
    pub sessions: &'a S,
}

impl<'a, R, S> DeleteUser<'a, R, S>
where
    R: UserRepository + ?Sized,
    S: DeviceSessionRepository + ?Sized,
{
    pub async fn execute(&self, id: Uuid) -> AppResult<()> {
        if self.repo.find_by_id(id).await?.is_none() {
            return Err(AppError::NotFound("User"));
        }
        if !self.repo.delete(id).await? {
            return Err(AppError::not_deleted());
        }
        let revoked = self.sessions.delete_all_for_user(id).await?;
        tracing::debug!(user_id = %id, revoked, "user_deleted");
        Ok(())
    }
}
