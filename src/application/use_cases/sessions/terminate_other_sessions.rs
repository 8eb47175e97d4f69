use uuid::Uuid;

use crate::application::ports::device_session_repository::DeviceSessionRepository;

pub struct TerminateOtherSessions<'a, S: DeviceSessionRepository + ?Sized> {
    pub sessions: &'a S,
}

impl<'a, S: DeviceSessionRepository + ?Sized> TerminateOtherSessions<'a, S> {
    pub async fn execute(&self, user_id: Uuid, keep_device_id: Uuid) -> anyhow::Result<u64> {
        let removed = self
            .sessions
            .delete_all_except(user_id, keep_device_id)
            .await?;
        tracing::info!(user_id = %user_id, removed, "other_sessions_terminated");
        Ok(removed)
    }
}
