use chrono::Utc;
use uuid::Uuid;

use crate::application::ports::device_session_repository::DeviceSessionRepository;
use crate::domain::accounts::device_session::DeviceSession;

pub struct ListSessions<'a, S: DeviceSessionRepository + ?Sized> {
    pub sessions: &'a S,
}

impl<'a, S: DeviceSessionRepository + ?Sized> ListSessions<'a, S> {
    pub async fn execute(&self, user_id: Uuid) -> anyhow::Result<Vec<DeviceSession>> {
        self.sessions
            .list_active_for_user(user_id, Utc::now().timestamp())
            .await
    }
}
