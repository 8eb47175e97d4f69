use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::accounts::device_session::DeviceSession;

#[async_trait]
pub trait DeviceSessionRepository: Send + Sync {
    async fn insert(&self, session: &DeviceSession) -> anyhow::Result<()>;

    async fn find_by_device_id(&self, device_id: Uuid) -> anyhow::Result<Option<DeviceSession>>;

    /// Compare-and-set: only rotates a session still carrying `current_issued_at`.
    /// `false` means the session is gone or was rotated concurrently.
    async fn update_issuance(
        &self,
        device_id: Uuid,
        current_issued_at: i64,
        issued_at: i64,
        expires_at: i64,
    ) -> anyhow::Result<bool>;

    async fn delete(&self, device_id: Uuid) -> anyhow::Result<bool>;

    async fn delete_all_for_user(&self, user_id: Uuid) -> anyhow::Result<u64>;

    /// Returns how many sessions were removed.
    async fn delete_all_except(&self, user_id: Uuid, device_id: Uuid) -> anyhow::Result<u64>;

    // Oldest first.
    async fn list_active_for_user(&self, user_id: Uuid, now: i64)
    -> anyhow::Result<Vec<DeviceSession>>;
}
