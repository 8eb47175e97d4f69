use uuid::Uuid;

/// A refresh-token issuance bound to one device.
///
/// `issued_at` and `expires_at` are epoch seconds copied from the current
/// refresh token; a token whose `iat` differs from `issued_at` is stale.
#[derive(Debug, Clone)]
pub struct DeviceSession {
    pub id: Uuid,
    pub user_id: Uuid,
    pub device_id: Uuid,
    pub ip: String,
    pub device_name: String,
    pub issued_at: i64,
    pub expires_at: i64,
}

impl DeviceSession {
    pub fn is_active(&self, now: i64) -> bool {
        self.expires_at > now
    }

    pub fn last_active(&self) -> chrono::DateTime<chrono::Utc> {
        chrono::DateTime::<chrono::Utc>::from_timestamp(self.issued_at, 0).unwrap_or_default()
    }
}
