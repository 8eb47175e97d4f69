use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;
use uuid::Uuid;

use crate::application::ports::device_session_repository::DeviceSessionRepository;
use crate::domain::accounts::device_session::DeviceSession;
use crate::infrastructure::db::PgPool;

pub struct SqlxDeviceSessionRepository {
    pub pool: PgPool,
}

impl SqlxDeviceSessionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_session(r: &PgRow) -> DeviceSession {
    DeviceSession {
        id: r.get("id"),
        user_id: r.get("user_id"),
        device_id: r.get("device_id"),
        ip: r.get("ip"),
        device_name: r.get("device_name"),
        issued_at: r.get("issued_at"),
        expires_at: r.get("expires_at"),
    }
}

#[async_trait]
impl DeviceSessionRepository for SqlxDeviceSessionRepository {
    async fn insert(&self, session: &DeviceSession) -> anyhow::Result<()> {
        sqlx::query(
            r#"INSERT INTO device_sessions (id, user_id, device_id, ip, device_name, issued_at, expires_at)
               VALUES ($1, $2, $3, $4, $5, $6, $7)"#,
        )
        .bind(session.id)
        .bind(session.user_id)
        .bind(session.device_id)
        .bind(&session.ip)
        .bind(&session.device_name)
        .bind(session.issued_at)
        .bind(session.expires_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_by_device_id(&self, device_id: Uuid) -> anyhow::Result<Option<DeviceSession>> {
        let row = sqlx::query(
            r#"SELECT id, user_id, device_id, ip, device_name, issued_at, expires_at
               FROM device_sessions WHERE device_id = $1"#,
        )
        .bind(device_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.as_ref().map(map_session))
    }

    async fn update_issuance(
        &self,
        device_id: Uuid,
        current_issued_at: i64,
        issued_at: i64,
        expires_at: i64,
    ) -> anyhow::Result<bool> {
        let res = sqlx::query(
            r#"UPDATE device_sessions SET issued_at = $3, expires_at = $4
               WHERE device_id = $1 AND issued_at = $2"#,
        )
        .bind(device_id)
        .bind(current_issued_at)
        .bind(issued_at)
        .bind(expires_at)
        .execute(&self.pool)
        .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn delete(&self, device_id: Uuid) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM device_sessions WHERE device_id = $1")
            .bind(device_id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn delete_all_for_user(&self, user_id: Uuid) -> anyhow::Result<u64> {
        let res = sqlx::query("DELETE FROM device_sessions WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected())
    }

    async fn delete_all_except(&self, user_id: Uuid, device_id: Uuid) -> anyhow::Result<u64> {
        let res =
            sqlx::query("DELETE FROM device_sessions WHERE user_id = $1 AND device_id <> $2")
                .bind(user_id)
                .bind(device_id)
                .execute(&self.pool)
                .await?;
        Ok(res.rows_affected())
    }

    async fn list_active_for_user(
        &self,
        user_id: Uuid,
        now: i64,
    ) -> anyhow::Result<Vec<DeviceSession>> {
        let rows = sqlx::query(
            r#"SELECT id, user_id, device_id, ip, device_name, issued_at, expires_at
               FROM device_sessions WHERE user_id = $1 AND expires_at > $2
               ORDER BY created_at ASC, id"#,
        )
        .bind(user_id)
        .bind(now)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.iter().map(map_session).collect())
    }
}
