use async_trait::async_trait;

use crate::application::ports::maintenance_repository::MaintenanceRepository;
use crate::infrastructure::db::PgPool;

pub struct SqlxMaintenanceRepository {
    pub pool: PgPool,
}

impl SqlxMaintenanceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MaintenanceRepository for SqlxMaintenanceRepository {
    async fn ping(&self) -> anyhow::Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn wipe_all(&self) -> anyhow::Result<()> {
        sqlx::query("TRUNCATE blogs, posts, comments, users, device_sessions")
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
