use async_trait::async_trait;

#[async_trait]
pub trait MaintenanceRepository: Send + Sync {
    async fn ping(&self) -> anyhow::Result<()>;

    /// Removes every entity from every store.
    async fn wipe_all(&self) -> anyhow::Result<()>;
}
