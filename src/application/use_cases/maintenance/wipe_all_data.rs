use crate::application::ports::maintenance_repository::MaintenanceRepository;

pub struct WipeAllData<'a, R: MaintenanceRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: MaintenanceRepository + ?Sized> WipeAllData<'a, R> {
    pub async fn execute(&self) -> anyhow::Result<()> {
        self.repo.wipe_all().await?;
        tracing::warn!("all_data_wiped");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::post_repository::PostRepository;
    use crate::application::ports::user_repository::UserRepository;
    use crate::application::use_cases::test_support::{seed_post, seed_user};
    use crate::infrastructure::memory::MemoryStore;

    #[tokio::test]
    async fn wipe_leaves_every_collection_empty() {
        let store = MemoryStore::new();
        let user = seed_user(&store, "alice", "secret1").await;
        let post = seed_post(&store).await;
        WipeAllData { repo: &store }.execute().await.unwrap();
        assert!(UserRepository::find_by_id(&store, user.id).await.unwrap().is_none());
        assert!(PostRepository::get_by_id(&store, post.id).await.unwrap().is_none());
    }
}
