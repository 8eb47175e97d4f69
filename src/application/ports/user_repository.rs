use async_trait::async_trait;
use uuid::Uuid;

use crate::application::dto::accounts::{UserFilter, UserSortBy};
use crate::application::dto::pagination::{Page, PageQuery};
use crate::domain::accounts::user::User;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn insert(&self, user: &User) -> anyhow::Result<()>;

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>>;

    /// First user whose login equals `login` or whose email equals `email`.
    async fn find_by_login_or_email(&self, login: &str, email: &str)
    -> anyhow::Result<Option<User>>;

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>>;

    async fn find_by_confirmation_code(&self, code: &str) -> anyhow::Result<Option<User>>;

    async fn find_by_recovery_code(&self, code: &str) -> anyhow::Result<Option<User>>;

    // Persists credentials, confirmation and recovery state; the reaction
    // mirror is owned by ReactionRepository.
    async fn update(&self, user: &User) -> anyhow::Result<bool>;

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool>;

    async fn list(
        &self,
        filter: &UserFilter,
        query: &PageQuery<UserSortBy>,
    ) -> anyhow::Result<Page<User>>;
}
