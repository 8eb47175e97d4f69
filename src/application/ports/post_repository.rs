use async_trait::async_trait;
use uuid::Uuid;

use crate::application::dto::blogging::PostSortBy;
use crate::application::dto::pagination::{Page, PageQuery};
use crate::domain::blogging::post::Post;

#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn insert(&self, post: &Post) -> anyhow::Result<()>;

    async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<Post>>;

    // Writes the editable fields only; reactions go through ReactionRepository.
    async fn update(&self, post: &Post) -> anyhow::Result<bool>;

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool>;

    // blog_id: None => all posts
    async fn list(
        &self,
        blog_id: Option<Uuid>,
        query: &PageQuery<PostSortBy>,
    ) -> anyhow::Result<Page<Post>>;
}
