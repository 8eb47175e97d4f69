use async_trait::async_trait;
use uuid::Uuid;

use crate::application::dto::blogging::{BlogFilter, BlogSortBy};
use crate::application::dto::pagination::{Page, PageQuery};
use crate::domain::blogging::blog::Blog;

#[async_trait]
pub trait BlogRepository: Send + Sync {
    async fn insert(&self, blog: &Blog) -> anyhow::Result<()>;

    async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<Blog>>;

    // Also refreshes the denormalized blog name on the blog's posts.
    async fn update(&self, blog: &Blog) -> anyhow::Result<bool>;

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool>;

    async fn list(
        &self,
        filter: &BlogFilter,
        query: &PageQuery<BlogSortBy>,
    ) -> anyhow::Result<Page<Blog>>;
}
