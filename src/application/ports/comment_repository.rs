use async_trait::async_trait;
use uuid::Uuid;

use crate::application::dto::blogging::CommentSortBy;
use crate::application::dto::pagination::{Page, PageQuery};
use crate::domain::blogging::comment::Comment;

#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn insert(&self, comment: &Comment) -> anyhow::Result<()>;

    async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<Comment>>;

    async fn update_content(&self, id: Uuid, content: &str) -> anyhow::Result<bool>;

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool>;

    async fn list_for_post(
        &self,
        post_id: Uuid,
        query: &PageQuery<CommentSortBy>,
    ) -> anyhow::Result<Page<Comment>>;
}
