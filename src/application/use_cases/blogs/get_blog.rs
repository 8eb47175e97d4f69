use uuid::Uuid;

use crate::application::ports::blog_repository::BlogRepository;
use crate::domain::blogging::blog::Blog;

pub struct GetBlog<'a, R: BlogRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: BlogRepository + ?Sized> GetBlog<'a, R> {
    pub async fn execute(&self, id: Uuid) -> anyhow::Result<Option<Blog>> {
        self.repo.get_by_id(id).await
    }
}
