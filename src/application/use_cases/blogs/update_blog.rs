use uuid::Uuid;

use crate::application::dto::blogging::BlogInput;
use crate::application::error::{AppError, AppResult};
use crate::application::ports::blog_repository::BlogRepository;

pub struct UpdateBlog<'a, R: BlogRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: BlogRepository + ?Sized> UpdateBlog<'a, R> {
    pub async fn execute(&self, id: Uuid, input: BlogInput) -> AppResult<()> {
        let mut blog = self
            .repo
            .get_by_id(id)
            .await?
            .ok_or(AppError::NotFound("Blog"))?;
        blog.name = input.name;
        blog.description = input.description;
        blog.website_url = input.website_url;
        if !self.repo.update(&blog).await? {
            return Err(AppError::NotFound("Blog"));
        }
        Ok(())
    }
}
