use uuid::Uuid;

use crate::application::error::{AppError, AppResult};
use crate::application::ports::blog_repository::BlogRepository;

pub struct DeleteBlog<'a, R: BlogRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: BlogRepository + ?Sized> DeleteBlog<'a, R> {
    pub async fn execute(&self, id: Uuid) -> AppResult<()> {
        if self.repo.get_by_id(id).await?.is_none() {
            return Err(AppError::NotFound("Blog"));
        }
        if !self.repo.delete(id).await? {
            return Err(AppError::not_deleted());
        }
        Ok(())
    }
}
