use uuid::Uuid;

use crate::application::error::{AppError, AppResult};
use crate::application::ports::post_repository::PostRepository;

pub struct DeletePost<'a, R: PostRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: PostRepository + ?Sized> DeletePost<'a, R> {
    pub async fn execute(&self, id: Uuid) -> AppResult<()> {
        if self.repo.get_by_id(id).await?.is_none() {
            return Err(AppError::NotFound("Post"));
        }
        if !self.repo.delete(id).await? {
            return Err(AppError::not_deleted());
        }
        Ok(())
    }
}
