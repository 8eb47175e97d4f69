use uuid::Uuid;

use crate::application::error::{AppError, AppResult};
use crate::application::ports::comment_repository::CommentRepository;

pub struct DeleteComment<'a, R: CommentRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: CommentRepository + ?Sized> DeleteComment<'a, R> {
    pub async fn execute(&self, id: Uuid, user_id: Uuid) -> AppResult<()> {
        let comment = self
            .repo
            .get_by_id(id)
            .await?
            .ok_or(AppError::NotFound("Comment"))?;
        if !comment.is_owned_by(user_id) {
            return Err(AppError::Forbidden);
        }
        if !self.repo.delete(id).await? {
            return Err(AppError::not_deleted());
        }
        Ok(())
    }
}
