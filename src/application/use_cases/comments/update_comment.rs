use uuid::Uuid;

use crate::application::error::{AppError, AppResult};
use crate::application::ports::comment_repository::CommentRepository;

pub struct UpdateComment<'a, R: CommentRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: CommentRepository + ?Sized> UpdateComment<'a, R> {
    pub async fn execute(&self, id: Uuid, user_id: Uuid, content: &str) -> AppResult<()> {
        let comment = self
            .repo
            .get_by_id(id)
            .await?
            .ok_or(AppError::NotFound("Comment"))?;
        if !comment.is_owned_by(user_id) {
            return Err(AppError::Forbidden);
        }
        if !self.repo.update_content(id, content).await? {
            return Err(AppError::NotFound("Comment"));
        }
        Ok(())
    }
}
