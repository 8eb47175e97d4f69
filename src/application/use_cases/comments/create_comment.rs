use uuid::Uuid;

use crate::application::error::{AppError, AppResult};
use crate::application::ports::comment_repository::CommentRepository;
use crate::application::ports::post_repository::PostRepository;
use crate::application::ports::user_repository::UserRepository;
use crate::domain::blogging::comment::Comment;

pub struct CreateComment<'a, P, U, C>
where
    P: PostRepository + ?Sized,
    U: UserRepository + ?Sized,
    C: CommentRepository + ?Sized,
{
    pub posts: &'a P,
    pub users: &'a U,
    pub comments: &'a C,
}

impl<'a, P, U, C> CreateComment<'a, P, U, C>
where
    P: PostRepository + ?Sized,
    U: UserRepository + ?Sized,
    C: CommentRepository + ?Sized,
{
    pub async fn execute(&self, post_id: Uuid, user_id: Uuid, content: String) -> AppResult<Comment> {
        if self.posts.get_by_id(post_id).await?.is_none() {
            return Err(AppError::NotFound("Post"));
        }
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(AppError::Unauthorized)?;
        let comment = Comment::new(post_id, user.id, user.login, content);
        self.comments.insert(&comment).await?;
        Ok(comment)
    }
}
