use uuid::Uuid;

use crate::application::dto::blogging::{CommentDto, CommentSortBy};
use crate::application::dto::pagination::{Page, PageQuery};
use crate::application::error::{AppError, AppResult};
use crate::application::ports::comment_repository::CommentRepository;
use crate::application::ports::post_repository::PostRepository;
use crate::application::ports::user_repository::UserRepository;
use crate::application::use_cases::reactions::viewer::viewer_reactions;
use crate::domain::blogging::reaction::status_for;

pub struct ListComments<'a, P, C, U>
where
    P: PostRepository + ?Sized,
    C: CommentRepository + ?Sized,
    U: UserRepository + ?Sized,
{
    pub posts: &'a P,
    pub comments: &'a C,
    pub users: &'a U,
}

impl<'a, P, C, U> ListComments<'a, P, C, U>
where
    P: PostRepository + ?Sized,
    C: CommentRepository + ?Sized,
    U: UserRepository + ?Sized,
{
    pub async fn execute(
        &self,
        post_id: Uuid,
        query: &PageQuery<CommentSortBy>,
        viewer: Option<Uuid>,
    ) -> AppResult<Page<CommentDto>> {
        if self.posts.get_by_id(post_id).await?.is_none() {
            return Err(AppError::NotFound("Post"));
        }
        let page = self.comments.list_for_post(post_id, query).await?;
        let mine = viewer_reactions(self.users, viewer).await?;
        Ok(page.map(|comment| CommentDto {
            my_status: status_for(&mine, comment.id),
            comment,
        }))
    }
}
