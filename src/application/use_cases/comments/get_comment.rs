use uuid::Uuid;

use crate::application::dto::blogging::CommentDto;
use crate::application::ports::comment_repository::CommentRepository;
use crate::application::ports::user_repository::UserRepository;
use crate::application::use_cases::reactions::viewer::viewer_reactions;
use crate::domain::blogging::reaction::status_for;

pub struct GetComment<'a, C, U>
where
    C: CommentRepository + ?Sized,
    U: UserRepository + ?Sized,
{
    pub comments: &'a C,
    pub users: &'a U,
}

impl<'a, C, U> GetComment<'a, C, U>
where
    C: CommentRepository + ?Sized,
    U: UserRepository + ?Sized,
{
    pub async fn execute(
        &self,
        id: Uuid,
        viewer: Option<Uuid>,
    ) -> anyhow::Result<Option<CommentDto>> {
        let Some(comment) = self.comments.get_by_id(id).await? else {
            return Ok(None);
        };
        let mine = viewer_reactions(self.users, viewer).await?;
        Ok(Some(CommentDto {
            my_status: status_for(&mine, comment.id),
            comment,
        }))
    }
}
