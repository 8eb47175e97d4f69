use uuid::Uuid;

use crate::application::dto::blogging::PostDto;
use crate::application::ports::post_repository::PostRepository;
use crate::application::ports::user_repository::UserRepository;
use crate::application::use_cases::reactions::viewer::viewer_reactions;
use crate::domain::blogging::reaction::status_for;

pub struct GetPost<'a, P, U>
where
    P: PostRepository + ?Sized,
    U: UserRepository + ?Sized,
{
    pub posts: &'a P,
    pub users: &'a U,
}

impl<'a, P, U> GetPost<'a, P, U>
where
    P: PostRepository + ?Sized,
    U: UserRepository + ?Sized,
{
    pub async fn execute(&self, id: Uuid, viewer: Option<Uuid>) -> anyhow::Result<Option<PostDto>> {
        let Some(post) = self.posts.get_by_id(id).await? else {
            return Ok(None);
        };
        let mine = viewer_reactions(self.users, viewer).await?;
        Ok(Some(PostDto {
            my_status: status_for(&mine, post.id),
            post,
        }))
    }
}
