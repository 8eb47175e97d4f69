use uuid::Uuid;

use crate::application::dto::blogging::{PostDto, PostSortBy};
use crate::application::dto::pagination::{Page, PageQuery};
use crate::application::ports::post_repository::PostRepository;
use crate::application::ports::user_repository::UserRepository;
use crate::application::use_cases::reactions::viewer::viewer_reactions;
use crate::domain::blogging::reaction::status_for;

pub struct ListPosts<'a, P, U>
where
    P: PostRepository + ?Sized,
    U: UserRepository + ?Sized,
{
    pub posts: &'a P,
    pub users: &'a U,
}

impl<'a, P, U> ListPosts<'a, P, U>
where
    P: PostRepository + ?Sized,
    U: UserRepository + ?Sized,
{
    // blog_id: None => posts of every blog
    pub async fn execute(
        &self,
        blog_id: Option<Uuid>,
        query: &PageQuery<PostSortBy>,
        viewer: Option<Uuid>,
    ) -> anyhow::Result<Page<PostDto>> {
        let page = self.posts.list(blog_id, query).await?;
        let mine = viewer_reactions(self.users, viewer).await?;
        Ok(page.map(|post| PostDto {
            my_status: status_for(&mine, post.id),
            post,
        }))
    }
}
