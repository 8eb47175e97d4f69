use uuid::Uuid;

use crate::application::dto::blogging::PostInput;
use crate::application::error::{AppError, AppResult};
use crate::application::ports::blog_repository::BlogRepository;
use crate::application::ports::post_repository::PostRepository;

pub struct UpdatePost<'a, B, P>
where
    B: BlogRepository + ?Sized,
    P: PostRepository + ?Sized,
{
    pub blogs: &'a B,
    pub posts: &'a P,
}

impl<'a, B, P> UpdatePost<'a, B, P>
where
    B: BlogRepository + ?Sized,
    P: PostRepository + ?Sized,
{
    pub async fn execute(&self, id: Uuid, input: PostInput) -> AppResult<()> {
        let mut post = self
            .posts
            .get_by_id(id)
            .await?
            .ok_or(AppError::NotFound("Post"))?;
        let blog = self
            .blogs
            .get_by_id(input.blog_id)
            .await?
            .ok_or_else(|| AppError::field("blogId", "Blog not found"))?;
        post.title = input.title;
        post.short_description = input.short_description;
        post.content = input.content;
        post.blog_id = blog.id;
        post.blog_name = blog.name;
        if !self.posts.update(&post).await? {
            return Err(AppError::NotFound("Post"));
        }
        Ok(())
    }
}
