use crate::application::dto::blogging::PostInput;
use crate::application::error::{AppError, AppResult};
use crate::application::ports::blog_repository::BlogRepository;
use crate::application::ports::post_repository::PostRepository;
use crate::domain::blogging::post::Post;

pub struct CreatePost<'a, B, P>
where
    B: BlogRepository + ?Sized,
    P: PostRepository + ?Sized,
{
    pub blogs: &'a B,
    pub posts: &'a P,
}

impl<'a, B, P> CreatePost<'a, B, P>
where
    B: BlogRepository + ?Sized,
    P: PostRepository + ?Sized,
{
    pub async fn execute(&self, input: PostInput) -> AppResult<Post> {
        let blog = self
            .blogs
            .get_by_id(input.blog_id)
            .await?
            .ok_or_else(|| AppError::field("blogId", "Blog not found"))?;
        let post = Post::new(
            input.title,
            input.short_description,
            input.content,
            blog.id,
            blog.name,
        );
        self.posts.insert(&post).await?;
        Ok(post)
    }
}
