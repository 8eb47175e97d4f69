use crate::application::dto::blogging::BlogInput;
use crate::application::ports::blog_repository::BlogRepository;
use crate::domain::blogging::blog::Blog;

pub struct CreateBlog<'a, R: BlogRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: BlogRepository + ?Sized> CreateBlog<'a, R> {
    pub async fn execute(&self, input: BlogInput) -> anyhow::Result<Blog> {
        let blog = Blog::new(input.name, input.description, input.website_url);
        self.repo.insert(&blog).await?;
        Ok(blog)
    }
}
