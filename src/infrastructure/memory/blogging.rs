use async_trait::async_trait;
use uuid::Uuid;

use super::{MemoryStore, contains_ci, paginate};
use crate::application::dto::blogging::{BlogFilter, BlogSortBy, CommentSortBy, PostSortBy};
use crate::application::dto::pagination::{Page, PageQuery};
use crate::application::ports::blog_repository::BlogRepository;
use crate::application::ports::comment_repository::CommentRepository;
use crate::application::ports::post_repository::PostRepository;
use crate::application::ports::reaction_repository::ReactionRepository;
use crate::domain::blogging::blog::Blog;
use crate::domain::blogging::comment::Comment;
use crate::domain::blogging::post::Post;
use crate::domain::blogging::reaction::{
    ReactionOutcome, ReactionRelation, ReactionRequest, reconcile,
};

#[async_trait]
impl BlogRepository for MemoryStore {
    async fn insert(&self, blog: &Blog) -> anyhow::Result<()> {
        self.state.write().await.blogs.insert(blog.id, blog.clone());
        Ok(())
    }

    async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<Blog>> {
        Ok(self.state.read().await.blogs.get(&id).cloned())
    }

    async fn update(&self, blog: &Blog) -> anyhow::Result<bool> {
        let mut state = self.state.write().await;
        let Some(stored) = state.blogs.get_mut(&blog.id) else {
            return Ok(false);
        };
        stored.name = blog.name.clone();
        stored.description = blog.description.clone();
        stored.website_url = blog.website_url.clone();
        for post in state.posts.values_mut().filter(|p| p.blog_id == blog.id) {
            post.blog_name = blog.name.clone();
        }
        Ok(true)
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        Ok(self.state.write().await.blogs.remove(&id).is_some())
    }

    async fn list(
        &self,
        filter: &BlogFilter,
        query: &PageQuery<BlogSortBy>,
    ) -> anyhow::Result<Page<Blog>> {
        let state = self.state.read().await;
        let items: Vec<Blog> = state
            .blogs
            .values()
            .filter(|b| {
                filter
                    .name_term
                    .as_deref()
                    .is_none_or(|term| contains_ci(&b.name, term))
            })
            .cloned()
            .collect();
        Ok(paginate(items, query, |x| x.id, |a, b| match query.sort_by {
            BlogSortBy::CreatedAt => a.created_at.cmp(&b.created_at),
            BlogSortBy::Name => a.name.cmp(&b.name),
            BlogSortBy::Description => a.description.cmp(&b.description),
            BlogSortBy::WebsiteUrl => a.website_url.cmp(&b.website_url),
        }))
    }
}

#[async_trait]
impl PostRepository for MemoryStore {
    async fn insert(&self, post: &Post) -> anyhow::Result<()> {
        self.state.write().await.posts.insert(post.id, post.clone());
        Ok(())
    }

    async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<Post>> {
        Ok(self.state.read().await.posts.get(&id).cloned())
    }

    async fn update(&self, post: &Post) -> anyhow::Result<bool> {
        let mut state = self.state.write().await;
        let Some(stored) = state.posts.get_mut(&post.id) else {
            return Ok(false);
        };
        stored.title = post.title.clone();
        stored.short_description = post.short_description.clone();
        stored.content = post.content.clone();
        stored.blog_id = post.blog_id;
        stored.blog_name = post.blog_name.clone();
        Ok(true)
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        Ok(self.state.write().await.posts.remove(&id).is_some())
    }

    async fn list(
        &self,
        blog_id: Option<Uuid>,
        query: &PageQuery<PostSortBy>,
    ) -> anyhow::Result<Page<Post>> {
        let state = self.state.read().await;
        let items: Vec<Post> = state
            .posts
            .values()
            .filter(|p| blog_id.is_none_or(|id| p.blog_id == id))
            .cloned()
            .collect();
        Ok(paginate(items, query, |x| x.id, |a, b| match query.sort_by {
            PostSortBy::CreatedAt => a.created_at.cmp(&b.created_at),
            PostSortBy::Title => a.title.cmp(&b.title),
            PostSortBy::ShortDescription => a.short_description.cmp(&b.short_description),
            PostSortBy::Content => a.content.cmp(&b.content),
            PostSortBy::BlogId => a.blog_id.cmp(&b.blog_id),
            PostSortBy::BlogName => a.blog_name.cmp(&b.blog_name),
        }))
    }
}

#[async_trait]
impl CommentRepository for MemoryStore {
    async fn insert(&self, comment: &Comment) -> anyhow::Result<()> {
        self.state
            .write()
            .await
            .comments
            .insert(comment.id, comment.clone());
        Ok(())
    }

    async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<Comment>> {
        Ok(self.state.read().await.comments.get(&id).cloned())
    }

    async fn update_content(&self, id: Uuid, content: &str) -> anyhow::Result<bool> {
        let mut state = self.state.write().await;
        match state.comments.get_mut(&id) {
            Some(comment) => {
                comment.content = content.to_string();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        Ok(self.state.write().await.comments.remove(&id).is_some())
    }

    async fn list_for_post(
        &self,
        post_id: Uuid,
        query: &PageQuery<CommentSortBy>,
    ) -> anyhow::Result<Page<Comment>> {
        let state = self.state.read().await;
        let items: Vec<Comment> = state
            .comments
            .values()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect();
        Ok(paginate(items, query, |x| x.id, |a, b| match query.sort_by {
            CommentSortBy::CreatedAt => a.created_at.cmp(&b.created_at),
            CommentSortBy::Content => a.content.cmp(&b.content),
        }))
    }
}

#[async_trait]
impl ReactionRepository for MemoryStore {
    async fn apply(&self, req: &ReactionRequest) -> anyhow::Result<Option<ReactionOutcome>> {
        let mut guard = self.state.write().await;
        let state = &mut *guard;
        let Some(user) = state.users.get_mut(&req.user_id) else {
            return Ok(None);
        };
        let target = match req.relation {
            ReactionRelation::Post => state.posts.get_mut(&req.target_id).map(|p| &mut p.reactions),
            ReactionRelation::Comment => state
                .comments
                .get_mut(&req.target_id)
                .map(|c| &mut c.reactions),
        };
        let Some(target) = target else {
            return Ok(None);
        };
        Ok(Some(reconcile(
            &mut user.reactions,
            target,
            req,
            chrono::Utc::now(),
        )))
    }
}
