use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    routing::get,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::application::dto::blogging::{BlogFilter, BlogInput, PostInput};
use crate::application::error::AppError;
use crate::application::use_cases::blogs::create_blog::CreateBlog;
use crate::application::use_cases::blogs::delete_blog::DeleteBlog;
use crate::application::use_cases::blogs::get_blog::GetBlog;
use crate::application::use_cases::blogs::list_blogs::ListBlogs;
use crate::application::use_cases::blogs::update_blog::UpdateBlog;
use crate::application::use_cases::posts::create_post::CreatePost;
use crate::application::use_cases::posts::list_posts::ListPosts;
use crate::bootstrap::app_context::AppContext;
use crate::domain::blogging::blog::Blog;
use crate::domain::blogging::reaction::ReactionStatus;
use crate::presentation::http::error::ApiError;
use crate::presentation::http::extract::{BasicAuth, JsonBody, MaybeUser, PathId};
use crate::presentation::http::pagination::{BlogPage, PageParams, Paginator, PostPage, iso};
use crate::presentation::http::posts::PostView;
use crate::presentation::http::validation::{ValidatedBody, WEBSITE_URL_RE, trimmed};

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BlogView {
    pub id: String,
    pub name: String,
    pub description: String,
    pub website_url: String,
    pub created_at: String,
    pub is_membership: bool,
}

impl From<Blog> for BlogView {
    fn from(b: Blog) -> Self {
        BlogView {
            id: b.id.to_string(),
            name: b.name,
            description: b.description,
            website_url: b.website_url,
            created_at: iso(b.created_at),
            is_membership: b.is_membership,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BlogInputBody {
    #[serde(default, deserialize_with = "trimmed")]
    #[validate(required, length(min = 1, max = 15))]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "trimmed")]
    #[validate(required, length(min = 1, max = 500))]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "trimmed")]
    #[validate(required, length(min = 1, max = 100), regex = "WEBSITE_URL_RE")]
    pub website_url: Option<String>,
}

impl ValidatedBody for BlogInputBody {
    const FIELDS: &'static [&'static str] = &["name", "description", "websiteUrl"];
}

impl BlogInputBody {
    fn into_input(self) -> Result<BlogInput, AppError> {
        self.check()?;
        Ok(BlogInput {
            name: self.name.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            website_url: self.website_url.unwrap_or_default(),
        })
    }
}

/// Post body on the blog-scoped route; the blog comes from the path.
#[derive(Debug, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BlogPostInputBody {
    #[serde(default, deserialize_with = "trimmed")]
    #[validate(required, length(min = 1, max = 30))]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "trimmed")]
    #[validate(required, length(min = 1, max = 100))]
    pub short_description: Option<String>,
    #[serde(default, deserialize_with = "trimmed")]
    #[validate(required, length(min = 1, max = 1000))]
    pub content: Option<String>,
}

impl ValidatedBody for BlogPostInputBody {
    const FIELDS: &'static [&'static str] = &["title", "shortDescription", "content"];
}

impl BlogPostInputBody {
    fn into_input(self, blog_id: Uuid) -> Result<PostInput, AppError> {
        self.check()?;
        Ok(PostInput {
            title: self.title.unwrap_or_default(),
            short_description: self.short_description.unwrap_or_default(),
            content: self.content.unwrap_or_default(),
            blog_id,
        })
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct BlogSearchParams {
    /// Case-insensitive substring of the blog name
    pub search_name_term: Option<String>,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/blogs", get(list_blogs).post(create_blog))
        .route(
            "/blogs/:id",
            get(get_blog).put(update_blog).delete(delete_blog),
        )
        .route("/blogs/:id/posts", get(list_blog_posts).post(create_blog_post))
        .with_state(ctx)
}

#[utoipa::path(get, path = "/api/blogs", tag = "Blogs",
    params(PageParams, BlogSearchParams),
    responses((status = 200, body = BlogPage)))]
pub async fn list_blogs(
    State(ctx): State<AppContext>,
    Query(page): Query<PageParams>,
    Query(search): Query<BlogSearchParams>,
) -> Result<Json<Paginator<BlogView>>, ApiError> {
    let repo = ctx.blog_repo();
    let uc = ListBlogs {
        repo: repo.as_ref(),
    };
    let filter = BlogFilter {
        name_term: search.search_name_term.filter(|t| !t.is_empty()),
    };
    let result = uc.execute(&filter, &page.to_query()).await?;
    Ok(Json(Paginator::from_page(result, BlogView::from)))
}

#[utoipa::path(get, path = "/api/blogs/{id}", tag = "Blogs",
    params(("id" = String, Path, description = "Blog id")),
    responses((status = 200, body = BlogView), (status = 404)))]
pub async fn get_blog(
    State(ctx): State<AppContext>,
    PathId(id): PathId,
) -> Result<Json<BlogView>, ApiError> {
    let repo = ctx.blog_repo();
    let uc = GetBlog {
        repo: repo.as_ref(),
    };
    let blog = uc.execute(id).await?.ok_or(AppError::NotFound("Blog"))?;
    Ok(Json(blog.into()))
}

#[utoipa::path(post, path = "/api/blogs", tag = "Blogs", request_body = BlogInputBody,
    security(("basic" = [])),
    responses((status = 201, body = BlogView), (status = 400), (status = 401)))]
pub async fn create_blog(
    State(ctx): State<AppContext>,
    _admin: BasicAuth,
    JsonBody(body): JsonBody<BlogInputBody>,
) -> Result<(StatusCode, Json<BlogView>), ApiError> {
    let input = body.into_input()?;
    let repo = ctx.blog_repo();
    let uc = CreateBlog {
        repo: repo.as_ref(),
    };
    let blog = uc.execute(input).await?;
    Ok((StatusCode::CREATED, Json(blog.into())))
}

#[utoipa::path(put, path = "/api/blogs/{id}", tag = "Blogs", request_body = BlogInputBody,
    params(("id" = String, Path, description = "Blog id")),
    security(("basic" = [])),
    responses((status = 204), (status = 400), (status = 401), (status = 404)))]
pub async fn update_blog(
    State(ctx): State<AppContext>,
    _admin: BasicAuth,
    PathId(id): PathId,
    JsonBody(body): JsonBody<BlogInputBody>,
) -> Result<StatusCode, ApiError> {
    let input = body.into_input()?;
    let repo = ctx.blog_repo();
    let uc = UpdateBlog {
        repo: repo.as_ref(),
    };
    uc.execute(id, input).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(delete, path = "/api/blogs/{id}", tag = "Blogs",
    params(("id" = String, Path, description = "Blog id")),
    security(("basic" = [])),
    responses((status = 204), (status = 401), (status = 404)))]
pub async fn delete_blog(
    State(ctx): State<AppContext>,
    _admin: BasicAuth,
    PathId(id): PathId,
) -> Result<StatusCode, ApiError> {
    let repo = ctx.blog_repo();
    let uc = DeleteBlog {
        repo: repo.as_ref(),
    };
    uc.execute(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(get, path = "/api/blogs/{id}/posts", tag = "Blogs",
    params(("id" = String, Path, description = "Blog id"), PageParams),
    responses((status = 200, body = PostPage), (status = 404)))]
pub async fn list_blog_posts(
    State(ctx): State<AppContext>,
    MaybeUser(viewer): MaybeUser,
    PathId(id): PathId,
    Query(page): Query<PageParams>,
) -> Result<Json<Paginator<PostView>>, ApiError> {
    let blogs = ctx.blog_repo();
    let find_blog = GetBlog {
        repo: blogs.as_ref(),
    };
    if find_blog.execute(id).await?.is_none() {
        return Err(AppError::NotFound("Blog").into());
    }
    let posts = ctx.post_repo();
    let users = ctx.user_repo();
    let uc = ListPosts {
        posts: posts.as_ref(),
        users: users.as_ref(),
    };
    let result = uc.execute(Some(id), &page.to_query(), viewer).await?;
    Ok(Json(Paginator::from_page(result, PostView::from)))
}

#[utoipa::path(post, path = "/api/blogs/{id}/posts", tag = "Blogs", request_body = BlogPostInputBody,
    params(("id" = String, Path, description = "Blog id")),
    security(("basic" = [])),
    responses((status = 201, body = PostView), (status = 400), (status = 401), (status = 404)))]
pub async fn create_blog_post(
    State(ctx): State<AppContext>,
    _admin: BasicAuth,
    PathId(id): PathId,
    JsonBody(body): JsonBody<BlogPostInputBody>,
) -> Result<(StatusCode, Json<PostView>), ApiError> {
    let input = body.into_input(id)?;

    let blogs = ctx.blog_repo();
    let find_blog = GetBlog {
        repo: blogs.as_ref(),
    };
    if find_blog.execute(id).await?.is_none() {
        return Err(AppError::NotFound("Blog").into());
    }
    let posts = ctx.post_repo();
    let uc = CreatePost {
        blogs: blogs.as_ref(),
        posts: posts.as_ref(),
    };
    let post = uc.execute(input).await?;
    Ok((
        StatusCode::CREATED,
        Json(PostView::from_post(post, ReactionStatus::None)),
    ))
}
