use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    routing::{get, put},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::application::dto::blogging::{PostDto, PostInput};
use crate::application::error::AppError;
use crate::application::use_cases::comments::create_comment::CreateComment;
use crate::application::use_cases::comments::list_comments::ListComments;
use crate::application::use_cases::posts::create_post::CreatePost;
use crate::application::use_cases::posts::delete_post::DeletePost;
use crate::application::use_cases::posts::get_post::GetPost;
use crate::application::use_cases::posts::list_posts::ListPosts;
use crate::application::use_cases::posts::update_post::UpdatePost;
use crate::bootstrap::app_context::AppContext;
use crate::domain::blogging::post::Post;
use crate::domain::blogging::reaction::{ReactionRelation, ReactionStatus};
use crate::presentation::http::comments::{CommentInputBody, CommentView};
use crate::presentation::http::error::ApiError;
use crate::presentation::http::extract::{BasicAuth, CurrentUser, JsonBody, MaybeUser, PathId};
use crate::presentation::http::pagination::{CommentPage, PageParams, Paginator, PostPage, iso};
use crate::presentation::http::reactions::{ExtendedLikesInfoView, LikeStatusBody, set_like_status};
use crate::presentation::http::validation::{ValidatedBody, trimmed, uuid_text};

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostView {
    pub id: String,
    pub title: String,
    pub short_description: String,
    pub content: String,
    pub blog_id: String,
    pub blog_name: String,
    pub created_at: String,
    pub extended_likes_info: ExtendedLikesInfoView,
}

impl PostView {
    pub fn from_post(post: Post, my_status: ReactionStatus) -> Self {
        let extended_likes_info = ExtendedLikesInfoView::new(&post, my_status);
        PostView {
            id: post.id.to_string(),
            title: post.title,
            short_description: post.short_description,
            content: post.content,
            blog_id: post.blog_id.to_string(),
            blog_name: post.blog_name,
            created_at: iso(post.created_at),
            extended_likes_info,
        }
    }
}

impl From<PostDto> for PostView {
    fn from(dto: PostDto) -> Self {
        PostView::from_post(dto.post, dto.my_status)
    }
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PostInputBody {
    #[serde(default, deserialize_with = "trimmed")]
    #[validate(required, length(min = 1, max = 30))]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "trimmed")]
    #[validate(required, length(min = 1, max = 100))]
    pub short_description: Option<String>,
    #[serde(default, deserialize_with = "trimmed")]
    #[validate(required, length(min = 1, max = 1000))]
    pub content: Option<String>,
    #[serde(default, deserialize_with = "trimmed")]
    #[validate(required, custom = "uuid_text")]
    pub blog_id: Option<String>,
}

impl ValidatedBody for PostInputBody {
    const FIELDS: &'static [&'static str] = &["title", "shortDescription", "content", "blogId"];
}

impl PostInputBody {
    fn into_input(self) -> Result<PostInput, AppError> {
        self.check()?;
        let blog_id = self
            .blog_id
            .as_deref()
            .and_then(|id| Uuid::parse_str(id).ok())
            .ok_or_else(|| AppError::field("blogId", "blogId is not a valid id"))?;
        Ok(PostInput {
            title: self.title.unwrap_or_default(),
            short_description: self.short_description.unwrap_or_default(),
            content: self.content.unwrap_or_default(),
            blog_id,
        })
    }
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/posts", get(list_posts).post(create_post))
        .route(
            "/posts/:id",
            get(get_post).put(update_post).delete(delete_post),
        )
        .route(
            "/posts/:id/comments",
            get(list_post_comments).post(create_post_comment),
        )
        .route("/posts/:id/like-status", put(set_post_like_status))
        .with_state(ctx)
}

#[utoipa::path(get, path = "/api/posts", tag = "Posts",
    params(PageParams),
    responses((status = 200, body = PostPage)))]
pub async fn list_posts(
    State(ctx): State<AppContext>,
    MaybeUser(viewer): MaybeUser,
    Query(page): Query<PageParams>,
) -> Result<Json<Paginator<PostView>>, ApiError> {
    let posts = ctx.post_repo();
    let users = ctx.user_repo();
    let uc = ListPosts {
        posts: posts.as_ref(),
        users: users.as_ref(),
    };
    let result = uc.execute(None, &page.to_query(), viewer).await?;
    Ok(Json(Paginator::from_page(result, PostView::from)))
}

#[utoipa::path(get, path = "/api/posts/{id}", tag = "Posts",
    params(("id" = String, Path, description = "Post id")),
    responses((status = 200, body = PostView), (status = 404)))]
pub async fn get_post(
    State(ctx): State<AppContext>,
    MaybeUser(viewer): MaybeUser,
    PathId(id): PathId,
) -> Result<Json<PostView>, ApiError> {
    let posts = ctx.post_repo();
    let users = ctx.user_repo();
    let uc = GetPost {
        posts: posts.as_ref(),
        users: users.as_ref(),
    };
    let dto = uc
        .execute(id, viewer)
        .await?
        .ok_or(AppError::NotFound("Post"))?;
    Ok(Json(dto.into()))
}

#[utoipa::path(post, path = "/api/posts", tag = "Posts", request_body = PostInputBody,
    security(("basic" = [])),
    responses((status = 201, body = PostView), (status = 400), (status = 401)))]
pub async fn create_post(
    State(ctx): State<AppContext>,
    _admin: BasicAuth,
    JsonBody(body): JsonBody<PostInputBody>,
) -> Result<(StatusCode, Json<PostView>), ApiError> {
    let input = body.into_input()?;
    let blogs = ctx.blog_repo();
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

#[utoipa::path(put, path = "/api/posts/{id}", tag = "Posts", request_body = PostInputBody,
    params(("id" = String, Path, description = "Post id")),
    security(("basic" = [])),
    responses((status = 204), (status = 400), (status = 401), (status = 404)))]
pub async fn update_post(
    State(ctx): State<AppContext>,
    _admin: BasicAuth,
    PathId(id): PathId,
    JsonBody(body): JsonBody<PostInputBody>,
) -> Result<StatusCode, ApiError> {
    let input = body.into_input()?;
    let blogs = ctx.blog_repo();
    let posts = ctx.post_repo();
    let uc = UpdatePost {
        blogs: blogs.as_ref(),
        posts: posts.as_ref(),
    };
    uc.execute(id, input).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(delete, path = "/api/posts/{id}", tag = "Posts",
    params(("id" = String, Path, description = "Post id")),
    security(("basic" = [])),
    responses((status = 204), (status = 401), (status = 404)))]
pub async fn delete_post(
    State(ctx): State<AppContext>,
    _admin: BasicAuth,
    PathId(id): PathId,
) -> Result<StatusCode, ApiError> {
    let repo = ctx.post_repo();
    let uc = DeletePost {
        repo: repo.as_ref(),
    };
    uc.execute(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(get, path = "/api/posts/{id}/comments", tag = "Posts",
    params(("id" = String, Path, description = "Post id"), PageParams),
    responses((status = 200, body = CommentPage), (status = 404)))]
pub async fn list_post_comments(
    State(ctx): State<AppContext>,
    MaybeUser(viewer): MaybeUser,
    PathId(id): PathId,
    Query(page): Query<PageParams>,
) -> Result<Json<Paginator<CommentView>>, ApiError> {
    let posts = ctx.post_repo();
    let comments = ctx.comment_repo();
    let users = ctx.user_repo();
    let uc = ListComments {
        posts: posts.as_ref(),
        comments: comments.as_ref(),
        users: users.as_ref(),
    };
    let result = uc.execute(id, &page.to_query(), viewer).await?;
    Ok(Json(Paginator::from_page(result, CommentView::from)))
}

#[utoipa::path(post, path = "/api/posts/{id}/comments", tag = "Posts", request_body = CommentInputBody,
    params(("id" = String, Path, description = "Post id")),
    security(("bearer" = [])),
    responses((status = 201, body = CommentView), (status = 400), (status = 401), (status = 404)))]
pub async fn create_post_comment(
    State(ctx): State<AppContext>,
    CurrentUser(user_id): CurrentUser,
    PathId(id): PathId,
    JsonBody(body): JsonBody<CommentInputBody>,
) -> Result<(StatusCode, Json<CommentView>), ApiError> {
    let content = body.into_content()?;
    let posts = ctx.post_repo();
    let users = ctx.user_repo();
    let comments = ctx.comment_repo();
    let uc = CreateComment {
        posts: posts.as_ref(),
        users: users.as_ref(),
        comments: comments.as_ref(),
    };
    let comment = uc.execute(id, user_id, content).await?;
    Ok((
        StatusCode::CREATED,
        Json(CommentView::from_comment(comment, ReactionStatus::None)),
    ))
}

#[utoipa::path(put, path = "/api/posts/{id}/like-status", tag = "Posts", request_body = LikeStatusBody,
    params(("id" = String, Path, description = "Post id")),
    security(("bearer" = [])),
    responses((status = 204), (status = 400), (status = 401), (status = 404)))]
pub async fn set_post_like_status(
    State(ctx): State<AppContext>,
    CurrentUser(user_id): CurrentUser,
    PathId(id): PathId,
    JsonBody(body): JsonBody<LikeStatusBody>,
) -> Result<StatusCode, ApiError> {
    set_like_status(&ctx, user_id, id, ReactionRelation::Post, body).await?;
    Ok(StatusCode::NO_CONTENT)
}
