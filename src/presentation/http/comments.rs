use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, put},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::dto::blogging::CommentDto;
use crate::application::error::AppError;
use crate::application::use_cases::comments::delete_comment::DeleteComment;
use crate::application::use_cases::comments::get_comment::GetComment;
use crate::application::use_cases::comments::update_comment::UpdateComment;
use crate::bootstrap::app_context::AppContext;
use crate::domain::blogging::comment::Comment;
use crate::domain::blogging::reaction::{ReactionRelation, ReactionStatus};
use crate::presentation::http::error::ApiError;
use crate::presentation::http::extract::{CurrentUser, JsonBody, MaybeUser, PathId};
use crate::presentation::http::pagination::iso;
use crate::presentation::http::reactions::{LikeStatusBody, LikesInfoView, set_like_status};
use crate::presentation::http::validation::{ValidatedBody, trimmed};

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentatorInfoView {
    pub user_id: String,
    pub user_login: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentView {
    pub id: String,
    pub content: String,
    pub commentator_info: CommentatorInfoView,
    pub created_at: String,
    pub likes_info: LikesInfoView,
}

impl CommentView {
    pub fn from_comment(comment: Comment, my_status: ReactionStatus) -> Self {
        let likes_info = LikesInfoView::new(&comment.reactions, my_status);
        CommentView {
            id: comment.id.to_string(),
            content: comment.content,
            commentator_info: CommentatorInfoView {
                user_id: comment.commentator_id.to_string(),
                user_login: comment.commentator_login,
            },
            created_at: iso(comment.created_at),
            likes_info,
        }
    }
}

impl From<CommentDto> for CommentView {
    fn from(dto: CommentDto) -> Self {
        CommentView::from_comment(dto.comment, dto.my_status)
    }
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CommentInputBody {
    #[serde(default, deserialize_with = "trimmed")]
    #[validate(required, length(min = 20, max = 300))]
    pub content: Option<String>,
}

impl ValidatedBody for CommentInputBody {
    const FIELDS: &'static [&'static str] = &["content"];
}

impl CommentInputBody {
    pub(crate) fn into_content(self) -> Result<String, AppError> {
        self.check()?;
        Ok(self.content.unwrap_or_default())
    }
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route(
            "/comments/:id",
            get(get_comment).put(update_comment).delete(delete_comment),
        )
        .route("/comments/:id/like-status", put(set_comment_like_status))
        .with_state(ctx)
}

#[utoipa::path(get, path = "/api/comments/{id}", tag = "Comments",
    params(("id" = String, Path, description = "Comment id")),
    responses((status = 200, body = CommentView), (status = 404)))]
pub async fn get_comment(
    State(ctx): State<AppContext>,
    MaybeUser(viewer): MaybeUser,
    PathId(id): PathId,
) -> Result<Json<CommentView>, ApiError> {
    let comments = ctx.comment_repo();
    let users = ctx.user_repo();
    let uc = GetComment {
        comments: comments.as_ref(),
        users: users.as_ref(),
    };
    let dto = uc
        .execute(id, viewer)
        .await?
        .ok_or(AppError::NotFound("Comment"))?;
    Ok(Json(dto.into()))
}

#[utoipa::path(put, path = "/api/comments/{id}", tag = "Comments", request_body = CommentInputBody,
    params(("id" = String, Path, description = "Comment id")),
    security(("bearer" = [])),
    responses((status = 204), (status = 400), (status = 401), (status = 403), (status = 404)))]
pub async fn update_comment(
    State(ctx): State<AppContext>,
    CurrentUser(user_id): CurrentUser,
    PathId(id): PathId,
    JsonBody(body): JsonBody<CommentInputBody>,
) -> Result<StatusCode, ApiError> {
    let content = body.into_content()?;
    let repo = ctx.comment_repo();
    let uc = UpdateComment {
        repo: repo.as_ref(),
    };
    uc.execute(id, user_id, &content).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(delete, path = "/api/comments/{id}", tag = "Comments",
    params(("id" = String, Path, description = "Comment id")),
    security(("bearer" = [])),
    responses((status = 204), (status = 401), (status = 403), (status = 404)))]
pub async fn delete_comment(
    State(ctx): State<AppContext>,
    CurrentUser(user_id): CurrentUser,
    PathId(id): PathId,
) -> Result<StatusCode, ApiError> {
    let repo = ctx.comment_repo();
    let uc = DeleteComment {
        repo: repo.as_ref(),
    };
    uc.execute(id, user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(put, path = "/api/comments/{id}/like-status", tag = "Comments", request_body = LikeStatusBody,
    params(("id" = String, Path, description = "Comment id")),
    security(("bearer" = [])),
    responses((status = 204), (status = 400), (status = 401), (status = 404)))]
pub async fn set_comment_like_status(
    State(ctx): State<AppContext>,
    CurrentUser(user_id): CurrentUser,
    PathId(id): PathId,
    JsonBody(body): JsonBody<LikeStatusBody>,
) -> Result<StatusCode, ApiError> {
    set_like_status(&ctx, user_id, id, ReactionRelation::Comment, body).await?;
    Ok(StatusCode::NO_CONTENT)
}
