use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::application::error::AppError;
use crate::application::use_cases::reactions::update_reaction::UpdateReaction;
use crate::bootstrap::app_context::AppContext;
use crate::domain::blogging::post::Post;
use crate::domain::blogging::reaction::{
    Reaction, ReactionRelation, ReactionStatus, count,
};
use crate::presentation::http::error::ApiError;
use crate::presentation::http::pagination::iso;
use crate::presentation::http::validation::{ValidatedBody, trimmed};

const NEWEST_LIKES: usize = 3;

const LIKE_STATUS_MESSAGE: &str = "likeStatus must be one of Like, Dislike, None";

#[derive(Debug, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LikeStatusBody {
    /// Like | Dislike | None
    #[serde(default, deserialize_with = "trimmed")]
    #[validate(required, custom = "known_status")]
    pub like_status: Option<String>,
}

impl ValidatedBody for LikeStatusBody {
    const FIELDS: &'static [&'static str] = &["likeStatus"];
}

fn known_status(value: &str) -> Result<(), ValidationError> {
    match ReactionStatus::parse(value) {
        Some(_) => Ok(()),
        None => {
            let mut err = ValidationError::new("likeStatus");
            err.message = Some(Cow::from(LIKE_STATUS_MESSAGE));
            Err(err)
        }
    }
}

impl LikeStatusBody {
    fn into_status(self) -> Result<ReactionStatus, AppError> {
        self.check()?;
        self.like_status
            .as_deref()
            .and_then(ReactionStatus::parse)
            .ok_or_else(|| AppError::field("likeStatus", LIKE_STATUS_MESSAGE))
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LikesInfoView {
    pub likes_count: i64,
    pub dislikes_count: i64,
    pub my_status: String,
}

impl LikesInfoView {
    pub fn new(reactions: &[Reaction], my_status: ReactionStatus) -> Self {
        let counts = count(reactions);
        Self {
            likes_count: counts.likes,
            dislikes_count: counts.dislikes,
            my_status: my_status.as_str().to_string(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LikeDetailsView {
    pub added_at: String,
    pub user_id: String,
    pub login: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExtendedLikesInfoView {
    pub likes_count: i64,
    pub dislikes_count: i64,
    pub my_status: String,
    pub newest_likes: Vec<LikeDetailsView>,
}

impl ExtendedLikesInfoView {
    pub fn new(post: &Post, my_status: ReactionStatus) -> Self {
        let base = LikesInfoView::new(&post.reactions, my_status);
        Self {
            likes_count: base.likes_count,
            dislikes_count: base.dislikes_count,
            my_status: base.my_status,
            newest_likes: post
                .newest_likes(NEWEST_LIKES)
                .into_iter()
                .map(|r| LikeDetailsView {
                    added_at: iso(r.created_at),
                    user_id: r.user_id.to_string(),
                    login: r.user_login.clone(),
                })
                .collect(),
        }
    }
}

/// Shared body of the post and comment `like-status` handlers.
pub async fn set_like_status(
    ctx: &AppContext,
    user_id: Uuid,
    target_id: Uuid,
    relation: ReactionRelation,
    body: LikeStatusBody,
) -> Result<(), ApiError> {
    let status = body.into_status()?;
    let users = ctx.user_repo();
    let posts = ctx.post_repo();
    let comments = ctx.comment_repo();
    let reactions = ctx.reaction_repo();
    let uc = UpdateReaction {
        users: users.as_ref(),
        posts: posts.as_ref(),
        comments: comments.as_ref(),
        reactions: reactions.as_ref(),
    };
    uc.execute(user_id, target_id, relation, status).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_status_must_be_exact() {
        let ok = LikeStatusBody {
            like_status: Some("Dislike".into()),
        };
        assert_eq!(ok.into_status().unwrap(), ReactionStatus::Dislike);
        for bad in [None, Some("like".to_string()), Some(String::new())] {
            let body = LikeStatusBody { like_status: bad };
            let Err(AppError::Validation(errors)) = body.into_status() else {
                panic!("expected validation error");
            };
            assert_eq!(errors[0].field, "likeStatus");
        }
        let body = LikeStatusBody {
            like_status: Some("like".into()),
        };
        let Err(AppError::Validation(errors)) = body.into_status() else {
            panic!("expected validation error");
        };
        assert_eq!(errors[0].message, LIKE_STATUS_MESSAGE);
    }
}
