use uuid::Uuid;

use crate::application::error::{AppError, AppResult};
use crate::application::ports::comment_repository::CommentRepository;
use crate::application::ports::post_repository::PostRepository;
use crate::application::ports::reaction_repository::ReactionRepository;
use crate::application::ports::user_repository::UserRepository;
use crate::domain::blogging::reaction::{
    ReactionOutcome, ReactionRelation, ReactionRequest, ReactionStatus,
};

pub struct UpdateReaction<'a, U, P, C, R>
where
    U: UserRepository + ?Sized,
    P: PostRepository + ?Sized,
    C: CommentRepository + ?Sized,
    R: ReactionRepository + ?Sized,
{
    pub users: &'a U,
    pub posts: &'a P,
    pub comments: &'a C,
    pub reactions: &'a R,
}

fn target_label(relation: ReactionRelation) -> &'static str {
    match relation {
        ReactionRelation::Post => "Post",
        ReactionRelation::Comment => "Comment",
    }
}

impl<'a, U, P, C, R> UpdateReaction<'a, U, P, C, R>
where
    U: UserRepository + ?Sized,
    P: PostRepository + ?Sized,
    C: CommentRepository + ?Sized,
    R: ReactionRepository + ?Sized,
{
    pub async fn execute(
        &self,
        user_id: Uuid,
        target_id: Uuid,
        relation: ReactionRelation,
        status: ReactionStatus,
    ) -> AppResult<ReactionOutcome> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(AppError::Unauthorized)?;
        let exists = match relation {
            ReactionRelation::Post => self.posts.get_by_id(target_id).await?.is_some(),
            ReactionRelation::Comment => self.comments.get_by_id(target_id).await?.is_some(),
        };
        if !exists {
            return Err(AppError::NotFound(target_label(relation)));
        }

        let req = ReactionRequest {
            user_id,
            user_login: user.login,
            target_id,
            relation,
            status,
        };
        let outcome = self
            .reactions
            .apply(&req)
            .await?
            .ok_or(AppError::NotFound(target_label(relation)))?;
        tracing::debug!(
            user_id = %user_id,
            target_id = %target_id,
            status = status.as_str(),
            ?outcome,
            "reaction_applied"
        );
        Ok(outcome)
    }
}
