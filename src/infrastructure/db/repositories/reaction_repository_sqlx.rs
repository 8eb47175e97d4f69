use async_trait::async_trait;
use sqlx::Row;
use sqlx::types::Json;

use crate::application::ports::reaction_repository::ReactionRepository;
use crate::domain::blogging::reaction::{
    Reaction, ReactionOutcome, ReactionRelation, ReactionRequest, UserReaction, reconcile,
};
use crate::infrastructure::db::PgPool;

pub struct SqlxReactionRepository {
    pub pool: PgPool,
}

impl SqlxReactionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn target_table(relation: ReactionRelation) -> &'static str {
    match relation {
        ReactionRelation::Post => "posts",
        ReactionRelation::Comment => "comments",
    }
}

#[async_trait]
impl ReactionRepository for SqlxReactionRepository {
    async fn apply(&self, req: &ReactionRequest) -> anyhow::Result<Option<ReactionOutcome>> {
        let table = target_table(req.relation);
        let mut tx = self.pool.begin().await?;

        // Lock order is always user row first, then target row.
        let Some(user_row) = sqlx::query("SELECT reactions FROM users WHERE id = $1 FOR UPDATE")
            .bind(req.user_id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };
        let select_target = format!("SELECT reactions FROM {table} WHERE id = $1 FOR UPDATE");
        let Some(target_row) = sqlx::query(&select_target)
            .bind(req.target_id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        let Json(mut mine): Json<Vec<UserReaction>> = user_row.get("reactions");
        let Json(mut theirs): Json<Vec<Reaction>> = target_row.get("reactions");
        let outcome = reconcile(&mut mine, &mut theirs, req, chrono::Utc::now());
        if !outcome.is_changed() {
            tx.rollback().await?;
            return Ok(Some(outcome));
        }

        sqlx::query("UPDATE users SET reactions = $2 WHERE id = $1")
            .bind(req.user_id)
            .bind(Json(&mine))
            .execute(&mut *tx)
            .await?;
        let update_target = format!("UPDATE {table} SET reactions = $2 WHERE id = $1");
        sqlx::query(&update_target)
            .bind(req.target_id)
            .bind(Json(&theirs))
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(Some(outcome))
    }
}
