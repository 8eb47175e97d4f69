use async_trait::async_trait;

use crate::domain::blogging::reaction::{ReactionOutcome, ReactionRequest};

#[async_trait]
pub trait ReactionRepository: Send + Sync {
    /// Runs [`crate::domain::blogging::reaction::reconcile`] against the user's
    /// mirror and the target's reaction list and stores both as one atomic
    /// write. Returns `None` if the user or the target vanished meanwhile.
    async fn apply(&self, req: &ReactionRequest) -> anyhow::Result<Option<ReactionOutcome>>;
}
