use uuid::Uuid;

use crate::application::ports::user_repository::UserRepository;
use crate::domain::blogging::reaction::UserReaction;

/// The viewer's reaction mirror; empty for anonymous or unknown viewers.
pub async fn viewer_reactions<U: UserRepository + ?Sized>(
    users: &U,
    viewer: Option<Uuid>,
) -> anyhow::Result<Vec<UserReaction>> {
    let Some(id) = viewer else {
        return Ok(Vec::new());
    };
    Ok(users
        .find_by_id(id)
        .await?
        .map(|u| u.reactions)
        .unwrap_or_default())
}
