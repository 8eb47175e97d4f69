use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReactionStatus {
    Like,
    Dislike,
    None,
}

impl ReactionStatus {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "Like" => Some(Self::Like),
            "Dislike" => Some(Self::Dislike),
            "None" => Some(Self::None),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Like => "Like",
            Self::Dislike => "Dislike",
            Self::None => "None",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReactionRelation {
    Post,
    Comment,
}

/// A reaction as embedded in the target post or comment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reaction {
    pub id: Uuid,
    pub user_id: Uuid,
    pub user_login: String,
    pub target_id: Uuid,
    pub status: ReactionStatus,
    pub relation: ReactionRelation,
    pub created_at: DateTime<Utc>,
}

/// Mirror of a [`Reaction`] kept on the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserReaction {
    pub id: Uuid,
    pub target_id: Uuid,
    pub status: ReactionStatus,
    pub relation: ReactionRelation,
}

impl UserReaction {
    fn mirror(reaction: &Reaction) -> Self {
        Self {
            id: reaction.id,
            target_id: reaction.target_id,
            status: reaction.status,
            relation: reaction.relation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReactionCounts {
    pub likes: i64,
    pub dislikes: i64,
}

pub fn count(reactions: &[Reaction]) -> ReactionCounts {
    let likes = reactions
        .iter()
        .filter(|r| r.status == ReactionStatus::Like)
        .count() as i64;
    let dislikes = reactions
        .iter()
        .filter(|r| r.status == ReactionStatus::Dislike)
        .count() as i64;
    ReactionCounts { likes, dislikes }
}

/// Status the user currently holds on `target_id`, `None` when absent.
pub fn status_for(user_reactions: &[UserReaction], target_id: Uuid) -> ReactionStatus {
    user_reactions
        .iter()
        .find(|r| r.target_id == target_id)
        .map(|r| r.status)
        .unwrap_or(ReactionStatus::None)
}

#[derive(Debug, Clone)]
pub struct ReactionRequest {
    pub user_id: Uuid,
    pub user_login: String,
    pub target_id: Uuid,
    pub relation: ReactionRelation,
    pub status: ReactionStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReactionOutcome {
    Unchanged,
    Created,
    Updated,
    Removed,
}

impl ReactionOutcome {
    pub fn is_changed(&self) -> bool {
        !matches!(self, Self::Unchanged)
    }
}

/// Applies the requested status to both copies of the user's reaction.
///
/// The user's mirror decides the current state. Whenever a write happens, the
/// target list ends up with exactly one entry for this user (or none on
/// removal), even if the two copies had drifted apart before.
pub fn reconcile(
    user_reactions: &mut Vec<UserReaction>,
    target_reactions: &mut Vec<Reaction>,
    req: &ReactionRequest,
    now: DateTime<Utc>,
) -> ReactionOutcome {
    let current = user_reactions
        .iter()
        .find(|r| r.target_id == req.target_id)
        .map(|r| (r.id, r.status));

    match current {
        None if req.status == ReactionStatus::None => ReactionOutcome::Unchanged,
        None => {
            let reaction = Reaction {
                id: Uuid::new_v4(),
                user_id: req.user_id,
                user_login: req.user_login.clone(),
                target_id: req.target_id,
                status: req.status,
                relation: req.relation,
                created_at: now,
            };
            target_reactions.retain(|r| r.user_id != req.user_id);
            user_reactions.push(UserReaction::mirror(&reaction));
            target_reactions.push(reaction);
            ReactionOutcome::Created
        }
        Some((_, status)) if status == req.status => ReactionOutcome::Unchanged,
        Some(_) if req.status == ReactionStatus::None => {
            user_reactions.retain(|r| r.target_id != req.target_id);
            target_reactions.retain(|r| r.user_id != req.user_id);
            ReactionOutcome::Removed
        }
        Some((id, _)) => {
            let kept = target_reactions
                .iter()
                .find(|r| r.user_id == req.user_id)
                .cloned();
            target_reactions.retain(|r| r.user_id != req.user_id);
            let mut reaction = kept.unwrap_or_else(|| Reaction {
                id,
                user_id: req.user_id,
                user_login: req.user_login.clone(),
                target_id: req.target_id,
                status: req.status,
                relation: req.relation,
                created_at: now,
            });
            reaction.status = req.status;
            target_reactions.push(reaction);

            user_reactions.retain(|r| r.target_id != req.target_id || r.id == id);
            if let Some(mirror) = user_reactions.iter_mut().find(|r| r.id == id) {
                mirror.status = req.status;
            }
            ReactionOutcome::Updated
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(user_id: Uuid, target_id: Uuid, status: ReactionStatus) -> ReactionRequest {
        ReactionRequest {
            user_id,
            user_login: "alice".into(),
            target_id,
            relation: ReactionRelation::Post,
            status,
        }
    }

    #[test]
    fn none_without_existing_reaction_is_noop() {
        let (user, target) = (Uuid::new_v4(), Uuid::new_v4());
        let mut mine = Vec::new();
        let mut theirs = Vec::new();
        let out = reconcile(
            &mut mine,
            &mut theirs,
            &request(user, target, ReactionStatus::None),
            Utc::now(),
        );
        assert_eq!(out, ReactionOutcome::Unchanged);
        assert!(mine.is_empty());
        assert!(theirs.is_empty());
    }

    #[test]
    fn like_creates_mirrored_entries() {
        let (user, target) = (Uuid::new_v4(), Uuid::new_v4());
        let mut mine = Vec::new();
        let mut theirs = Vec::new();
        let out = reconcile(
            &mut mine,
            &mut theirs,
            &request(user, target, ReactionStatus::Like),
            Utc::now(),
        );
        assert_eq!(out, ReactionOutcome::Created);
        assert_eq!(mine.len(), 1);
        assert_eq!(theirs.len(), 1);
        assert_eq!(mine[0].id, theirs[0].id);
        assert_eq!(theirs[0].user_login, "alice");
        assert_eq!(status_for(&mine, target), ReactionStatus::Like);
    }

    #[test]
    fn repeating_the_same_status_changes_nothing() {
        let (user, target) = (Uuid::new_v4(), Uuid::new_v4());
        let mut mine = Vec::new();
        let mut theirs = Vec::new();
        let now = Utc::now();
        reconcile(&mut mine, &mut theirs, &request(user, target, ReactionStatus::Dislike), now);
        let snapshot = theirs.clone();
        let out = reconcile(
            &mut mine,
            &mut theirs,
            &request(user, target, ReactionStatus::Dislike),
            now,
        );
        assert_eq!(out, ReactionOutcome::Unchanged);
        assert_eq!(theirs, snapshot);
    }

    #[test]
    fn flipping_status_updates_in_place() {
        let (user, target) = (Uuid::new_v4(), Uuid::new_v4());
        let mut mine = Vec::new();
        let mut theirs = Vec::new();
        let created = Utc::now();
        reconcile(&mut mine, &mut theirs, &request(user, target, ReactionStatus::Like), created);
        let id = mine[0].id;
        let out = reconcile(
            &mut mine,
            &mut theirs,
            &request(user, target, ReactionStatus::Dislike),
            created + chrono::Duration::seconds(5),
        );
        assert_eq!(out, ReactionOutcome::Updated);
        assert_eq!(mine.len(), 1);
        assert_eq!(theirs.len(), 1);
        assert_eq!(mine[0].id, id);
        assert_eq!(theirs[0].id, id);
        assert_eq!(theirs[0].status, ReactionStatus::Dislike);
        assert_eq!(theirs[0].created_at, created);
        assert_eq!(count(&theirs), ReactionCounts { likes: 0, dislikes: 1 });
    }

    #[test]
    fn none_removes_both_copies() {
        let (user, target) = (Uuid::new_v4(), Uuid::new_v4());
        let other = Uuid::new_v4();
        let mut mine = Vec::new();
        let mut theirs = Vec::new();
        let now = Utc::now();
        reconcile(&mut mine, &mut theirs, &request(user, target, ReactionStatus::Like), now);
        let mut other_mine = Vec::new();
        reconcile(&mut other_mine, &mut theirs, &request(other, target, ReactionStatus::Like), now);

        let out = reconcile(&mut mine, &mut theirs, &request(user, target, ReactionStatus::None), now);
        assert_eq!(out, ReactionOutcome::Removed);
        assert!(mine.is_empty());
        assert_eq!(theirs.len(), 1);
        assert_eq!(theirs[0].user_id, other);
    }

    #[test]
    fn flip_repairs_a_target_missing_the_entry() {
        let (user, target) = (Uuid::new_v4(), Uuid::new_v4());
        let mut mine = vec![UserReaction {
            id: Uuid::new_v4(),
            target_id: target,
            status: ReactionStatus::Like,
            relation: ReactionRelation::Post,
        }];
        let mut theirs = Vec::new();
        let out = reconcile(
            &mut mine,
            &mut theirs,
            &request(user, target, ReactionStatus::Dislike),
            Utc::now(),
        );
        assert_eq!(out, ReactionOutcome::Updated);
        assert_eq!(theirs.len(), 1);
        assert_eq!(theirs[0].id, mine[0].id);
        assert_eq!(theirs[0].status, ReactionStatus::Dislike);
    }

    #[test]
    fn create_drops_stray_target_entries_for_the_user() {
        let (user, target) = (Uuid::new_v4(), Uuid::new_v4());
        let mut mine = Vec::new();
        let mut theirs = vec![Reaction {
            id: Uuid::new_v4(),
            user_id: user,
            user_login: "alice".into(),
            target_id: target,
            status: ReactionStatus::Dislike,
            relation: ReactionRelation::Post,
            created_at: Utc::now(),
        }];
        reconcile(&mut mine, &mut theirs, &request(user, target, ReactionStatus::Like), Utc::now());
        assert_eq!(theirs.len(), 1);
        assert_eq!(theirs[0].status, ReactionStatus::Like);
        assert_eq!(theirs[0].id, mine[0].id);
    }

    #[test]
    fn parse_accepts_only_known_statuses() {
        assert_eq!(ReactionStatus::parse("Like"), Some(ReactionStatus::Like));
        assert_eq!(ReactionStatus::parse("None"), Some(ReactionStatus::None));
        assert_eq!(ReactionStatus::parse("like"), None);
    }
}
