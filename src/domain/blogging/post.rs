use uuid::Uuid;

use crate::domain::blogging::reaction::{Reaction, ReactionStatus};

#[derive(Debug, Clone)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub short_description: String,
    pub content: String,
    pub blog_id: Uuid,
    pub blog_name: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub reactions: Vec<Reaction>,
}

impl Post {
    pub fn new(
        title: String,
        short_description: String,
        content: String,
        blog_id: Uuid,
        blog_name: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            short_description,
            content,
            blog_id,
            blog_name,
            created_at: chrono::Utc::now(),
            reactions: Vec::new(),
        }
    }

    /// Up to `limit` likes, most recent first.
    pub fn newest_likes(&self, limit: usize) -> Vec<&Reaction> {
        let mut likes: Vec<&Reaction> = self
            .reactions
            .iter()
            .filter(|r| r.status == ReactionStatus::Like)
            .collect();
        likes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        likes.truncate(limit);
        likes
    }
}
