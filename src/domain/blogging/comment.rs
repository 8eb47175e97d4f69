use uuid::Uuid;

use crate::domain::blogging::reaction::Reaction;

#[derive(Debug, Clone)]
pub struct Comment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub commentator_id: Uuid,
    pub commentator_login: String,
    pub content: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub reactions: Vec<Reaction>,
}

impl Comment {
    pub fn new(post_id: Uuid, commentator_id: Uuid, commentator_login: String, content: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            post_id,
            commentator_id,
            commentator_login,
            content,
            created_at: chrono::Utc::now(),
            reactions: Vec::new(),
        }
    }

    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.commentator_id == user_id
    }
}
