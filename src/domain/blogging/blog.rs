use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct Blog {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub website_url: String,
    pub is_membership: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Blog {
    pub fn new(name: String, description: String, website_url: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            description,
            website_url,
            is_membership: false,
            created_at: chrono::Utc::now(),
        }
    }
}
