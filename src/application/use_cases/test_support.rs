use std::sync::Mutex;

use async_trait::async_trait;

use crate::application::dto::blogging::{BlogInput, PostInput};
use crate::application::ports::email_sender::{EmailMessage, EmailSender};
use crate::application::ports::user_repository::UserRepository;
use crate::application::services::passwords::hash_password;
use crate::application::services::tokens::TokenService;
use crate::application::use_cases::blogs::create_blog::CreateBlog;
use crate::application::use_cases::posts::create_post::CreatePost;
use crate::domain::accounts::user::User;
use crate::domain::blogging::post::Post;
use crate::infrastructure::memory::MemoryStore;

#[derive(Default)]
pub struct RecordingMailer {
    pub sent: Mutex<Vec<EmailMessage>>,
}

impl RecordingMailer {
    pub fn last(&self) -> Option<EmailMessage> {
        self.sent.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl EmailSender for RecordingMailer {
    async fn send(&self, message: &EmailMessage) -> anyhow::Result<()> {
        self.sent.lock().unwrap().push(message.clone());
        Ok(())
    }
}

pub fn tokens() -> TokenService {
    TokenService::new("access-secret", "refresh-secret", 600, 1200)
}

pub async fn seed_user(store: &MemoryStore, login: &str, password: &str) -> User {
    let user = User::new_confirmed(
        login.to_string(),
        format!("{login}@example.com"),
        hash_password(password).unwrap(),
    );
    UserRepository::insert(store, &user).await.unwrap();
    user
}

pub async fn seed_post(store: &MemoryStore) -> Post {
    let blog = CreateBlog { repo: store }
        .execute(BlogInput {
            name: "blog".into(),
            description: "about".into(),
            website_url: "https://blog.example.com".into(),
        })
        .await
        .unwrap();
    CreatePost {
        blogs: store,
        posts: store,
    }
    .execute(PostInput {
        title: "title".into(),
        short_description: "short".into(),
        content: "content".into(),
        blog_id: blog.id,
    })
    .await
    .unwrap()
}
