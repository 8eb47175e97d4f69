use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::application::dto::accounts::NewUser;
use crate::application::error::AppResult;
use crate::application::ports::email_sender::EmailSender;
use crate::application::ports::user_repository::UserRepository;
use crate::application::services::emails::{confirmation_email, deliver};
use crate::application::services::passwords::hash_password;
use crate::application::use_cases::users::create_user::ensure_unique;
use crate::domain::accounts::user::User;

pub struct Register<'a, R, M>
where
    R: UserRepository + ?Sized,
    M: EmailSender + ?Sized,
{
    pub repo: &'a R,
    pub mailer: &'a M,
    pub code_ttl: Duration,
    pub base_url: &'a str,
}

impl<'a, R, M> Register<'a, R, M>
where
    R: UserRepository + ?Sized,
    M: EmailSender + ?Sized,
{
    pub async fn execute(&self, input: NewUser) -> AppResult<User> {
        ensure_unique(self.repo, &input.login, &input.email).await?;
        let hash = hash_password(&input.password)?;
        let code = Uuid::new_v4().to_string();
        let user = User::new_unconfirmed(
            input.login,
            input.email,
            hash,
            code.clone(),
            Utc::now() + self.code_ttl,
        );
        self.repo.insert(&user).await?;
        tracing::info!(user_id = %user.id, "user_registered");
        deliver(self.mailer, confirmation_email(&user.email, self.base_url, &code)).await;
        Ok(user)
    }
}
