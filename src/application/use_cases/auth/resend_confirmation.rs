use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::application::error::{AppError, AppResult};
use crate::application::ports::email_sender::EmailSender;
use crate::application::ports::user_repository::UserRepository;
use crate::application::services::emails::{confirmation_email, deliver};

pub struct ResendConfirmation<'a, R, M>
where
    R: UserRepository + ?Sized,
    M: EmailSender + ?Sized,
{
    pub repo: &'a R,
    pub mailer: &'a M,
    pub code_ttl: Duration,
    pub base_url: &'a str,
}

impl<'a, R, M> ResendConfirmation<'a, R, M>
where
    R: UserRepository + ?Sized,
    M: EmailSender + ?Sized,
{
    pub async fn execute(&self, email: &str) -> AppResult<()> {
        let mut user = self
            .repo
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::field("email", "User with this email not found"))?;
        if user.confirmation.is_confirmed {
            return Err(AppError::field("email", "Email is already confirmed"));
        }
        let code = Uuid::new_v4().to_string();
        user.renew_confirmation(code.clone(), Utc::now() + self.code_ttl);
        self.repo.update(&user).await?;
        deliver(self.mailer, confirmation_email(&user.email, self.base_url, &code)).await;
        Ok(())
    }
}
