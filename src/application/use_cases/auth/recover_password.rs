use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::application::ports::email_sender::EmailSender;
use crate::application::ports::user_repository::UserRepository;
use crate::application::services::emails::{deliver, recovery_email};

pub struct RecoverPassword<'a, R, M>
where
    R: UserRepository + ?Sized,
    M: EmailSender + ?Sized,
{
    pub repo: &'a R,
    pub mailer: &'a M,
    pub code_ttl: Duration,
    pub base_url: &'a str,
}

impl<'a, R, M> RecoverPassword<'a, R, M>
where
    R: UserRepository + ?Sized,
    M: EmailSender + ?Sized,
{
    // Succeeds for unknown addresses too, so callers cannot probe for accounts.
    pub async fn execute(&self, email: &str) -> anyhow::Result<()> {
        let Some(mut user) = self.repo.find_by_email(email).await? else {
            return Ok(());
        };
        let code = Uuid::new_v4().to_string();
        user.start_recovery(code.clone(), Utc::now() + self.code_ttl);
        self.repo.update(&user).await?;
        deliver(self.mailer, recovery_email(&user.email, self.base_url, &code)).await;
        Ok(())
    }
}
