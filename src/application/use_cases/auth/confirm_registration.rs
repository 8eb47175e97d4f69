use chrono::Utc;

use crate::application::error::{AppError, AppResult};
use crate::application::ports::user_repository::UserRepository;
use crate::domain::accounts::user::ConfirmationError;

pub struct ConfirmRegistration<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: UserRepository + ?Sized> ConfirmRegistration<'a, R> {
    pub async fn execute(&self, code: &str) -> AppResult<()> {
        let mut user = self
            .repo
            .find_by_confirmation_code(code)
            .await?
            .ok_or_else(|| AppError::field("code", "Confirmation code is incorrect"))?;
        user.confirm(code, Utc::now()).map_err(|err| {
            let message = match err {
                ConfirmationError::Mismatch => "Confirmation code is incorrect",
                ConfirmationError::AlreadyConfirmed => "Email is already confirmed",
                ConfirmationError::Expired => "Confirmation code is expired",
            };
            AppError::field("code", message)
        })?;
        self.repo.update(&user).await?;
        Ok(())
    }
}
