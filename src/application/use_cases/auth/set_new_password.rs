use chrono::Utc;

use crate::application::error::{AppError, AppResult};
use crate::application::ports::user_repository::UserRepository;
use crate::application::services::passwords::hash_password;

pub struct SetNewPassword<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: UserRepository + ?Sized> SetNewPassword<'a, R> {
    pub async fn execute(&self, recovery_code: &str, new_password: &str) -> AppResult<()> {
        let mut user = self
            .repo
            .find_by_recovery_code(recovery_code)
            .await?
            .ok_or_else(|| AppError::field("recoveryCode", "Recovery code is incorrect"))?;
        let hash = hash_password(new_password)?;
        if !user.complete_recovery(recovery_code, hash, Utc::now()) {
            return Err(AppError::field("recoveryCode", "Recovery code is expired"));
        }
        self.repo.update(&user).await?;
        tracing::info!(user_id = %user.id, "password_changed");
        Ok(())
    }
}
