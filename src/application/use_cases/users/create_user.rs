use crate::application::dto::accounts::NewUser;
use crate::application::error::{AppError, AppResult};
use crate::application::ports::user_repository::UserRepository;
use crate::application::services::passwords::hash_password;
use crate::domain::accounts::user::User;

/// Rejects a login or email that is already taken, naming the clashing field.
pub async fn ensure_unique<R: UserRepository + ?Sized>(
    repo: &R,
    login: &str,
    email: &str,
) -> AppResult<()> {
    match repo.find_by_login_or_email(login, email).await? {
        Some(existing) if existing.login == login => {
            Err(AppError::field("login", "User with this login already exists"))
        }
        Some(_) => Err(AppError::field("email", "User with this email already exists")),
        None => Ok(()),
    }
}

/// Administrative creation: the account is confirmed immediately.
pub struct CreateUser<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: UserRepository + ?Sized> CreateUser<'a, R> {
    pub async fn execute(&self, input: NewUser) -> AppResult<User> {
        ensure_unique(self.repo, &input.login, &input.email).await?;
        let hash = hash_password(&input.password)?;
        let user = User::new_confirmed(input.login, input.email, hash);
        self.repo.insert(&user).await?;
        Ok(user)
    }
}
