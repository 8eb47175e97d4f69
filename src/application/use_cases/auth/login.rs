use chrono::Utc;
use uuid::Uuid;

use crate::application::dto::accounts::{ClientInfo, TokenPair};
use crate::application::error::{AppError, AppResult};
use crate::application::ports::device_session_repository::DeviceSessionRepository;
use crate::application::ports::user_repository::UserRepository;
use crate::application::services::passwords::verify_password;
use crate::application::services::tokens::TokenService;
use crate::domain::accounts::device_session::DeviceSession;

pub struct Login<'a, U, S>
where
    U: UserRepository + ?Sized,
    S: DeviceSessionRepository + ?Sized,
{
    pub users: &'a U,
    pub sessions: &'a S,
    pub tokens: &'a TokenService,
}

#[derive(Debug, Clone)]
pub struct LoginRequest {
    pub login_or_email: String,
    pub password: String,
}

impl<'a, U, S> Login<'a, U, S>
where
    U: UserRepository + ?Sized,
    S: DeviceSessionRepository + ?Sized,
{
    /// Opens a new device session. Unknown users and wrong passwords are
    /// indistinguishable to the caller.
    pub async fn execute(&self, req: &LoginRequest, client: ClientInfo) -> AppResult<TokenPair> {
        let user = self
            .users
            .find_by_login_or_email(&req.login_or_email, &req.login_or_email)
            .await?
            .ok_or(AppError::Unauthorized)?;
        if !verify_password(&req.password, &user.password_hash) {
            return Err(AppError::Unauthorized);
        }

        let device_id = Uuid::new_v4();
        let now = Utc::now().timestamp();
        let pair = self.tokens.issue_pair(user.id, device_id, now)?;
        let session = DeviceSession {
            id: Uuid::new_v4(),
            user_id: user.id,
            device_id,
            ip: client.ip,
            device_name: client.device_name,
            issued_at: now,
            expires_at: pair.refresh_expires_at,
        };
        self.sessions.insert(&session).await?;
        tracing::info!(user_id = %user.id, device_id = %device_id, "session_opened");
        Ok(pair)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::auth::authenticate_refresh::AuthenticateRefresh;
    use crate::application::use_cases::auth::logout::Logout;
    use crate::application::use_cases::auth::refresh_session::RefreshSession;
    use crate::application::use_cases::test_support::{seed_user, tokens};
    use crate::infrastructure::memory::MemoryStore;

    fn client() -> ClientInfo {
        ClientInfo {
            ip: "10.0.0.1".into(),
            device_name: "test-agent".into(),
        }
    }

    fn request(login_or_email: &str, password: &str) -> LoginRequest {
        LoginRequest {
            login_or_email: login_or_email.into(),
            password: password.into(),
        }
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_user_are_unauthorized() {
        let store = MemoryStore::new();
        let tokens = tokens();
        seed_user(&store, "alice", "secret1").await;
        let uc = Login {
            users: &store,
            sessions: &store,
            tokens: &tokens,
        };
        assert!(matches!(
            uc.execute(&request("alice", "nope"), client()).await,
            Err(AppError::Unauthorized)
        ));
        assert!(matches!(
            uc.execute(&request("nobody", "secret1"), client()).await,
            Err(AppError::Unauthorized)
        ));
        assert!(uc.execute(&request("alice@example.com", "secret1"), client()).await.is_ok());
    }

    #[tokio::test]
    async fn refresh_rotates_and_retires_the_previous_token() {
        let store = MemoryStore::new();
        let tokens = tokens();
        let alice = seed_user(&store, "alice", "secret1").await;
        let pair = Login {
            users: &store,
            sessions: &store,
            tokens: &tokens,
        }
        .execute(&request("alice", "secret1"), client())
        .await
        .unwrap();
        assert_eq!(tokens.verify_access(&pair.access_token), Some(alice.id));

        let auth = AuthenticateRefresh {
            sessions: &store,
            tokens: &tokens,
        };
        let current = auth.execute(&pair.refresh_token).await.unwrap();
        let rotated = RefreshSession {
            sessions: &store,
            tokens: &tokens,
        }
        .execute(&current)
        .await
        .unwrap();
        assert_ne!(rotated.refresh_token, pair.refresh_token);

        assert!(matches!(
            auth.execute(&pair.refresh_token).await,
            Err(AppError::Unauthorized)
        ));
        let next = auth.execute(&rotated.refresh_token).await.unwrap();
        assert_eq!(next.device_id, current.device_id);
        assert!(next.issued_at > current.issued_at);

        Logout { sessions: &store }.execute(&next).await.unwrap();
        assert!(matches!(
            auth.execute(&rotated.refresh_token).await,
            Err(AppError::Unauthorized)
        ));
    }

    #[tokio::test]
    async fn a_refresh_token_rotates_only_once() {
        let store = MemoryStore::new();
        let tokens = tokens();
        seed_user(&store, "alice", "secret1").await;
        let pair = Login {
            users: &store,
            sessions: &store,
            tokens: &tokens,
        }
        .execute(&request("alice", "secret1"), client())
        .await
        .unwrap();

        let auth = AuthenticateRefresh {
            sessions: &store,
            tokens: &tokens,
        };
        // Both requests pass authentication before either rotates.
        let first = auth.execute(&pair.refresh_token).await.unwrap();
        let second = auth.execute(&pair.refresh_token).await.unwrap();

        let refresh = RefreshSession {
            sessions: &store,
            tokens: &tokens,
        };
        let rotated = refresh.execute(&first).await.unwrap();
        assert!(matches!(
            refresh.execute(&second).await,
            Err(AppError::Unauthorized)
        ));
        assert!(auth.execute(&rotated.refresh_token).await.is_ok());
    }
}
