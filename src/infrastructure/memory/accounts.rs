use async_trait::async_trait;
use uuid::Uuid;

use super::{MemoryStore, State, contains_ci, paginate};
use crate::application::dto::accounts::{UserFilter, UserSortBy};
use crate::application::dto::pagination::{Page, PageQuery};
use crate::application::ports::device_session_repository::DeviceSessionRepository;
use crate::application::ports::maintenance_repository::MaintenanceRepository;
use crate::application::ports::user_repository::UserRepository;
use crate::domain::accounts::device_session::DeviceSession;
use crate::domain::accounts::user::User;

fn find_user(state: &State, pred: impl Fn(&User) -> bool) -> Option<User> {
    state.users.values().find(|u| pred(u)).cloned()
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn insert(&self, user: &User) -> anyhow::Result<()> {
        let mut state = self.state.write().await;
        if state
            .users
            .values()
            .any(|u| u.login == user.login || u.email == user.email)
        {
            anyhow::bail!("user with login or email already exists");
        }
        state.users.insert(user.id, user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        Ok(self.state.read().await.users.get(&id).cloned())
    }

    async fn find_by_login_or_email(
        &self,
        login: &str,
        email: &str,
    ) -> anyhow::Result<Option<User>> {
        let state = self.state.read().await;
        Ok(find_user(&state, |u| u.login == login || u.email == email))
    }

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        let state = self.state.read().await;
        Ok(find_user(&state, |u| u.email == email))
    }

    async fn find_by_confirmation_code(&self, code: &str) -> anyhow::Result<Option<User>> {
        let state = self.state.read().await;
        Ok(find_user(&state, |u| {
            u.confirmation.code.as_deref() == Some(code)
        }))
    }

    async fn find_by_recovery_code(&self, code: &str) -> anyhow::Result<Option<User>> {
        let state = self.state.read().await;
        Ok(find_user(&state, |u| u.recovery.code.as_deref() == Some(code)))
    }

    async fn update(&self, user: &User) -> anyhow::Result<bool> {
        let mut state = self.state.write().await;
        let Some(stored) = state.users.get_mut(&user.id) else {
            return Ok(false);
        };
        stored.password_hash = user.password_hash.clone();
        stored.confirmation = user.confirmation.clone();
        stored.recovery = user.recovery.clone();
        Ok(true)
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        Ok(self.state.write().await.users.remove(&id).is_some())
    }

    async fn list(
        &self,
        filter: &UserFilter,
        query: &PageQuery<UserSortBy>,
    ) -> anyhow::Result<Page<User>> {
        let state = self.state.read().await;
        let login = filter.login_term.as_deref();
        let email = filter.email_term.as_deref();
        let items: Vec<User> = state
            .users
            .values()
            .filter(|u| match (login, email) {
                (None, None) => true,
                (l, e) => {
                    l.is_some_and(|t| contains_ci(&u.login, t))
                        || e.is_some_and(|t| contains_ci(&u.email, t))
                }
            })
            .cloned()
            .collect();
        Ok(paginate(items, query, |u| u.id, |a, b| match query.sort_by {
            UserSortBy::CreatedAt => a.created_at.cmp(&b.created_at),
            UserSortBy::Login => a.login.cmp(&b.login),
            UserSortBy::Email => a.email.cmp(&b.email),
        }))
    }
}

#[async_trait]
impl DeviceSessionRepository for MemoryStore {
    async fn insert(&self, session: &DeviceSession) -> anyhow::Result<()> {
        let mut state = self.state.write().await;
        if state.sessions.iter().any(|s| s.device_id == session.device_id) {
            anyhow::bail!("device session {} already exists", session.device_id);
        }
        state.sessions.push(session.clone());
        Ok(())
    }

    async fn find_by_device_id(&self, device_id: Uuid) -> anyhow::Result<Option<DeviceSession>> {
        let state = self.state.read().await;
        Ok(state
            .sessions
            .iter()
            .find(|s| s.device_id == device_id)
            .cloned())
    }

    async fn update_issuance(
        &self,
        device_id: Uuid,
        current_issued_at: i64,
        issued_at: i64,
        expires_at: i64,
    ) -> anyhow::Result<bool> {
        let mut state = self.state.write().await;
        match state
            .sessions
            .iter_mut()
            .find(|s| s.device_id == device_id && s.issued_at == current_issued_at)
        {
            Some(session) => {
                session.issued_at = issued_at;
                session.expires_at = expires_at;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, device_id: Uuid) -> anyhow::Result<bool> {
        let mut state = self.state.write().await;
        let before = state.sessions.len();
        state.sessions.retain(|s| s.device_id != device_id);
        Ok(state.sessions.len() < before)
    }

    async fn delete_all_for_user(&self, user_id: Uuid) -> anyhow::Result<u64> {
        let mut state = self.state.write().await;
        let before = state.sessions.len();
        state.sessions.retain(|s| s.user_id != user_id);
        Ok((before - state.sessions.len()) as u64)
    }

    async fn delete_all_except(&self, user_id: Uuid, device_id: Uuid) -> anyhow::Result<u64> {
        let mut state = self.state.write().await;
        let before = state.sessions.len();
        state
            .sessions
            .retain(|s| s.user_id != user_id || s.device_id == device_id);
        Ok((before - state.sessions.len()) as u64)
    }

    async fn list_active_for_user(
        &self,
        user_id: Uuid,
        now: i64,
    ) -> anyhow::Result<Vec<DeviceSession>> {
        let state = self.state.read().await;
        Ok(state
            .sessions
            .iter()
            .filter(|s| s.user_id == user_id && s.is_active(now))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl MaintenanceRepository for MemoryStore {
    async fn ping(&self) -> anyhow::Result<()> {
        Ok(())
    }

    async fn wipe_all(&self) -> anyhow::Result<()> {
        *self.state.write().await = State::default();
        Ok(())
    }
}
