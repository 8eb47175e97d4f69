use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::blogging::reaction::UserReaction;

#[derive(Debug, Clone)]
pub struct EmailConfirmation {
    pub is_confirmed: bool,
    pub code: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default)]
pub struct PasswordRecovery {
    pub code: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub login: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub confirmation: EmailConfirmation,
    pub recovery: PasswordRecovery,
    pub reactions: Vec<UserReaction>,
}

/// Why a confirmation code was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmationError {
    Mismatch,
    AlreadyConfirmed,
    Expired,
}

impl User {
    /// A user created by an administrator: confirmed from the start.
    pub fn new_confirmed(login: String, email: String, password_hash: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            login,
            email,
            password_hash,
            created_at: Utc::now(),
            confirmation: EmailConfirmation {
                is_confirmed: true,
                code: None,
                expires_at: None,
            },
            recovery: PasswordRecovery::default(),
            reactions: Vec::new(),
        }
    }

    /// A self-registered user waiting for email confirmation.
    pub fn new_unconfirmed(
        login: String,
        email: String,
        password_hash: String,
        code: String,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            confirmation: EmailConfirmation {
                is_confirmed: false,
                code: Some(code),
                expires_at: Some(expires_at),
            },
            ..Self::new_confirmed(login, email, password_hash)
        }
    }

    // The code is kept after confirmation so a replay reports AlreadyConfirmed.
    pub fn confirm(&mut self, code: &str, now: DateTime<Utc>) -> Result<(), ConfirmationError> {
        if self.confirmation.is_confirmed {
            return Err(ConfirmationError::AlreadyConfirmed);
        }
        if self.confirmation.code.as_deref() != Some(code) {
            return Err(ConfirmationError::Mismatch);
        }
        if self.confirmation.expires_at.is_some_and(|exp| exp < now) {
            return Err(ConfirmationError::Expired);
        }
        self.confirmation.is_confirmed = true;
        Ok(())
    }

    pub fn renew_confirmation(&mut self, code: String, expires_at: DateTime<Utc>) {
        self.confirmation.code = Some(code);
        self.confirmation.expires_at = Some(expires_at);
    }

    pub fn start_recovery(&mut self, code: String, expires_at: DateTime<Utc>) {
        self.recovery = PasswordRecovery {
            code: Some(code),
            expires_at: Some(expires_at),
        };
    }

    /// Consumes the recovery code; returns false when it does not match or expired.
    pub fn complete_recovery(&mut self, code: &str, new_hash: String, now: DateTime<Utc>) -> bool {
        let valid = self.recovery.code.as_deref() == Some(code)
            && self.recovery.expires_at.is_some_and(|exp| exp >= now);
        if !valid {
            return false;
        }
        self.password_hash = new_hash;
        self.recovery = PasswordRecovery::default();
        true
    }
}
