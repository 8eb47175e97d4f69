use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::dto::accounts::TokenPair;

#[derive(Debug, Serialize, Deserialize)]
pub struct AccessClaims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RefreshClaims {
    pub sub: String,
    pub device_id: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerifiedRefresh {
    pub user_id: Uuid,
    pub device_id: Uuid,
    pub issued_at: i64,
    pub expires_at: i64,
}

/// Issues and verifies the HS256 access/refresh token pair.
#[derive(Clone)]
pub struct TokenService {
    access_secret: String,
    refresh_secret: String,
    access_ttl_secs: i64,
    refresh_ttl_secs: i64,
}

impl TokenService {
    pub fn new(
        access_secret: impl Into<String>,
        refresh_secret: impl Into<String>,
        access_ttl_secs: i64,
        refresh_ttl_secs: i64,
    ) -> Self {
        Self {
            access_secret: access_secret.into(),
            refresh_secret: refresh_secret.into(),
            access_ttl_secs,
            refresh_ttl_secs,
        }
    }

    pub fn refresh_ttl_secs(&self) -> i64 {
        self.refresh_ttl_secs
    }

    pub fn issue_access(&self, user_id: Uuid, now: i64) -> anyhow::Result<String> {
        let claims = AccessClaims {
            sub: user_id.to_string(),
            iat: now,
            exp: now + self.access_ttl_secs,
        };
        let token = jsonwebtoken::encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.access_secret.as_bytes()),
        )?;
        Ok(token)
    }

    pub fn issue_pair(&self, user_id: Uuid, device_id: Uuid, issued_at: i64) -> anyhow::Result<TokenPair> {
        let expires_at = issued_at + self.refresh_ttl_secs;
        let claims = RefreshClaims {
            sub: user_id.to_string(),
            device_id: device_id.to_string(),
            iat: issued_at,
            exp: expires_at,
        };
        let refresh_token = jsonwebtoken::encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.refresh_secret.as_bytes()),
        )?;
        Ok(TokenPair {
            access_token: self.issue_access(user_id, issued_at)?,
            refresh_token,
            refresh_expires_at: expires_at,
        })
    }

    pub fn verify_access(&self, token: &str) -> Option<Uuid> {
        let data = jsonwebtoken::decode::<AccessClaims>(
            token,
            &DecodingKey::from_secret(self.access_secret.as_bytes()),
            &strict_validation(),
        )
        .ok()?;
        Uuid::parse_str(&data.claims.sub).ok()
    }

    /// Signature and expiry only; session binding is checked by the caller.
    pub fn verify_refresh(&self, token: &str) -> Option<VerifiedRefresh> {
        let data = jsonwebtoken::decode::<RefreshClaims>(
            token,
            &DecodingKey::from_secret(self.refresh_secret.as_bytes()),
            &strict_validation(),
        )
        .ok()?;
        Some(VerifiedRefresh {
            user_id: Uuid::parse_str(&data.claims.sub).ok()?,
            device_id: Uuid::parse_str(&data.claims.device_id).ok()?,
            issued_at: data.claims.iat,
            expires_at: data.claims.exp,
        })
    }
}

fn strict_validation() -> Validation {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;
    validation
}
