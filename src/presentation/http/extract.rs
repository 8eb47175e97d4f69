use std::convert::Infallible;
use std::net::SocketAddr;

use axum::{
    Json,
    extract::{ConnectInfo, FromRequest, FromRequestParts, Path, Request},
    http::{HeaderMap, header, request::Parts},
};
use base64::Engine;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::application::dto::accounts::ClientInfo;
use crate::application::error::AppError;
use crate::application::services::tokens::VerifiedRefresh;
use crate::application::use_cases::auth::authenticate_refresh::AuthenticateRefresh;
use crate::bootstrap::app_context::AppContext;
use crate::presentation::http::error::ApiError;

pub const REFRESH_COOKIE: &str = "refreshToken";

pub(crate) fn get_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|hdr| hdr.split(';'))
        .find_map(|part| {
            let (k, v) = part.trim().split_once('=')?;
            (k.trim() == name).then(|| v.trim().to_string())
        })
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
}

/// Admin guard: `Authorization: Basic base64(login:password)`.
pub struct BasicAuth;

#[axum::async_trait]
impl FromRequestParts<AppContext> for BasicAuth {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        ctx: &AppContext,
    ) -> Result<Self, Self::Rejection> {
        let encoded = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Basic "))
            .ok_or(AppError::Unauthorized)?;
        let decoded = base64::engine::general_purpose::STANDARD
            .decode(encoded.trim())
            .ok()
            .and_then(|bytes| String::from_utf8(bytes).ok())
            .ok_or(AppError::Unauthorized)?;
        let (login, password) = decoded.split_once(':').ok_or(AppError::Unauthorized)?;
        if login != ctx.cfg.basic_auth_login || password != ctx.cfg.basic_auth_password {
            return Err(AppError::Unauthorized.into());
        }
        Ok(BasicAuth)
    }
}

/// Caller authenticated by a valid access token.
pub struct CurrentUser(pub Uuid);

#[axum::async_trait]
impl FromRequestParts<AppContext> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        ctx: &AppContext,
    ) -> Result<Self, Self::Rejection> {
        bearer_token(&parts.headers)
            .and_then(|t| ctx.tokens().verify_access(t))
            .map(CurrentUser)
            .ok_or_else(|| AppError::Unauthorized.into())
    }
}

/// Like [`CurrentUser`] but never rejects; used to personalise `myStatus`.
pub struct MaybeUser(pub Option<Uuid>);

#[axum::async_trait]
impl FromRequestParts<AppContext> for MaybeUser {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        ctx: &AppContext,
    ) -> Result<Self, Self::Rejection> {
        Ok(MaybeUser(
            bearer_token(&parts.headers).and_then(|t| ctx.tokens().verify_access(t)),
        ))
    }
}

/// The device session behind the `refreshToken` cookie.
pub struct RefreshAuth(pub VerifiedRefresh);

#[axum::async_trait]
impl FromRequestParts<AppContext> for RefreshAuth {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        ctx: &AppContext,
    ) -> Result<Self, Self::Rejection> {
        let token = get_cookie(&parts.headers, REFRESH_COOKIE).ok_or(AppError::Unauthorized)?;
        let sessions = ctx.session_repo();
        let uc = AuthenticateRefresh {
            sessions: sessions.as_ref(),
            tokens: ctx.tokens(),
        };
        Ok(RefreshAuth(uc.execute(&token).await?))
    }
}

/// IP and user agent of the caller, recorded on new device sessions.
pub struct ClientMeta(pub ClientInfo);

#[axum::async_trait]
impl<S: Send + Sync> FromRequestParts<S> for ClientMeta {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let forwarded = parts
            .headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());
        let ip = forwarded
            .or_else(|| {
                parts
                    .extensions
                    .get::<ConnectInfo<SocketAddr>>()
                    .map(|ConnectInfo(addr)| addr.ip().to_string())
            })
            .unwrap_or_else(|| "unknown".into());
        let device_name = parts
            .headers
            .get(header::USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .unwrap_or("unknown device")
            .to_string();
        Ok(ClientMeta(ClientInfo { ip, device_name }))
    }
}

/// A path id; anything that is not a UUID cannot name an entity, so it is a 404.
pub struct PathId(pub Uuid);

#[axum::async_trait]
impl<S: Send + Sync> FromRequestParts<S> for PathId {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::NotFound("Entity"))?;
        Uuid::parse_str(raw.trim())
            .map(PathId)
            .map_err(|_| AppError::NotFound("Entity").into())
    }
}

/// JSON body whose rejections use the 400 field-error envelope.
pub struct JsonBody<T>(pub T);

#[axum::async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(JsonBody(value)),
            Err(rejection) => Err(AppError::field("body", &rejection.body_text()).into()),
        }
    }
}
