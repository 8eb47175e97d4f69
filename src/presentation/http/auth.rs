use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, HeaderValue, StatusCode, header},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::dto::accounts::TokenPair;
use crate::application::error::AppError;
use crate::application::use_cases::auth::confirm_registration::ConfirmRegistration;
use crate::application::use_cases::auth::login::{Login, LoginRequest};
use crate::application::use_cases::auth::logout::Logout;
use crate::application::use_cases::auth::me::GetMe;
use crate::application::use_cases::auth::recover_password::RecoverPassword;
use crate::application::use_cases::auth::refresh_session::RefreshSession;
use crate::application::use_cases::auth::register::Register;
use crate::application::use_cases::auth::resend_confirmation::ResendConfirmation;
use crate::application::use_cases::auth::set_new_password::SetNewPassword;
use crate::bootstrap::app_context::AppContext;
use crate::bootstrap::config::Config;
use crate::presentation::http::error::ApiError;
use crate::presentation::http::extract::{
    ClientMeta, CurrentUser, JsonBody, REFRESH_COOKIE, RefreshAuth,
};
use crate::presentation::http::users::UserInputBody;
use crate::presentation::http::validation::{EMAIL_RE, ValidatedBody, trimmed};

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct ConfirmationBody {
    #[serde(default, deserialize_with = "trimmed")]
    #[validate(required, length(min = 1, max = 100))]
    pub code: Option<String>,
}

impl ValidatedBody for ConfirmationBody {
    const FIELDS: &'static [&'static str] = &["code"];
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct EmailBody {
    #[serde(default, deserialize_with = "trimmed")]
    #[validate(required, length(min = 1, max = 100), regex = "EMAIL_RE")]
    pub email: Option<String>,
}

impl ValidatedBody for EmailBody {
    const FIELDS: &'static [&'static str] = &["email"];
}

impl EmailBody {
    fn into_email(self) -> Result<String, AppError> {
        self.check()?;
        Ok(self.email.unwrap_or_default())
    }
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewPasswordBody {
    #[serde(default, deserialize_with = "trimmed")]
    #[validate(required, length(min = 6, max = 20))]
    pub new_password: Option<String>,
    #[serde(default, deserialize_with = "trimmed")]
    #[validate(required, length(min = 1, max = 100))]
    pub recovery_code: Option<String>,
}

impl ValidatedBody for NewPasswordBody {
    const FIELDS: &'static [&'static str] = &["newPassword", "recoveryCode"];
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginBody {
    #[serde(default, deserialize_with = "trimmed")]
    #[validate(required, length(min = 1, max = 100))]
    pub login_or_email: Option<String>,
    #[serde(default, deserialize_with = "trimmed")]
    #[validate(required, length(min = 1, max = 100))]
    pub password: Option<String>,
}

impl ValidatedBody for LoginBody {
    const FIELDS: &'static [&'static str] = &["loginOrEmail", "password"];
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MeResponse {
    pub email: String,
    pub login: String,
    pub user_id: String,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/registration", post(registration))
        .route("/registration-confirmation", post(registration_confirmation))
        .route("/registration-email-resending", post(registration_email_resending))
        .route("/password-recovery", post(password_recovery))
        .route("/new-password", post(new_password))
        .route("/login", post(login))
        .route("/refresh-token", post(refresh_token))
        .route("/logout", post(logout))
        .route("/me", get(me))
        .with_state(ctx)
}

#[utoipa::path(post, path = "/api/auth/registration", tag = "Auth", request_body = UserInputBody,
    responses((status = 204), (status = 400)))]
pub async fn registration(
    State(ctx): State<AppContext>,
    JsonBody(body): JsonBody<UserInputBody>,
) -> Result<StatusCode, ApiError> {
    let input = body.into_new_user()?;
    let repo = ctx.user_repo();
    let mailer = ctx.email_sender();
    let uc = Register {
        repo: repo.as_ref(),
        mailer: mailer.as_ref(),
        code_ttl: ctx.confirmation_code_ttl(),
        base_url: &ctx.cfg.public_base_url,
    };
    uc.execute(input).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(post, path = "/api/auth/registration-confirmation", tag = "Auth", request_body = ConfirmationBody,
    responses((status = 204), (status = 400)))]
pub async fn registration_confirmation(
    State(ctx): State<AppContext>,
    JsonBody(body): JsonBody<ConfirmationBody>,
) -> Result<StatusCode, ApiError> {
    body.check()?;
    let code = body.code.unwrap_or_default();
    let repo = ctx.user_repo();
    let uc = ConfirmRegistration {
        repo: repo.as_ref(),
    };
    uc.execute(&code).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(post, path = "/api/auth/registration-email-resending", tag = "Auth", request_body = EmailBody,
    responses((status = 204), (status = 400)))]
pub async fn registration_email_resending(
    State(ctx): State<AppContext>,
    JsonBody(body): JsonBody<EmailBody>,
) -> Result<StatusCode, ApiError> {
    let email = body.into_email()?;
    let repo = ctx.user_repo();
    let mailer = ctx.email_sender();
    let uc = ResendConfirmation {
        repo: repo.as_ref(),
        mailer: mailer.as_ref(),
        code_ttl: ctx.confirmation_code_ttl(),
        base_url: &ctx.cfg.public_base_url,
    };
    uc.execute(&email).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(post, path = "/api/auth/password-recovery", tag = "Auth", request_body = EmailBody,
    responses((status = 204), (status = 400)))]
pub async fn password_recovery(
    State(ctx): State<AppContext>,
    JsonBody(body): JsonBody<EmailBody>,
) -> Result<StatusCode, ApiError> {
    let email = body.into_email()?;
    let repo = ctx.user_repo();
    let mailer = ctx.email_sender();
    let uc = RecoverPassword {
        repo: repo.as_ref(),
        mailer: mailer.as_ref(),
        code_ttl: ctx.recovery_code_ttl(),
        base_url: &ctx.cfg.public_base_url,
    };
    uc.execute(&email).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(post, path = "/api/auth/new-password", tag = "Auth", request_body = NewPasswordBody,
    responses((status = 204), (status = 400)))]
pub async fn new_password(
    State(ctx): State<AppContext>,
    JsonBody(body): JsonBody<NewPasswordBody>,
) -> Result<StatusCode, ApiError> {
    body.check()?;
    let password = body.new_password.unwrap_or_default();
    let code = body.recovery_code.unwrap_or_default();
    let repo = ctx.user_repo();
    let uc = SetNewPassword {
        repo: repo.as_ref(),
    };
    uc.execute(&code, &password).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(post, path = "/api/auth/login", tag = "Auth", request_body = LoginBody,
    responses((status = 200, body = LoginResponse), (status = 400), (status = 401)))]
pub async fn login(
    State(ctx): State<AppContext>,
    ClientMeta(client): ClientMeta,
    JsonBody(body): JsonBody<LoginBody>,
) -> Result<(HeaderMap, Json<LoginResponse>), ApiError> {
    body.check()?;
    let login_or_email = body.login_or_email.unwrap_or_default();
    let password = body.password.unwrap_or_default();
    let users = ctx.user_repo();
    let sessions = ctx.session_repo();
    let uc = Login {
        users: users.as_ref(),
        sessions: sessions.as_ref(),
        tokens: ctx.tokens(),
    };
    let pair = uc
        .execute(
            &LoginRequest {
                login_or_email,
                password,
            },
            client,
        )
        .await?;
    Ok(token_response(&ctx.cfg, pair))
}

#[utoipa::path(post, path = "/api/auth/refresh-token", tag = "Auth",
    security(("refreshCookie" = [])),
    responses((status = 200, body = LoginResponse), (status = 401)))]
pub async fn refresh_token(
    State(ctx): State<AppContext>,
    RefreshAuth(current): RefreshAuth,
) -> Result<(HeaderMap, Json<LoginResponse>), ApiError> {
    let sessions = ctx.session_repo();
    let uc = RefreshSession {
        sessions: sessions.as_ref(),
        tokens: ctx.tokens(),
    };
    let pair = uc.execute(&current).await?;
    Ok(token_response(&ctx.cfg, pair))
}

#[utoipa::path(post, path = "/api/auth/logout", tag = "Auth",
    security(("refreshCookie" = [])),
    responses((status = 204), (status = 401)))]
pub async fn logout(
    State(ctx): State<AppContext>,
    RefreshAuth(current): RefreshAuth,
) -> Result<(HeaderMap, StatusCode), ApiError> {
    let sessions = ctx.session_repo();
    let uc = Logout {
        sessions: sessions.as_ref(),
    };
    uc.execute(&current).await?;
    let mut headers = HeaderMap::new();
    set_cookie(&mut headers, &build_refresh_cookie("", 0, is_secure(&ctx.cfg)));
    Ok((headers, StatusCode::NO_CONTENT))
}

#[utoipa::path(get, path = "/api/auth/me", tag = "Auth",
    security(("bearer" = [])),
    responses((status = 200, body = MeResponse), (status = 401)))]
pub async fn me(
    State(ctx): State<AppContext>,
    CurrentUser(user_id): CurrentUser,
) -> Result<Json<MeResponse>, ApiError> {
    let repo = ctx.user_repo();
    let uc = GetMe {
        repo: repo.as_ref(),
    };
    let user = uc.execute(user_id).await?.ok_or(AppError::Unauthorized)?;
    Ok(Json(MeResponse {
        email: user.email,
        login: user.login,
        user_id: user.id.to_string(),
    }))
}

// --- Cookie helpers ---

fn is_secure(cfg: &Config) -> bool {
    cfg.frontend_url
        .as_deref()
        .map(|u| u.starts_with("https://"))
        .unwrap_or(false)
}

fn build_refresh_cookie(token: &str, max_age_secs: i64, secure: bool) -> String {
    let secure_attr = if secure { "; Secure" } else { "" };
    format!(
        "{REFRESH_COOKIE}={}; HttpOnly{}; Path=/; Max-Age={}; SameSite=Strict",
        token,
        secure_attr,
        max_age_secs.max(0)
    )
}

fn set_cookie(headers: &mut HeaderMap, cookie: &str) {
    if let Ok(value) = HeaderValue::from_str(cookie) {
        headers.insert(header::SET_COOKIE, value);
    }
}

fn token_response(cfg: &Config, pair: TokenPair) -> (HeaderMap, Json<LoginResponse>) {
    let mut headers = HeaderMap::new();
    set_cookie(
        &mut headers,
        &build_refresh_cookie(
            &pair.refresh_token,
            cfg.refresh_token_ttl_secs,
            is_secure(cfg),
        ),
    );
    (
        headers,
        Json(LoginResponse {
            access_token: pair.access_token,
        }),
    )
}
