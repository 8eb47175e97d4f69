use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::error::AppError;
use crate::application::use_cases::sessions::list_sessions::ListSessions;
use crate::application::use_cases::sessions::terminate_other_sessions::TerminateOtherSessions;
use crate::application::use_cases::sessions::terminate_session::TerminateSession;
use crate::bootstrap::app_context::AppContext;
use crate::domain::accounts::device_session::DeviceSession;
use crate::presentation::http::error::ApiError;
use crate::presentation::http::extract::RefreshAuth;
use crate::presentation::http::pagination::iso;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeviceView {
    pub ip: String,
    pub title: String,
    pub last_active_date: String,
    pub device_id: String,
}

impl From<DeviceSession> for DeviceView {
    fn from(s: DeviceSession) -> Self {
        DeviceView {
            last_active_date: iso(s.last_active()),
            ip: s.ip,
            title: s.device_name,
            device_id: s.device_id.to_string(),
        }
    }
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/devices", get(list_devices).delete(terminate_other_devices))
        .route("/devices/:device_id", delete(terminate_device))
        .with_state(ctx)
}

#[utoipa::path(get, path = "/api/security/devices", tag = "Security",
    security(("refreshCookie" = [])),
    responses((status = 200, body = [DeviceView]), (status = 401)))]
pub async fn list_devices(
    State(ctx): State<AppContext>,
    RefreshAuth(current): RefreshAuth,
) -> Result<Json<Vec<DeviceView>>, ApiError> {
    let sessions = ctx.session_repo();
    let uc = ListSessions {
        sessions: sessions.as_ref(),
    };
    let items = uc.execute(current.user_id).await?;
    Ok(Json(items.into_iter().map(DeviceView::from).collect()))
}

#[utoipa::path(delete, path = "/api/security/devices", tag = "Security",
    security(("refreshCookie" = [])),
    responses((status = 204), (status = 401)))]
pub async fn terminate_other_devices(
    State(ctx): State<AppContext>,
    RefreshAuth(current): RefreshAuth,
) -> Result<StatusCode, ApiError> {
    let sessions = ctx.session_repo();
    let uc = TerminateOtherSessions {
        sessions: sessions.as_ref(),
    };
    uc.execute(current.user_id, current.device_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(delete, path = "/api/security/devices/{deviceId}", tag = "Security",
    params(("deviceId" = String, Path, description = "Device id")),
    security(("refreshCookie" = [])),
    responses((status = 204), (status = 401), (status = 403), (status = 404)))]
pub async fn terminate_device(
    State(ctx): State<AppContext>,
    RefreshAuth(current): RefreshAuth,
    Path(device_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let device_id = Uuid::parse_str(device_id.trim()).map_err(|_| AppError::NotFound("Session"))?;
    let sessions = ctx.session_repo();
    let uc = TerminateSession {
        sessions: sessions.as_ref(),
    };
    uc.execute(current.user_id, device_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
