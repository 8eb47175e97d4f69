use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;
use utoipa::ToSchema;

use crate::application::error::AppError;

#[derive(Debug, Serialize, ToSchema)]
pub struct FieldErrorView {
    pub message: String,
    pub field: String,
}

/// Body of every 400 response.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ValidationErrorBody {
    pub errors_messages: Vec<FieldErrorView>,
}

/// Body of 401/403/404/500 responses.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub status_code: u16,
    pub message: String,
    pub timestamp: String,
}

pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError(AppError::Internal(err))
    }
}

fn plain(status: StatusCode, message: String) -> Response {
    let body = ErrorBody {
        status_code: status.as_u16(),
        message,
        timestamp: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
    };
    (status, Json(body)).into_response()
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.0 {
            AppError::Validation(errors) => {
                let body = ValidationErrorBody {
                    errors_messages: errors
                        .into_iter()
                        .map(|e| FieldErrorView {
                            message: e.message,
                            field: e.field,
                        })
                        .collect(),
                };
                (StatusCode::BAD_REQUEST, Json(body)).into_response()
            }
            err @ AppError::NotFound(_) => plain(StatusCode::NOT_FOUND, err.to_string()),
            AppError::Unauthorized => plain(StatusCode::UNAUTHORIZED, "Unauthorized".into()),
            AppError::Forbidden => plain(StatusCode::FORBIDDEN, "Forbidden".into()),
            AppError::Internal(err) => {
                tracing::error!(error = ?err, "request_failed");
                plain(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
        }
    }
}

/// Response mapper that hides internal error details in production.
pub async fn redact_internal_errors(State(is_production): State<bool>, res: Response) -> Response {
    if is_production && res.status() == StatusCode::INTERNAL_SERVER_ERROR {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "message": "Some server error occured" })),
        )
            .into_response();
    }
    res
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(res: Response) -> serde_json::Value {
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn validation_uses_errors_messages_envelope() {
        let res = ApiError(AppError::field("name", "Name is required")).into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body = body_json(res).await;
        assert_eq!(body["errorsMessages"][0]["field"], "name");
        assert_eq!(body["errorsMessages"][0]["message"], "Name is required");
    }

    #[tokio::test]
    async fn status_mapping() {
        let cases = [
            (AppError::NotFound("Blog"), StatusCode::NOT_FOUND),
            (AppError::Unauthorized, StatusCode::UNAUTHORIZED),
            (AppError::Forbidden, StatusCode::FORBIDDEN),
            (
                AppError::Internal(anyhow::anyhow!("boom")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            let res = ApiError(err).into_response();
            assert_eq!(res.status(), status);
            let body = body_json(res).await;
            assert_eq!(body["statusCode"], status.as_u16());
        }
    }

    #[tokio::test]
    async fn production_hides_internal_messages() {
        let res = ApiError(AppError::Internal(anyhow::anyhow!("db password leaked"))).into_response();
        let res = redact_internal_errors(State(true), res).await;
        let body = body_json(res).await;
        assert_eq!(body, json!({ "message": "Some server error occured" }));

        let res = ApiError(AppError::Internal(anyhow::anyhow!("visible"))).into_response();
        let res = redact_internal_errors(State(false), res).await;
        assert_eq!(body_json(res).await["message"], "visible");
    }
}
