use axum::{Router, extract::State, http::StatusCode, routing::delete};

use crate::application::use_cases::maintenance::wipe_all_data::WipeAllData;
use crate::bootstrap::app_context::AppContext;
use crate::presentation::http::error::ApiError;

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/all-data", delete(wipe_all_data))
        .with_state(ctx)
}

/// Only mounted when `INCLUDE_TESTING_MODULE` is enabled.
#[utoipa::path(delete, path = "/api/testing/all-data", tag = "Testing",
    responses((status = 204)))]
pub async fn wipe_all_data(State(ctx): State<AppContext>) -> Result<StatusCode, ApiError> {
    let repo = ctx.maintenance_repo();
    let uc = WipeAllData {
        repo: repo.as_ref(),
    };
    uc.execute().await?;
    Ok(StatusCode::NO_CONTENT)
}
