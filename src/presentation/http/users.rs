use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    routing::get,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::application::dto::accounts::{NewUser, UserFilter};
use crate::application::error::AppError;
use crate::application::use_cases::users::create_user::CreateUser;
use crate::application::use_cases::users::delete_user::DeleteUser;
use crate::application::use_cases::users::get_user::GetUser;
use crate::application::use_cases::users::list_users::ListUsers;
use crate::bootstrap::app_context::AppContext;
use crate::domain::accounts::user::User;
use crate::presentation::http::error::ApiError;
use crate::presentation::http::extract::{BasicAuth, JsonBody, PathId};
use crate::presentation::http::pagination::{PageParams, Paginator, UserPage, iso};
use crate::presentation::http::validation::{EMAIL_RE, LOGIN_RE, ValidatedBody, trimmed};

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub id: String,
    pub login: String,
    pub email: String,
    pub created_at: String,
}

impl From<User> for UserView {
    fn from(u: User) -> Self {
        UserView {
            id: u.id.to_string(),
            login: u.login,
            email: u.email,
            created_at: iso(u.created_at),
        }
    }
}

/// Body shared by admin user creation and self registration.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UserInputBody {
    #[serde(default, deserialize_with = "trimmed")]
    #[validate(required, length(min = 3, max = 10), regex = "LOGIN_RE")]
    pub login: Option<String>,
    #[serde(default, deserialize_with = "trimmed")]
    #[validate(required, length(min = 6, max = 20))]
    pub password: Option<String>,
    #[serde(default, deserialize_with = "trimmed")]
    #[validate(required, length(min = 1, max = 100), regex = "EMAIL_RE")]
    pub email: Option<String>,
}

impl ValidatedBody for UserInputBody {
    const FIELDS: &'static [&'static str] = &["login", "password", "email"];
}

impl UserInputBody {
    pub(crate) fn into_new_user(self) -> Result<NewUser, AppError> {
        self.check()?;
        Ok(NewUser {
            login: self.login.unwrap_or_default(),
            password: self.password.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
        })
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct UserSearchParams {
    pub search_login_term: Option<String>,
    pub search_email_term: Option<String>,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route("/users/:id", get(get_user).delete(delete_user))
        .with_state(ctx)
}

#[utoipa::path(get, path = "/api/users", tag = "Users",
    params(PageParams, UserSearchParams),
    security(("basic" = [])),
    responses((status = 200, body = UserPage), (status = 401)))]
pub async fn list_users(
    State(ctx): State<AppContext>,
    _admin: BasicAuth,
    Query(page): Query<PageParams>,
    Query(search): Query<UserSearchParams>,
) -> Result<Json<Paginator<UserView>>, ApiError> {
    let repo = ctx.user_repo();
    let uc = ListUsers {
        repo: repo.as_ref(),
    };
    let filter = UserFilter {
        login_term: search.search_login_term.filter(|t| !t.is_empty()),
        email_term: search.search_email_term.filter(|t| !t.is_empty()),
    };
    let result = uc.execute(&filter, &page.to_query()).await?;
    Ok(Json(Paginator::from_page(result, UserView::from)))
}

#[utoipa::path(get, path = "/api/users/{id}", tag = "Users",
    params(("id" = String, Path, description = "User id")),
    security(("basic" = [])),
    responses((status = 200, body = UserView), (status = 401), (status = 404)))]
pub async fn get_user(
    State(ctx): State<AppContext>,
    _admin: BasicAuth,
    PathId(id): PathId,
) -> Result<Json<UserView>, ApiError> {
    let repo = ctx.user_repo();
    let uc = GetUser {
        repo: repo.as_ref(),
    };
    let user = uc.execute(id).await?.ok_or(AppError::NotFound("User"))?;
    Ok(Json(user.into()))
}

#[utoipa::path(post, path = "/api/users", tag = "Users", request_body = UserInputBody,
    security(("basic" = [])),
    responses((status = 201, body = UserView), (status = 400), (status = 401)))]
pub async fn create_user(
    State(ctx): State<AppContext>,
    _admin: BasicAuth,
    JsonBody(body): JsonBody<UserInputBody>,
) -> Result<(StatusCode, Json<UserView>), ApiError> {
    let input = body.into_new_user()?;
    let repo = ctx.user_repo();
    let uc = CreateUser {
        repo: repo.as_ref(),
    };
    let user = uc.execute(input).await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

#[utoipa::path(delete, path = "/api/users/{id}", tag = "Users",
    params(("id" = String, Path, description = "User id")),
    security(("basic" = [])),
    responses((status = 204), (status = 401), (status = 404)))]
pub async fn delete_user(
    State(ctx): State<AppContext>,
    _admin: BasicAuth,
    PathId(id): PathId,
) -> Result<StatusCode, ApiError> {
    let repo = ctx.user_repo();
    let sessions = ctx.session_repo();
    let uc = DeleteUser {
        repo: repo.as_ref(),
        sessions: sessions.as_ref(),
    };
    uc.execute(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_body_reports_every_bad_field() {
        let body = UserInputBody {
            login: Some("no spaces".into()),
            password: Some("123".into()),
            email: Some("not-an-email".into()),
        };
        let Err(AppError::Validation(errors)) = body.into_new_user() else {
            panic!("expected validation error");
        };
        let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["login", "password", "email"]);
    }
}
