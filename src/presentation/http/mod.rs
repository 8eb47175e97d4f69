pub mod auth;
pub mod blogs;
pub mod comments;
pub mod error;
pub mod extract;
pub mod health;
pub mod pagination;
pub mod posts;
pub mod reactions;
pub mod security;
pub mod testing;
pub mod users;
pub mod validation;

use axum::{Router, middleware};

use crate::bootstrap::app_context::AppContext;

/// Every REST route, mounted under the configured global prefix.
pub fn router(ctx: AppContext) -> Router {
    let mut api = Router::new()
        .merge(health::routes(ctx.clone()))
        .merge(blogs::routes(ctx.clone()))
        .merge(posts::routes(ctx.clone()))
        .merge(comments::routes(ctx.clone()))
        .merge(users::routes(ctx.clone()))
        .nest("/auth", auth::routes(ctx.clone()))
        .nest("/security", security::routes(ctx.clone()));
    if ctx.cfg.include_testing_module {
        api = api.nest("/testing", testing::routes(ctx.clone()));
    }

    let prefix = ctx.cfg.global_prefix.trim_matches('/');
    let app = if prefix.is_empty() {
        api
    } else {
        Router::new().nest(&format!("/{prefix}"), api)
    };
    app.layer(middleware::map_response_with_state(
        ctx.cfg.is_production,
        error::redact_internal_errors,
    ))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{Body, to_bytes};
    use axum::http::{HeaderMap, Request, StatusCode, header};
    use base64::Engine;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;
    use crate::application::services::tokens::TokenService;
    use crate::application::use_cases::test_support::RecordingMailer;
    use crate::bootstrap::app_context::AppServices;
    use crate::bootstrap::config::Config;
    use crate::infrastructure::memory::MemoryStore;

    struct TestApp {
        app: Router,
        mailer: Arc<RecordingMailer>,
    }

    fn test_app_with(cfg: Config) -> TestApp {
        let mailer = Arc::new(RecordingMailer::default());
        let tokens = TokenService::new(
            cfg.jwt_secret.clone(),
            cfg.refresh_token_secret.clone(),
            cfg.access_token_ttl_secs,
            cfg.refresh_token_ttl_secs,
        );
        let services = AppServices::memory(Arc::new(MemoryStore::new()), mailer.clone(), tokens);
        TestApp {
            app: router(AppContext::new(cfg, services)),
            mailer,
        }
    }

    fn test_app() -> TestApp {
        test_app_with(Config::for_tests())
    }

    fn basic() -> String {
        let encoded = base64::engine::general_purpose::STANDARD.encode("admin:qwerty");
        format!("Basic {encoded}")
    }

    struct Call {
        method: &'static str,
        uri: String,
        headers: Vec<(header::HeaderName, String)>,
        body: Option<Value>,
    }

    fn call(method: &'static str, uri: impl Into<String>) -> Call {
        Call {
            method,
            uri: uri.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    impl Call {
        fn admin(self) -> Self {
            self.header(header::AUTHORIZATION, basic())
        }

        fn bearer(self, token: &str) -> Self {
            self.header(header::AUTHORIZATION, format!("Bearer {token}"))
        }

        fn cookie(self, cookie: &str) -> Self {
            self.header(header::COOKIE, cookie.to_string())
        }

        fn header(mut self, name: header::HeaderName, value: String) -> Self {
            self.headers.push((name, value));
            self
        }

        fn json(mut self, body: Value) -> Self {
            self.body = Some(body);
            self
        }

        async fn send(self, app: &Router) -> (StatusCode, HeaderMap, Value) {
            let mut req = Request::builder().method(self.method).uri(self.uri);
            for (name, value) in self.headers {
                req = req.header(name, value);
            }
            let req = match self.body {
                Some(body) => req
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string())),
                None => req.body(Body::empty()),
            }
            .unwrap();
            let res = app.clone().oneshot(req).await.unwrap();
            let status = res.status();
            let headers = res.headers().clone();
            let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
            let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
            (status, headers, body)
        }
    }

    fn refresh_cookie(headers: &HeaderMap) -> String {
        let raw = headers
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .unwrap();
        raw.split(';').next().unwrap().to_string()
    }

    async fn create_blog(app: &Router) -> String {
        let (status, _, body) = call("POST", "/api/blogs")
            .admin()
            .json(json!({
                "name": "rust",
                "description": "all about rust",
                "websiteUrl": "https://rust.example.com"
            }))
            .send(app)
            .await;
        assert_eq!(status, StatusCode::CREATED);
        body["id"].as_str().unwrap().to_string()
    }

    async fn create_post(app: &Router, blog_id: &str) -> String {
        let (status, _, body) = call("POST", "/api/posts")
            .admin()
            .json(json!({
                "title": "hello",
                "shortDescription": "first post",
                "content": "body text",
                "blogId": blog_id
            }))
            .send(app)
            .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["blogName"], "rust");
        assert_eq!(body["extendedLikesInfo"]["myStatus"], "None");
        body["id"].as_str().unwrap().to_string()
    }

    async fn create_user_and_login(app: &Router, login: &str) -> (String, String) {
        let (status, _, _) = call("POST", "/api/users")
            .admin()
            .json(json!({
                "login": login,
                "password": "secret1",
                "email": format!("{login}@example.com")
            }))
            .send(app)
            .await;
        assert_eq!(status, StatusCode::CREATED);
        let (status, headers, body) = call("POST", "/api/auth/login")
            .header(header::USER_AGENT, "test-agent".into())
            .json(json!({ "loginOrEmail": login, "password": "secret1" }))
            .send(app)
            .await;
        assert_eq!(status, StatusCode::OK);
        (
            body["accessToken"].as_str().unwrap().to_string(),
            refresh_cookie(&headers),
        )
    }

    #[tokio::test]
    async fn blog_lifecycle() {
        let TestApp { app, .. } = test_app();

        let (status, _, _) = call("POST", "/api/blogs")
            .json(json!({ "name": "x", "description": "y", "websiteUrl": "https://a.com" }))
            .send(&app)
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let id = create_blog(&app).await;
        let (status, _, body) = call("GET", format!("/api/blogs/{id}")).send(&app).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["isMembership"], false);

        let (status, _, body) = call("GET", "/api/blogs?searchNameTerm=RU").send(&app).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["totalCount"], 1);
        assert_eq!(body["pagesCount"], 1);

        let (status, _, _) = call("DELETE", format!("/api/blogs/{id}"))
            .admin()
            .send(&app)
            .await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _, _) = call("GET", format!("/api/blogs/{id}")).send(&app).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _, _) = call("GET", "/api/blogs/not-a-uuid").send(&app).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn invalid_blog_lists_every_field() {
        let TestApp { app, .. } = test_app();
        let (status, _, body) = call("POST", "/api/blogs")
            .admin()
            .json(json!({
                "name": "   ",
                "description": "ok",
                "websiteUrl": "http://insecure.example.com"
            }))
            .send(&app)
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let fields: Vec<_> = body["errorsMessages"]
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["field"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(fields, vec!["name", "websiteUrl"]);
    }

    #[tokio::test]
    async fn post_for_missing_blog_is_a_field_error() {
        let TestApp { app, .. } = test_app();
        let (status, _, body) = call("POST", "/api/posts")
            .admin()
            .json(json!({
                "title": "t",
                "shortDescription": "s",
                "content": "c",
                "blogId": uuid::Uuid::new_v4().to_string()
            }))
            .send(&app)
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["errorsMessages"][0]["field"], "blogId");
    }

    #[tokio::test]
    async fn likes_are_counted_and_personalised() {
        let TestApp { app, .. } = test_app();
        let blog_id = create_blog(&app).await;
        let post_id = create_post(&app, &blog_id).await;
        let (alice, _) = create_user_and_login(&app, "alice").await;
        let (bob, _) = create_user_and_login(&app, "bob").await;

        for (token, status) in [(&alice, "Like"), (&bob, "Dislike")] {
            let (code, _, _) = call("PUT", format!("/api/posts/{post_id}/like-status"))
                .bearer(token)
                .json(json!({ "likeStatus": status }))
                .send(&app)
                .await;
            assert_eq!(code, StatusCode::NO_CONTENT);
        }

        let (_, _, body) = call("GET", format!("/api/posts/{post_id}"))
            .bearer(&alice)
            .send(&app)
            .await;
        let info = &body["extendedLikesInfo"];
        assert_eq!(info["likesCount"], 1);
        assert_eq!(info["dislikesCount"], 1);
        assert_eq!(info["myStatus"], "Like");
        assert_eq!(info["newestLikes"][0]["login"], "alice");

        let (_, _, body) = call("GET", format!("/api/posts/{post_id}")).send(&app).await;
        assert_eq!(body["extendedLikesInfo"]["myStatus"], "None");

        let (code, _, body) = call("PUT", format!("/api/posts/{post_id}/like-status"))
            .bearer(&alice)
            .json(json!({ "likeStatus": "Love" }))
            .send(&app)
            .await;
        assert_eq!(code, StatusCode::BAD_REQUEST);
        assert_eq!(body["errorsMessages"][0]["field"], "likeStatus");

        let missing = uuid::Uuid::new_v4();
        let (code, _, _) = call("PUT", format!("/api/posts/{missing}/like-status"))
            .bearer(&alice)
            .json(json!({ "likeStatus": "Like" }))
            .send(&app)
            .await;
        assert_eq!(code, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn comments_belong_to_their_author() {
        let TestApp { app, .. } = test_app();
        let blog_id = create_blog(&app).await;
        let post_id = create_post(&app, &blog_id).await;
        let (alice, _) = create_user_and_login(&app, "alice").await;
        let (bob, _) = create_user_and_login(&app, "bob").await;

        let (status, _, body) = call("POST", format!("/api/posts/{post_id}/comments"))
            .bearer(&alice)
            .json(json!({ "content": "a comment that is long enough" }))
            .send(&app)
            .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["commentatorInfo"]["userLogin"], "alice");
        let comment_id = body["id"].as_str().unwrap().to_string();

        let (status, _, _) = call("PUT", format!("/api/comments/{comment_id}"))
            .bearer(&bob)
            .json(json!({ "content": "bob rewrites this comment text" }))
            .send(&app)
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, _, _) = call("PUT", format!("/api/comments/{comment_id}/like-status"))
            .bearer(&bob)
            .json(json!({ "likeStatus": "Like" }))
            .send(&app)
            .await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (_, _, body) = call("GET", format!("/api/posts/{post_id}/comments"))
            .bearer(&bob)
            .send(&app)
            .await;
        assert_eq!(body["totalCount"], 1);
        assert_eq!(body["items"][0]["likesInfo"]["likesCount"], 1);
        assert_eq!(body["items"][0]["likesInfo"]["myStatus"], "Like");

        let (status, _, _) = call("DELETE", format!("/api/comments/{comment_id}"))
            .bearer(&alice)
            .send(&app)
            .await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _, _) = call("GET", format!("/api/comments/{comment_id}")).send(&app).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn registration_confirmation_and_token_rotation() {
        let TestApp { app, mailer } = test_app();
        let (status, _, _) = call("POST", "/api/auth/registration")
            .json(json!({ "login": "carol", "password": "secret1", "email": "carol@example.com" }))
            .send(&app)
            .await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _, body) = call("POST", "/api/auth/registration")
            .json(json!({ "login": "carol", "password": "secret1", "email": "other@example.com" }))
            .send(&app)
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["errorsMessages"][0]["field"], "login");

        let html = mailer.last().unwrap().html;
        let code = html
            .split_once("code=")
            .and_then(|(_, rest)| rest.split('\'').next())
            .unwrap()
            .to_string();
        let (status, _, _) = call("POST", "/api/auth/registration-confirmation")
            .json(json!({ "code": code }))
            .send(&app)
            .await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _, body) = call("POST", "/api/auth/registration-confirmation")
            .json(json!({ "code": code }))
            .send(&app)
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["errorsMessages"][0]["field"], "code");

        let (status, headers, body) = call("POST", "/api/auth/login")
            .json(json!({ "loginOrEmail": "carol@example.com", "password": "secret1" }))
            .send(&app)
            .await;
        assert_eq!(status, StatusCode::OK);
        let access = body["accessToken"].as_str().unwrap().to_string();
        let first = refresh_cookie(&headers);
        let set_cookie = headers.get(header::SET_COOKIE).unwrap().to_str().unwrap();
        assert!(set_cookie.contains("HttpOnly"));

        let (status, _, body) = call("GET", "/api/auth/me").bearer(&access).send(&app).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["login"], "carol");
        assert_eq!(body["email"], "carol@example.com");

        let (status, headers, _) = call("POST", "/api/auth/refresh-token")
            .cookie(&first)
            .send(&app)
            .await;
        assert_eq!(status, StatusCode::OK);
        let second = refresh_cookie(&headers);
        assert_ne!(first, second);

        let (status, _, _) = call("POST", "/api/auth/refresh-token")
            .cookie(&first)
            .send(&app)
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _, _) = call("POST", "/api/auth/logout").cookie(&second).send(&app).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _, _) = call("POST", "/api/auth/logout").cookie(&second).send(&app).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn devices_are_scoped_to_their_owner() {
        let TestApp { app, .. } = test_app();
        let (_, alice) = create_user_and_login(&app, "alice").await;
        let (_, bob) = create_user_and_login(&app, "bob").await;

        let (status, _, body) = call("GET", "/api/security/devices")
            .cookie(&bob)
            .send(&app)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["title"], "test-agent");
        let bob_device = body[0]["deviceId"].as_str().unwrap().to_string();

        let (status, _, _) = call("DELETE", format!("/api/security/devices/{bob_device}"))
            .cookie(&alice)
            .send(&app)
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let missing = uuid::Uuid::new_v4();
        let (status, _, _) = call("DELETE", format!("/api/security/devices/{missing}"))
            .cookie(&alice)
            .send(&app)
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _, _) = call("DELETE", "/api/security/devices")
            .cookie(&alice)
            .send(&app)
            .await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _, body) = call("GET", "/api/security/devices")
            .cookie(&alice)
            .send(&app)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn testing_wipe_and_prefix() {
        let TestApp { app, .. } = test_app();
        create_blog(&app).await;
        let (status, _, _) = call("DELETE", "/api/testing/all-data").send(&app).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (_, _, body) = call("GET", "/api/blogs").send(&app).await;
        assert_eq!(body["totalCount"], 0);

        let mut cfg = Config::for_tests();
        cfg.global_prefix = String::new();
        cfg.include_testing_module = false;
        let TestApp { app, .. } = test_app_with(cfg);
        let (status, _, body) = call("GET", "/health").send(&app).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        let (status, _, _) = call("DELETE", "/testing/all-data").send(&app).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    async fn create_named_blog(app: &Router, name: &str) -> String {
        let (status, _, body) = call("POST", "/api/blogs")
            .admin()
            .json(json!({
                "name": name,
                "description": "about",
                "websiteUrl": "https://blog.example.com"
            }))
            .send(app)
            .await;
        assert_eq!(status, StatusCode::CREATED);
        body["id"].as_str().unwrap().to_string()
    }

    async fn create_titled_post(app: &Router, blog_id: &str, title: &str) {
        let (status, _, _) = call("POST", format!("/api/blogs/{blog_id}/posts"))
            .admin()
            .json(json!({
                "title": title,
                "shortDescription": "short",
                "content": "body text"
            }))
            .send(app)
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    fn names(body: &Value, key: &str) -> Vec<String> {
        body["items"]
            .as_array()
            .unwrap()
            .iter()
            .map(|item| item[key].as_str().unwrap().to_string())
            .collect()
    }

    #[tokio::test]
    async fn blog_listing_order_follows_sort_params() {
        let TestApp { app, .. } = test_app();
        for name in ["alpha", "Beta", "gamma"] {
            create_named_blog(&app, name).await;
        }

        let (_, _, body) = call("GET", "/api/blogs").send(&app).await;
        assert_eq!(names(&body, "name"), ["gamma", "Beta", "alpha"]);

        let (_, _, body) = call("GET", "/api/blogs?sortDirection=asc").send(&app).await;
        assert_eq!(names(&body, "name"), ["alpha", "Beta", "gamma"]);

        // Code point order puts upper case first.
        let (_, _, body) = call("GET", "/api/blogs?sortBy=name&sortDirection=asc")
            .send(&app)
            .await;
        assert_eq!(names(&body, "name"), ["Beta", "alpha", "gamma"]);

        let (_, _, body) = call("GET", "/api/blogs?sortBy=name").send(&app).await;
        assert_eq!(names(&body, "name"), ["gamma", "alpha", "Beta"]);

        // Unknown sort fields fall back to createdAt.
        let (status, _, body) = call("GET", "/api/blogs?sortBy=password&sortDirection=asc")
            .send(&app)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(names(&body, "name"), ["alpha", "Beta", "gamma"]);
    }

    #[tokio::test]
    async fn post_listings_are_paginated() {
        let TestApp { app, .. } = test_app();
        let blog_id = create_named_blog(&app, "first").await;
        for title in ["a1", "b2", "c3"] {
            create_titled_post(&app, &blog_id, title).await;
        }
        let other = create_named_blog(&app, "second").await;
        create_titled_post(&app, &other, "z9").await;

        let (status, _, body) = call("GET", "/api/posts?pageSize=2").send(&app).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["pagesCount"], 2);
        assert_eq!(body["page"], 1);
        assert_eq!(body["pageSize"], 2);
        assert_eq!(body["totalCount"], 4);
        assert_eq!(names(&body, "title"), ["z9", "c3"]);

        let (_, _, body) = call("GET", "/api/posts?sortBy=title&sortDirection=asc&pageSize=2&pageNumber=2")
            .send(&app)
            .await;
        assert_eq!(body["page"], 2);
        assert_eq!(names(&body, "title"), ["c3", "z9"]);

        let (status, _, body) = call("GET", format!("/api/blogs/{blog_id}/posts?pageSize=1&pageNumber=3"))
            .send(&app)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["pagesCount"], 3);
        assert_eq!(body["pageSize"], 1);
        assert_eq!(body["totalCount"], 3);
        assert_eq!(names(&body, "title"), ["a1"]);
        assert_eq!(body["items"][0]["blogName"], "first");

        let (status, _, _) = call("GET", format!("/api/blogs/{}/posts", uuid::Uuid::new_v4()))
            .send(&app)
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn users_sort_by_login() {
        let TestApp { app, .. } = test_app();
        for login in ["carol", "alice", "bob"] {
            let (status, _, _) = call("POST", "/api/users")
                .admin()
                .json(json!({
                    "login": login,
                    "password": "secret1",
                    "email": format!("{login}@example.com")
                }))
                .send(&app)
                .await;
            assert_eq!(status, StatusCode::CREATED);
        }
        let (status, _, body) = call("GET", "/api/users?sortBy=login&sortDirection=asc")
            .admin()
            .send(&app)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(names(&body, "login"), ["alice", "bob", "carol"]);

        let (_, _, body) = call("GET", "/api/users").admin().send(&app).await;
        assert_eq!(names(&body, "login"), ["bob", "alice", "carol"]);
    }

    #[tokio::test]
    async fn huge_page_number_returns_an_empty_page() {
        let TestApp { app, .. } = test_app();
        create_named_blog(&app, "only").await;
        let (status, _, body) = call("GET", "/api/blogs?pageNumber=9223372036854775807&pageSize=100")
            .send(&app)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["page"], i64::MAX);
        assert_eq!(body["totalCount"], 1);
        assert!(body["items"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn deleted_user_can_no_longer_refresh() {
        let TestApp { app, .. } = test_app();
        let (access, cookie) = create_user_and_login(&app, "gone").await;
        let (_, _, me) = call("GET", "/api/auth/me").bearer(&access).send(&app).await;
        let user_id = me["userId"].as_str().unwrap().to_string();

        let (status, _, _) = call("DELETE", format!("/api/users/{user_id}"))
            .admin()
            .send(&app)
            .await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _, _) = call("POST", "/api/auth/refresh-token")
            .cookie(&cookie)
            .send(&app)
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}
