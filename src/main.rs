use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::MatchedPath;
use dotenvy::dotenv;
use http::HeaderValue;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, Http, HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use blog_api::application::ports::email_sender::EmailSender;
use blog_api::application::services::tokens::TokenService;
use blog_api::bootstrap::app_context::{AppContext, AppServices};
use blog_api::bootstrap::config::{Config, StorageBackend};
use blog_api::infrastructure::email::{LogEmailSender, SmtpEmailSender};
use blog_api::infrastructure::memory::MemoryStore;

#[derive(OpenApi)]
#[openapi(
        paths(
            blog_api::presentation::http::health::health,
            blog_api::presentation::http::blogs::list_blogs,
            blog_api::presentation::http::blogs::get_blog,
            blog_api::presentation::http::blogs::create_blog,
            blog_api::presentation::http::blogs::update_blog,
            blog_api::presentation::http::blogs::delete_blog,
            blog_api::presentation::http::blogs::list_blog_posts,
            blog_api::presentation::http::blogs::create_blog_post,
            blog_api::presentation::http::posts::list_posts,
            blog_api::presentation::http::posts::get_post,
            blog_api::presentation::http::posts::create_post,
            blog_api::presentation::http::posts::update_post,
            blog_api::presentation::http::posts::delete_post,
            blog_api::presentation::http::posts::list_post_comments,
            blog_api::presentation::http::posts::create_post_comment,
            blog_api::presentation::http::posts::set_post_like_status,
            blog_api::presentation::http::comments::get_comment,
            blog_api::presentation::http::comments::update_comment,
            blog_api::presentation::http::comments::delete_comment,
            blog_api::presentation::http::comments::set_comment_like_status,
            blog_api::presentation::http::users::list_users,
            blog_api::presentation::http::users::get_user,
            blog_api::presentation::http::users::create_user,
            blog_api::presentation::http::users::delete_user,
            blog_api::presentation::http::auth::registration,
            blog_api::presentation::http::auth::registration_confirmation,
            blog_api::presentation::http::auth::registration_email_resending,
            blog_api::presentation::http::auth::password_recovery,
            blog_api::presentation::http::auth::new_password,
            blog_api::presentation::http::auth::login,
            blog_api::presentation::http::auth::refresh_token,
            blog_api::presentation::http::auth::logout,
            blog_api::presentation::http::auth::me,
            blog_api::presentation::http::security::list_devices,
            blog_api::presentation::http::security::terminate_other_devices,
            blog_api::presentation::http::security::terminate_device,
            blog_api::presentation::http::testing::wipe_all_data,
        ),
        components(schemas(
            blog_api::presentation::http::health::HealthResp,
            blog_api::presentation::http::error::FieldErrorView,
            blog_api::presentation::http::error::ValidationErrorBody,
            blog_api::presentation::http::error::ErrorBody,
            blog_api::presentation::http::pagination::BlogPage,
            blog_api::presentation::http::pagination::PostPage,
            blog_api::presentation::http::pagination::CommentPage,
            blog_api::presentation::http::pagination::UserPage,
            blog_api::presentation::http::blogs::BlogView,
            blog_api::presentation::http::blogs::BlogInputBody,
            blog_api::presentation::http::blogs::BlogPostInputBody,
            blog_api::presentation::http::posts::PostView,
            blog_api::presentation::http::posts::PostInputBody,
            blog_api::presentation::http::reactions::LikeStatusBody,
            blog_api::presentation::http::reactions::LikesInfoView,
            blog_api::presentation::http::reactions::ExtendedLikesInfoView,
            blog_api::presentation::http::reactions::LikeDetailsView,
            blog_api::presentation::http::comments::CommentView,
            blog_api::presentation::http::comments::CommentatorInfoView,
            blog_api::presentation::http::comments::CommentInputBody,
            blog_api::presentation::http::users::UserView,
            blog_api::presentation::http::users::UserInputBody,
            blog_api::presentation::http::auth::ConfirmationBody,
            blog_api::presentation::http::auth::EmailBody,
            blog_api::presentation::http::auth::NewPasswordBody,
            blog_api::presentation::http::auth::LoginBody,
            blog_api::presentation::http::auth::LoginResponse,
            blog_api::presentation::http::auth::MeResponse,
            blog_api::presentation::http::security::DeviceView,
        )),
        modifiers(&SecurityAddon),
        tags(
            (name = "Blogs", description = "Blogs and their posts"),
            (name = "Posts", description = "Posts, their comments and reactions"),
            (name = "Comments", description = "Comments and reactions"),
            (name = "Users", description = "User administration"),
            (name = "Auth", description = "Registration, login and token rotation"),
            (name = "Security", description = "Device sessions"),
            (name = "Testing", description = "Test-only maintenance"),
            (name = "Health", description = "System health checks")
        )
    )]
struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme("basic", SecurityScheme::Http(Http::new(HttpAuthScheme::Basic)));
        components.add_security_scheme(
            "bearer",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
        components.add_security_scheme(
            "refreshCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new("refreshToken"))),
        );
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "blog_api=debug,axum=info,tower_http=info".into()),
        )
        .init();

    let cfg = Config::from_env()?;
    info!(
        port = cfg.api_port,
        prefix = %cfg.global_prefix,
        backend = ?cfg.storage_backend,
        production = cfg.is_production,
        "Starting blog backend"
    );

    let email_sender: Arc<dyn EmailSender> = match &cfg.smtp {
        Some(smtp) => Arc::new(SmtpEmailSender::new(
            &smtp.host,
            &smtp.username,
            &smtp.password,
            &smtp.from,
        )?),
        None => {
            tracing::warn!("smtp_not_configured_emails_will_be_logged");
            Arc::new(LogEmailSender)
        }
    };
    let tokens = TokenService::new(
        cfg.jwt_secret.clone(),
        cfg.refresh_token_secret.clone(),
        cfg.access_token_ttl_secs,
        cfg.refresh_token_ttl_secs,
    );

    let services = match cfg.storage_backend {
        StorageBackend::Postgres => {
            let pool = blog_api::infrastructure::db::connect_pool(&cfg.database_url).await?;
            blog_api::infrastructure::db::migrate(&pool).await?;
            AppServices::postgres(pool, email_sender, tokens)
        }
        StorageBackend::Memory => {
            tracing::info!("memory_backend_enabled_data_is_not_persisted");
            AppServices::memory(Arc::new(MemoryStore::new()), email_sender, tokens)
        }
    };
    let ctx = AppContext::new(cfg.clone(), services);

    let cors = build_cors(&cfg);

    let mut app = blog_api::presentation::http::router(ctx);
    if cfg.swagger_enabled {
        app = app.merge(SwaggerUi::new("/swagger").url("/swagger/openapi.json", ApiDoc::openapi()));
    }
    let app = app.layer(cors).layer(
        TraceLayer::new_for_http().make_span_with(|req: &http::Request<_>| {
            let method = req.method().clone();
            let uri = req.uri().clone();
            let matched = req
                .extensions()
                .get::<MatchedPath>()
                .map(|p| p.as_str().to_string())
                .unwrap_or_default();
            tracing::info_span!("http", %method, %uri, matched_path = %matched)
        }),
    );

    let api_addr = SocketAddr::from(([0, 0, 0, 0], cfg.api_port));
    info!(%api_addr, "HTTP API listening");
    let listener = tokio::net::TcpListener::bind(api_addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;
    info!("HTTP API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = ?e, "shutdown_signal_failed");
    }
}

fn build_cors(cfg: &Config) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([
            http::Method::GET,
            http::Method::POST,
            http::Method::PUT,
            http::Method::DELETE,
            http::Method::OPTIONS,
        ])
        .allow_headers([http::header::CONTENT_TYPE, http::header::AUTHORIZATION]);
    match cfg.frontend_url.as_deref().map(HeaderValue::from_str) {
        Some(Ok(origin)) => base.allow_origin(origin).allow_credentials(true),
        // Without an explicit frontend, production denies cross-origin calls
        _ if cfg.is_production => {
            base.allow_origin(AllowOrigin::exact(HeaderValue::from_static("http://invalid")))
        }
        _ => base
            .allow_origin(AllowOrigin::mirror_request())
            .allow_credentials(true),
    }
}
