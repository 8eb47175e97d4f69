use std::sync::Arc;

use crate::application::ports::blog_repository::BlogRepository;
use crate::application::ports::comment_repository::CommentRepository;
use crate::application::ports::device_session_repository::DeviceSessionRepository;
use crate::application::ports::email_sender::EmailSender;
use crate::application::ports::maintenance_repository::MaintenanceRepository;
use crate::application::ports::post_repository::PostRepository;
use crate::application::ports::reaction_repository::ReactionRepository;
use crate::application::ports::user_repository::UserRepository;
use crate::application::services::tokens::TokenService;
use crate::bootstrap::config::Config;
use crate::infrastructure::db::PgPool;
use crate::infrastructure::db::repositories::blog_repository_sqlx::SqlxBlogRepository;
use crate::infrastructure::db::repositories::comment_repository_sqlx::SqlxCommentRepository;
use crate::infrastructure::db::repositories::device_session_repository_sqlx::SqlxDeviceSessionRepository;
use crate::infrastructure::db::repositories::maintenance_repository_sqlx::SqlxMaintenanceRepository;
use crate::infrastructure::db::repositories::post_repository_sqlx::SqlxPostRepository;
use crate::infrastructure::db::repositories::reaction_repository_sqlx::SqlxReactionRepository;
use crate::infrastructure::db::repositories::user_repository_sqlx::SqlxUserRepository;
use crate::infrastructure::memory::MemoryStore;

#[derive(Clone)]
pub struct AppContext {
    pub cfg: Config,
    services: Arc<AppServices>,
}

#[derive(Clone)]
pub struct AppServices {
    blog_repo: Arc<dyn BlogRepository>,
    post_repo: Arc<dyn PostRepository>,
    comment_repo: Arc<dyn CommentRepository>,
    user_repo: Arc<dyn UserRepository>,
    session_repo: Arc<dyn DeviceSessionRepository>,
    reaction_repo: Arc<dyn ReactionRepository>,
    maintenance_repo: Arc<dyn MaintenanceRepository>,
    email_sender: Arc<dyn EmailSender>,
    tokens: TokenService,
}

impl AppServices {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        blog_repo: Arc<dyn BlogRepository>,
        post_repo: Arc<dyn PostRepository>,
        comment_repo: Arc<dyn CommentRepository>,
        user_repo: Arc<dyn UserRepository>,
        session_repo: Arc<dyn DeviceSessionRepository>,
        reaction_repo: Arc<dyn ReactionRepository>,
        maintenance_repo: Arc<dyn MaintenanceRepository>,
        email_sender: Arc<dyn EmailSender>,
        tokens: TokenService,
    ) -> Self {
        Self {
            blog_repo,
            post_repo,
            comment_repo,
            user_repo,
            session_repo,
            reaction_repo,
            maintenance_repo,
            email_sender,
            tokens,
        }
    }

    pub fn postgres(pool: PgPool, email_sender: Arc<dyn EmailSender>, tokens: TokenService) -> Self {
        Self::new(
            Arc::new(SqlxBlogRepository::new(pool.clone())),
            Arc::new(SqlxPostRepository::new(pool.clone())),
            Arc::new(SqlxCommentRepository::new(pool.clone())),
            Arc::new(SqlxUserRepository::new(pool.clone())),
            Arc::new(SqlxDeviceSessionRepository::new(pool.clone())),
            Arc::new(SqlxReactionRepository::new(pool.clone())),
            Arc::new(SqlxMaintenanceRepository::new(pool)),
            email_sender,
            tokens,
        )
    }

    // Every port shares one store so the reaction write sees users and targets together.
    pub fn memory(
        store: Arc<MemoryStore>,
        email_sender: Arc<dyn EmailSender>,
        tokens: TokenService,
    ) -> Self {
        Self::new(
            store.clone(),
            store.clone(),
            store.clone(),
            store.clone(),
            store.clone(),
            store.clone(),
            store,
            email_sender,
            tokens,
        )
    }
}

impl AppContext {
    pub fn new(cfg: Config, services: AppServices) -> Self {
        Self {
            cfg,
            services: Arc::new(services),
        }
    }

    pub fn blog_repo(&self) -> Arc<dyn BlogRepository> {
        self.services.blog_repo.clone()
    }

    pub fn post_repo(&self) -> Arc<dyn PostRepository> {
        self.services.post_repo.clone()
    }

    pub fn comment_repo(&self) -> Arc<dyn CommentRepository> {
        self.services.comment_repo.clone()
    }

    pub fn user_repo(&self) -> Arc<dyn UserRepository> {
        self.services.user_repo.clone()
    }

    pub fn session_repo(&self) -> Arc<dyn DeviceSessionRepository> {
        self.services.session_repo.clone()
    }

    pub fn reaction_repo(&self) -> Arc<dyn ReactionRepository> {
        self.services.reaction_repo.clone()
    }

    pub fn maintenance_repo(&self) -> Arc<dyn MaintenanceRepository> {
        self.services.maintenance_repo.clone()
    }

    pub fn email_sender(&self) -> Arc<dyn EmailSender> {
        self.services.email_sender.clone()
    }

    pub fn tokens(&self) -> &TokenService {
        &self.services.tokens
    }

    pub fn confirmation_code_ttl(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.cfg.confirmation_code_ttl_secs)
    }

    pub fn recovery_code_ttl(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.cfg.recovery_code_ttl_secs)
    }
}
