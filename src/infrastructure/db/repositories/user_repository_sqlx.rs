use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;
use sqlx::types::Json;
use uuid::Uuid;

use super::contains_pattern;
use crate::application::dto::accounts::{UserFilter, UserSortBy};
use crate::application::dto::pagination::{Page, PageQuery, SortKey};
use crate::application::ports::user_repository::UserRepository;
use crate::domain::accounts::user::{EmailConfirmation, PasswordRecovery, User};
use crate::domain::blogging::reaction::UserReaction;
use crate::infrastructure::db::PgPool;

pub struct SqlxUserRepository {
    pub pool: PgPool,
}

impl SqlxUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_one(&self, predicate: &str, value: &str) -> anyhow::Result<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE {predicate} LIMIT 1");
        let row = sqlx::query(&sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(map_user))
    }
}

const USER_COLUMNS: &str = "id, login, email, password_hash, created_at, is_confirmed, \
     confirmation_code, confirmation_expires_at, recovery_code, recovery_expires_at, reactions";

fn map_user(r: &PgRow) -> User {
    let reactions: Json<Vec<UserReaction>> = r.get("reactions");
    User {
        id: r.get("id"),
        login: r.get("login"),
        email: r.get("email"),
        password_hash: r.get("password_hash"),
        created_at: r.get("created_at"),
        confirmation: EmailConfirmation {
            is_confirmed: r.get("is_confirmed"),
            code: r.get("confirmation_code"),
            expires_at: r.get("confirmation_expires_at"),
        },
        recovery: PasswordRecovery {
            code: r.get("recovery_code"),
            expires_at: r.get("recovery_expires_at"),
        },
        reactions: reactions.0,
    }
}

#[async_trait]
impl UserRepository for SqlxUserRepository {
    async fn insert(&self, user: &User) -> anyhow::Result<()> {
        sqlx::query(
            r#"INSERT INTO users (id, login, email, password_hash, created_at, is_confirmed,
                   confirmation_code, confirmation_expires_at, recovery_code, recovery_expires_at, reactions)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)"#,
        )
        .bind(user.id)
        .bind(&user.login)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.created_at)
        .bind(user.confirmation.is_confirmed)
        .bind(&user.confirmation.code)
        .bind(user.confirmation.expires_at)
        .bind(&user.recovery.code)
        .bind(user.recovery.expires_at)
        .bind(Json(&user.reactions))
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(map_user))
    }

    async fn find_by_login_or_email(
        &self,
        login: &str,
        email: &str,
    ) -> anyhow::Result<Option<User>> {
        let sql = format!(
            "SELECT {USER_COLUMNS} FROM users WHERE login = $1 OR email = $2 \
             ORDER BY (login = $1) DESC LIMIT 1"
        );
        let row = sqlx::query(&sql)
            .bind(login)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(map_user))
    }

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        self.find_one("email = $1", email).await
    }

    async fn find_by_confirmation_code(&self, code: &str) -> anyhow::Result<Option<User>> {
        self.find_one("confirmation_code = $1", code).await
    }

    async fn find_by_recovery_code(&self, code: &str) -> anyhow::Result<Option<User>> {
        self.find_one("recovery_code = $1", code).await
    }

    async fn update(&self, user: &User) -> anyhow::Result<bool> {
        let res = sqlx::query(
            r#"UPDATE users
               SET password_hash = $2, is_confirmed = $3, confirmation_code = $4,
                   confirmation_expires_at = $5, recovery_code = $6, recovery_expires_at = $7
               WHERE id = $1"#,
        )
        .bind(user.id)
        .bind(&user.password_hash)
        .bind(user.confirmation.is_confirmed)
        .bind(&user.confirmation.code)
        .bind(user.confirmation.expires_at)
        .bind(&user.recovery.code)
        .bind(user.recovery.expires_at)
        .execute(&self.pool)
        .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn list(
        &self,
        filter: &UserFilter,
        query: &PageQuery<UserSortBy>,
    ) -> anyhow::Result<Page<User>> {
        let login = filter.login_term.as_deref().map(contains_pattern);
        let email = filter.email_term.as_deref().map(contains_pattern);
        let predicate = r#"(($1::text IS NULL AND $2::text IS NULL)
                 OR ($1::text IS NOT NULL AND login ILIKE $1)
                 OR ($2::text IS NOT NULL AND email ILIKE $2))"#;
        let count_sql = format!("SELECT COUNT(*) FROM users WHERE {predicate}");
        let total: i64 = sqlx::query_scalar(&count_sql)
            .bind(&login)
            .bind(&email)
            .fetch_one(&self.pool)
            .await?;
        let sql = format!(
            "SELECT {USER_COLUMNS} FROM users WHERE {predicate} ORDER BY {} {}, id LIMIT $3 OFFSET $4",
            query.sort_by.column(),
            query.sort_direction.as_sql()
        );
        let rows = sqlx::query(&sql)
            .bind(&login)
            .bind(&email)
            .bind(query.page_size)
            .bind(query.offset())
            .fetch_all(&self.pool)
            .await?;
        Ok(Page::new(query, total, rows.iter().map(map_user).collect()))
    }
}
