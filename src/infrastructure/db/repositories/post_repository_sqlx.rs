use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;
use sqlx::types::Json;
use uuid::Uuid;

use crate::application::dto::blogging::PostSortBy;
use crate::application::dto::pagination::{Page, PageQuery, SortKey};
use crate::application::ports::post_repository::PostRepository;
use crate::domain::blogging::post::Post;
use crate::domain::blogging::reaction::Reaction;
use crate::infrastructure::db::PgPool;

pub struct SqlxPostRepository {
    pub pool: PgPool,
}

impl SqlxPostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const POST_COLUMNS: &str =
    "id, title, short_description, content, blog_id, blog_name, created_at, reactions";

fn map_post(r: &PgRow) -> Post {
    let reactions: Json<Vec<Reaction>> = r.get("reactions");
    Post {
        id: r.get("id"),
        title: r.get("title"),
        short_description: r.get("short_description"),
        content: r.get("content"),
        blog_id: r.get("blog_id"),
        blog_name: r.get("blog_name"),
        created_at: r.get("created_at"),
        reactions: reactions.0,
    }
}

#[async_trait]
impl PostRepository for SqlxPostRepository {
    async fn insert(&self, post: &Post) -> anyhow::Result<()> {
        sqlx::query(
            r#"INSERT INTO posts (id, title, short_description, content, blog_id, blog_name, created_at, reactions)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8)"#,
        )
        .bind(post.id)
        .bind(&post.title)
        .bind(&post.short_description)
        .bind(&post.content)
        .bind(post.blog_id)
        .bind(&post.blog_name)
        .bind(post.created_at)
        .bind(Json(&post.reactions))
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<Post>> {
        let sql = format!("SELECT {POST_COLUMNS} FROM posts WHERE id = $1");
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(map_post))
    }

    async fn update(&self, post: &Post) -> anyhow::Result<bool> {
        let res = sqlx::query(
            r#"UPDATE posts
               SET title = $2, short_description = $3, content = $4, blog_id = $5, blog_name = $6
               WHERE id = $1"#,
        )
        .bind(post.id)
        .bind(&post.title)
        .bind(&post.short_description)
        .bind(&post.content)
        .bind(post.blog_id)
        .bind(&post.blog_name)
        .execute(&self.pool)
        .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn list(
        &self,
        blog_id: Option<Uuid>,
        query: &PageQuery<PostSortBy>,
    ) -> anyhow::Result<Page<Post>> {
        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM posts WHERE ($1::uuid IS NULL OR blog_id = $1)")
                .bind(blog_id)
                .fetch_one(&self.pool)
                .await?;
        let sql = format!(
            r#"SELECT {POST_COLUMNS} FROM posts
               WHERE ($1::uuid IS NULL OR blog_id = $1)
               ORDER BY {} {}, id LIMIT $2 OFFSET $3"#,
            query.sort_by.column(),
            query.sort_direction.as_sql()
        );
        let rows = sqlx::query(&sql)
            .bind(blog_id)
            .bind(query.page_size)
            .bind(query.offset())
            .fetch_all(&self.pool)
            .await?;
        Ok(Page::new(query, total, rows.iter().map(map_post).collect()))
    }
}
