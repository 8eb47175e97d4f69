use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;
use uuid::Uuid;

use super::contains_pattern;
use crate::application::dto::blogging::{BlogFilter, BlogSortBy};
use crate::application::dto::pagination::{Page, PageQuery, SortKey};
use crate::application::ports::blog_repository::BlogRepository;
use crate::domain::blogging::blog::Blog;
use crate::infrastructure::db::PgPool;

pub struct SqlxBlogRepository {
    pub pool: PgPool,
}

impl SqlxBlogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_blog(r: &PgRow) -> Blog {
    Blog {
        id: r.get("id"),
        name: r.get("name"),
        description: r.get("description"),
        website_url: r.get("website_url"),
        is_membership: r.get("is_membership"),
        created_at: r.get("created_at"),
    }
}

#[async_trait]
impl BlogRepository for SqlxBlogRepository {
    async fn insert(&self, blog: &Blog) -> anyhow::Result<()> {
        sqlx::query(
            r#"INSERT INTO blogs (id, name, description, website_url, is_membership, created_at)
               VALUES ($1, $2, $3, $4, $5, $6)"#,
        )
        .bind(blog.id)
        .bind(&blog.name)
        .bind(&blog.description)
        .bind(&blog.website_url)
        .bind(blog.is_membership)
        .bind(blog.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<Blog>> {
        let row = sqlx::query(
            r#"SELECT id, name, description, website_url, is_membership, created_at
               FROM blogs WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.as_ref().map(map_blog))
    }

    async fn update(&self, blog: &Blog) -> anyhow::Result<bool> {
        let mut tx = self.pool.begin().await?;
        let res = sqlx::query(
            r#"UPDATE blogs SET name = $2, description = $3, website_url = $4 WHERE id = $1"#,
        )
        .bind(blog.id)
        .bind(&blog.name)
        .bind(&blog.description)
        .bind(&blog.website_url)
        .execute(&mut *tx)
        .await?;
        if res.rows_affected() == 0 {
            return Ok(false);
        }
        sqlx::query("UPDATE posts SET blog_name = $2 WHERE blog_id = $1")
            .bind(blog.id)
            .bind(&blog.name)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(true)
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM blogs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn list(
        &self,
        filter: &BlogFilter,
        query: &PageQuery<BlogSortBy>,
    ) -> anyhow::Result<Page<Blog>> {
        let pattern = filter.name_term.as_deref().map(contains_pattern);
        let total: i64 = sqlx::query_scalar(
            r#"SELECT COUNT(*) FROM blogs WHERE ($1::text IS NULL OR name ILIKE $1)"#,
        )
        .bind(&pattern)
        .fetch_one(&self.pool)
        .await?;
        // column() and as_sql() only ever yield static expressions
        let sql = format!(
            r#"SELECT id, name, description, website_url, is_membership, created_at
               FROM blogs WHERE ($1::text IS NULL OR name ILIKE $1)
               ORDER BY {} {}, id LIMIT $2 OFFSET $3"#,
            query.sort_by.column(),
            query.sort_direction.as_sql()
        );
        let rows = sqlx::query(&sql)
            .bind(&pattern)
            .bind(query.page_size)
            .bind(query.offset())
            .fetch_all(&self.pool)
            .await?;
        Ok(Page::new(query, total, rows.iter().map(map_blog).collect()))
    }
}
