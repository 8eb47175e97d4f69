use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;
use sqlx::types::Json;
use uuid::Uuid;

use crate::application::dto::blogging::CommentSortBy;
use crate::application::dto::pagination::{Page, PageQuery, SortKey};
use crate::application::ports::comment_repository::CommentRepository;
use crate::domain::blogging::comment::Comment;
use crate::domain::blogging::reaction::Reaction;
use crate::infrastructure::db::PgPool;

pub struct SqlxCommentRepository {
    pub pool: PgPool,
}

impl SqlxCommentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_comment(r: &PgRow) -> Comment {
    let reactions: Json<Vec<Reaction>> = r.get("reactions");
    Comment {
        id: r.get("id"),
        post_id: r.get("post_id"),
        commentator_id: r.get("commentator_id"),
        commentator_login: r.get("commentator_login"),
        content: r.get("content"),
        created_at: r.get("created_at"),
        reactions: reactions.0,
    }
}

#[async_trait]
impl CommentRepository for SqlxCommentRepository {
    async fn insert(&self, comment: &Comment) -> anyhow::Result<()> {
        sqlx::query(
            r#"INSERT INTO comments (id, post_id, commentator_id, commentator_login, content, created_at, reactions)
               VALUES ($1, $2, $3, $4, $5, $6, $7)"#,
        )
        .bind(comment.id)
        .bind(comment.post_id)
        .bind(comment.commentator_id)
        .bind(&comment.commentator_login)
        .bind(&comment.content)
        .bind(comment.created_at)
        .bind(Json(&comment.reactions))
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<Comment>> {
        let row = sqlx::query(
            r#"SELECT id, post_id, commentator_id, commentator_login, content, created_at, reactions
               FROM comments WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.as_ref().map(map_comment))
    }

    async fn update_content(&self, id: Uuid, content: &str) -> anyhow::Result<bool> {
        let res = sqlx::query("UPDATE comments SET content = $2 WHERE id = $1")
            .bind(id)
            .bind(content)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn list_for_post(
        &self,
        post_id: Uuid,
        query: &PageQuery<CommentSortBy>,
    ) -> anyhow::Result<Page<Comment>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM comments WHERE post_id = $1")
            .bind(post_id)
            .fetch_one(&self.pool)
            .await?;
        let sql = format!(
            r#"SELECT id, post_id, commentator_id, commentator_login, content, created_at, reactions
               FROM comments WHERE post_id = $1
               ORDER BY {} {}, id LIMIT $2 OFFSET $3"#,
            query.sort_by.column(),
            query.sort_direction.as_sql()
        );
        let rows = sqlx::query(&sql)
            .bind(post_id)
            .bind(query.page_size)
            .bind(query.offset())
            .fetch_all(&self.pool)
            .await?;
        Ok(Page::new(query, total, rows.iter().map(map_comment).collect()))
    }
}
