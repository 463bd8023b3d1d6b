/// Post repository: CRUD plus atomic comment appends
use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::StoreError;
use crate::models::{Comment, NewPost, Post};

#[async_trait]
pub trait PostStore: Send + Sync {
    async fn insert(&self, new: NewPost) -> Result<Post, StoreError>;

    async fn find(&self, id: Uuid) -> Result<Option<Post>, StoreError>;

    async fn list(&self) -> Result<Vec<Post>, StoreError>;

    /// Apply the provided fields; `None` leaves a field untouched. Returns
    /// `None` when the post does not exist.
    async fn update_content(
        &self,
        id: Uuid,
        title: Option<&str>,
        content: Option<&str>,
    ) -> Result<Option<Post>, StoreError>;

    async fn set_image(&self, id: Uuid, image_url: &str) -> Result<Option<Post>, StoreError>;

    /// Append one comment to the end of the post's sequence. Must be atomic
    /// with respect to concurrent appends on the same post: no blind
    /// read-modify-write of the whole sequence.
    async fn append_comment(&self, id: Uuid, comment: Comment) -> Result<Option<Post>, StoreError>;

    /// Delete the post and, with it, its embedded comments. Returns whether
    /// a post was removed.
    async fn delete(&self, id: Uuid) -> Result<bool, StoreError>;
}

pub struct PgPostStore {
    pool: PgPool,
}

impl PgPostStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn backend(e: sqlx::Error) -> StoreError {
    StoreError::Backend(e.to_string())
}

#[async_trait]
impl PostStore for PgPostStore {
    async fn insert(&self, new: NewPost) -> Result<Post, StoreError> {
        sqlx::query_as::<_, Post>(
            r#"
            INSERT INTO posts (title, content, author)
            VALUES ($1, $2, $3)
            RETURNING id, title, content, author, image_url, comments, created_at, updated_at
            "#,
        )
        .bind(&new.title)
        .bind(&new.content)
        .bind(new.author)
        .fetch_one(&self.pool)
        .await
        .map_err(backend)
    }

    async fn find(&self, id: Uuid) -> Result<Option<Post>, StoreError> {
        sqlx::query_as::<_, Post>(
            r#"
            SELECT id, title, content, author, image_url, comments, created_at, updated_at
            FROM posts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(backend)
    }

    async fn list(&self) -> Result<Vec<Post>, StoreError> {
        sqlx::query_as::<_, Post>(
            r#"
            SELECT id, title, content, author, image_url, comments, created_at, updated_at
            FROM posts
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(backend)
    }

    async fn update_content(
        &self,
        id: Uuid,
        title: Option<&str>,
        content: Option<&str>,
    ) -> Result<Option<Post>, StoreError> {
        sqlx::query_as::<_, Post>(
            r#"
            UPDATE posts
            SET title = COALESCE($2, title),
                content = COALESCE($3, content),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, title, content, author, image_url, comments, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(title)
        .bind(content)
        .fetch_optional(&self.pool)
        .await
        .map_err(backend)
    }

    async fn set_image(&self, id: Uuid, image_url: &str) -> Result<Option<Post>, StoreError> {
        sqlx::query_as::<_, Post>(
            r#"
            UPDATE posts
            SET image_url = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, title, content, author, image_url, comments, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(image_url)
        .fetch_optional(&self.pool)
        .await
        .map_err(backend)
    }

    async fn append_comment(&self, id: Uuid, comment: Comment) -> Result<Option<Post>, StoreError> {
        // Single-statement JSONB append; the row lock serializes concurrent
        // writers so no append overwrites another.
        sqlx::query_as::<_, Post>(
            r#"
            UPDATE posts
            SET comments = comments || $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, title, content, author, image_url, comments, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(Json(vec![comment]))
        .fetch_optional(&self.pool)
        .await
        .map_err(backend)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(backend)?;

        Ok(result.rows_affected() > 0)
    }
}
