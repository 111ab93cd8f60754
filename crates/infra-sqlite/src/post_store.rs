// SQLite collaborators for the like-post use case

use crate::error::map_sqlx_error;
use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::debug;
use usecase_core::domain::PostLike;
use usecase_core::port::{CollaboratorError, Compensation, EntityStore, Precondition};

/// Posts catalog + like store
///
/// Precondition: the referenced post exists.
pub struct SqlitePostStore {
    pool: SqlitePool,
}

impl SqlitePostStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Register a post so it can be liked (no-op if already known)
    pub async fn register_post(&self, post_id: &str) -> Result<(), CollaboratorError> {
        sqlx::query("INSERT OR IGNORE INTO posts (id) VALUES (?)")
            .bind(post_id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(())
    }

    /// Find like by ID
    pub async fn find_like(&self, id: &str) -> Result<Option<PostLike>, CollaboratorError> {
        let row = sqlx::query_as::<_, PostLikeRow>("SELECT * FROM post_likes WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(row.map(PostLikeRow::into_like))
    }

    /// Count likes for a post
    pub async fn count_likes(&self, post_id: &str) -> Result<i64, CollaboratorError> {
        sqlx::query_scalar("SELECT COUNT(*) FROM post_likes WHERE post_id = ?")
            .bind(post_id)
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_error)
    }
}

#[async_trait]
impl Precondition for SqlitePostStore {
    async fn check(&self, subject_id: &str) -> Result<bool, CollaboratorError> {
        let exists: i64 = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM posts WHERE id = ?)")
            .bind(subject_id)
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(exists == 1)
    }

    fn describe(&self) -> &str {
        "post does not exist"
    }
}

#[async_trait]
impl EntityStore<PostLike> for SqlitePostStore {
    async fn persist(&self, entity: PostLike) -> Result<PostLike, CollaboratorError> {
        sqlx::query("INSERT INTO post_likes (id, user_id, post_id, liked_at) VALUES (?, ?, ?, ?)")
            .bind(&entity.id)
            .bind(&entity.user_id)
            .bind(&entity.post_id)
            .bind(entity.liked_at)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        debug!(like_id = %entity.id, post_id = %entity.post_id, "Like persisted");
        Ok(entity)
    }
}

#[async_trait]
impl Compensation<PostLike> for SqlitePostStore {
    async fn compensate(&self, entity: &PostLike) -> Result<(), CollaboratorError> {
        sqlx::query("DELETE FROM post_likes WHERE id = ?")
            .bind(&entity.id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(())
    }
}

/// SQLite row representation
#[derive(Debug, sqlx::FromRow)]
struct PostLikeRow {
    id: String,
    user_id: String,
    post_id: String,
    liked_at: i64,
}

impl PostLikeRow {
    fn into_like(self) -> PostLike {
        PostLike {
            id: self.id,
            user_id: self.user_id,
            post_id: self.post_id,
            liked_at: self.liked_at,
        }
    }
}
