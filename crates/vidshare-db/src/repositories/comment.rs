//! PostgreSQL implementation of CommentRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use vidshare_core::entities::Comment;
use vidshare_core::error::DomainError;
use vidshare_core::traits::{CommentRepository, PageQuery, RepoResult};
use vidshare_core::value_objects::Snowflake;

use crate::models::CommentModel;

use super::error::{comment_not_found, map_db_error};

#[derive(Clone)]
pub struct PgCommentRepository {
    pool: PgPool,
}

impl PgCommentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentRepository for PgCommentRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Comment>> {
        let result = sqlx::query_as::<_, CommentModel>(
            r"
            SELECT id, video_id, owner_id, content, created_at, updated_at
            FROM comments
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Comment::from))
    }

    #[instrument(skip(self))]
    async fn find_by_video(
        &self,
        video_id: Snowflake,
        page: PageQuery,
    ) -> RepoResult<Vec<Comment>> {
        let limit = page.effective_limit();

        let results = match (page.before, page.after) {
            (Some(before), None) => {
                sqlx::query_as::<_, CommentModel>(
                    r"
                    SELECT id, video_id, owner_id, content, created_at, updated_at
                    FROM comments
                    WHERE video_id = $1 AND id < $2
                    ORDER BY id DESC
                    LIMIT $3
                    ",
                )
                .bind(video_id.into_inner())
                .bind(before.into_inner())
                .bind(limit)
                .fetch_all(&self.pool)
                .await
            }
            (None, Some(after)) => {
                sqlx::query_as::<_, CommentModel>(
                    r"
                    SELECT id, video_id, owner_id, content, created_at, updated_at
                    FROM comments
                    WHERE video_id = $1 AND id > $2
                    ORDER BY id ASC
                    LIMIT $3
                    ",
                )
                .bind(video_id.into_inner())
                .bind(after.into_inner())
                .bind(limit)
                .fetch_all(&self.pool)
                .await
            }
            _ => {
                sqlx::query_as::<_, CommentModel>(
                    r"
                    SELECT id, video_id, owner_id, content, created_at, updated_at
                    FROM comments
                    WHERE video_id = $1
                    ORDER BY id DESC
                    LIMIT $2
                    ",
                )
                .bind(video_id.into_inner())
                .bind(limit)
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(map_db_error)?;

        let mut comments: Vec<Comment> = results.into_iter().map(Comment::from).collect();
        if page.after.is_some() && page.before.is_none() {
            comments.reverse();
        }
        Ok(comments)
    }

    #[instrument(skip(self, comment), fields(comment_id = %comment.id))]
    async fn create(&self, comment: &Comment) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO comments (id, video_id, owner_id, content, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(comment.id.into_inner())
        .bind(comment.video_id.into_inner())
        .bind(comment.owner_id.into_inner())
        .bind(&comment.content)
        .bind(comment.created_at)
        .bind(comment.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            // the parent video vanished between the existence check and the insert
            if e
                .as_database_error()
                .is_some_and(|db| db.is_foreign_key_violation())
            {
                DomainError::VideoNotFound(comment.video_id)
            } else {
                map_db_error(e)
            }
        })?;

        Ok(())
    }

    #[instrument(skip(self, comment), fields(comment_id = %comment.id))]
    async fn update(&self, comment: &Comment) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE comments
            SET content = $2, updated_at = $3
            WHERE id = $1
            ",
        )
        .bind(comment.id.into_inner())
        .bind(&comment.content)
        .bind(comment.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(comment_not_found(comment.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(comment_not_found(id));
        }

        Ok(())
    }
}
