//! PostgreSQL implementation of RefreshTokenRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use vidshare_core::traits::{RefreshTokenRepository, RepoResult};
use vidshare_core::value_objects::Snowflake;

use crate::models::RefreshTokenModel;

use super::error::map_db_error;

#[derive(Clone)]
pub struct PgRefreshTokenRepository {
    pool: PgPool,
}

impl PgRefreshTokenRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RefreshTokenRepository for PgRefreshTokenRepository {
    #[instrument(skip(self))]
    async fn store(
        &self,
        token_id: &str,
        user_id: Snowflake,
        expires_at: DateTime<Utc>,
    ) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO refresh_tokens (token_id, user_id, expires_at)
            VALUES ($1, $2, $3)
            ",
        )
        .bind(token_id)
        .bind(user_id.into_inner())
        .bind(expires_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn is_active(&self, token_id: &str, user_id: Snowflake) -> RepoResult<bool> {
        let token = sqlx::query_as::<_, RefreshTokenModel>(
            r"
            SELECT token_id, user_id, expires_at, created_at, revoked_at
            FROM refresh_tokens
            WHERE token_id = $1
            ",
        )
        .bind(token_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(token.is_some_and(|t| t.user_id == user_id.into_inner() && t.is_valid()))
    }

    #[instrument(skip(self))]
    async fn revoke(&self, token_id: &str) -> RepoResult<bool> {
        let result = sqlx::query(
            r"
            UPDATE refresh_tokens
            SET revoked_at = NOW()
            WHERE token_id = $1 AND revoked_at IS NULL
            ",
        )
        .bind(token_id)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn revoke_all(&self, user_id: Snowflake) -> RepoResult<u64> {
        let result = sqlx::query(
            r"
            UPDATE refresh_tokens
            SET revoked_at = NOW()
            WHERE user_id = $1 AND revoked_at IS NULL
            ",
        )
        .bind(user_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }
}
