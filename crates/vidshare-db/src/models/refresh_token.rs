//! Refresh token database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Row of refresh_tokens, keyed by the JWT id
#[derive(Debug, Clone, FromRow)]
pub struct RefreshTokenModel {
    pub token_id: String,
    pub user_id: i64,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub revoked_at: Option<DateTime<Utc>>,
}

impl RefreshTokenModel {
    #[inline]
    pub fn is_revoked(&self) -> bool {
        self.revoked_at.is_some()
    }

    #[inline]
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    /// Neither revoked nor expired
    #[inline]
    pub fn is_valid(&self) -> bool {
        !self.is_revoked() && !self.is_expired()
    }
}
