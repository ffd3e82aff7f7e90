use async_trait::async_trait;
use chrono::{DateTime, Utc};

use vidshare_core::traits::{RefreshTokenRepository, RepoResult};
use vidshare_core::value_objects::Snowflake;

use super::{MemoryDatabase, TokenRow};

#[derive(Clone, Debug)]
pub struct MemoryRefreshTokenRepository {
    db: MemoryDatabase,
}

impl MemoryRefreshTokenRepository {
    pub fn new(db: MemoryDatabase) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RefreshTokenRepository for MemoryRefreshTokenRepository {
    async fn store(
        &self,
        token_id: &str,
        user_id: Snowflake,
        expires_at: DateTime<Utc>,
    ) -> RepoResult<()> {
        self.db.tables.write().refresh_tokens.insert(
            token_id.to_string(),
            TokenRow {
                user_id,
                expires_at,
                revoked: false,
            },
        );
        Ok(())
    }

    async fn is_active(&self, token_id: &str, user_id: Snowflake) -> RepoResult<bool> {
        let tables = self.db.tables.read();
        Ok(tables.refresh_tokens.get(token_id).is_some_and(|row| {
            row.user_id == user_id && !row.revoked && row.expires_at > Utc::now()
        }))
    }

    async fn revoke(&self, token_id: &str) -> RepoResult<bool> {
        let mut tables = self.db.tables.write();
        Ok(match tables.refresh_tokens.get_mut(token_id) {
            Some(row) if !row.revoked => {
                row.revoked = true;
                true
            }
            _ => false,
        })
    }

    async fn revoke_all(&self, user_id: Snowflake) -> RepoResult<u64> {
        let mut tables = self.db.tables.write();
        let mut revoked = 0;
        for row in tables
            .refresh_tokens
            .values_mut()
            .filter(|row| row.user_id == user_id && !row.revoked)
        {
            row.revoked = true;
            revoked += 1;
        }
        Ok(revoked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[tokio::test]
    async fn test_revoked_and_expired_tokens_are_inactive() {
        let repo = MemoryDatabase::new().refresh_tokens();
        let user = Snowflake::new(1);
        let later = Utc::now() + Duration::hours(1);

        repo.store("a", user, later).await.unwrap();
        repo.store("b", user, Utc::now() - Duration::seconds(1)).await.unwrap();

        assert!(repo.is_active("a", user).await.unwrap());
        assert!(!repo.is_active("a", Snowflake::new(2)).await.unwrap());
        assert!(!repo.is_active("b", user).await.unwrap());

        assert!(repo.revoke("a").await.unwrap());
        assert!(!repo.revoke("a").await.unwrap());
        assert!(!repo.is_active("a", user).await.unwrap());
    }

    #[tokio::test]
    async fn test_revoke_all_counts_live_tokens() {
        let repo = MemoryDatabase::new().refresh_tokens();
        let user = Snowflake::new(1);
        let later = Utc::now() + Duration::hours(1);
        for id in ["x", "y", "z"] {
            repo.store(id, user, later).await.unwrap();
        }
        repo.revoke("x").await.unwrap();
        assert_eq!(repo.revoke_all(user).await.unwrap(), 2);
    }
}
