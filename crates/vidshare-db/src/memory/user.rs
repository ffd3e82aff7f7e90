use async_trait::async_trait;
use chrono::Utc;

use vidshare_core::entities::User;
use vidshare_core::error::DomainError;
use vidshare_core::traits::{RepoResult, UserRepository};
use vidshare_core::value_objects::Snowflake;

use super::{MemoryDatabase, Tables, UserRow};

#[derive(Clone, Debug)]
pub struct MemoryUserRepository {
    db: MemoryDatabase,
}

impl MemoryUserRepository {
    pub fn new(db: MemoryDatabase) -> Self {
        Self { db }
    }
}

/// Reject `user` if another account already holds its username or email
fn check_unique(tables: &Tables, user: &User) -> RepoResult<()> {
    for row in tables.users.values().filter(|row| row.user.id != user.id) {
        if row.user.username == user.username {
            return Err(DomainError::UsernameAlreadyExists);
        }
        if row.user.email == user.email {
            return Err(DomainError::EmailAlreadyExists);
        }
    }
    Ok(())
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>> {
        Ok(self.db.tables.read().users.get(&id).map(|row| row.user.clone()))
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let email = email.to_lowercase();
        let tables = self.db.tables.read();
        Ok(tables
            .users
            .values()
            .find(|row| row.user.email == email)
            .map(|row| row.user.clone()))
    }

    async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>> {
        let username = username.to_lowercase();
        let tables = self.db.tables.read();
        Ok(tables
            .users
            .values()
            .find(|row| row.user.username == username)
            .map(|row| row.user.clone()))
    }

    async fn email_exists(&self, email: &str) -> RepoResult<bool> {
        Ok(self.find_by_email(email).await?.is_some())
    }

    async fn username_exists(&self, username: &str) -> RepoResult<bool> {
        Ok(self.find_by_username(username).await?.is_some())
    }

    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()> {
        let mut tables = self.db.tables.write();
        check_unique(&tables, user)?;
        tables.users.insert(
            user.id,
            UserRow {
                user: user.clone(),
                password_hash: password_hash.to_string(),
            },
        );
        Ok(())
    }

    async fn update(&self, user: &User) -> RepoResult<()> {
        let mut tables = self.db.tables.write();
        check_unique(&tables, user)?;
        let row = tables
            .users
            .get_mut(&user.id)
            .ok_or(DomainError::UserNotFound(user.id))?;
        row.user = user.clone();
        Ok(())
    }

    async fn get_password_hash(&self, id: Snowflake) -> RepoResult<Option<String>> {
        Ok(self
            .db
            .tables
            .read()
            .users
            .get(&id)
            .map(|row| row.password_hash.clone()))
    }

    async fn update_password(&self, id: Snowflake, password_hash: &str) -> RepoResult<()> {
        let mut tables = self.db.tables.write();
        let row = tables.users.get_mut(&id).ok_or(DomainError::UserNotFound(id))?;
        row.password_hash = password_hash.to_string();
        row.user.updated_at = Utc::now();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_duplicate_username_and_email_rejected() {
        let repo = MemoryDatabase::new().users();
        let alice = User::new(Snowflake::new(1), "Alice", "alice@example.com", "Alice".into());
        repo.create(&alice, "hash").await.unwrap();

        let same_name = User::new(Snowflake::new(2), "alice", "other@example.com", "A".into());
        assert!(matches!(
            repo.create(&same_name, "hash").await,
            Err(DomainError::UsernameAlreadyExists)
        ));

        let same_mail = User::new(Snowflake::new(3), "bob", "ALICE@example.com", "B".into());
        assert!(matches!(
            repo.create(&same_mail, "hash").await,
            Err(DomainError::EmailAlreadyExists)
        ));
    }

    #[tokio::test]
    async fn test_lookup_is_case_insensitive() {
        let repo = MemoryDatabase::new().users();
        let user = User::new(Snowflake::new(1), "carol", "carol@example.com", "Carol".into());
        repo.create(&user, "hash").await.unwrap();

        assert!(repo.find_by_username("CAROL").await.unwrap().is_some());
        assert!(repo.email_exists("Carol@Example.com").await.unwrap());
        assert_eq!(
            repo.get_password_hash(user.id).await.unwrap().as_deref(),
            Some("hash")
        );
    }
}
