//! User entity - a channel owner and viewer account

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// Registered account. The password hash lives with the repository, never here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Snowflake,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new User. Usernames and emails are stored lowercase.
    pub fn new(id: Snowflake, username: &str, email: &str, full_name: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            username: username.trim().to_lowercase(),
            email: email.trim().to_lowercase(),
            full_name,
            avatar_url: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a partial profile update, touching `updated_at` only when something changed
    pub fn apply_profile(
        &mut self,
        full_name: Option<String>,
        email: Option<&str>,
        avatar_url: Option<Option<String>>,
    ) -> bool {
        let mut changed = false;
        if let Some(name) = full_name.filter(|n| *n != self.full_name) {
            self.full_name = name;
            changed = true;
        }
        if let Some(email) = email.map(|e| e.trim().to_lowercase()) {
            if email != self.email {
                self.email = email;
                changed = true;
            }
        }
        if let Some(avatar) = avatar_url.filter(|a| *a != self.avatar_url) {
            self.avatar_url = avatar;
            changed = true;
        }
        if changed {
            self.updated_at = Utc::now();
        }
        changed
    }
}
