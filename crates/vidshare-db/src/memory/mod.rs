//! In-process repositories
//!
//! Every table lives behind one `RwLock`, so each repository call is atomic
//! with respect to every other call, across all repositories built from the
//! same [`MemoryDatabase`]. Used for `PERSISTENCE=memory` and in tests.

mod comment;
mod refresh_token;
mod user;
mod video;

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use vidshare_core::entities::{Comment, User, Video};
use vidshare_core::ledger::Engagement;
use vidshare_core::value_objects::Snowflake;

pub use comment::MemoryCommentRepository;
pub use refresh_token::MemoryRefreshTokenRepository;
pub use user::MemoryUserRepository;
pub use video::MemoryVideoRepository;

struct UserRow {
    user: User,
    password_hash: String,
}

struct VideoRow {
    video: Video,
    engagement: Engagement,
}

struct TokenRow {
    user_id: Snowflake,
    expires_at: DateTime<Utc>,
    revoked: bool,
}

#[derive(Default)]
struct Tables {
    users: HashMap<Snowflake, UserRow>,
    videos: HashMap<Snowflake, VideoRow>,
    comments: HashMap<Snowflake, Comment>,
    refresh_tokens: HashMap<String, TokenRow>,
}

/// Shared handle to the in-memory tables
#[derive(Clone, Default)]
pub struct MemoryDatabase {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn users(&self) -> MemoryUserRepository {
        MemoryUserRepository::new(self.clone())
    }

    pub fn videos(&self) -> MemoryVideoRepository {
        MemoryVideoRepository::new(self.clone())
    }

    pub fn comments(&self) -> MemoryCommentRepository {
        MemoryCommentRepository::new(self.clone())
    }

    pub fn refresh_tokens(&self) -> MemoryRefreshTokenRepository {
        MemoryRefreshTokenRepository::new(self.clone())
    }
}

impl std::fmt::Debug for MemoryDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tables = self.tables.read();
        f.debug_struct("MemoryDatabase")
            .field("users", &tables.users.len())
            .field("videos", &tables.videos.len())
            .field("comments", &tables.comments.len())
            .finish_non_exhaustive()
    }
}
