//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation (PostgreSQL or in-memory).

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{Comment, User, Video};
use crate::error::DomainError;
use crate::ledger::{ReactionChange, ReactionOutcome};
use crate::value_objects::{ReactionCounts, ReactionState, Snowflake};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

/// Cursor pagination over snowflake-ordered collections
#[derive(Debug, Clone, Default)]
pub struct PageQuery {
    pub before: Option<Snowflake>,
    pub after: Option<Snowflake>,
    pub limit: i64,
}

impl PageQuery {
    pub const DEFAULT_LIMIT: i64 = 20;
    pub const MAX_LIMIT: i64 = 100;

    /// Limit clamped into `1..=MAX_LIMIT`, with 0 meaning the default
    pub fn effective_limit(&self) -> i64 {
        if self.limit <= 0 {
            Self::DEFAULT_LIMIT
        } else {
            self.limit.min(Self::MAX_LIMIT)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VideoSort {
    #[default]
    Newest,
    Oldest,
}

/// Filter for video listings
#[derive(Debug, Clone, Default)]
pub struct VideoQuery {
    pub owner_id: Option<Snowflake>,
    /// Case-insensitive substring match on the title
    pub search: Option<String>,
    /// Also return unpublished videos (only ever set for the owner's own listing)
    pub include_unpublished: bool,
    pub sort: VideoSort,
    pub page: PageQuery,
}

impl VideoQuery {
    /// Scan towards a single cursor, otherwise in display order
    pub fn scans_ascending(&self) -> bool {
        match (self.page.before, self.page.after) {
            (None, Some(_)) => true,
            (Some(_), None) => false,
            _ => self.sort == VideoSort::Oldest,
        }
    }

    /// A page scanned against the display order has to be flipped
    pub fn needs_reversal(&self) -> bool {
        self.scans_ascending() != (self.sort == VideoSort::Oldest)
    }
}

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>>;

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;

    async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>>;

    async fn email_exists(&self, email: &str) -> RepoResult<bool>;

    async fn username_exists(&self, username: &str) -> RepoResult<bool>;

    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()>;

    /// Persist profile fields (full name, email, avatar)
    async fn update(&self, user: &User) -> RepoResult<()>;

    async fn get_password_hash(&self, id: Snowflake) -> RepoResult<Option<String>>;

    async fn update_password(&self, id: Snowflake, password_hash: &str) -> RepoResult<()>;
}

// ============================================================================
// Video Repository
// ============================================================================

#[async_trait]
pub trait VideoRepository: Send + Sync {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Video>>;

    async fn list(&self, query: &VideoQuery) -> RepoResult<Vec<Video>>;

    async fn create(&self, video: &Video) -> RepoResult<()>;

    /// Persist owner-editable fields: title, description, thumbnail, publish flag.
    /// Engagement counters are never written through this method.
    async fn update(&self, video: &Video) -> RepoResult<()>;

    /// Remove the video together with its reactions, views and comments.
    async fn delete(&self, id: Snowflake) -> RepoResult<()>;

    /// Apply one reaction change as a single atomic read-modify-write.
    ///
    /// Fails with `VideoNotFound` when the video does not exist.
    async fn apply_reaction(
        &self,
        video_id: Snowflake,
        user_id: Snowflake,
        change: ReactionChange,
    ) -> RepoResult<ReactionOutcome>;

    async fn reaction_of(&self, video_id: Snowflake, user_id: Snowflake)
        -> RepoResult<ReactionState>;

    /// Add `user_id` to the video's view set, bumping `view_count` only on
    /// first insertion. Returns the video as stored afterwards.
    async fn record_view(&self, video_id: Snowflake, user_id: Snowflake) -> RepoResult<Video>;

    /// Recompute the cached like/dislike counters from the reaction map.
    async fn reconcile_counts(&self, video_id: Snowflake) -> RepoResult<ReactionCounts>;
}

// ============================================================================
// Comment Repository
// ============================================================================

#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Comment>>;

    /// Comments on a video, newest first
    async fn find_by_video(&self, video_id: Snowflake, page: PageQuery)
        -> RepoResult<Vec<Comment>>;

    async fn create(&self, comment: &Comment) -> RepoResult<()>;

    async fn update(&self, comment: &Comment) -> RepoResult<()>;

    async fn delete(&self, id: Snowflake) -> RepoResult<()>;
}

// ============================================================================
// Refresh Token Repository
// ============================================================================

/// Issued refresh tokens, keyed by the JWT id they were signed with.
#[async_trait]
pub trait RefreshTokenRepository: Send + Sync {
    async fn store(
        &self,
        token_id: &str,
        user_id: Snowflake,
        expires_at: DateTime<Utc>,
    ) -> RepoResult<()>;

    /// Whether the token exists, belongs to `user_id`, is unexpired and unrevoked
    async fn is_active(&self, token_id: &str, user_id: Snowflake) -> RepoResult<bool>;

    /// Revoke a single token; returns whether it was active
    async fn revoke(&self, token_id: &str) -> RepoResult<bool>;

    /// Revoke all of a user's tokens; returns how many were revoked
    async fn revoke_all(&self, user_id: Snowflake) -> RepoResult<u64>;
}
