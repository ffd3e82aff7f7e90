//! Video reaction database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Row of video_reactions; `reaction` is `'like'` or `'dislike'`
#[derive(Debug, Clone, FromRow)]
pub struct ReactionModel {
    pub video_id: i64,
    pub user_id: i64,
    pub reaction: String,
    pub updated_at: DateTime<Utc>,
}

/// Per-kind totals computed from video_reactions
#[derive(Debug, Clone, FromRow)]
pub struct ReactionTallyModel {
    pub likes: i64,
    pub dislikes: i64,
}
