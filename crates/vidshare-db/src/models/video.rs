//! Video database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct VideoModel {
    pub id: i64,
    pub owner_id: i64,
    pub title: String,
    pub description: String,
    pub video_key: String,
    pub video_url: String,
    pub thumbnail_key: Option<String>,
    pub thumbnail_url: Option<String>,
    pub duration_secs: f64,
    pub is_published: bool,
    pub like_count: i64,
    pub dislike_count: i64,
    pub view_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
