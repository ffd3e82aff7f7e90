//! Video entity - an uploaded video document and its engagement counters

use chrono::{DateTime, Utc};

use crate::value_objects::{MediaRef, ReactionCounts, Snowflake};

/// Uploaded video.
///
/// `like_count`, `dislike_count` and `view_count` are projections of the
/// per-user reaction map and view set the repository keeps alongside the row;
/// they are only ever moved by the engagement ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct Video {
    pub id: Snowflake,
    pub owner_id: Snowflake,
    pub title: String,
    pub description: String,
    pub video_file: MediaRef,
    pub thumbnail: Option<MediaRef>,
    pub duration_secs: f64,
    pub is_published: bool,
    pub like_count: i64,
    pub dislike_count: i64,
    pub view_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields supplied by the uploader; everything else starts at zero.
#[derive(Debug, Clone)]
pub struct VideoDraft {
    pub title: String,
    pub description: String,
    pub video_file: MediaRef,
    pub thumbnail: Option<MediaRef>,
    pub duration_secs: f64,
    pub is_published: bool,
}

impl Video {
    pub fn new(id: Snowflake, owner_id: Snowflake, draft: VideoDraft) -> Self {
        let now = Utc::now();
        Self {
            id,
            owner_id,
            title: draft.title,
            description: draft.description,
            video_file: draft.video_file,
            thumbnail: draft.thumbnail,
            duration_secs: draft.duration_secs,
            is_published: draft.is_published,
            like_count: 0,
            dislike_count: 0,
            view_count: 0,
            created_at: now,
            updated_at: now,
        }
    }

    #[inline]
    pub fn counts(&self) -> ReactionCounts {
        ReactionCounts::new(self.like_count, self.dislike_count)
    }

    /// Whether `viewer` may see the video at all
    pub fn is_visible_to(&self, viewer: Option<Snowflake>) -> bool {
        self.is_published || viewer == Some(self.owner_id)
    }

    /// Every storage key this video holds, for release on delete
    pub fn media_keys(&self) -> Vec<&str> {
        std::iter::once(self.video_file.key.as_str())
            .chain(self.thumbnail.as_ref().map(|t| t.key.as_str()))
            .collect()
    }

    pub fn edit(&mut self, title: Option<String>, description: Option<String>) {
        if let Some(title) = title {
            self.title = title;
        }
        if let Some(description) = description {
            self.description = description;
        }
        self.updated_at = Utc::now();
    }

    /// Swap in a new thumbnail, handing back the one it replaces
    pub fn replace_thumbnail(&mut self, thumbnail: MediaRef) -> Option<MediaRef> {
        self.updated_at = Utc::now();
        self.thumbnail.replace(thumbnail)
    }

    pub fn toggle_publish(&mut self) -> bool {
        self.is_published = !self.is_published;
        self.updated_at = Utc::now();
        self.is_published
    }
}
