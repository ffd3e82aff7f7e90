//! Entity to DTO mappers

use vidshare_core::entities::{Comment, User, Video};

use super::responses::{CommentResponse, CurrentUserResponse, PublicUserResponse, VideoResponse};

// ============================================================================
// User Mappers
// ============================================================================

impl From<&User> for CurrentUserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.clone(),
            email: user.email.clone(),
            full_name: user.full_name.clone(),
            avatar_url: user.avatar_url.clone(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl From<&User> for PublicUserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.clone(),
            full_name: user.full_name.clone(),
            avatar_url: user.avatar_url.clone(),
            created_at: user.created_at,
        }
    }
}

// ============================================================================
// Video Mappers
// ============================================================================

impl From<&Video> for VideoResponse {
    fn from(video: &Video) -> Self {
        Self {
            id: video.id.to_string(),
            owner_id: video.owner_id.to_string(),
            title: video.title.clone(),
            description: video.description.clone(),
            video_url: video.video_file.url.clone(),
            thumbnail_url: video.thumbnail.as_ref().map(|t| t.url.clone()),
            duration_secs: video.duration_secs,
            is_published: video.is_published,
            like_count: video.like_count,
            dislike_count: video.dislike_count,
            view_count: video.view_count,
            created_at: video.created_at,
            updated_at: video.updated_at,
        }
    }
}

impl From<Video> for VideoResponse {
    fn from(video: Video) -> Self {
        Self::from(&video)
    }
}

// ============================================================================
// Comment Mappers
// ============================================================================

impl From<&Comment> for CommentResponse {
    fn from(comment: &Comment) -> Self {
        Self {
            id: comment.id.to_string(),
            video_id: comment.video_id.to_string(),
            owner_id: comment.owner_id.to_string(),
            content: comment.content.clone(),
            edited: comment.is_edited(),
            created_at: comment.created_at,
            updated_at: comment.updated_at,
        }
    }
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self::from(&comment)
    }
}
