//! Test fixtures and data generators

use std::sync::atomic::{AtomicU64, Ordering};

use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};

static COUNTER: AtomicU64 = AtomicU64::new(1);

pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

pub const VIDEO_BYTES: &[u8] = b"\x00\x00\x00\x18ftypmp42 not really a video";
pub const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\n fake thumbnail";

#[derive(Debug, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub password: String,
}

impl RegisterRequest {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            username: format!("testuser{suffix}"),
            email: format!("test{suffix}@example.com"),
            full_name: format!("Test User {suffix}"),
            password: "TestPass123".to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub login: String,
    pub password: String,
}

impl LoginRequest {
    pub fn from_register(reg: &RegisterRequest) -> Self {
        Self {
            login: reg.email.clone(),
            password: reg.password.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    pub user: UserResponse,
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Debug, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub full_name: String,
    pub email: Option<String>,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct VideoResponse {
    pub id: String,
    pub owner_id: String,
    pub title: String,
    pub description: String,
    pub video_url: String,
    pub thumbnail_url: Option<String>,
    pub duration_secs: f64,
    pub is_published: bool,
    pub like_count: i64,
    pub dislike_count: i64,
    pub view_count: i64,
}

#[derive(Debug, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub pagination: PaginationMeta,
}

#[derive(Debug, Deserialize)]
pub struct PaginationMeta {
    pub before: Option<String>,
    pub after: Option<String>,
    pub has_more: bool,
    pub limit: i64,
}

#[derive(Debug, Serialize)]
pub struct ReactionRequest {
    #[serde(rename = "videoId", skip_serializing_if = "Option::is_none")]
    pub video_id: Option<String>,
    pub desired: &'static str,
}

impl ReactionRequest {
    pub fn like(video_id: &str) -> Self {
        Self {
            video_id: Some(video_id.to_string()),
            desired: "like",
        }
    }

    pub fn dislike(video_id: &str) -> Self {
        Self {
            video_id: Some(video_id.to_string()),
            desired: "dislike",
        }
    }
}

#[derive(Debug, Deserialize, PartialEq, Eq)]
pub struct ReactionCounts {
    pub likes: i64,
    pub dislikes: i64,
}

impl ReactionCounts {
    pub fn new(likes: i64, dislikes: i64) -> Self {
        Self { likes, dislikes }
    }
}

#[derive(Debug, Deserialize)]
pub struct ReactionStatus {
    pub video_id: String,
    pub state: String,
    pub likes: i64,
    pub dislikes: i64,
}

#[derive(Debug, Serialize)]
pub struct CommentRequest {
    pub content: String,
}

impl CommentRequest {
    pub fn new(content: &str) -> Self {
        Self {
            content: content.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CommentResponse {
    pub id: String,
    pub video_id: String,
    pub owner_id: String,
    pub content: String,
    pub edited: bool,
}

#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    pub details: Option<serde_json::Value>,
}

/// Upload form with a video, a thumbnail and the given title
pub fn upload_form(title: &str) -> Form {
    Form::new()
        .text("title", title.to_string())
        .text("description", "integration upload")
        .text("duration", "12.5")
        .part(
            "video",
            Part::bytes(VIDEO_BYTES.to_vec())
                .file_name("clip.mp4")
                .mime_str("video/mp4")
                .unwrap_or_else(|_| Part::bytes(VIDEO_BYTES.to_vec())),
        )
        .part("thumbnail", thumbnail_part())
}

pub fn thumbnail_part() -> Part {
    Part::bytes(PNG_BYTES.to_vec())
        .file_name("thumb.png")
        .mime_str("image/png")
        .unwrap_or_else(|_| Part::bytes(PNG_BYTES.to_vec()))
}
