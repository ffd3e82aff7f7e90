//! Response DTOs for API endpoints
//!
//! Snowflake IDs are serialized as strings for JavaScript compatibility.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use vidshare_core::value_objects::{ReactionCounts, ReactionState, Snowflake};

// ============================================================================
// Common Response Types
// ============================================================================

/// Paginated response with cursor-based pagination
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub pagination: PaginationMeta,
}

impl<T> PaginatedResponse<T> {
    /// Wrap a page, deriving cursors from the lowest and highest ids in it
    ///
    /// Cursors do not depend on display order, so `before` keeps walking
    /// towards older items and `after` towards newer ones for either sort.
    pub fn new(data: Vec<T>, limit: i64, ids: impl IntoIterator<Item = Snowflake>) -> Self {
        let has_more = i64::try_from(data.len()).is_ok_and(|len| len >= limit);
        let ids: Vec<Snowflake> = ids.into_iter().collect();
        let before = ids.iter().min().map(ToString::to_string);
        let after = ids.iter().max().map(ToString::to_string);
        Self {
            data,
            pagination: PaginationMeta {
                before,
                after,
                has_more,
                limit,
            },
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginationMeta {
    /// Lowest id on this page; pass as `before` for older items
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<String>,
    /// Highest id on this page; pass as `after` for newer items
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<String>,
    /// Whether the page was full, so another one may follow
    pub has_more: bool,
    pub limit: i64,
}

// ============================================================================
// Auth Responses
// ============================================================================

#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: CurrentUserResponse,
}

// ============================================================================
// User Responses
// ============================================================================

/// The authenticated user's own profile
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CurrentUserResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Profile visible to anyone
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PublicUserResponse {
    pub id: String,
    pub username: String,
    pub full_name: String,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Video Responses
// ============================================================================

#[derive(Debug, Clone, Serialize, ToSchema)]
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
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Like/dislike totals after a reaction call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct ReactionCountsResponse {
    pub likes: i64,
    pub dislikes: i64,
}

impl From<ReactionCounts> for ReactionCountsResponse {
    fn from(counts: ReactionCounts) -> Self {
        Self {
            likes: counts.likes,
            dislikes: counts.dislikes,
        }
    }
}

/// Caller's own reaction plus the video totals
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ReactionStatusResponse {
    pub video_id: String,
    #[schema(value_type = String, example = "liked")]
    pub state: ReactionState,
    pub likes: i64,
    pub dislikes: i64,
}

// ============================================================================
// Comment Responses
// ============================================================================

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CommentResponse {
    pub id: String,
    pub video_id: String,
    pub owner_id: String,
    pub content: String,
    pub edited: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Health Responses
// ============================================================================

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HealthChecks {
    pub database: String,
}

impl ReadinessResponse {
    pub fn ready(database_healthy: bool) -> Self {
        Self {
            status: if database_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: if database_healthy { "healthy" } else { "unhealthy" }.to_string(),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(ids: &[i64], limit: i64) -> PaginatedResponse<i64> {
        PaginatedResponse::new(
            ids.to_vec(),
            limit,
            ids.iter().copied().map(Snowflake::new),
        )
    }

    #[test]
    fn test_pagination_cursors_follow_page_edges() {
        let newest_first = page(&[9, 8, 7], 3);
        assert_eq!(newest_first.pagination.after.as_deref(), Some("9"));
        assert_eq!(newest_first.pagination.before.as_deref(), Some("7"));
        assert!(newest_first.pagination.has_more);

        let short = page(&[1], 20);
        assert!(!short.pagination.has_more);
    }

    #[test]
    fn test_oldest_first_page_cursors_keep_direction() {
        let oldest_first = page(&[1, 2], 2);
        assert_eq!(oldest_first.pagination.before.as_deref(), Some("1"));
        assert_eq!(oldest_first.pagination.after.as_deref(), Some("2"));
    }

    #[test]
    fn test_empty_page_has_no_cursors() {
        let empty = page(&[], 20);
        let json = serde_json::to_value(&empty).unwrap();
        assert!(json["pagination"].get("before").is_none());
        assert_eq!(json["pagination"]["has_more"], false);
    }

    #[test]
    fn test_reaction_state_serializes_lowercase() {
        let status = ReactionStatusResponse {
            video_id: "1".into(),
            state: ReactionState::Disliked,
            likes: 0,
            dislikes: 1,
        };
        let json = serde_json::to_value(&status).unwrap();
        assert_eq!(json["state"], "disliked");
    }

    #[test]
    fn test_readiness_response() {
        assert!(ReadinessResponse::ready(true).is_ready());
        let down = ReadinessResponse::ready(false);
        assert_eq!(down.status, "not_ready");
        assert_eq!(down.checks.database, "unhealthy");
    }
}
