//! Like/dislike handlers

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use vidshare_core::Snowflake;
use vidshare_service::dto::{ReactionCountsResponse, ReactionRequest, ReactionStatusResponse};
use vidshare_service::EngagementService;

use crate::extractors::{json_rejection, AuthUser, VideoIdPath};
use crate::response::{ApiError, ApiResult};
use crate::state::AppState;

/// Set the caller's reaction to `desired`
///
/// POST /videos/{video_id}/reaction
pub async fn record_reaction(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<VideoIdPath>,
    body: Result<Json<ReactionRequest>, JsonRejection>,
) -> ApiResult<Json<ReactionCountsResponse>> {
    let video_id = path.video_id()?;
    let Json(request) = body.map_err(json_rejection)?;

    if let Some(body_id) = request.video_id.as_deref() {
        if body_id.parse::<Snowflake>().ok() != Some(video_id) {
            return Err(ApiError::invalid_body("videoId does not match the path"));
        }
    }

    let service = EngagementService::new(state.service_context());
    let counts = service
        .record_reaction(auth.user_id, video_id, request.desired)
        .await?;
    Ok(Json(counts))
}

/// GET /videos/{video_id}/reaction
pub async fn get_reaction(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<VideoIdPath>,
) -> ApiResult<Json<ReactionStatusResponse>> {
    let service = EngagementService::new(state.service_context());
    let status = service.get_reaction(auth.user_id, path.video_id()?).await?;
    Ok(Json(status))
}

/// DELETE /videos/{video_id}/reaction
pub async fn clear_reaction(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<VideoIdPath>,
) -> ApiResult<Json<ReactionCountsResponse>> {
    let service = EngagementService::new(state.service_context());
    let counts = service.clear_reaction(auth.user_id, path.video_id()?).await?;
    Ok(Json(counts))
}

/// Owner-only rebuild of the cached counters
///
/// POST /videos/{video_id}/reconcile
pub async fn reconcile_counts(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<VideoIdPath>,
) -> ApiResult<Json<ReactionCountsResponse>> {
    let service = EngagementService::new(state.service_context());
    let counts = service
        .reconcile_counts(auth.user_id, path.video_id()?)
        .await?;
    Ok(Json(counts))
}
