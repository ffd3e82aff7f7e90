//! Comment handlers

use axum::{
    extract::{Path, State},
    Json,
};
use vidshare_service::dto::{
    CommentResponse, CreateCommentRequest, PaginatedResponse, UpdateCommentRequest,
};
use vidshare_service::CommentService;

use crate::extractors::{
    AuthUser, CommentIdPath, OptionalAuthUser, Pagination, ValidatedJson, VideoIdPath,
};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// GET /videos/{video_id}/comments?before=&after=&limit=
pub async fn list_comments(
    State(state): State<AppState>,
    viewer: OptionalAuthUser,
    Path(path): Path<VideoIdPath>,
    pagination: Pagination,
) -> ApiResult<Json<PaginatedResponse<CommentResponse>>> {
    let service = CommentService::new(state.service_context());
    let response = service
        .list_comments(viewer.user_id(), path.video_id()?, pagination.into_page_query())
        .await?;
    Ok(Json(response))
}

/// POST /videos/{video_id}/comments
pub async fn add_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<VideoIdPath>,
    ValidatedJson(request): ValidatedJson<CreateCommentRequest>,
) -> ApiResult<Created<Json<CommentResponse>>> {
    let service = CommentService::new(state.service_context());
    let response = service
        .add_comment(auth.user_id, path.video_id()?, request)
        .await?;
    Ok(Created(Json(response)))
}

/// PATCH /comments/{comment_id}
pub async fn update_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<CommentIdPath>,
    ValidatedJson(request): ValidatedJson<UpdateCommentRequest>,
) -> ApiResult<Json<CommentResponse>> {
    let service = CommentService::new(state.service_context());
    let response = service
        .update_comment(auth.user_id, path.comment_id()?, request)
        .await?;
    Ok(Json(response))
}

/// DELETE /comments/{comment_id}
pub async fn delete_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<CommentIdPath>,
) -> ApiResult<NoContent> {
    let service = CommentService::new(state.service_context());
    service.delete_comment(auth.user_id, path.comment_id()?).await?;
    Ok(NoContent)
}
