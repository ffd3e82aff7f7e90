//! Video handlers
//!
//! Uploads arrive as multipart forms: a `video` file part, an optional
//! `thumbnail` part, and text parts for the metadata.

use axum::{
    extract::{rejection::QueryRejection, Multipart, Path, Query, State},
    Json,
};
use vidshare_service::dto::{
    CreateVideoRequest, ListVideosQuery, PaginatedResponse, UpdateVideoRequest, VideoResponse,
};
use vidshare_service::VideoService;

use crate::extractors::{AuthUser, OptionalAuthUser, UploadForm, ValidatedJson, VideoIdPath};
use crate::response::{ApiError, ApiResult, Created, NoContent};
use crate::state::AppState;

fn parse_bool(raw: &str) -> Result<bool, ApiError> {
    match raw {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        other => Err(ApiError::invalid_body(format!(
            "Expected true or false, got '{other}'"
        ))),
    }
}

/// Seconds as a finite number; `NaN` and `inf` parse as floats but are refused
fn parse_duration(raw: &str) -> Result<f64, ApiError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|secs| secs.is_finite())
        .ok_or_else(|| ApiError::invalid_body("duration must be a number of seconds"))
}

/// Metadata text parts of an upload form
fn create_request(form: &UploadForm) -> Result<CreateVideoRequest, ApiError> {
    let duration_secs = form
        .text("duration")
        .or_else(|| form.text("duration_secs"))
        .map(parse_duration)
        .transpose()?
        .unwrap_or_default();

    Ok(CreateVideoRequest {
        title: form.text("title").unwrap_or_default().to_string(),
        description: form.text("description").unwrap_or_default().to_string(),
        duration_secs,
        is_published: form
            .text("is_published")
            .map(parse_bool)
            .transpose()?
            .unwrap_or(true),
    })
}

/// List published videos
///
/// GET /videos?before=&after=&limit=&owner_id=&q=&sort=newest|oldest
pub async fn list_videos(
    State(state): State<AppState>,
    viewer: OptionalAuthUser,
    query: Result<Query<ListVideosQuery>, QueryRejection>,
) -> ApiResult<Json<PaginatedResponse<VideoResponse>>> {
    let Query(query) = query.map_err(|e| ApiError::invalid_query(e.body_text()))?;
    let service = VideoService::new(state.service_context());
    let response = service.list_videos(viewer.user_id(), query).await?;
    Ok(Json(response))
}

/// Upload and publish a video
///
/// POST /videos (multipart)
pub async fn upload_video(
    State(state): State<AppState>,
    auth: AuthUser,
    multipart: Multipart,
) -> ApiResult<Created<Json<VideoResponse>>> {
    let mut form = UploadForm::read(multipart, state.upload_limit_mb()).await?;
    let request = create_request(&form)?;
    let video = form.require_file("video")?;
    let thumbnail = form.take_file("thumbnail");

    let service = VideoService::new(state.service_context());
    let response = service
        .publish_video(auth.user_id, request, video, thumbnail)
        .await?;
    Ok(Created(Json(response)))
}

/// Fetch a video; the caller is added to its view set
///
/// GET /videos/{video_id}
pub async fn get_video(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<VideoIdPath>,
) -> ApiResult<Json<VideoResponse>> {
    let service = VideoService::new(state.service_context());
    let response = service
        .get_video(Some(auth.user_id), path.video_id()?)
        .await?;
    Ok(Json(response))
}

/// PATCH /videos/{video_id}
pub async fn update_video(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<VideoIdPath>,
    ValidatedJson(request): ValidatedJson<UpdateVideoRequest>,
) -> ApiResult<Json<VideoResponse>> {
    let service = VideoService::new(state.service_context());
    let response = service
        .update_video(auth.user_id, path.video_id()?, request)
        .await?;
    Ok(Json(response))
}

/// DELETE /videos/{video_id}
pub async fn delete_video(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<VideoIdPath>,
) -> ApiResult<NoContent> {
    let service = VideoService::new(state.service_context());
    service.delete_video(auth.user_id, path.video_id()?).await?;
    Ok(NoContent)
}

/// Replace the thumbnail with the form's `thumbnail` part
///
/// PUT /videos/{video_id}/thumbnail (multipart)
pub async fn replace_thumbnail(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<VideoIdPath>,
    multipart: Multipart,
) -> ApiResult<Json<VideoResponse>> {
    let video_id = path.video_id()?;
    let mut form = UploadForm::read(multipart, state.upload_limit_mb()).await?;
    let thumbnail = form.require_file("thumbnail")?;

    let service = VideoService::new(state.service_context());
    let response = service
        .replace_thumbnail(auth.user_id, video_id, thumbnail)
        .await?;
    Ok(Json(response))
}

/// PATCH /videos/{video_id}/publish
pub async fn toggle_publish(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<VideoIdPath>,
) -> ApiResult<Json<VideoResponse>> {
    let service = VideoService::new(state.service_context());
    let response = service
        .toggle_publish(auth.user_id, path.video_id()?)
        .await?;
    Ok(Json(response))
}
