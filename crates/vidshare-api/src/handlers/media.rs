//! Serves stored media when the local filesystem backend is active.

use axum::{
    body::Body,
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};
use tokio::fs::File;
use tokio_util::io::ReaderStream;

use crate::response::{ApiError, ApiResult};
use crate::state::AppState;

/// GET /media/*key
pub async fn serve_media(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> ApiResult<Response> {
    let path = state
        .local_media()
        .and_then(|storage| storage.path_for(&key))
        .ok_or(ApiError::RouteNotFound)?;

    let file = File::open(&path)
        .await
        .map_err(|_| ApiError::RouteNotFound)?;

    let mut response = Body::from_stream(ReaderStream::new(file)).into_response();
    if let Some(mime) = mime_guess::from_path(&path).first() {
        if let Ok(value) = mime.essence_str().parse() {
            response.headers_mut().insert(header::CONTENT_TYPE, value);
        }
    }

    Ok(response)
}
