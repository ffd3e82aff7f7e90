//! Route definitions
//!
//! API routes are mounted under /api/v1; health probes and media files sit
//! beside them so the rate limiter never sees them.

use axum::{
    routing::{get, patch, post, put},
    Router,
};

use crate::handlers::{auth, comments, health, media, reactions, users, videos};
use crate::state::AppState;

/// Rate-limited API router
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api/v1", api_v1_routes())
}

/// Liveness and readiness, at the root and under /api/v1
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route("/api/v1/health", get(health::health_check))
        .route("/api/v1/health/ready", get(health::readiness_check))
}

/// Stored media, served when the local backend is active
pub fn media_routes() -> Router<AppState> {
    Router::new().route("/media/*key", get(media::serve_media))
}

fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(video_routes())
        .merge(comment_routes())
}

fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/refresh", post(auth::refresh_token))
        .route("/auth/logout", post(auth::logout))
}

fn user_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/users/@me",
            get(users::get_current_user).patch(users::update_current_user),
        )
        .route("/users/@me/password", post(users::change_password))
        .route("/users/:user_id", get(users::get_user))
}

fn video_routes() -> Router<AppState> {
    Router::new()
        .route("/videos", get(videos::list_videos).post(videos::upload_video))
        .route(
            "/videos/:video_id",
            get(videos::get_video)
                .patch(videos::update_video)
                .delete(videos::delete_video),
        )
        .route("/videos/:video_id/thumbnail", put(videos::replace_thumbnail))
        .route("/videos/:video_id/publish", patch(videos::toggle_publish))
        .route(
            "/videos/:video_id/reaction",
            get(reactions::get_reaction)
                .post(reactions::record_reaction)
                .delete(reactions::clear_reaction),
        )
        .route("/videos/:video_id/reconcile", post(reactions::reconcile_counts))
        .route(
            "/videos/:video_id/comments",
            get(comments::list_comments).post(comments::add_comment),
        )
}

fn comment_routes() -> Router<AppState> {
    Router::new().route(
        "/comments/:comment_id",
        patch(comments::update_comment).delete(comments::delete_comment),
    )
}
