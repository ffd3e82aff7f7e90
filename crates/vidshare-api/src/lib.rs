//! # vidshare-api
//!
//! REST API server built with Axum: video upload and playback metadata,
//! likes/dislikes, views and comments.

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod response;
pub mod routes;
pub mod server;
pub mod state;

pub use server::{create_app, create_app_state, run};
pub use state::AppState;
