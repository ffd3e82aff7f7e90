//! OpenAPI document served at `/api-docs/openapi.json`

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::OpenApi;
use vidshare_service::dto::{
    AuthResponse, ChangePasswordRequest, CommentResponse, CreateCommentRequest,
    CreateVideoRequest, CurrentUserResponse, HealthChecks, HealthResponse, LoginRequest,
    LogoutRequest, PaginationMeta, PublicUserResponse, ReactionCountsResponse, ReactionRequest,
    ReactionStatusResponse, ReadinessResponse, RefreshTokenRequest, RegisterRequest,
    UpdateCommentRequest, UpdateUserRequest, UpdateVideoRequest, VideoResponse, VideoSortParam,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "vidshare API",
        version = "0.1.0",
        description = "Video sharing backend: uploads, likes and dislikes, views and comments. Mutations of a video or comment are restricted to its owner."
    ),
    tags(
        (name = "health", description = "Liveness and readiness probes"),
        (name = "auth", description = "Registration, login and token rotation"),
        (name = "users", description = "Profiles"),
        (name = "videos", description = "Upload, listing, metadata and publishing"),
        (name = "engagement", description = "Likes, dislikes and views"),
        (name = "comments", description = "Comments on videos"),
    ),
    components(schemas(
        RegisterRequest,
        LoginRequest,
        RefreshTokenRequest,
        LogoutRequest,
        AuthResponse,
        CurrentUserResponse,
        PublicUserResponse,
        UpdateUserRequest,
        ChangePasswordRequest,
        CreateVideoRequest,
        UpdateVideoRequest,
        VideoSortParam,
        VideoResponse,
        PaginationMeta,
        ReactionRequest,
        ReactionCountsResponse,
        ReactionStatusResponse,
        CreateCommentRequest,
        UpdateCommentRequest,
        CommentResponse,
        HealthResponse,
        ReadinessResponse,
        HealthChecks,
    )),
    modifiers(&SecurityAddon),
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Access token from /auth/login"))
                        .build(),
                ),
            );
        }
    }
}

impl ApiDoc {
    pub fn openapi_json_path() -> &'static str {
        "/api-docs/openapi.json"
    }
}
