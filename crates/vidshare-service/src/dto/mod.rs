//! Data transfer objects for API requests and responses
//!
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{
    ChangePasswordRequest, CreateCommentRequest, CreateVideoRequest, ListVideosQuery,
    LoginRequest, LogoutRequest, ReactionRequest, RefreshTokenRequest, RegisterRequest,
    UpdateCommentRequest, UpdateUserRequest, UpdateVideoRequest, VideoSortParam,
};

pub use responses::{
    AuthResponse, CommentResponse, CurrentUserResponse, HealthChecks, HealthResponse,
    PaginatedResponse, PaginationMeta, PublicUserResponse, ReactionCountsResponse,
    ReactionStatusResponse, ReadinessResponse, VideoResponse,
};
