//! # vidshare-service
//!
//! Application layer: use cases for accounts, videos, engagement and
//! comments, plus the request/response DTOs the API speaks.

pub mod dto;
pub mod services;

pub use services::{
    AuthService, CommentService, EngagementService, MediaUpload, ServiceContext,
    ServiceContextBuilder, ServiceError, ServiceResult, UserService, VideoService,
};
