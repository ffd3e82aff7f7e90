//! Axum extractors for request handling
//!
//! Custom extractors for authentication, validation, pagination and uploads.

mod auth;
mod multipart;
mod pagination;
mod path;
mod validated;

pub use auth::{AuthUser, OptionalAuthUser};
pub use multipart::UploadForm;
pub use pagination::{Pagination, PaginationParams};
pub use path::{CommentIdPath, UserIdPath, VideoIdPath};
pub use validated::{json_rejection, OptionalValidatedJson, ValidatedJson};
