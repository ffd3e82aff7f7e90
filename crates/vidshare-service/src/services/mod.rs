//! Business logic services
//!
//! Each service borrows the [`ServiceContext`] for the duration of a request
//! and orchestrates repositories, media storage and the domain rules.

pub mod auth;
pub mod comment;
pub mod context;
pub mod engagement;
pub mod error;
pub mod user;
pub mod video;

pub use auth::AuthService;
pub use comment::CommentService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use engagement::EngagementService;
pub use error::{ServiceError, ServiceResult};
pub use user::UserService;
pub use video::{MediaUpload, VideoService};
