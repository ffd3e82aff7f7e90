//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in vidshare-core.

mod comment;
mod error;
mod refresh_token;
mod user;
mod video;

pub use comment::PgCommentRepository;
pub use refresh_token::PgRefreshTokenRepository;
pub use user::PgUserRepository;
pub use video::PgVideoRepository;
