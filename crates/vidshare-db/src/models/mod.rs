//! Database models - SQLx-compatible structs for PostgreSQL tables

mod comment;
mod reaction;
mod refresh_token;
mod user;
mod video;

pub use comment::CommentModel;
pub use reaction::{ReactionModel, ReactionTallyModel};
pub use refresh_token::RefreshTokenModel;
pub use user::UserModel;
pub use video::VideoModel;
