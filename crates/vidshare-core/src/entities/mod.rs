//! Domain entities - core business objects

mod comment;
mod user;
mod video;

pub use comment::Comment;
pub use user::User;
pub use video::{Video, VideoDraft};
