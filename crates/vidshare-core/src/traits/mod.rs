//! Ports implemented by the infrastructure crates

mod repositories;
mod storage;

pub use repositories::{
    CommentRepository, PageQuery, RefreshTokenRepository, RepoResult, UserRepository,
    VideoQuery, VideoRepository, VideoSort,
};
pub use storage::{MediaStorage, StoredObject};
