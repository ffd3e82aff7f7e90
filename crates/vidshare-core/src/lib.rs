//! # vidshare-core
//!
//! Domain layer: entities, value objects, the engagement ledger, the
//! ownership check, and the ports implemented by storage crates.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod authorization;
pub mod entities;
pub mod error;
pub mod ledger;
pub mod traits;
pub mod value_objects;

pub use authorization::{authorize_mutation, require_owner, Authorization, Owned};
pub use entities::{Comment, User, Video, VideoDraft};
pub use error::{DomainError, ResourceKind};
pub use ledger::{Engagement, ReactionChange, ReactionOutcome, Transition};
pub use traits::{
    CommentRepository, MediaStorage, PageQuery, RefreshTokenRepository, RepoResult,
    StoredObject, UserRepository, VideoQuery, VideoRepository, VideoSort,
};
pub use value_objects::{
    MediaRef, ReactionCounts, ReactionKind, ReactionState, Snowflake, SnowflakeGenerator,
    SnowflakeParseError,
};
