//! Value objects - immutable types that represent domain concepts

mod media;
mod reaction;
mod snowflake;

pub use media::MediaRef;
pub use reaction::{ParseReactionError, ReactionCounts, ReactionKind, ReactionState};
pub use snowflake::{InvalidWorkerId, Snowflake, SnowflakeGenerator, SnowflakeParseError};
