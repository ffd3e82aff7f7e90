//! Entity to model mappers
//!
//! - `From<Model> for Entity`: convert database rows to domain objects
//! - helper functions for columns stored as text

mod comment;
mod reaction;
mod user;
mod video;

pub use reaction::{reaction_from_str, reaction_to_str};
