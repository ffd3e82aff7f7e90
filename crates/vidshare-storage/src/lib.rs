//! # vidshare-storage
//!
//! Implementations of the `MediaStorage` port for uploaded video files and
//! thumbnails, plus the object key scheme shared by every backend.

mod keys;
mod local;
mod memory;

pub use keys::{is_safe_key, object_key, MediaKind};
pub use local::LocalMediaStorage;
pub use memory::InMemoryMediaStorage;
