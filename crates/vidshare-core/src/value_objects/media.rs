//! Reference to an object held by the media storage backend

use serde::{Deserialize, Serialize};

/// Storage key plus the URL clients use to fetch the object.
///
/// The key is what the owning record must hand back to the storage backend
/// when the object is released.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaRef {
    pub key: String,
    pub url: String,
}

impl MediaRef {
    pub fn new(key: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            url: url.into(),
        }
    }
}
