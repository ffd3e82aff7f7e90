//! Like/dislike vocabulary shared by the engagement ledger and its stores

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Reaction a user asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReactionKind {
    #[serde(alias = "liked", alias = "Like", alias = "Liked")]
    Like,
    #[serde(alias = "disliked", alias = "Dislike", alias = "Disliked")]
    Dislike,
}

impl ReactionKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Like => "like",
            Self::Dislike => "dislike",
        }
    }

    /// State a user ends up in after this reaction is applied.
    pub const fn as_state(self) -> ReactionState {
        match self {
            Self::Like => ReactionState::Liked,
            Self::Dislike => ReactionState::Disliked,
        }
    }
}

impl fmt::Display for ReactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown reaction: {0}")]
pub struct ParseReactionError(pub String);

impl FromStr for ReactionKind {
    type Err = ParseReactionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "like" | "liked" => Ok(Self::Like),
            "dislike" | "disliked" => Ok(Self::Dislike),
            other => Err(ParseReactionError(other.to_string())),
        }
    }
}

/// Where a user currently stands on a video. Never both liked and disliked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReactionState {
    #[default]
    None,
    Liked,
    Disliked,
}

impl ReactionState {
    pub const fn kind(self) -> Option<ReactionKind> {
        match self {
            Self::None => None,
            Self::Liked => Some(ReactionKind::Like),
            Self::Disliked => Some(ReactionKind::Dislike),
        }
    }
}

impl From<Option<ReactionKind>> for ReactionState {
    fn from(kind: Option<ReactionKind>) -> Self {
        kind.map_or(Self::None, ReactionKind::as_state)
    }
}

/// Like/dislike totals for one video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReactionCounts {
    pub likes: i64,
    pub dislikes: i64,
}

impl ReactionCounts {
    pub const fn new(likes: i64, dislikes: i64) -> Self {
        Self { likes, dislikes }
    }

    #[inline]
    pub const fn total(self) -> i64 {
        self.likes + self.dislikes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_both_spellings() {
        assert_eq!("like".parse::<ReactionKind>().unwrap(), ReactionKind::Like);
        assert_eq!("Liked".parse::<ReactionKind>().unwrap(), ReactionKind::Like);
        assert_eq!(
            "DISLIKE".parse::<ReactionKind>().unwrap(),
            ReactionKind::Dislike
        );
        assert!("meh".parse::<ReactionKind>().is_err());
    }

    #[test]
    fn test_kind_json_is_lowercase() {
        assert_eq!(
            serde_json::to_string(&ReactionKind::Dislike).unwrap(),
            "\"dislike\""
        );
        let kind: ReactionKind = serde_json::from_str("\"Liked\"").unwrap();
        assert_eq!(kind, ReactionKind::Like);
    }

    #[test]
    fn test_state_round_trips_through_kind() {
        assert_eq!(ReactionState::from(None), ReactionState::None);
        assert_eq!(
            ReactionState::from(Some(ReactionKind::Dislike)),
            ReactionState::Disliked
        );
        assert_eq!(ReactionState::Liked.kind(), Some(ReactionKind::Like));
        assert_eq!(ReactionState::None.kind(), None);
    }
}
