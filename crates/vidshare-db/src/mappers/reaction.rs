//! Reaction column <-> domain mapping

use vidshare_core::error::DomainError;
use vidshare_core::value_objects::ReactionKind;

pub fn reaction_to_str(kind: ReactionKind) -> &'static str {
    kind.as_str()
}

/// Parse the `reaction` column; anything else means the row is corrupt.
pub fn reaction_from_str(value: &str) -> Result<ReactionKind, DomainError> {
    match value {
        "like" => Ok(ReactionKind::Like),
        "dislike" => Ok(ReactionKind::Dislike),
        other => Err(DomainError::DatabaseError(format!(
            "unexpected reaction value in database: {other}"
        ))),
    }
}
