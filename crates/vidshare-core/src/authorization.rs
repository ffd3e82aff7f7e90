//! Ownership check guarding every mutation of a video or comment

use crate::entities::{Comment, Video};
use crate::error::{DomainError, ResourceKind};
use crate::value_objects::Snowflake;

/// A record with a single owner fixed at creation.
pub trait Owned {
    const KIND: ResourceKind;

    fn resource_id(&self) -> Snowflake;

    fn owner_id(&self) -> Snowflake;
}

impl Owned for Video {
    const KIND: ResourceKind = ResourceKind::Video;

    fn resource_id(&self) -> Snowflake {
        self.id
    }

    fn owner_id(&self) -> Snowflake {
        self.owner_id
    }
}

impl Owned for Comment {
    const KIND: ResourceKind = ResourceKind::Comment;

    fn resource_id(&self) -> Snowflake {
        self.id
    }

    fn owner_id(&self) -> Snowflake {
        self.owner_id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Authorization {
    Allowed,
    Denied,
}

/// Decide whether `actor` may mutate `resource`.
pub fn authorize_mutation<R: Owned>(actor: Snowflake, resource: &R) -> Authorization {
    if actor == resource.owner_id() {
        Authorization::Allowed
    } else {
        Authorization::Denied
    }
}

/// [`authorize_mutation`] as a `Result`, for use with `?`.
pub fn require_owner<R: Owned>(actor: Snowflake, resource: &R) -> Result<(), DomainError> {
    match authorize_mutation(actor, resource) {
        Authorization::Allowed => Ok(()),
        Authorization::Denied => Err(DomainError::NotOwner {
            resource: R::KIND,
            id: resource.resource_id(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::VideoDraft;
    use crate::value_objects::MediaRef;

    const OWNER: Snowflake = Snowflake::new(1);
    const STRANGER: Snowflake = Snowflake::new(2);

    fn video() -> Video {
        Video::new(
            Snowflake::new(100),
            OWNER,
            VideoDraft {
                title: "t".into(),
                description: "d".into(),
                video_file: MediaRef::new("k", "u"),
                thumbnail: None,
                duration_secs: 1.0,
                is_published: true,
            },
        )
    }

    #[test]
    fn test_owner_allowed_stranger_denied() {
        let v = video();
        assert_eq!(authorize_mutation(OWNER, &v), Authorization::Allowed);
        assert_eq!(authorize_mutation(STRANGER, &v), Authorization::Denied);
    }

    #[test]
    fn test_require_owner_reports_resource() {
        let c = Comment::new(Snowflake::new(7), Snowflake::new(100), OWNER, "hi".into());
        assert!(require_owner(OWNER, &c).is_ok());

        match require_owner(STRANGER, &c) {
            Err(DomainError::NotOwner { resource, id }) => {
                assert_eq!(resource, ResourceKind::Comment);
                assert_eq!(id, Snowflake::new(7));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_video_owner_cannot_edit_someone_elses_comment() {
        let v = video();
        let c = Comment::new(Snowflake::new(8), v.id, STRANGER, "first".into());
        assert!(require_owner(OWNER, &v).is_ok());
        assert!(require_owner(OWNER, &c).is_err());
    }
}
