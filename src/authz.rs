//! Authorization gate. Per-request decisions over an explicit actor;
//! the policy is: existence is not hidden, so acting on a resource you
//! can see but do not own yields permission-denied, never not-found.

use crate::{auth::Actor, entities::collection, error::AppError};

/// Catalog writes: movies, genres, people, countries, awards, seasons,
/// episodes, subtitles and uploads are staff-only.
pub fn require_staff(actor: &Actor) -> Result<(), AppError> {
    if actor.is_staff() {
        Ok(())
    } else {
        Err(AppError::PermissionDenied)
    }
}

/// Owned-resource writes: only the owner, never staff. Moderation paths
/// that staff may take are explicitly marked with
/// [`require_owner_or_staff`].
pub fn require_owner(actor: &Actor, owner_id: i32) -> Result<(), AppError> {
    if actor.id() == owner_id {
        Ok(())
    } else {
        Err(AppError::PermissionDenied)
    }
}

pub fn require_owner_or_staff(actor: &Actor, owner_id: i32) -> Result<(), AppError> {
    if actor.id() == owner_id || actor.is_staff() {
        Ok(())
    } else {
        Err(AppError::PermissionDenied)
    }
}

/// Collections are readable by anyone while public, by the owner only
/// while private.
pub fn require_collection_view(actor: &Actor, c: &collection::Model) -> Result<(), AppError> {
    if c.is_public || c.owner_id == actor.id() {
        Ok(())
    } else {
        Err(AppError::PermissionDenied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{auth::Actor, entities::user};

    fn actor(id: i32, is_staff: bool) -> Actor {
        Actor {
            user: user::Model {
                id,
                username: format!("user{id}"),
                email: None,
                password_hash: String::new(),
                is_staff,
                created_at: 0,
            },
        }
    }

    fn coll(owner_id: i32, is_public: bool) -> collection::Model {
        collection::Model {
            id: 1,
            name: "best heists".to_string(),
            description: String::new(),
            owner_id,
            is_public,
            created_at: 0,
        }
    }

    #[test]
    fn staff_gate() {
        assert!(require_staff(&actor(1, true)).is_ok());
        assert!(matches!(require_staff(&actor(1, false)), Err(AppError::PermissionDenied)));
    }

    #[test]
    fn ownership_is_strict_for_plain_writes() {
        assert!(require_owner(&actor(7, false), 7).is_ok());
        assert!(require_owner(&actor(8, false), 7).is_err());
        // staff does not bypass ownership outside moderation paths
        assert!(require_owner(&actor(8, true), 7).is_err());
    }

    #[test]
    fn moderation_allows_staff() {
        assert!(require_owner_or_staff(&actor(8, true), 7).is_ok());
        assert!(require_owner_or_staff(&actor(7, false), 7).is_ok());
        assert!(require_owner_or_staff(&actor(8, false), 7).is_err());
    }

    #[test]
    fn collection_visibility() {
        assert!(require_collection_view(&actor(2, false), &coll(1, true)).is_ok());
        assert!(require_collection_view(&actor(2, false), &coll(1, false)).is_err());
        assert!(require_collection_view(&actor(1, false), &coll(1, false)).is_ok());
    }
}
