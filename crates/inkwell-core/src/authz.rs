//! Ownership checks gating every post and comment mutation.

use uuid::Uuid;

use crate::domain::{Comment, Post, Viewer};

/// A mutation a viewer may attempt on an owned entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Edit,
    Delete,
}

/// Entities with a single owning account.
pub trait Owned {
    fn owner_id(&self) -> Uuid;
}

impl Owned for Post {
    fn owner_id(&self) -> Uuid {
        self.author_id
    }
}

impl Owned for Comment {
    fn owner_id(&self) -> Uuid {
        self.author_id
    }
}

/// Owners may edit and delete; staff may additionally delete anything.
pub fn can_mutate<E: Owned + ?Sized>(viewer: &Viewer, entity: &E, action: Action) -> bool {
    if viewer.is(entity.owner_id()) {
        return true;
    }
    match action {
        Action::Edit => false,
        Action::Delete => viewer.is_staff,
    }
}
