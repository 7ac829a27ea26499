pub mod collider;
pub mod rigid_body;

use serde::{Deserialize, Serialize};

pub use collider::{CategoryMask, Collider, ColliderCategory, ColliderId};
pub use rigid_body::{BodyKind, RigidBody};

/// Handle of an entity owned by the surrounding game object system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub u64);

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}
