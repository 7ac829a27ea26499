//! Per-frame collision events handed to bodies and gameplay handlers.

use super::manifold::ContactManifold;
use crate::math::vec2::Vec2;
use crate::objects::{CategoryMask, Collider, ColliderCategory, ColliderId, EntityId};

/// What resolution needs to know about one participant of a collision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionSide {
    pub collider: ColliderId,
    pub category: ColliderCategory,
    pub is_trigger: bool,
    pub ignore_mask: CategoryMask,
}

impl CollisionSide {
    pub fn entity(&self) -> EntityId {
        self.collider.entity
    }
}

impl From<&Collider> for CollisionSide {
    fn from(collider: &Collider) -> Self {
        Self {
            collider: collider.id(),
            category: collider.category,
            is_trigger: collider.is_trigger,
            ignore_mask: collider.ignore_mask,
        }
    }
}

/// One detected contact, stored on the body of `this`.
///
/// `normal` points from `this` toward `other`. Two collisions are equal when
/// they involve the same unordered pair of colliders.
#[derive(Debug, Clone, Copy)]
pub struct Collision {
    pub this: CollisionSide,
    pub other: CollisionSide,
    pub point: Vec2,
    pub normal: Vec2,
    pub penetration: f64,
}

impl Collision {
    /// Builds the record for `this` from a manifold computed with `other` as
    /// the test's second shape (manifold normal points from `other` to `this`).
    pub fn from_manifold(this: CollisionSide, other: CollisionSide, manifold: &ContactManifold) -> Self {
        Self {
            this,
            other,
            point: manifold.point,
            normal: -manifold.normal,
            penetration: manifold.penetration,
        }
    }

    /// The same contact described from the other participant.
    pub fn reversed(&self) -> Self {
        Self {
            this: self.other,
            other: self.this,
            point: self.point,
            normal: -self.normal,
            penetration: self.penetration,
        }
    }

    pub fn pair_key(&self) -> PairKey {
        PairKey::new(self.this.collider, self.other.collider)
    }

    pub fn involves(&self, category: ColliderCategory) -> bool {
        self.this.category == category || self.other.category == category
    }

    /// Whether either side's ignore mask excludes the other's category.
    pub fn is_masked(&self) -> bool {
        self.this.ignore_mask.ignores(self.other.category)
            || self.other.ignore_mask.ignores(self.this.category)
    }
}

impl PartialEq for Collision {
    fn eq(&self, other: &Self) -> bool {
        self.pair_key() == other.pair_key()
    }
}

impl Eq for Collision {}

/// Order-independent key of a collider pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PairKey(ColliderId, ColliderId);

impl PairKey {
    pub fn new(a: ColliderId, b: ColliderId) -> Self {
        if a <= b {
            PairKey(a, b)
        } else {
            PairKey(b, a)
        }
    }
}
