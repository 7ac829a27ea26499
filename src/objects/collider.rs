use serde::{Deserialize, Serialize};

use super::EntityId;
use crate::common::error::{PhysicsError, Result};
use crate::math::transform::Transform;
use crate::math::vec2::Vec2;
use crate::shapes::{AxisAlignedBox, Circle, ColliderShape, OrientedBox, ShapeKind};

/// Gameplay tag of a collider. Selects reactions, never gates geometry.
///
/// Discriminants are the persisted values (8 is reserved).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ColliderCategory {
    #[default]
    Default = 0,
    Player = 1,
    Platform = 2,
    Enemy = 3,
    Creature = 4,
    Collectible = 5,
    Wall = 6,
    Hazard = 7,
    Checkpoint = 9,
    TriggerBox = 10,
}

impl ColliderCategory {
    pub const ALL: [ColliderCategory; 10] = [
        ColliderCategory::Default,
        ColliderCategory::Player,
        ColliderCategory::Platform,
        ColliderCategory::Enemy,
        ColliderCategory::Creature,
        ColliderCategory::Collectible,
        ColliderCategory::Wall,
        ColliderCategory::Hazard,
        ColliderCategory::Checkpoint,
        ColliderCategory::TriggerBox,
    ];

    pub fn as_i32(self) -> i32 {
        self as i32
    }

    fn bit(self) -> u32 {
        1 << (self as u32)
    }
}

impl TryFrom<i32> for ColliderCategory {
    type Error = PhysicsError;

    fn try_from(value: i32) -> Result<Self> {
        ColliderCategory::ALL
            .into_iter()
            .find(|category| category.as_i32() == value)
            .ok_or(PhysicsError::UnknownCategory(value))
    }
}

/// Categories a collider detects but never resolves against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryMask(u32);

impl CategoryMask {
    pub const NONE: CategoryMask = CategoryMask(0);

    pub fn ignore(&mut self, category: ColliderCategory) {
        self.0 |= category.bit();
    }

    pub fn ignore_all(&mut self, categories: impl IntoIterator<Item = ColliderCategory>) {
        for category in categories {
            self.ignore(category);
        }
    }

    pub fn ignores(self, category: ColliderCategory) -> bool {
        self.0 & category.bit() != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = ColliderCategory> {
        ColliderCategory::ALL
            .into_iter()
            .filter(move |category| self.ignores(*category))
    }
}

impl FromIterator<ColliderCategory> for CategoryMask {
    fn from_iter<I: IntoIterator<Item = ColliderCategory>>(iter: I) -> Self {
        let mut mask = CategoryMask::NONE;
        mask.ignore_all(iter);
        mask
    }
}

/// A collider is identified by its owner and its shape kind; an entity can
/// carry at most one collider of each kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColliderId {
    pub entity: EntityId,
    pub kind: ShapeKind,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Collider {
    pub entity: EntityId,
    pub shape: ColliderShape,
    pub category: ColliderCategory,
    /// Triggers report overlaps but never receive impulses.
    pub is_trigger: bool,
    /// World-space translation from the entity position to the shape center.
    pub offset: Vec2,
    pub ignore_mask: CategoryMask,
    /// Ground forgiveness: how far a player's feet may be from a platform
    /// top and still count as standing on it.
    pub ground_tolerance: f64,
    /// Whether this collider overlapped anything in the current frame.
    pub is_colliding: bool,
}

impl Collider {
    pub const DEFAULT_GROUND_TOLERANCE: f64 = 5.0;

    pub fn new(entity: EntityId, shape: impl Into<ColliderShape>) -> Self {
        Self {
            entity,
            shape: shape.into(),
            category: ColliderCategory::Default,
            is_trigger: false,
            offset: Vec2::ZERO,
            ignore_mask: CategoryMask::NONE,
            ground_tolerance: Self::DEFAULT_GROUND_TOLERANCE,
            is_colliding: false,
        }
    }

    pub fn circle(entity: EntityId, radius: f64) -> Result<Self> {
        Ok(Self::new(entity, Circle::new(radius)?))
    }

    pub fn aabb(entity: EntityId, width: f64, height: f64) -> Result<Self> {
        Ok(Self::new(entity, AxisAlignedBox::new(width, height)?))
    }

    pub fn oriented_box(entity: EntityId, vertices: Vec<Vec2>) -> Result<Self> {
        Ok(Self::new(entity, OrientedBox::new(vertices)?))
    }

    pub fn with_category(mut self, category: ColliderCategory) -> Self {
        self.category = category;
        self
    }

    pub fn with_offset(mut self, offset: Vec2) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_trigger(mut self, is_trigger: bool) -> Self {
        self.is_trigger = is_trigger;
        self
    }

    pub fn with_ground_tolerance(mut self, tolerance: f64) -> Self {
        self.ground_tolerance = tolerance;
        self
    }

    pub fn ignoring(mut self, categories: impl IntoIterator<Item = ColliderCategory>) -> Self {
        self.ignore_mask.ignore_all(categories);
        self
    }

    pub fn id(&self) -> ColliderId {
        ColliderId {
            entity: self.entity,
            kind: self.kind(),
        }
    }

    pub fn kind(&self) -> ShapeKind {
        self.shape.kind()
    }

    pub fn add_ignored_category(&mut self, category: ColliderCategory) {
        self.ignore_mask.ignore(category);
    }

    pub fn add_ignored_categories(&mut self, categories: impl IntoIterator<Item = ColliderCategory>) {
        self.ignore_mask.ignore_all(categories);
    }

    pub fn ignores(&self, category: ColliderCategory) -> bool {
        self.ignore_mask.ignores(category)
    }

    /// The entity transform shifted by this collider's offset.
    pub fn shape_transform(&self, entity_transform: &Transform) -> Transform {
        Transform {
            position: entity_transform.position + self.offset,
            ..*entity_transform
        }
    }
}
