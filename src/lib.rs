//! 2D collision detection and impulse resolution for platformer games.
//!
//! A [`PhysicsWorld`] owns colliders and rigid bodies keyed by [`EntityId`];
//! entity positions stay with the caller behind a [`TransformProvider`].
//! Each frame tests every collider pair, applies positional corrections and
//! ground flags, resolves contacts with a single normal impulse and hands
//! everything that is not solid to [`CollisionHandlers`].

pub mod collision;
pub mod common;
pub mod integration;
pub mod math;
pub mod objects;
pub mod persistence;
pub mod shapes;
pub mod world;

// Re-export key types for easier use
pub use collision::{Collision, ContactManifold};
pub use common::{Layer, Material, PhysicsConfig, PhysicsError, Result};
pub use math::{Transform, Vec2};
pub use objects::{BodyKind, CategoryMask, Collider, ColliderCategory, ColliderId, EntityId, RigidBody};
pub use persistence::{BodyRecord, ColliderRecord};
pub use shapes::{AxisAlignedBox, Circle, ColliderShape, OrientedBox, ShapeKind};
pub use world::{CollisionHandlers, NoopHandlers, PhysicsWorld, TransformMap, TransformProvider};
