pub mod aabb;
pub mod detection;
pub mod event;
pub mod manifold;
pub mod sat;

// Re-export key types
pub use aabb::Aabb;
pub use detection::{check_collision, PlacedShape};
pub use event::{Collision, CollisionSide, PairKey};
pub use manifold::ContactManifold;
