pub mod contact_policy;
pub mod handlers;
pub mod physics_world;
pub mod transforms;

pub use handlers::{CollisionHandlers, NoopHandlers};
pub use physics_world::PhysicsWorld;
pub use transforms::{TransformMap, TransformProvider};
