pub mod config;
pub mod error;
pub mod layer;
pub mod material;

pub use config::PhysicsConfig;
pub use error::{PhysicsError, Result};
pub use layer::Layer;
pub use material::Material;
