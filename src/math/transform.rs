use serde::{Deserialize, Serialize};

use super::vec2::Vec2;

/// World placement of an entity: scale, then rotate, then translate.
///
/// Only `position` matters for circles and axis-aligned boxes; oriented boxes
/// use the full local-to-world mapping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec2,
    /// Radians, counter-clockwise.
    pub rotation: f64,
    #[serde(default = "unit_scale")]
    pub scale: Vec2,
}

fn unit_scale() -> Vec2 {
    Vec2::ONE
}

impl Transform {
    pub fn new(position: Vec2, rotation: f64) -> Self {
        Self {
            position,
            rotation,
            scale: Vec2::ONE,
        }
    }

    /// A pure translation.
    pub fn at(position: Vec2) -> Self {
        Self::new(position, 0.0)
    }

    pub fn identity() -> Self {
        Self::new(Vec2::ZERO, 0.0)
    }

    pub fn with_scale(mut self, scale: Vec2) -> Self {
        self.scale = scale;
        self
    }

    /// Maps a local-space point to world space.
    pub fn apply(self, point: Vec2) -> Vec2 {
        point.scale(self.scale).rotate(self.rotation) + self.position
    }

    /// Maps a world-space point back to local space.
    ///
    /// A zero scale component collapses that axis; the result on it is not finite.
    pub fn apply_inverse(self, point: Vec2) -> Vec2 {
        let unrotated = (point - self.position).rotate(-self.rotation);
        Vec2::new(unrotated.x / self.scale.x, unrotated.y / self.scale.y)
    }

    /// Maps a local-space direction to world space (no translation).
    pub fn apply_vector(self, vector: Vec2) -> Vec2 {
        vector.scale(self.scale).rotate(self.rotation)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}
