//! Defines the surface properties that slow a body down.

use serde::{Deserialize, Serialize};

/// Per-body damping applied to horizontal velocity during integration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Air drag. Range [0, 1]; `v.x *= 1 - dt * drag` every step.
    pub drag: f64,
    /// Surface friction. Range [0, 1]; applied after drag while `v.x != 0`.
    pub friction: f64,
}

impl Material {
    /// Creates a new material, clamping both coefficients into [0, 1].
    pub fn new(drag: f64, friction: f64) -> Self {
        Material {
            drag: clamp_unit(drag),
            friction: clamp_unit(friction),
        }
    }

    pub fn set_drag(&mut self, drag: f64) {
        self.drag = clamp_unit(drag);
    }

    pub fn set_friction(&mut self, friction: f64) {
        self.friction = clamp_unit(friction);
    }
}

fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

impl Default for Material {
    fn default() -> Self {
        Material {
            drag: 0.9,
            friction: 0.9,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_material_clamps_to_unit_range() {
        let m = Material::new(1.5, -0.2);
        assert_eq!(m.drag, 1.0);
        assert_eq!(m.friction, 0.0);

        let mut m = Material::default();
        assert_eq!(m, Material::new(0.9, 0.9));
        m.set_drag(f64::NAN);
        assert_eq!(m.drag, 0.0);
        m.set_friction(0.3);
        assert_eq!(m.friction, 0.3);
    }
}
