use serde::{Deserialize, Serialize};

use crate::common::error::{PhysicsError, Result};
use crate::math::vec2::Vec2;

/// A box centered on its owner's position, never rotated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisAlignedBox {
    pub width: f64,
    pub height: f64,
}

impl AxisAlignedBox {
    pub const DEFAULT_SIZE: f64 = 40.0;

    pub fn new(width: f64, height: f64) -> Result<Self> {
        if !(width.is_finite() && width > 0.0 && height.is_finite() && height > 0.0) {
            return Err(PhysicsError::InvalidShape(format!(
                "box dimensions must be positive, got {width}x{height}"
            )));
        }
        Ok(Self { width, height })
    }

    pub fn half_extents(&self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }
}

impl Default for AxisAlignedBox {
    fn default() -> Self {
        Self {
            width: Self::DEFAULT_SIZE,
            height: Self::DEFAULT_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_half_extents() {
        let b = AxisAlignedBox::new(40.0, 10.0).unwrap();
        assert_eq!(b.half_extents(), Vec2::new(20.0, 5.0));
        assert_eq!(AxisAlignedBox::default(), AxisAlignedBox::new(40.0, 40.0).unwrap());
    }

    #[test]
    fn test_box_rejects_degenerate_size() {
        assert!(AxisAlignedBox::new(0.0, 10.0).is_err());
        assert!(AxisAlignedBox::new(10.0, -1.0).is_err());
    }
}
