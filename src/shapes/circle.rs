use serde::{Deserialize, Serialize};

use crate::common::error::{PhysicsError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub radius: f64,
}

impl Circle {
    pub const DEFAULT_RADIUS: f64 = 20.0;

    pub fn new(radius: f64) -> Result<Self> {
        if !radius.is_finite() || radius < 0.0 {
            return Err(PhysicsError::InvalidShape(format!(
                "circle radius must be finite and non-negative, got {radius}"
            )));
        }
        Ok(Self { radius })
    }
}

impl Default for Circle {
    fn default() -> Self {
        Self {
            radius: Self::DEFAULT_RADIUS,
        }
    }
}
