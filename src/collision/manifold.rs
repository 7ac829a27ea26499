use crate::math::vec2::Vec2;

/// The geometric result of one narrow-phase test.
///
/// `normal` is a unit vector pointing from the second shape of the test
/// ("other") toward the first ("self").
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactManifold {
    /// World-space contact location.
    pub point: Vec2,
    pub normal: Vec2,
    /// Overlap depth, never negative.
    pub penetration: f64,
}

impl ContactManifold {
    pub fn new(point: Vec2, normal: Vec2, penetration: f64) -> Self {
        Self {
            point,
            normal,
            penetration: penetration.max(0.0),
        }
    }

    /// The same contact seen from the other shape: same point, opposite normal.
    pub fn flipped(self) -> Self {
        Self {
            normal: -self.normal,
            ..self
        }
    }
}
