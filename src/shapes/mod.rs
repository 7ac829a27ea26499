pub mod axis_aligned_box;
pub mod circle;
pub mod oriented_box;

pub use axis_aligned_box::AxisAlignedBox;
pub use circle::Circle;
pub use oriented_box::OrientedBox;

use crate::common::error::{PhysicsError, Result};

/// Discriminant of a [`ColliderShape`]; the integer values are the persisted ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ShapeKind {
    AxisAlignedBox = 1,
    Circle = 2,
    OrientedBox = 3,
}

impl ShapeKind {
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl TryFrom<i32> for ShapeKind {
    type Error = PhysicsError;

    fn try_from(value: i32) -> Result<Self> {
        match value {
            1 => Ok(ShapeKind::AxisAlignedBox),
            2 => Ok(ShapeKind::Circle),
            3 => Ok(ShapeKind::OrientedBox),
            other => Err(PhysicsError::UnknownColliderKind(other)),
        }
    }
}

/// The geometric half of a collider.
#[derive(Debug, Clone, PartialEq)]
pub enum ColliderShape {
    Circle(Circle),
    AxisAlignedBox(AxisAlignedBox),
    OrientedBox(OrientedBox),
}

impl ColliderShape {
    pub fn kind(&self) -> ShapeKind {
        match self {
            ColliderShape::Circle(_) => ShapeKind::Circle,
            ColliderShape::AxisAlignedBox(_) => ShapeKind::AxisAlignedBox,
            ColliderShape::OrientedBox(_) => ShapeKind::OrientedBox,
        }
    }

    /// The default shape of each kind (circle r=20, 40x40 box, empty polygon).
    pub fn default_for(kind: ShapeKind) -> Self {
        match kind {
            ShapeKind::Circle => ColliderShape::Circle(Circle::default()),
            ShapeKind::AxisAlignedBox => ColliderShape::AxisAlignedBox(AxisAlignedBox::default()),
            ShapeKind::OrientedBox => ColliderShape::OrientedBox(OrientedBox::default()),
        }
    }
}

impl From<Circle> for ColliderShape {
    fn from(circle: Circle) -> Self {
        ColliderShape::Circle(circle)
    }
}

impl From<AxisAlignedBox> for ColliderShape {
    fn from(aabb: AxisAlignedBox) -> Self {
        ColliderShape::AxisAlignedBox(aabb)
    }
}

impl From<OrientedBox> for ColliderShape {
    fn from(obb: OrientedBox) -> Self {
        ColliderShape::OrientedBox(obb)
    }
}
