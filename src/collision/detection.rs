use tracing::{trace, warn};

use super::aabb::Aabb;
use super::manifold::ContactManifold;
use super::sat;
use crate::common::PhysicsConfig;
use crate::math::transform::Transform;
use crate::math::vec2::Vec2;
use crate::shapes::{AxisAlignedBox, Circle, ColliderShape, OrientedBox};

/// A shape placed in the world. `transform.position` already includes the
/// collider offset, so it is the shape center for circles and boxes.
#[derive(Debug, Clone, Copy)]
pub struct PlacedShape<'a> {
    pub shape: &'a ColliderShape,
    pub transform: Transform,
}

impl<'a> PlacedShape<'a> {
    pub fn new(shape: &'a ColliderShape, transform: Transform) -> Self {
        Self { shape, transform }
    }

    pub fn center(&self) -> Vec2 {
        self.transform.position
    }

    /// World bounds of the shape, if it has any extent.
    pub fn bounds(&self) -> Option<Aabb> {
        match self.shape {
            ColliderShape::Circle(c) => Some(Aabb::from_center(self.center(), Vec2::new(c.radius, c.radius))),
            ColliderShape::AxisAlignedBox(b) => Some(Aabb::from_center(self.center(), b.half_extents())),
            ColliderShape::OrientedBox(o) => Aabb::from_points(o.to_world(&self.transform).vertices()),
        }
    }
}

/// Runs the narrow-phase test for `this` against `other`.
///
/// The manifold normal points from `other` toward `this` whichever way the
/// pair was dispatched. Pairs between an oriented box and a circle or an
/// axis-aligned box have no test and never collide.
pub fn check_collision(this: &PlacedShape, other: &PlacedShape, config: &PhysicsConfig) -> Option<ContactManifold> {
    use ColliderShape::*;

    let manifold = match (this.shape, other.shape) {
        (Circle(a), Circle(b)) => check_circle_circle(this.center(), a, other.center(), b),
        (Circle(c), AxisAlignedBox(b)) => check_circle_aabb(this.center(), c, other.center(), b),
        (AxisAlignedBox(b), Circle(c)) => {
            check_circle_aabb(other.center(), c, this.center(), b).map(ContactManifold::flipped)
        }
        (AxisAlignedBox(a), AxisAlignedBox(b)) => check_aabb_aabb(this.center(), a, other.center(), b),
        (OrientedBox(a), OrientedBox(b)) => check_oriented_boxes(this, a, other, b, config),
        (Circle(_), OrientedBox(_))
        | (OrientedBox(_), Circle(_))
        | (AxisAlignedBox(_), OrientedBox(_))
        | (OrientedBox(_), AxisAlignedBox(_)) => {
            trace!(
                this = ?this.shape.kind(),
                other = ?other.shape.kind(),
                "no narrow-phase test for shape pair"
            );
            None
        }
    };

    if let Some(m) = &manifold {
        trace!(
            this = ?this.shape.kind(),
            other = ?other.shape.kind(),
            normal = ?m.normal,
            penetration = m.penetration,
            "contact"
        );
    }
    manifold
}

/// Checks for collision between two circles. Touching circles collide.
pub fn check_circle_circle(
    center_a: Vec2,
    circle_a: &Circle,
    center_b: Vec2,
    circle_b: &Circle,
) -> Option<ContactManifold> {
    let radii_sum = circle_a.radius + circle_b.radius;
    let distance = center_a.distance(center_b);
    if distance > radii_sum {
        return None;
    }

    let point = if radii_sum > 0.0 {
        center_a.lerp(center_b, circle_a.radius / radii_sum)
    } else {
        center_a
    };

    let normal = match (center_a - point).try_normalize() {
        Some(n) => n,
        None => {
            // Concentric (or zero-radius) circles: any direction works.
            warn!(?center_a, "coincident circle centers, using fallback normal");
            Vec2::UP
        }
    };

    Some(ContactManifold::new(point, normal, radii_sum - distance))
}

/// Checks a circle against an axis-aligned box.
///
/// A circle whose center lies inside the box always collides; the normal then
/// points out of the box through the nearest face of the dominant axis.
pub fn check_circle_aabb(
    circle_center: Vec2,
    circle: &Circle,
    box_center: Vec2,
    aabb: &AxisAlignedBox,
) -> Option<ContactManifold> {
    let half = aabb.half_extents();
    let n = circle_center - box_center;
    let mut closest = n.clamp(-half, half);

    let inside = closest == n;
    if inside {
        if n.x.abs() > n.y.abs() {
            closest.x = if closest.x > 0.0 { half.x } else { -half.x };
        } else {
            closest.y = if closest.y > 0.0 { half.y } else { -half.y };
        }
    }

    let to_center = n - closest;
    let distance_squared = to_center.magnitude_squared();
    if !inside && distance_squared > circle.radius * circle.radius {
        return None;
    }

    let point = box_center + closest;
    let (normal, penetration) = if inside {
        let outward = if n.x.abs() > n.y.abs() {
            Vec2::new(if closest.x > 0.0 { 1.0 } else { -1.0 }, 0.0)
        } else {
            Vec2::new(0.0, if closest.y > 0.0 { 1.0 } else { -1.0 })
        };
        (outward, circle.radius + to_center.magnitude())
    } else {
        let distance = distance_squared.sqrt();
        let normal = to_center
            .try_normalize()
            .or_else(|| n.try_normalize())
            .unwrap_or(Vec2::UP);
        (normal, circle.radius - distance)
    };

    Some(ContactManifold::new(point, normal, penetration))
}

/// Checks two axis-aligned boxes. `center_a`/`center_b` include collider offsets.
///
/// The separating axis is picked by comparing the slope between the centers
/// with the aspect ratio of the combined extents, so both orderings of a pair
/// agree; the normal is the sign of `a - b` on it.
pub fn check_aabb_aabb(
    center_a: Vec2,
    box_a: &AxisAlignedBox,
    center_b: Vec2,
    box_b: &AxisAlignedBox,
) -> Option<ContactManifold> {
    let half_a = box_a.half_extents();
    let half_b = box_b.half_extents();
    let diff = center_a - center_b;
    let abs_diff = diff.abs();
    let sign_diff = diff.sign();

    if !(abs_diff.x < half_a.x + half_b.x && abs_diff.y < half_a.y + half_b.y) {
        return None;
    }

    let m1 = (diff.y / diff.x).abs();
    let m2 = (half_a.y + half_b.y) / (half_a.x + half_b.x);

    let (normal, penetration, point) = if m1 > m2 {
        let normal = Vec2::new(0.0, if diff.y < 0.0 { -1.0 } else { 1.0 });
        let penetration = half_a.y + half_b.y - abs_diff.y;
        let point = if box_a.width < box_b.width {
            Vec2::new(
                center_a.x + (half_a.y / m1).min(half_a.x) * -sign_diff.x,
                center_a.y + half_a.y * -sign_diff.y,
            )
        } else {
            Vec2::new(
                center_b.x - (half_b.y / m1).min(half_b.x) * -sign_diff.x,
                center_b.y - half_b.y * -sign_diff.y,
            )
        };
        (normal, penetration, point)
    } else {
        let normal = Vec2::new(if diff.x < 0.0 { -1.0 } else { 1.0 }, 0.0);
        let penetration = half_a.x + half_b.x - abs_diff.x;
        let point = if box_a.height < box_b.height {
            Vec2::new(
                center_a.x + half_a.x * -sign_diff.x,
                center_a.y + (m1 * half_a.x).min(half_a.y) * -sign_diff.y,
            )
        } else {
            Vec2::new(
                center_b.x - half_b.x * -sign_diff.x,
                center_b.y - (m1 * half_b.x).min(half_b.y) * -sign_diff.y,
            )
        };
        (normal, penetration, point)
    };

    // Coincident centers give a NaN slope and a contact at the shared center.
    let point = if point.is_finite() { point } else { (center_a + center_b) * 0.5 };

    Some(ContactManifold::new(point, normal, penetration))
}

fn check_oriented_boxes(
    this: &PlacedShape,
    a: &OrientedBox,
    other: &PlacedShape,
    b: &OrientedBox,
    config: &PhysicsConfig,
) -> Option<ContactManifold> {
    let world_a = a.to_world(&this.transform);
    let world_b = b.to_world(&other.transform);

    let bounds_a = Aabb::from_points(world_a.vertices())?;
    let bounds_b = Aabb::from_points(world_b.vertices())?;
    if !bounds_a.overlaps(&bounds_b) {
        return None;
    }
    sat::check_obb_obb(&world_a, &world_b, config)
}
