//! Gameplay-specific reactions to a detected contact: positional
//! corrections and ground flags. Nothing here touches velocities.

use tracing::trace;

use crate::collision::aabb::Aabb;
use crate::collision::detection::PlacedShape;
use crate::collision::manifold::ContactManifold;
use crate::common::{Layer, PhysicsConfig};
use crate::math::transform::Transform;
use crate::math::vec2::Vec2;
use crate::objects::{BodyKind, Collider, ColliderCategory, EntityId, RigidBody};
use crate::shapes::ColliderShape;

/// The parts of a body the policy reads.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyState {
    pub kind: BodyKind,
    pub resolve_collisions: bool,
}

impl BodyState {
    fn is_static(self) -> bool {
        self.kind == BodyKind::Static
    }
}

impl From<&RigidBody> for BodyState {
    fn from(body: &RigidBody) -> Self {
        Self {
            kind: body.kind(),
            resolve_collisions: body.resolve_collisions,
        }
    }
}

/// One participant of a pair test.
#[derive(Debug, Clone, Copy)]
pub struct ContactSide<'a> {
    pub collider: &'a Collider,
    /// Entity transform, without the collider offset.
    pub entity_transform: Transform,
    pub body: Option<BodyState>,
    pub layer: Layer,
}

impl<'a> ContactSide<'a> {
    pub fn entity(&self) -> EntityId {
        self.collider.entity
    }

    pub fn placed(&self) -> PlacedShape<'a> {
        PlacedShape::new(&self.collider.shape, self.collider.shape_transform(&self.entity_transform))
    }

    pub fn center(&self) -> Vec2 {
        self.entity_transform.position + self.collider.offset
    }

    /// True when this side has no body or a static one.
    pub fn is_immovable(&self) -> bool {
        self.body.map_or(true, BodyState::is_static)
    }

    fn is_movable(&self) -> bool {
        !self.is_immovable()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ContactEffect {
    /// Mark the entity's body as supported this frame.
    Ground(EntityId),
    /// Move the entity to a new position.
    MoveTo { entity: EntityId, position: Vec2 },
}

/// Player standing on a platform.
///
/// Runs for every player/platform box pair, overlapping or not, so a player
/// resting exactly on top still counts as grounded.
pub fn platform_support(a: &ContactSide, b: &ContactSide) -> Option<ContactEffect> {
    let (player, platform) = match (a.collider.category, b.collider.category) {
        (ColliderCategory::Player, ColliderCategory::Platform) => (a, b),
        (ColliderCategory::Platform, ColliderCategory::Player) => (b, a),
        _ => return None,
    };
    let (ColliderShape::AxisAlignedBox(feet), ColliderShape::AxisAlignedBox(floor)) =
        (&player.collider.shape, &platform.collider.shape)
    else {
        return None;
    };
    player.body?;

    let feet = Aabb::from_center(player.center(), feet.half_extents());
    let floor = Aabb::from_center(platform.center(), floor.half_extents());
    let tolerance = player.collider.ground_tolerance;
    let gap = feet.bottom() - floor.top();

    if gap.abs() < tolerance && feet.overlaps_horizontally(&floor) {
        trace!(player = %player.entity(), platform = %platform.entity(), gap, "player supported by platform");
        Some(ContactEffect::Ground(player.entity()))
    } else {
        None
    }
}

/// Corrections for a pair that overlaps. `manifold` comes from testing
/// `this` against `other`, so its normal points from `other` toward `this`.
/// Triggers and pairs excluded by either ignore mask never move or ground
/// anything.
pub fn contact_effects(
    this: &ContactSide,
    other: &ContactSide,
    manifold: &ContactManifold,
    config: &PhysicsConfig,
) -> Vec<ContactEffect> {
    use ColliderShape::*;

    let mut effects = Vec::new();
    if this.collider.is_trigger || other.collider.is_trigger {
        return effects;
    }
    if this.collider.ignores(other.collider.category) || other.collider.ignores(this.collider.category) {
        trace!(this = %this.entity(), other = %other.entity(), "masked pair, no corrections");
        return effects;
    }
    match (&this.collider.shape, &other.collider.shape) {
        (Circle(a), Circle(b)) => {
            if this.is_movable() {
                effects.extend(separate_circles(this, other, a.radius + b.radius, config));
            }
        }
        (Circle(_), AxisAlignedBox(_)) | (AxisAlignedBox(_), Circle(_)) => {
            if this.is_movable() {
                effects.push(ContactEffect::MoveTo {
                    entity: this.entity(),
                    position: this.entity_transform.position + manifold.normal,
                });
            }
        }
        (AxisAlignedBox(_), AxisAlignedBox(_)) => {
            effects.extend(snap_to_ground(this, other, manifold));
        }
        (OrientedBox(_), OrientedBox(_)) => {
            let threshold = config.vertical_normal_threshold;
            if manifold.normal.dot(Vec2::DOWN) > threshold {
                if other.body.is_some() {
                    effects.push(ContactEffect::Ground(other.entity()));
                }
            } else if manifold.normal.dot(Vec2::UP) > threshold && this.body.is_some() {
                effects.push(ContactEffect::Ground(this.entity()));
            }
        }
        _ => {}
    }
    effects
}

/// Pushes `this` out along the center line to `reach` plus the margin.
fn separate_circles(this: &ContactSide, other: &ContactSide, reach: f64, config: &PhysicsConfig) -> Option<ContactEffect> {
    let Some(direction) = (this.center() - other.center()).try_normalize() else {
        trace!(this = %this.entity(), other = %other.entity(), "coincident circle centers, no separation");
        return None;
    };
    let center = other.center() + direction * (reach + config.circle_separation_margin);
    Some(ContactEffect::MoveTo {
        entity: this.entity(),
        position: center - this.collider.offset,
    })
}

/// Box resting on a floor: ground the upper side and lift it out when the
/// overlap is deeper than the tolerance. Only applies to vertical contacts.
fn snap_to_ground(this: &ContactSide, other: &ContactSide, manifold: &ContactManifold) -> Vec<ContactEffect> {
    if manifold.normal.y == 0.0 || manifold.normal.x != 0.0 {
        return Vec::new();
    }
    let (upper, lower) = if manifold.normal.y > 0.0 { (this, other) } else { (other, this) };

    let Some(upper_body) = upper.body else {
        return Vec::new();
    };
    if upper_body.is_static() || !upper_body.resolve_collisions {
        return Vec::new();
    }
    let lower_is_floor = lower.is_immovable() || lower.collider.category == ColliderCategory::Platform;
    if !lower.layer.supports_ground_snap() || !lower_is_floor {
        return Vec::new();
    }

    let mut effects = vec![ContactEffect::Ground(upper.entity())];
    if manifold.penetration > upper.collider.ground_tolerance {
        effects.push(ContactEffect::MoveTo {
            entity: upper.entity(),
            position: upper.entity_transform.position + Vec2::new(0.0, manifold.penetration),
        });
    }
    effects
}
