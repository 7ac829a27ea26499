use tracing::trace;

use super::EntityId;
use crate::collision::event::Collision;
use crate::common::error::{PhysicsError, Result};
use crate::common::Material;
use crate::math::vec2::Vec2;

/// How a body takes part in the simulation. Discriminants are persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BodyKind {
    #[default]
    Dynamic = 0,
    Kinematic = 1,
    /// Never moves and has zero inverse mass.
    Static = 2,
}

impl BodyKind {
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl TryFrom<i32> for BodyKind {
    type Error = PhysicsError;

    fn try_from(value: i32) -> Result<Self> {
        match value {
            0 => Ok(BodyKind::Dynamic),
            1 => Ok(BodyKind::Kinematic),
            2 => Ok(BodyKind::Static),
            other => Err(PhysicsError::UnknownBodyKind(other)),
        }
    }
}

/// Per-entity dynamics state. Position lives on the entity transform.
#[derive(Debug, Clone, PartialEq)]
pub struct RigidBody {
    pub entity: EntityId,
    kind: BodyKind,
    mass: f64,
    pub velocity: Vec2,
    /// Per-axis speed limit applied during integration.
    pub max_velocity: Vec2,
    pub material: Material,
    pub has_gravity: bool,
    pub gravity_multiplier: f64,
    /// Supported by a floor this frame. Reset at the start of every frame.
    pub grounded: bool,
    /// When false the body reports contacts but never receives impulses.
    pub resolve_collisions: bool,
    /// When true integration leaves the body untouched.
    pub velocity_locked: bool,
    pub(crate) collisions: Vec<Collision>,
}

impl RigidBody {
    pub const DEFAULT_MASS: f64 = 10.0;
    pub const DEFAULT_MAX_VELOCITY: Vec2 = Vec2 { x: 1000.0, y: 4000.0 };
    pub const DEFAULT_GRAVITY_MULTIPLIER: f64 = 100.0;

    /// A dynamic body with the default tuning.
    pub fn new(entity: EntityId) -> Self {
        Self {
            entity,
            kind: BodyKind::Dynamic,
            mass: Self::DEFAULT_MASS,
            velocity: Vec2::ZERO,
            max_velocity: Self::DEFAULT_MAX_VELOCITY,
            material: Material::default(),
            has_gravity: true,
            gravity_multiplier: Self::DEFAULT_GRAVITY_MULTIPLIER,
            grounded: false,
            resolve_collisions: true,
            velocity_locked: false,
            collisions: Vec::new(),
        }
    }

    pub fn with_kind(entity: EntityId, kind: BodyKind) -> Self {
        let mut body = Self::new(entity);
        body.set_kind(kind);
        body
    }

    pub fn new_static(entity: EntityId) -> Self {
        Self::with_kind(entity, BodyKind::Static)
    }

    pub fn kind(&self) -> BodyKind {
        self.kind
    }

    pub fn is_static(&self) -> bool {
        self.kind == BodyKind::Static
    }

    /// Changing to Static zeroes the mass; leaving Static restores the default.
    pub fn set_kind(&mut self, kind: BodyKind) {
        self.kind = kind;
        if kind == BodyKind::Static {
            self.mass = 0.0;
        } else if self.mass <= 0.0 {
            self.mass = Self::DEFAULT_MASS;
        }
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Sets the mass; ignored for static bodies, which keep mass 0.
    pub fn set_mass(&mut self, mass: f64) {
        if self.is_static() {
            return;
        }
        self.mass = if mass.is_finite() { mass.max(0.0) } else { 0.0 };
    }

    /// `1 / mass`, or 0 for static and massless bodies.
    pub fn inv_mass(&self) -> f64 {
        if self.is_static() || self.mass <= 0.0 {
            0.0
        } else {
            1.0 / self.mass
        }
    }

    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    pub fn add_velocity(&mut self, delta: Vec2) {
        self.velocity += delta;
    }

    /// Accelerates the body by `force * dt / mass`.
    ///
    /// A resulting component that is non-zero but below its `velocity_snap`
    /// threshold is pushed past the threshold in its own direction, so a small
    /// force is not erased by the next integration step.
    pub fn apply_force(&mut self, force: Vec2, dt: f64, velocity_snap: Vec2) {
        if self.inv_mass() == 0.0 {
            return;
        }
        let mut next = self.velocity + force * (dt * self.inv_mass());
        next.x = nudge_past_snap(next.x, velocity_snap.x);
        next.y = nudge_past_snap(next.y, velocity_snap.y);
        self.velocity = next;
    }

    pub fn set_grounded(&mut self, grounded: bool) {
        self.grounded = grounded;
    }

    /// Contacts recorded for this body in the current frame.
    pub fn collisions(&self) -> &[Collision] {
        &self.collisions
    }

    /// Records a contact unless the same collider pair is already stored.
    pub fn add_collision(&mut self, collision: Collision) -> bool {
        if self.collisions.contains(&collision) {
            return false;
        }
        self.collisions.push(collision);
        true
    }

    pub fn clear_collisions(&mut self) {
        self.collisions.clear();
    }

    pub(crate) fn take_collisions(&mut self) -> Vec<Collision> {
        std::mem::take(&mut self.collisions)
    }

    fn accepts_impulse(&self) -> bool {
        !self.is_static() && self.resolve_collisions
    }
}

fn nudge_past_snap(value: f64, snap: f64) -> f64 {
    let magnitude = value.abs();
    if magnitude > 0.0 && magnitude < snap {
        value + snap.copysign(value)
    } else {
        value
    }
}

/// Applies a single normal impulse between two bodies.
///
/// `normal` points from `first` toward `second`. A missing body is treated
/// as static. Returns the impulse magnitude when one was applied.
pub fn resolve_impulse(
    first: Option<&mut RigidBody>,
    second: Option<&mut RigidBody>,
    normal: Vec2,
) -> Option<f64> {
    let first_static = first.as_ref().map_or(true, |b| b.is_static());
    let second_static = second.as_ref().map_or(true, |b| b.is_static());
    if first_static && second_static {
        return None;
    }

    let v1 = first.as_ref().map_or(Vec2::ZERO, |b| b.velocity);
    let v2 = second.as_ref().map_or(Vec2::ZERO, |b| b.velocity);
    let im1 = first.as_ref().map_or(0.0, |b| b.inv_mass());
    let im2 = second.as_ref().map_or(0.0, |b| b.inv_mass());

    let projected = (v2 - v1).dot(normal);
    if projected > 0.0 {
        return None;
    }
    let total_inv_mass = im1 + im2;
    if total_inv_mass <= 0.0 {
        return None;
    }

    let j = -projected / total_inv_mass;
    let impulse = normal * j;

    if let Some(body) = first {
        if body.accepts_impulse() {
            body.velocity -= impulse * im1;
        }
    }
    if let Some(body) = second {
        if body.accepts_impulse() {
            body.velocity += impulse * im2;
        }
    }
    trace!(j, ?normal, "applied contact impulse");
    Some(j)
}
