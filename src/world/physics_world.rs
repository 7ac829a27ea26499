use std::collections::HashSet;

use tracing::{debug, trace};

use super::contact_policy::{self, BodyState, ContactEffect, ContactSide};
use super::handlers::{self, CollisionHandlers};
use super::transforms::TransformProvider;
use crate::collision::detection;
use crate::collision::event::{Collision, PairKey};
use crate::common::PhysicsConfig;
use crate::integration::integrator;
use crate::math::vec2::Vec2;
use crate::objects::rigid_body::resolve_impulse;
use crate::objects::{Collider, ColliderId, EntityId, RigidBody};
use crate::shapes::ColliderShape;

/// Owns every active collider and body and runs the per-frame pipeline:
/// detection, resolution, integration.
///
/// Entity transforms live outside the world and are reached through a
/// [`TransformProvider`].
#[derive(Debug, Default)]
pub struct PhysicsWorld {
    pub config: PhysicsConfig,
    colliders: Vec<Collider>,
    bodies: Vec<RigidBody>,
    // Pairs already tested this frame.
    frame_pairs: HashSet<PairKey>,
}

/// Which participant of a tested pair receives the collision record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Recipient {
    This,
    Other,
}

/// Everything a pair test produced, detached from the world's borrows.
struct PairOutcome {
    effects: Vec<ContactEffect>,
    delivery: Option<(EntityId, Collision)>,
    overlapping: bool,
}

impl PhysicsWorld {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: PhysicsConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// A dynamic body using this world's gravity multiplier.
    pub fn make_body(&self, entity: EntityId) -> RigidBody {
        let mut body = RigidBody::new(entity);
        body.gravity_multiplier = self.config.default_gravity_multiplier;
        body
    }

    /// A collider using this world's ground tolerance.
    pub fn make_collider(&self, entity: EntityId, shape: impl Into<ColliderShape>) -> Collider {
        Collider::new(entity, shape).with_ground_tolerance(self.config.ground_tolerance)
    }

    // --- Registration ---

    /// Registers a collider. Returns false if an identical id is already
    /// active; the world keeps the existing collider in that case.
    pub fn activate_collider(&mut self, collider: Collider) -> bool {
        let id = collider.id();
        if self.colliders.iter().any(|c| c.id() == id) {
            trace!(entity = %id.entity, kind = ?id.kind, "collider already active");
            return false;
        }
        debug!(entity = %id.entity, kind = ?id.kind, category = ?collider.category, "activated collider");
        self.colliders.push(collider);
        true
    }

    pub fn deactivate_collider(&mut self, id: ColliderId) -> Option<Collider> {
        let index = self.colliders.iter().position(|c| c.id() == id)?;
        debug!(entity = %id.entity, kind = ?id.kind, "deactivated collider");
        Some(self.colliders.remove(index))
    }

    /// Registers a body. An entity has at most one body; a second one is
    /// rejected.
    pub fn activate_body(&mut self, body: RigidBody) -> bool {
        if self.body_index(body.entity).is_some() {
            trace!(entity = %body.entity, "body already active");
            return false;
        }
        debug!(entity = %body.entity, kind = ?body.kind(), "activated body");
        self.bodies.push(body);
        true
    }

    pub fn deactivate_body(&mut self, entity: EntityId) -> Option<RigidBody> {
        let index = self.body_index(entity)?;
        debug!(%entity, "deactivated body");
        Some(self.bodies.remove(index))
    }

    /// Drops every collider and body.
    pub fn clear_all(&mut self) {
        debug!(
            colliders = self.colliders.len(),
            bodies = self.bodies.len(),
            "clearing physics world"
        );
        self.colliders.clear();
        self.bodies.clear();
        self.frame_pairs.clear();
    }

    // --- Access ---

    pub fn colliders(&self) -> &[Collider] {
        &self.colliders
    }

    pub fn bodies(&self) -> &[RigidBody] {
        &self.bodies
    }

    pub fn collider(&self, id: ColliderId) -> Option<&Collider> {
        self.colliders.iter().find(|c| c.id() == id)
    }

    pub fn collider_mut(&mut self, id: ColliderId) -> Option<&mut Collider> {
        self.colliders.iter_mut().find(|c| c.id() == id)
    }

    pub fn body(&self, entity: EntityId) -> Option<&RigidBody> {
        self.bodies.iter().find(|b| b.entity == entity)
    }

    pub fn body_mut(&mut self, entity: EntityId) -> Option<&mut RigidBody> {
        self.bodies.iter_mut().find(|b| b.entity == entity)
    }

    fn body_index(&self, entity: EntityId) -> Option<usize> {
        self.bodies.iter().position(|b| b.entity == entity)
    }

    /// Applies a force to an entity's body for one frame of length `dt`.
    /// Returns false when the entity has no body.
    pub fn apply_force(&mut self, entity: EntityId, force: Vec2, dt: f64) -> bool {
        let snap = self.config.velocity_snap;
        match self.body_mut(entity) {
            Some(body) => {
                body.apply_force(force, dt, snap);
                true
            }
            None => false,
        }
    }

    // --- Frame pipeline ---

    /// Runs one full frame: detection, resolution, integration.
    /// Returns the number of collision records delivered.
    pub fn step(
        &mut self,
        dt: f64,
        provider: &mut dyn TransformProvider,
        handlers: &mut dyn CollisionHandlers,
    ) -> usize {
        self.begin_frame();
        let delivered = self.detect_collisions(provider);
        self.resolve_collisions(&*provider, handlers);
        self.integrate(dt, provider);
        delivered
    }

    /// Clears per-frame state: ground flags, pending collisions, overlap
    /// flags and the tested-pair set.
    pub fn begin_frame(&mut self) {
        for body in &mut self.bodies {
            body.set_grounded(false);
            body.clear_collisions();
        }
        for collider in &mut self.colliders {
            collider.is_colliding = false;
        }
        self.frame_pairs.clear();
    }

    /// Tests every pair of active colliders once, applies positional
    /// corrections and ground flags, and stores collision records on bodies.
    /// Returns the number of records delivered.
    pub fn detect_collisions(&mut self, provider: &mut dyn TransformProvider) -> usize {
        let count = self.colliders.len();
        let mut overlaps = 0;
        let mut delivered = 0;

        for i in 0..count {
            for j in (i + 1)..count {
                let key = PairKey::new(self.colliders[i].id(), self.colliders[j].id());
                if !self.frame_pairs.insert(key) {
                    continue;
                }
                let Some(outcome) = self.test_pair(i, j, &*provider) else {
                    continue;
                };

                for effect in outcome.effects {
                    self.apply_effect(effect, provider);
                }
                if outcome.overlapping {
                    overlaps += 1;
                    self.colliders[i].is_colliding = true;
                    self.colliders[j].is_colliding = true;
                }
                if let Some((entity, collision)) = outcome.delivery {
                    if let Some(body) = self.body_mut(entity) {
                        if body.add_collision(collision) {
                            delivered += 1;
                        }
                    }
                }
            }
        }

        debug!(colliders = count, overlaps, delivered, "collision detection finished");
        delivered
    }

    /// Tests colliders `i` and `j`. `None` means the pair was skipped.
    fn test_pair(&self, i: usize, j: usize, provider: &dyn TransformProvider) -> Option<PairOutcome> {
        let a = &self.colliders[i];
        let b = &self.colliders[j];
        if a.entity == b.entity {
            return None;
        }
        let side_a = self.contact_side(a, provider)?;
        let side_b = self.contact_side(b, provider)?;

        // The side with a non-static body is authoritative for corrections.
        let (this, other) = if side_a.is_immovable() { (side_b, side_a) } else { (side_a, side_b) };

        let mut effects = Vec::new();
        if matches!(
            (&a.shape, &b.shape),
            (ColliderShape::AxisAlignedBox(_), ColliderShape::AxisAlignedBox(_))
        ) {
            effects.extend(contact_policy::platform_support(&this, &other));
        }

        let Some(manifold) = detection::check_collision(&this.placed(), &other.placed(), &self.config) else {
            return Some(PairOutcome {
                effects,
                delivery: None,
                overlapping: false,
            });
        };
        effects.extend(contact_policy::contact_effects(&this, &other, &manifold, &self.config));

        let delivery = pick_recipient(&this, &other).map(|recipient| match recipient {
            Recipient::This => (
                this.entity(),
                Collision::from_manifold(this.collider.into(), other.collider.into(), &manifold),
            ),
            Recipient::Other => (
                other.entity(),
                Collision::from_manifold(other.collider.into(), this.collider.into(), &manifold.flipped()),
            ),
        });
        if delivery.is_none() {
            trace!(this = %this.entity(), other = %other.entity(), "contact between bodiless colliders dropped");
        }

        Some(PairOutcome {
            effects,
            delivery,
            overlapping: true,
        })
    }

    fn contact_side<'a>(&self, collider: &'a Collider, provider: &dyn TransformProvider) -> Option<ContactSide<'a>> {
        let entity_transform = provider.transform(collider.entity)?;
        Some(ContactSide {
            collider,
            entity_transform,
            body: self.body(collider.entity).map(BodyState::from),
            layer: provider.layer(collider.entity),
        })
    }

    fn apply_effect(&mut self, effect: ContactEffect, provider: &mut dyn TransformProvider) {
        match effect {
            ContactEffect::Ground(entity) => {
                if let Some(body) = self.body_mut(entity) {
                    body.set_grounded(true);
                }
            }
            ContactEffect::MoveTo { entity, position } => {
                trace!(%entity, ?position, "positional correction");
                provider.set_position(entity, position);
            }
        }
    }

    /// Resolves every stored collision: an impulse plus the wall and
    /// instant-death handlers for solid contacts, the gameplay handlers for
    /// everything else. Returns the number of collisions processed.
    pub fn resolve_collisions(
        &mut self,
        provider: &dyn TransformProvider,
        handlers: &mut dyn CollisionHandlers,
    ) -> usize {
        let mut processed = 0;
        for index in 0..self.bodies.len() {
            let collisions = self.bodies[index].take_collisions();
            for collision in &collisions {
                if self.resolve_one(collision, provider, handlers) {
                    processed += 1;
                }
            }
        }
        debug!(processed, "collision resolution finished");
        processed
    }

    fn resolve_one(
        &mut self,
        collision: &Collision,
        provider: &dyn TransformProvider,
        handlers: &mut dyn CollisionHandlers,
    ) -> bool {
        let this_entity = collision.this.entity();
        let other_entity = collision.other.entity();
        if provider.transform(this_entity).is_none() || provider.transform(other_entity).is_none() {
            trace!(this = %this_entity, other = %other_entity, "collision participant gone, skipping");
            return false;
        }

        let this_layer = provider.layer(this_entity);
        let other_layer = provider.layer(other_entity);
        if this_layer.mutually_exclusive(other_layer) {
            return false;
        }

        if is_solid_contact(collision) && this_layer.permits_resolution_with(other_layer) {
            let (first, second) = self.body_pair_mut(this_entity, other_entity);
            resolve_impulse(first, second, collision.normal);
            handlers::notify_physical(handlers, collision);
        } else {
            handlers::notify_gameplay(handlers, collision);
        }
        true
    }

    /// Mutable access to two different entities' bodies at once.
    fn body_pair_mut(
        &mut self,
        first: EntityId,
        second: EntityId,
    ) -> (Option<&mut RigidBody>, Option<&mut RigidBody>) {
        match (self.body_index(first), self.body_index(second)) {
            (Some(i), Some(j)) if i == j => (self.bodies.get_mut(i), None),
            (Some(i), Some(j)) if i < j => {
                let (left, right) = self.bodies.split_at_mut(j);
                (Some(&mut left[i]), Some(&mut right[0]))
            }
            (Some(i), Some(j)) => {
                let (left, right) = self.bodies.split_at_mut(i);
                (Some(&mut right[0]), Some(&mut left[j]))
            }
            (Some(i), None) => (self.bodies.get_mut(i), None),
            (None, Some(j)) => (None, self.bodies.get_mut(j)),
            (None, None) => (None, None),
        }
    }

    /// Advances every body with a transform by `dt` seconds.
    pub fn integrate(&mut self, dt: f64, provider: &mut dyn TransformProvider) {
        if dt <= 0.0 {
            return;
        }
        for body in &mut self.bodies {
            let Some(transform) = provider.transform(body.entity) else {
                continue;
            };
            let next = integrator::integrate(body, transform.position, dt, &self.config);
            if next != transform.position {
                provider.set_position(body.entity, next);
            }
        }
    }
}

/// Neither side is a trigger and neither masks the other out.
fn is_solid_contact(collision: &Collision) -> bool {
    !collision.this.is_trigger && !collision.other.is_trigger && !collision.is_masked()
}

/// A non-static body wins, `this` first; otherwise any body; otherwise
/// nobody gets the record.
fn pick_recipient(this: &ContactSide, other: &ContactSide) -> Option<Recipient> {
    if !this.is_immovable() {
        Some(Recipient::This)
    } else if !other.is_immovable() {
        Some(Recipient::Other)
    } else if this.body.is_some() {
        Some(Recipient::This)
    } else if other.body.is_some() {
        Some(Recipient::Other)
    } else {
        None
    }
}
