//! Flat records for saving colliders and bodies in scene files.
//!
//! Field names are part of the scene format and must not change. Entity
//! handles are not stored; the loader supplies them.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::common::{Material, PhysicsError, Result};
use crate::math::vec2::Vec2;
use crate::objects::{BodyKind, Collider, ColliderCategory, EntityId, RigidBody};
use crate::shapes::{AxisAlignedBox, Circle, ColliderShape, OrientedBox, ShapeKind};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColliderRecord {
    #[serde(rename = "cType")]
    pub kind: i32,
    #[serde(rename = "cProperties")]
    pub category: i32,
    #[serde(rename = "isColliding", default)]
    pub is_colliding: bool,
    #[serde(rename = "isTrigger", default)]
    pub is_trigger: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default)]
    pub offset_x: f64,
    #[serde(default)]
    pub offset_y: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub vertices: Vec<Vec2>,
    /// Written for inspection only; normals are recomputed on load.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub normals: Vec<Vec2>,
}

impl ColliderRecord {
    pub fn from_collider(collider: &Collider) -> Self {
        let mut record = Self {
            kind: collider.kind().as_i32(),
            category: collider.category.as_i32(),
            is_colliding: collider.is_colliding,
            is_trigger: collider.is_trigger,
            radius: None,
            width: None,
            height: None,
            offset_x: collider.offset.x,
            offset_y: collider.offset.y,
            vertices: Vec::new(),
            normals: Vec::new(),
        };
        match &collider.shape {
            ColliderShape::Circle(c) => record.radius = Some(c.radius),
            ColliderShape::AxisAlignedBox(b) => {
                record.width = Some(b.width);
                record.height = Some(b.height);
            }
            ColliderShape::OrientedBox(o) => {
                record.vertices = o.vertices().to_vec();
                record.normals = o.normals().to_vec();
            }
        }
        record
    }

    /// Rebuilds a collider for `entity`, validating every field.
    pub fn to_collider(&self, entity: EntityId) -> Result<Collider> {
        let kind = ShapeKind::try_from(self.kind)?;
        let category = ColliderCategory::try_from(self.category)?;

        let shape = match kind {
            ShapeKind::Circle => {
                let radius = self
                    .radius
                    .ok_or_else(|| PhysicsError::MalformedRecord("circle record without `radius`".into()))?;
                ColliderShape::from(Circle::new(radius)?)
            }
            ShapeKind::AxisAlignedBox => match (self.width, self.height) {
                (Some(w), Some(h)) => ColliderShape::from(AxisAlignedBox::new(w, h)?),
                _ => {
                    return Err(PhysicsError::MalformedRecord(
                        "box record without `width` and `height`".into(),
                    ))
                }
            },
            ShapeKind::OrientedBox => ColliderShape::from(OrientedBox::new(self.vertices.clone())?),
        };

        let offset = Vec2::new(self.offset_x, self.offset_y);
        if !offset.is_finite() {
            return Err(PhysicsError::MalformedRecord(format!("non-finite offset {offset:?}")));
        }

        let mut collider = Collider::new(entity, shape)
            .with_category(category)
            .with_trigger(self.is_trigger)
            .with_offset(offset);
        collider.is_colliding = self.is_colliding;
        Ok(collider)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyRecord {
    #[serde(rename = "bodyType")]
    pub kind: i32,
    pub friction: f64,
    /// Gravity multiplier.
    pub gravity: f64,
    pub mass: f64,
    /// Derived from `mass` on load.
    pub imass: f64,
    pub drag: f64,
    #[serde(rename = "hasGravity")]
    pub has_gravity: bool,
    #[serde(rename = "resolveCollisions")]
    pub resolve_collisions: bool,
}

impl BodyRecord {
    pub fn from_body(body: &RigidBody) -> Self {
        Self {
            kind: body.kind().as_i32(),
            friction: body.material.friction,
            gravity: body.gravity_multiplier,
            mass: body.mass(),
            imass: body.inv_mass(),
            drag: body.material.drag,
            has_gravity: body.has_gravity,
            resolve_collisions: body.resolve_collisions,
        }
    }

    pub fn to_body(&self, entity: EntityId) -> Result<RigidBody> {
        let kind = BodyKind::try_from(self.kind)?;
        for (name, value) in [
            ("friction", self.friction),
            ("gravity", self.gravity),
            ("mass", self.mass),
            ("drag", self.drag),
        ] {
            if !value.is_finite() {
                return Err(PhysicsError::MalformedRecord(format!("non-finite `{name}`")));
            }
        }
        if self.mass < 0.0 {
            return Err(PhysicsError::MalformedRecord(format!("negative mass {}", self.mass)));
        }

        let mut body = RigidBody::with_kind(entity, kind);
        body.set_mass(self.mass);
        body.material = Material::new(self.drag, self.friction);
        body.gravity_multiplier = self.gravity;
        body.has_gravity = self.has_gravity;
        body.resolve_collisions = self.resolve_collisions;

        if (body.inv_mass() - self.imass).abs() > 1e-6 {
            debug!(%entity, stored = self.imass, derived = body.inv_mass(), "ignoring stored inverse mass");
        }
        Ok(body)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_box_collider_keeps_scene_field_names() {
        let collider = Collider::aabb(EntityId(3), 30.0, 10.0)
            .unwrap()
            .with_category(ColliderCategory::Platform)
            .with_offset(Vec2::new(0.0, -5.0));
        let json = ColliderRecord::from_collider(&collider).to_json().unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["cType"], 1);
        assert_eq!(value["cProperties"], 2);
        assert_eq!(value["isTrigger"], false);
        assert_eq!(value["width"], 30.0);
        assert_eq!(value["offset_y"], -5.0);
        assert!(value.get("radius").is_none());

        let loaded = ColliderRecord::from_json(&json).unwrap().to_collider(EntityId(3)).unwrap();
        assert_eq!(loaded, collider);
    }

    #[test]
    fn test_oriented_box_normals_are_recomputed() {
        let mut record = ColliderRecord::from_collider(
            &Collider::new(EntityId(1), OrientedBox::rectangle(2.0, 2.0).unwrap()),
        );
        record.normals = vec![Vec2::ZERO; 4];
        let collider = record.to_collider(EntityId(1)).unwrap();
        let ColliderShape::OrientedBox(obb) = &collider.shape else {
            panic!("expected an oriented box");
        };
        for n in obb.normals() {
            assert!((n.magnitude() - 1.0).abs() < EPSILON);
        }
    }

    #[test]
    fn test_collider_record_errors() {
        let json = r#"{"cType": 2, "cProperties": 0}"#;
        let record = ColliderRecord::from_json(json).unwrap();
        assert!(matches!(
            record.to_collider(EntityId(1)),
            Err(PhysicsError::MalformedRecord(_))
        ));

        let json = r#"{"cType": 7, "cProperties": 0, "radius": 3.0}"#;
        let record = ColliderRecord::from_json(json).unwrap();
        assert!(matches!(
            record.to_collider(EntityId(1)),
            Err(PhysicsError::UnknownColliderKind(7))
        ));

        let json = r#"{"cType": 2, "cProperties": 8, "radius": 3.0}"#;
        let record = ColliderRecord::from_json(json).unwrap();
        assert!(matches!(
            record.to_collider(EntityId(1)),
            Err(PhysicsError::UnknownCategory(8))
        ));

        assert!(matches!(
            ColliderRecord::from_json("{not json"),
            Err(PhysicsError::Serde(_))
        ));
    }

    #[test]
    fn test_body_record_round_trip() {
        let mut body = RigidBody::new(EntityId(4));
        body.set_mass(4.0);
        body.has_gravity = false;
        body.material = Material::new(0.5, 0.25);

        let record = BodyRecord::from_body(&body);
        assert!((record.imass - 0.25).abs() < EPSILON);
        let json = record.to_json().unwrap();
        assert!(json.contains("\"bodyType\":0"));
        assert!(json.contains("\"resolveCollisions\":true"));

        let loaded = BodyRecord::from_json(&json).unwrap().to_body(EntityId(4)).unwrap();
        assert_eq!(loaded, body);
    }

    #[test]
    fn test_static_body_record_has_zero_mass() {
        let record = BodyRecord::from_body(&RigidBody::new_static(EntityId(1)));
        assert_eq!(record.kind, 2);
        assert_eq!(record.mass, 0.0);
        assert_eq!(record.imass, 0.0);

        let mut bad = record.clone();
        bad.kind = 5;
        assert!(matches!(bad.to_body(EntityId(1)), Err(PhysicsError::UnknownBodyKind(5))));

        let mut negative = record;
        negative.kind = 0;
        negative.mass = -1.0;
        assert!(matches!(
            negative.to_body(EntityId(1)),
            Err(PhysicsError::MalformedRecord(_))
        ));
    }
}
