//! Separating-axis test with reference/incident face clipping for convex
//! oriented boxes. Both inputs are already in world space.

use tracing::{trace, warn};

use super::manifold::ContactManifold;
use crate::common::PhysicsConfig;
use crate::math::vec2::Vec2;
use crate::shapes::OrientedBox;

/// Tests `this` against `other`.
///
/// The returned normal is a face normal of the reference shape, oriented
/// from `other` toward `this`. Contacts whose clipped incident face loses a
/// point are reported as no collision.
pub fn check_obb_obb(this: &OrientedBox, other: &OrientedBox, config: &PhysicsConfig) -> Option<ContactManifold> {
    if !this.is_valid() || !other.is_valid() {
        warn!(
            this_vertices = this.vertices().len(),
            other_vertices = other.vertices().len(),
            "skipping oriented box with fewer than 3 vertices"
        );
        return None;
    }

    let (penetration_a, face_a) = find_axis_least_penetration(this, other)?;
    if penetration_a >= 0.0 {
        return None;
    }
    let (penetration_b, face_b) = find_axis_least_penetration(other, this)?;
    if penetration_b >= 0.0 {
        return None;
    }

    let (reference, incident, reference_index, flip) = if biased_greater_than(penetration_a, penetration_b, config) {
        (this, other, face_a, false)
    } else {
        (other, this, face_b, true)
    };

    let mut incident_face = find_incident_face(reference, incident, reference_index)?;

    let count = reference.vertices().len();
    let r1 = reference.vertices()[reference_index];
    let r2 = reference.vertices()[(reference_index + 1) % count];
    let Some(slope) = (r2 - r1).try_normalize() else {
        warn!(reference_index, "degenerate reference face");
        return None;
    };
    let reference_normal = slope.perpendicular();

    let reference_c = reference_normal.dot(r1);
    let neg_side = -slope.dot(r1);
    let pos_side = slope.dot(r2);

    if clip(-slope, neg_side, &mut incident_face) < 2 {
        return None;
    }
    if clip(slope, pos_side, &mut incident_face) < 2 {
        return None;
    }

    let normal = if flip { reference_normal } else { -reference_normal };

    let mut contacts = Vec::with_capacity(2);
    let mut depth = 0.0;
    for point in incident_face {
        let separation = reference_normal.dot(point) - reference_c;
        if separation <= 0.0 {
            contacts.push(point);
            depth += -separation;
        }
    }

    let point = match contacts.as_slice() {
        [] => return None,
        [single] => *single,
        _ => (incident_face[0] + incident_face[1]) * 0.5,
    };
    let penetration = depth / contacts.len() as f64;

    trace!(?normal, penetration, ?point, flip, "oriented box contact");
    Some(ContactManifold::new(point, normal, penetration))
}

/// For every face of `a`, how far the deepest vertex of `b` sits behind it.
/// Returns the least negative (shallowest) distance and its face index.
fn find_axis_least_penetration(a: &OrientedBox, b: &OrientedBox) -> Option<(f64, usize)> {
    let mut best_distance = f64::NEG_INFINITY;
    let mut best_index = 0;

    for (i, (normal, vertex)) in a.normals().iter().zip(a.vertices()).enumerate() {
        let support = b.support(-*normal)?;
        let distance = normal.dot(support - *vertex);
        if distance > best_distance {
            best_distance = distance;
            best_index = i;
        }
    }
    Some((best_distance, best_index))
}

/// Relative plus absolute tolerance so the reference face does not flip
/// between nearly equal candidates from one frame to the next.
fn biased_greater_than(a: f64, b: f64, config: &PhysicsConfig) -> bool {
    a >= b * config.sat_bias_relative + a * config.sat_bias_absolute
}

/// The incident face edge whose normal is most anti-parallel to the
/// reference face normal.
fn find_incident_face(reference: &OrientedBox, incident: &OrientedBox, reference_index: usize) -> Option<[Vec2; 2]> {
    let reference_normal = *reference.normals().get(reference_index)?;

    let incident_index = incident
        .normals()
        .iter()
        .enumerate()
        .fold((0, f64::INFINITY), |(best, min_dot), (i, normal)| {
            let dot = reference_normal.dot(*normal);
            if dot < min_dot {
                (i, dot)
            } else {
                (best, min_dot)
            }
        })
        .0;

    let vertices = incident.vertices();
    Some([
        vertices[incident_index],
        vertices[(incident_index + 1) % vertices.len()],
    ])
}

/// Clips a segment against the half plane `normal . p <= c`. Returns the
/// number of points kept; `face` holds them in its first slots.
fn clip(normal: Vec2, c: f64, face: &mut [Vec2; 2]) -> usize {
    let mut out = [face[0], face[1], face[1]];
    let mut kept = 0;

    let d1 = normal.dot(face[0]) - c;
    let d2 = normal.dot(face[1]) - c;

    if d1 <= 0.0 {
        out[kept] = face[0];
        kept += 1;
    }
    if d2 <= 0.0 {
        out[kept] = face[1];
        kept += 1;
    }
    if d1 * d2 < 0.0 {
        let alpha = d1 / (d1 - d2);
        out[kept] = face[0] + (face[1] - face[0]) * alpha;
        kept += 1;
    }

    face[0] = out[0];
    face[1] = out[1];
    kept
}
