use tracing::warn;

use crate::common::error::{PhysicsError, Result};
use crate::math::transform::Transform;
use crate::math::vec2::Vec2;

/// A convex polygon in its owner's local space.
///
/// Vertices are wound clockwise (with +y up), so `edge.perpendicular()` is the
/// outward normal of every edge. `normals[i]` belongs to the edge from
/// `vertices[i]` to `vertices[i + 1]` and is recomputed after every edit.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OrientedBox {
    vertices: Vec<Vec2>,
    normals: Vec<Vec2>,
}

impl OrientedBox {
    /// Builds a polygon from clockwise vertices.
    ///
    /// Fewer than 3 vertices cannot enclose an area and are rejected.
    pub fn new(vertices: Vec<Vec2>) -> Result<Self> {
        if vertices.len() < 3 {
            return Err(PhysicsError::InvalidShape(format!(
                "oriented box needs at least 3 vertices, got {}",
                vertices.len()
            )));
        }
        if let Some(bad) = vertices.iter().find(|v| !v.is_finite()) {
            return Err(PhysicsError::InvalidShape(format!(
                "oriented box vertex {bad:?} is not finite"
            )));
        }
        let mut shape = Self {
            vertices,
            normals: Vec::new(),
        };
        shape.recompute_normals();
        Ok(shape)
    }

    /// A `width` x `height` rectangle centered on the local origin.
    pub fn rectangle(width: f64, height: f64) -> Result<Self> {
        if !(width.is_finite() && width > 0.0 && height.is_finite() && height > 0.0) {
            return Err(PhysicsError::InvalidShape(format!(
                "rectangle dimensions must be positive, got {width}x{height}"
            )));
        }
        let hw = width * 0.5;
        let hh = height * 0.5;
        Self::new(vec![
            Vec2::new(-hw, hh),
            Vec2::new(hw, hh),
            Vec2::new(hw, -hh),
            Vec2::new(-hw, -hh),
        ])
    }

    pub fn vertices(&self) -> &[Vec2] {
        &self.vertices
    }

    pub fn normals(&self) -> &[Vec2] {
        &self.normals
    }

    /// True once the polygon has enough vertices to take part in a test.
    pub fn is_valid(&self) -> bool {
        self.vertices.len() >= 3
    }

    pub fn add_point(&mut self, point: Vec2) {
        self.vertices.push(point);
        self.recompute_normals();
    }

    pub fn add_points(&mut self, points: impl IntoIterator<Item = Vec2>) {
        self.vertices.extend(points);
        self.recompute_normals();
    }

    /// Removes the vertex at `index`, if there is one.
    pub fn remove_point_at(&mut self, index: usize) -> Option<Vec2> {
        if index >= self.vertices.len() {
            return None;
        }
        let removed = self.vertices.remove(index);
        self.recompute_normals();
        Some(removed)
    }

    /// Removes the first vertex equal to `point`.
    pub fn remove_point(&mut self, point: Vec2) -> bool {
        match self.vertices.iter().position(|v| *v == point) {
            Some(index) => self.remove_point_at(index).is_some(),
            None => false,
        }
    }

    pub fn set_vertices(&mut self, vertices: Vec<Vec2>) {
        self.vertices = vertices;
        self.recompute_normals();
    }

    /// The polygon mapped into world space with normals rebuilt from the
    /// mapped edges, so non-uniform scale keeps them perpendicular.
    pub fn to_world(&self, transform: &Transform) -> OrientedBox {
        let mut world = OrientedBox {
            vertices: self.vertices.iter().map(|v| transform.apply(*v)).collect(),
            normals: Vec::with_capacity(self.normals.len()),
        };
        world.recompute_normals();
        world
    }

    /// The vertex furthest along `direction`.
    pub fn support(&self, direction: Vec2) -> Option<Vec2> {
        self.vertices
            .iter()
            .copied()
            .max_by(|a, b| a.dot(direction).total_cmp(&b.dot(direction)))
    }

    fn recompute_normals(&mut self) {
        self.normals.clear();
        let n = self.vertices.len();
        if n < 2 {
            return;
        }
        for i in 0..n {
            let edge = self.vertices[(i + 1) % n] - self.vertices[i];
            match edge.perpendicular().try_normalize() {
                Some(normal) => self.normals.push(normal),
                None => {
                    warn!(index = i, "zero-length oriented box edge");
                    self.normals.push(Vec2::ZERO);
                }
            }
        }
    }
}
