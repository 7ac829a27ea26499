use std::collections::HashMap;

use crate::common::Layer;
use crate::math::transform::Transform;
use crate::math::vec2::Vec2;
use crate::objects::EntityId;

/// Read/write access to the entity transforms the world does not own.
///
/// An entity without a transform is inert: its colliders are skipped and its
/// body is not integrated.
pub trait TransformProvider {
    fn transform(&self, entity: EntityId) -> Option<Transform>;

    /// Moves an entity. Unknown entities are ignored.
    fn set_position(&mut self, entity: EntityId, position: Vec2);

    fn layer(&self, _entity: EntityId) -> Layer {
        Layer::DEFAULT
    }
}

/// In-memory [`TransformProvider`] for tools, tests and simple games.
#[derive(Debug, Clone, Default)]
pub struct TransformMap {
    entries: HashMap<EntityId, (Transform, Layer)>,
}

impl TransformMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a transform, keeping any layer already set.
    pub fn insert(&mut self, entity: EntityId, transform: Transform) {
        self.entries
            .entry(entity)
            .and_modify(|(t, _)| *t = transform)
            .or_insert((transform, Layer::DEFAULT));
    }

    pub fn insert_with_layer(&mut self, entity: EntityId, transform: Transform, layer: Layer) {
        self.entries.insert(entity, (transform, layer));
    }

    /// Sets the layer of a known entity. Returns false for unknown entities.
    pub fn set_layer(&mut self, entity: EntityId, layer: Layer) -> bool {
        match self.entries.get_mut(&entity) {
            Some((_, l)) => {
                *l = layer;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, entity: EntityId) -> Option<Transform> {
        self.entries.remove(&entity).map(|(t, _)| t)
    }

    pub fn position(&self, entity: EntityId) -> Option<Vec2> {
        self.entries.get(&entity).map(|(t, _)| t.position)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl TransformProvider for TransformMap {
    fn transform(&self, entity: EntityId) -> Option<Transform> {
        self.entries.get(&entity).map(|(t, _)| *t)
    }

    fn set_position(&mut self, entity: EntityId, position: Vec2) {
        if let Some((t, _)) = self.entries.get_mut(&entity) {
            t.position = position;
        }
    }

    fn layer(&self, entity: EntityId) -> Layer {
        self.entries.get(&entity).map_or(Layer::DEFAULT, |(_, l)| *l)
    }
}
