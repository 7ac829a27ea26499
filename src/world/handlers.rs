use crate::collision::event::Collision;

/// Gameplay reactions to resolved collisions.
///
/// Every method defaults to doing nothing, so implementors only override the
/// reactions they care about. The core never interprets their effects.
pub trait CollisionHandlers {
    // Physically resolved contacts.
    fn on_wall(&mut self, _collision: &Collision) {}
    fn on_instant_death(&mut self, _collision: &Collision) {}

    // Trigger, masked and layer-excluded contacts.
    fn on_player(&mut self, _collision: &Collision) {}
    fn on_pickup(&mut self, _collision: &Collision) {}
    fn on_checkpoint(&mut self, _collision: &Collision) {}
    fn on_trigger_box(&mut self, _collision: &Collision) {}
    fn on_hostile(&mut self, _collision: &Collision) {}
    fn on_camera_switch(&mut self, _collision: &Collision) {}
    fn on_level_end(&mut self, _collision: &Collision) {}
}

/// Ignores every collision.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHandlers;

impl CollisionHandlers for NoopHandlers {}

#[cfg(test)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandlerKind {
    Wall,
    InstantDeath,
    Player,
    Pickup,
    Checkpoint,
    TriggerBox,
    Hostile,
    CameraSwitch,
    LevelEnd,
}

/// Records every invocation in order.
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct RecordingHandlers {
    pub calls: Vec<(HandlerKind, Collision)>,
}

#[cfg(test)]
impl RecordingHandlers {
    pub fn count(&self, kind: HandlerKind) -> usize {
        self.calls.iter().filter(|(k, _)| *k == kind).count()
    }
}

#[cfg(test)]
impl CollisionHandlers for RecordingHandlers {
    fn on_wall(&mut self, c: &Collision) {
        self.calls.push((HandlerKind::Wall, *c));
    }
    fn on_instant_death(&mut self, c: &Collision) {
        self.calls.push((HandlerKind::InstantDeath, *c));
    }
    fn on_player(&mut self, c: &Collision) {
        self.calls.push((HandlerKind::Player, *c));
    }
    fn on_pickup(&mut self, c: &Collision) {
        self.calls.push((HandlerKind::Pickup, *c));
    }
    fn on_checkpoint(&mut self, c: &Collision) {
        self.calls.push((HandlerKind::Checkpoint, *c));
    }
    fn on_trigger_box(&mut self, c: &Collision) {
        self.calls.push((HandlerKind::TriggerBox, *c));
    }
    fn on_hostile(&mut self, c: &Collision) {
        self.calls.push((HandlerKind::Hostile, *c));
    }
    fn on_camera_switch(&mut self, c: &Collision) {
        self.calls.push((HandlerKind::CameraSwitch, *c));
    }
    fn on_level_end(&mut self, c: &Collision) {
        self.calls.push((HandlerKind::LevelEnd, *c));
    }
}

/// Reactions that follow an impulse.
pub(crate) fn notify_physical(handlers: &mut dyn CollisionHandlers, collision: &Collision) {
    handlers.on_wall(collision);
    handlers.on_instant_death(collision);
}

/// Reactions for contacts that were not physically resolved.
pub(crate) fn notify_gameplay(handlers: &mut dyn CollisionHandlers, collision: &Collision) {
    handlers.on_player(collision);
    handlers.on_pickup(collision);
    handlers.on_checkpoint(collision);
    handlers.on_trigger_box(collision);
    handlers.on_hostile(collision);
    handlers.on_camera_switch(collision);
    handlers.on_level_end(collision);
}
