use crate::common::PhysicsConfig;
use crate::math::vec2::Vec2;
use crate::objects::rigid_body::RigidBody;

/// Advances one body by `dt` and returns its new position.
///
/// Order: gravity (or landing), near-zero snap, horizontal drag then
/// friction, per-axis clamp, explicit Euler position step. Velocity-locked
/// bodies are returned unchanged.
pub fn integrate(body: &mut RigidBody, position: Vec2, dt: f64, config: &PhysicsConfig) -> Vec2 {
    if body.velocity_locked {
        return position;
    }

    if body.has_gravity {
        if !body.grounded && !body.is_static() {
            body.velocity.y -= config.gravity * body.gravity_multiplier * dt;
        } else if body.grounded && body.velocity.y < 0.0 {
            body.velocity.y = 0.0;
        }
    }

    if body.velocity.x.abs() < config.velocity_snap.x {
        body.velocity.x = 0.0;
    }
    if body.velocity.y.abs() < config.velocity_snap.y {
        body.velocity.y = 0.0;
    }

    body.velocity.x *= 1.0 - dt * body.material.drag;
    if body.velocity.x != 0.0 {
        body.velocity.x *= 1.0 - body.material.friction * dt;
    }

    body.velocity.x = body.velocity.x.clamp(-body.max_velocity.x, body.max_velocity.x);
    body.velocity.y = body.velocity.y.clamp(-body.max_velocity.y, body.max_velocity.y);

    position + body.velocity * dt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objects::EntityId;
    const EPSILON: f64 = 1e-9;

    fn config() -> PhysicsConfig {
        PhysicsConfig::default()
    }

    #[test]
    fn test_integrate_gravity_when_airborne() {
        let mut rb = RigidBody::new(EntityId(1));
        let dt = 0.01;
        let pos = integrate(&mut rb, Vec2::ZERO, dt, &config());
        // 9.8 * 100 * 0.01
        assert!((rb.velocity.y + 9.8).abs() < EPSILON);
        assert!((pos.y + 0.098).abs() < EPSILON);
        assert_eq!(pos.x, 0.0);
    }

    #[test]
    fn test_integrate_grounded_cancels_fall() {
        let mut rb = RigidBody::new(EntityId(1));
        rb.grounded = true;
        rb.velocity = Vec2::new(0.0, -200.0);
        let pos = integrate(&mut rb, Vec2::new(3.0, 4.0), 0.1, &config());
        assert_eq!(rb.velocity.y, 0.0);
        assert_eq!(pos, Vec2::new(3.0, 4.0));
    }

    #[test]
    fn test_integrate_grounded_keeps_jump() {
        let mut rb = RigidBody::new(EntityId(1));
        rb.grounded = true;
        rb.velocity = Vec2::new(0.0, 300.0);
        integrate(&mut rb, Vec2::ZERO, 0.1, &config());
        assert_eq!(rb.velocity.y, 300.0);
    }

    #[test]
    fn test_integrate_snaps_slow_components() {
        let mut rb = RigidBody::new(EntityId(1));
        rb.has_gravity = false;
        rb.velocity = Vec2::new(24.0, 0.4);
        let pos = integrate(&mut rb, Vec2::ZERO, 0.1, &config());
        assert_eq!(rb.velocity, Vec2::ZERO);
        assert_eq!(pos, Vec2::ZERO);
    }

    #[test]
    fn test_integrate_drag_then_friction_on_x_only() {
        let mut rb = RigidBody::new(EntityId(1));
        rb.has_gravity = false;
        rb.velocity = Vec2::new(100.0, 100.0);
        let dt = 0.1;
        integrate(&mut rb, Vec2::ZERO, dt, &config());
        let expected_x = 100.0 * (1.0 - dt * 0.9) * (1.0 - 0.9 * dt);
        assert!((rb.velocity.x - expected_x).abs() < EPSILON);
        assert_eq!(rb.velocity.y, 100.0);
    }

    #[test]
    fn test_integrate_clamps_to_max_velocity() {
        let mut rb = RigidBody::new(EntityId(1));
        rb.has_gravity = false;
        rb.material.drag = 0.0;
        rb.material.friction = 0.0;
        rb.velocity = Vec2::new(-5000.0, 9000.0);
        integrate(&mut rb, Vec2::ZERO, 0.01, &config());
        assert_eq!(rb.velocity, Vec2::new(-1000.0, 4000.0));
    }

    #[test]
    fn test_integrate_static_object_ignores_gravity() {
        let mut rb = RigidBody::new_static(EntityId(1));
        let pos = integrate(&mut rb, Vec2::new(1.0, 1.0), 0.1, &config());
        assert_eq!(rb.velocity, Vec2::ZERO);
        assert_eq!(pos, Vec2::new(1.0, 1.0));
    }

    #[test]
    fn test_integrate_velocity_locked_is_untouched() {
        let mut rb = RigidBody::new(EntityId(1));
        rb.velocity_locked = true;
        rb.velocity = Vec2::new(500.0, 0.0);
        let initial = rb.clone();
        let pos = integrate(&mut rb, Vec2::new(2.0, 2.0), 0.1, &config());
        assert_eq!(rb, initial);
        assert_eq!(pos, Vec2::new(2.0, 2.0));
    }
}
