use platformer_physics::collision::detection::{check_collision, PlacedShape};
use platformer_physics::objects::rigid_body::resolve_impulse;
use platformer_physics::{
    Collider, ColliderCategory, ColliderShape, Collision, CollisionHandlers, EntityId, Layer, NoopHandlers,
    OrientedBox, PhysicsConfig, PhysicsWorld, RigidBody, Transform, TransformMap, Vec2,
};
use proptest::prelude::*;

const EPSILON: f64 = 1e-9;
const DT: f64 = 1.0 / 60.0;

#[derive(Default)]
struct Score {
    pickups: usize,
    walls: usize,
}

impl CollisionHandlers for Score {
    fn on_pickup(&mut self, collision: &Collision) {
        if collision.involves(ColliderCategory::Collectible) {
            self.pickups += 1;
        }
    }

    fn on_wall(&mut self, _collision: &Collision) {
        self.walls += 1;
    }
}

fn spawn(world: &mut PhysicsWorld, map: &mut TransformMap, collider: Collider, position: Vec2, body: Option<RigidBody>) {
    map.insert(collider.entity, Transform::at(position));
    if let Some(body) = body {
        world.activate_body(body);
    }
    world.activate_collider(collider);
}

#[test]
fn overlapping_circles_separate_in_one_frame() {
    let mut world = PhysicsWorld::new();
    let mut map = TransformMap::new();
    let (a, b) = (EntityId(1), EntityId(2));
    spawn(&mut world, &mut map, Collider::circle(a, 20.0).unwrap(), Vec2::ZERO, Some(RigidBody::new(a)));
    spawn(&mut world, &mut map, Collider::circle(b, 20.0).unwrap(), Vec2::new(30.0, 0.0), Some(RigidBody::new(b)));

    world.begin_frame();
    assert_eq!(world.detect_collisions(&mut map), 1);

    let record = world.body(a).unwrap().collisions()[0];
    assert!((record.penetration - 10.0).abs() < EPSILON);
    assert!((record.point - Vec2::new(15.0, 0.0)).magnitude() < EPSILON);

    // Corrected far enough that the next frame sees no overlap.
    world.begin_frame();
    assert_eq!(world.detect_collisions(&mut map), 0);
}

#[test]
fn equal_boxes_report_five_units_of_penetration() {
    let mut world = PhysicsWorld::new();
    let mut map = TransformMap::new();
    let (a, b) = (EntityId(1), EntityId(2));
    spawn(&mut world, &mut map, Collider::aabb(a, 40.0, 40.0).unwrap(), Vec2::ZERO, Some(RigidBody::new(a)));
    spawn(&mut world, &mut map, Collider::aabb(b, 40.0, 40.0).unwrap(), Vec2::new(35.0, 0.0), None);

    world.begin_frame();
    world.detect_collisions(&mut map);
    let record = world.body(a).unwrap().collisions()[0];
    assert_eq!(record.normal, Vec2::new(1.0, 0.0));
    assert!((record.penetration - 5.0).abs() < EPSILON);
}

#[test]
fn falling_player_lands_on_platform() {
    let mut world = PhysicsWorld::new();
    let mut map = TransformMap::new();
    let (player, platform) = (EntityId(1), EntityId(2));
    spawn(
        &mut world,
        &mut map,
        Collider::aabb(platform, 200.0, 20.0)
            .unwrap()
            .with_category(ColliderCategory::Platform),
        Vec2::ZERO,
        None,
    );
    spawn(
        &mut world,
        &mut map,
        Collider::aabb(player, 20.0, 40.0)
            .unwrap()
            .with_category(ColliderCategory::Player),
        Vec2::new(0.0, 35.0),
        Some(RigidBody::new(player)),
    );

    // First frame: feet exactly at the tolerance edge, so still airborne.
    world.step(DT, &mut map, &mut NoopHandlers);
    assert!(!world.body(player).unwrap().grounded);
    assert!(map.position(player).unwrap().y < 35.0);

    for _ in 0..10 {
        world.step(DT, &mut map, &mut NoopHandlers);
    }
    let body = world.body(player).unwrap();
    assert!(body.grounded);
    assert_eq!(body.velocity.y, 0.0);
    assert!(map.position(player).unwrap().y > 30.0);
}

#[test]
fn pickups_reach_gameplay_handlers_only() {
    let mut world = PhysicsWorld::new();
    let mut map = TransformMap::new();
    let (player, coin, wall) = (EntityId(1), EntityId(2), EntityId(3));
    spawn(
        &mut world,
        &mut map,
        Collider::aabb(player, 20.0, 20.0)
            .unwrap()
            .with_category(ColliderCategory::Player),
        Vec2::ZERO,
        Some(RigidBody::new(player)),
    );
    spawn(
        &mut world,
        &mut map,
        Collider::circle(coin, 5.0)
            .unwrap()
            .with_category(ColliderCategory::Collectible)
            .with_trigger(true),
        Vec2::new(8.0, 0.0),
        None,
    );
    spawn(
        &mut world,
        &mut map,
        Collider::aabb(wall, 20.0, 200.0)
            .unwrap()
            .with_category(ColliderCategory::Wall),
        Vec2::new(-18.0, 0.0),
        Some(RigidBody::new_static(wall)),
    );

    let mut score = Score::default();
    world.body_mut(player).unwrap().set_velocity(Vec2::new(-100.0, 0.0));
    world.step(DT, &mut map, &mut score);

    assert_eq!(score.pickups, 1);
    assert_eq!(score.walls, 1);
    assert_eq!(world.body(wall).unwrap().velocity, Vec2::ZERO);
    assert!(world.body(player).unwrap().velocity.x >= 0.0);
}

#[test]
fn wildcard_and_isolated_layers_never_interact() {
    let mut world = PhysicsWorld::new();
    let mut map = TransformMap::new();
    let (a, b) = (EntityId(1), EntityId(2));
    spawn(&mut world, &mut map, Collider::aabb(a, 20.0, 20.0).unwrap(), Vec2::ZERO, Some(RigidBody::new(a)));
    spawn(&mut world, &mut map, Collider::aabb(b, 20.0, 20.0).unwrap(), Vec2::new(10.0, 0.0), Some(RigidBody::new(b)));
    map.set_layer(a, Layer::WILDCARD);
    map.set_layer(b, Layer::ISOLATED);
    world.body_mut(a).unwrap().set_velocity(Vec2::new(50.0, 0.0));

    let mut score = Score::default();
    world.begin_frame();
    world.detect_collisions(&mut map);
    assert_eq!(world.resolve_collisions(&map, &mut score), 0);
    assert_eq!(score.walls, 0);
    assert_eq!(world.body(a).unwrap().velocity, Vec2::new(50.0, 0.0));
}

#[test]
fn circle_against_oriented_box_is_never_reported() {
    let mut world = PhysicsWorld::new();
    let mut map = TransformMap::new();
    let (a, b) = (EntityId(1), EntityId(2));
    spawn(&mut world, &mut map, Collider::circle(a, 20.0).unwrap(), Vec2::ZERO, Some(RigidBody::new(a)));
    spawn(
        &mut world,
        &mut map,
        Collider::new(b, OrientedBox::rectangle(40.0, 40.0).unwrap()),
        Vec2::new(5.0, 0.0),
        None,
    );

    world.begin_frame();
    assert_eq!(world.detect_collisions(&mut map), 0);
    assert!(world.colliders().iter().all(|c| !c.is_colliding));
}

fn body_with_velocity(entity: u64, velocity: Vec2) -> RigidBody {
    let mut body = RigidBody::new(EntityId(entity));
    body.set_velocity(velocity);
    body
}

prop_compose! {
    fn vec2_in(range: f64)(x in -range..range, y in -range..range) -> Vec2 {
        Vec2::new(x, y)
    }
}

proptest! {
    #[test]
    fn circle_contacts_are_symmetric(
        ra in 1.0f64..50.0,
        rb in 1.0f64..50.0,
        angle in 0.0f64..std::f64::consts::TAU,
        fraction in 0.05f64..0.95,
    ) {
        let a = ColliderShape::from(platformer_physics::Circle::new(ra).unwrap());
        let b = ColliderShape::from(platformer_physics::Circle::new(rb).unwrap());
        let offset = Vec2::new(angle.cos(), angle.sin()) * ((ra + rb) * fraction);
        let pa = PlacedShape::new(&a, Transform::at(Vec2::ZERO));
        let pb = PlacedShape::new(&b, Transform::at(offset));
        let config = PhysicsConfig::default();

        let ab = check_collision(&pa, &pb, &config).unwrap();
        let ba = check_collision(&pb, &pa, &config).unwrap();
        prop_assert!((ab.point - ba.point).magnitude() < 1e-6);
        prop_assert!((ab.normal + ba.normal).magnitude() < 1e-6);
        prop_assert!((ab.penetration - ba.penetration).abs() < 1e-6);
    }

    #[test]
    fn box_contacts_are_symmetric(
        (wa, ha) in (1.0f64..100.0, 1.0f64..100.0),
        (wb, hb) in (1.0f64..100.0, 1.0f64..100.0),
        fx in -0.95f64..0.95,
        fy in -0.95f64..0.95,
    ) {
        prop_assume!(fx.abs() > 1e-3 && fy.abs() > 1e-3);
        let a = ColliderShape::from(platformer_physics::AxisAlignedBox::new(wa, ha).unwrap());
        let b = ColliderShape::from(platformer_physics::AxisAlignedBox::new(wb, hb).unwrap());
        let offset = Vec2::new(fx * (wa + wb) * 0.5, fy * (ha + hb) * 0.5);
        let pa = PlacedShape::new(&a, Transform::at(Vec2::ZERO));
        let pb = PlacedShape::new(&b, Transform::at(offset));
        let config = PhysicsConfig::default();

        let ab = check_collision(&pa, &pb, &config).unwrap();
        let ba = check_collision(&pb, &pa, &config).unwrap();
        prop_assert_eq!(ab.normal, -ba.normal);
        prop_assert!((ab.penetration - ba.penetration).abs() < 1e-9);
        let x_depth = (wa + wb) * 0.5 - offset.x.abs();
        let y_depth = (ha + hb) * 0.5 - offset.y.abs();
        prop_assert!((ab.penetration - x_depth).abs() < 1e-9 || (ab.penetration - y_depth).abs() < 1e-9);
    }

    #[test]
    fn static_bodies_keep_their_velocity(v in vec2_in(500.0), normal_angle in 0.0f64..std::f64::consts::TAU) {
        let normal = Vec2::new(normal_angle.cos(), normal_angle.sin());
        let mut mover = body_with_velocity(1, v);
        let mut wall = RigidBody::new_static(EntityId(2));
        resolve_impulse(Some(&mut mover), Some(&mut wall), normal);
        prop_assert_eq!(wall.velocity, Vec2::ZERO);

        let mut anchor = RigidBody::new_static(EntityId(3));
        anchor.set_velocity(Vec2::new(1.0, 1.0));
        let mut other = RigidBody::new_static(EntityId(4));
        prop_assert!(resolve_impulse(Some(&mut anchor), Some(&mut other), normal).is_none());
        prop_assert_eq!(anchor.velocity, Vec2::new(1.0, 1.0));
    }

    #[test]
    fn separating_contacts_are_left_alone(
        v1 in vec2_in(500.0),
        v2 in vec2_in(500.0),
        normal_angle in 0.0f64..std::f64::consts::TAU,
    ) {
        let normal = Vec2::new(normal_angle.cos(), normal_angle.sin());
        prop_assume!((v2 - v1).dot(normal) > 0.0);
        let mut first = body_with_velocity(1, v1);
        let mut second = body_with_velocity(2, v2);
        prop_assert!(resolve_impulse(Some(&mut first), Some(&mut second), normal).is_none());
        prop_assert_eq!(first.velocity, v1);
        prop_assert_eq!(second.velocity, v2);
    }

    #[test]
    fn approaching_contacts_stop_closing(
        v1 in vec2_in(500.0),
        v2 in vec2_in(500.0),
        normal_angle in 0.0f64..std::f64::consts::TAU,
    ) {
        let normal = Vec2::new(normal_angle.cos(), normal_angle.sin());
        prop_assume!((v2 - v1).dot(normal) < -1e-6);
        let mut first = body_with_velocity(1, v1);
        let mut second = body_with_velocity(2, v2);
        prop_assert!(resolve_impulse(Some(&mut first), Some(&mut second), normal).is_some());
        prop_assert!((second.velocity - first.velocity).dot(normal).abs() < 1e-6);
    }
}
