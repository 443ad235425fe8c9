//! Projectiles plugin tests (Bevy 0.18 + Avian 0.5), **deterministic**.
//!
//! These tests never step the physics pipeline. Velocities and masses are written by hand,
//! intent is injected as messages, and each system is run once.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::layers::{inert_layers, live_layers, Layer};
use crate::common::lifecycle::{DespawnTimer, PendingDespawn};
use crate::common::test_utils::{ensure_messages, fixed_time_with_delta, read_messages, run_system_once};
use crate::common::tunables::{FlightTunables, Tunables};
use crate::plugins::destructibles::{BlockShape, Destructible, DestructibleDestroyed, Material};
use crate::plugins::targets::{Target, TargetDied, TargetSize};

use super::ability::{self, explosion_impulse};
use super::components::{FlightWatchdog, Projectile, ProjectileState, ProjectileVariant};
use super::flight::{self, should_land};
use super::launch;
use super::messages::{
    LaunchRequest, ProjectileDestroyed, ProjectileLanded, ProjectileLaunched, UseAbility,
};
use super::spawn::spawn_queued_projectile;

// --------------------------------------------------------------------------------------
// Helpers
// --------------------------------------------------------------------------------------

fn test_world() -> World {
    let mut world = World::new();
    world.insert_resource(Tunables::default());
    world.insert_resource(fixed_time_with_delta(1.0 / 64.0));
    ensure_messages::<LaunchRequest>(&mut world);
    ensure_messages::<UseAbility>(&mut world);
    ensure_messages::<ProjectileLaunched>(&mut world);
    ensure_messages::<ProjectileLanded>(&mut world);
    ensure_messages::<ProjectileDestroyed>(&mut world);
    ensure_messages::<DestructibleDestroyed>(&mut world);
    ensure_messages::<TargetDied>(&mut world);
    world
}

fn spawn_parked(world: &mut World, variant: ProjectileVariant) -> Entity {
    run_system_once(world, move |mut commands: Commands| {
        spawn_queued_projectile(&mut commands, variant, Vec2::new(100.0, 80.0), 0)
    })
}

/// Spawn + launch through the real consumer.
fn spawn_flying(world: &mut World, variant: ProjectileVariant, velocity: Vec2) -> Entity {
    let e = spawn_parked(world, variant);
    world.write_message(LaunchRequest { projectile: e, velocity });
    run_system_once(world, launch::apply_launch_requests);
    e
}

fn state_of(world: &World, e: Entity) -> ProjectileState {
    *world.get::<ProjectileState>(e).unwrap()
}

// --------------------------------------------------------------------------------------
// Spawning
// --------------------------------------------------------------------------------------

#[test]
fn queued_projectile_is_parked_inert() {
    let mut world = test_world();
    let e = spawn_parked(&mut world, ProjectileVariant::Explosive);

    assert_eq!(state_of(&world, e), ProjectileState::Idle);
    assert_eq!(*world.get::<Visibility>(e).unwrap(), Visibility::Hidden);
    assert!(matches!(world.get::<RigidBody>(e), Some(RigidBody::Static)));

    let layers = world.get::<CollisionLayers>(e).unwrap();
    assert!(layers.memberships.has_all(Layer::Projectile));
    assert!(!layers.filters.has_all(Layer::Structure));
    assert!(!layers.filters.has_all(Layer::Ground));
}

#[test]
fn unknown_variant_id_is_standard() {
    assert_eq!(ProjectileVariant::from_id("laser"), ProjectileVariant::Standard);
    assert_eq!(ProjectileVariant::from_id("explosive"), ProjectileVariant::Explosive);
}

// --------------------------------------------------------------------------------------
// Launch
// --------------------------------------------------------------------------------------

#[test]
fn launch_is_accepted_only_from_idle() {
    let mut world = test_world();
    let v = Vec2::new(900.0, 450.0);
    let e = spawn_flying(&mut world, ProjectileVariant::Standard, v);

    assert_eq!(state_of(&world, e), ProjectileState::Flying);
    assert!(matches!(world.get::<RigidBody>(e), Some(RigidBody::Dynamic)));
    assert_eq!(world.get::<LinearVelocity>(e).unwrap().0, v);
    assert_eq!(world.get::<AngularVelocity>(e).unwrap().0, Tunables::default().launcher.spin);
    assert!(world.get::<FlightWatchdog>(e).is_some());

    // A second request is dropped and does not touch the velocity.
    world.write_message(LaunchRequest { projectile: e, velocity: Vec2::ZERO });
    run_system_once(&mut world, launch::apply_launch_requests);

    assert_eq!(world.get::<LinearVelocity>(e).unwrap().0, v);
    assert_eq!(
        read_messages::<ProjectileLaunched>(&mut world),
        vec![ProjectileLaunched { projectile: e }]
    );
}

#[test]
fn launch_request_for_missing_projectile_is_ignored() {
    let mut world = test_world();
    let ghost = world.spawn_empty().id();
    world.despawn(ghost);

    world.write_message(LaunchRequest { projectile: ghost, velocity: Vec2::X });
    run_system_once(&mut world, launch::apply_launch_requests);

    assert!(read_messages::<ProjectileLaunched>(&mut world).is_empty());
}

#[test]
fn state_machine_has_no_back_edges() {
    let mut s = ProjectileState::Idle;
    assert!(!s.land());
    assert!(s.launch());
    assert!(!s.launch());
    assert!(s.land());
    assert!(!s.land());
    assert!(!s.launch());
    assert!(s.destroy());
    assert!(!s.destroy());
    assert_eq!(s, ProjectileState::Destroyed);
}

// --------------------------------------------------------------------------------------
// Flight / landing
// --------------------------------------------------------------------------------------

#[test]
fn landing_predicate_uses_both_thresholds() {
    let cfg = FlightTunables::default();

    assert!(should_land(cfg.rest_speed - 1.0, 0.1, &cfg));
    assert!(!should_land(cfg.rest_speed + 1.0, 0.1, &cfg));

    // Relaxed threshold only applies after the mid-flight delay.
    let slowish = (cfg.rest_speed + cfg.relaxed_speed) * 0.5;
    assert!(!should_land(slowish, cfg.relaxed_after_secs - 0.1, &cfg));
    assert!(should_land(slowish, cfg.relaxed_after_secs + 0.1, &cfg));
    assert!(!should_land(cfg.relaxed_speed + 1.0, cfg.relaxed_after_secs + 0.1, &cfg));
}

#[test]
fn slow_projectile_lands_exactly_once() {
    let mut world = test_world();
    let e = spawn_flying(&mut world, ProjectileVariant::Standard, Vec2::new(5.0, 0.0));

    run_system_once(&mut world, flight::update_flight);
    run_system_once(&mut world, flight::update_flight);

    assert_eq!(state_of(&world, e), ProjectileState::Landed);
    assert!(world.get::<FlightWatchdog>(e).is_none());
    assert!(world.get::<DespawnTimer>(e).is_some());
    assert_eq!(
        read_messages::<ProjectileLanded>(&mut world),
        vec![ProjectileLanded { projectile: e }]
    );
}

#[test]
fn fast_projectile_keeps_flying_and_records_trail() {
    let mut world = test_world();
    let e = spawn_flying(&mut world, ProjectileVariant::Standard, Vec2::new(600.0, 600.0));

    for _ in 0..30 {
        run_system_once(&mut world, flight::update_flight);
    }

    assert_eq!(state_of(&world, e), ProjectileState::Flying);

    let trail = world.get::<super::components::Trail>(e).unwrap();
    assert_eq!(trail.len(), Tunables::default().flight.trail_len);

    // Heading follows the velocity (45 degrees).
    let (_, angle) = world.get::<Transform>(e).unwrap().rotation.to_axis_angle();
    assert!((angle - std::f32::consts::FRAC_PI_4).abs() < 1e-4);

    let secs = world.get::<Projectile>(e).unwrap().flight_secs;
    assert!((secs - 30.0 / 64.0).abs() < 1e-4);
}

#[test]
fn watchdog_forces_landing_regardless_of_speed() {
    let mut world = test_world();
    let e = spawn_flying(&mut world, ProjectileVariant::Standard, Vec2::new(800.0, 0.0));

    let watchdog_secs = Tunables::default().flight.watchdog_secs;
    world.insert_resource(fixed_time_with_delta(watchdog_secs + 0.1));
    run_system_once(&mut world, flight::tick_flight_watchdogs);

    assert_eq!(state_of(&world, e), ProjectileState::Landed);
    assert!(world.get::<FlightWatchdog>(e).is_none());
    assert_eq!(read_messages::<ProjectileLanded>(&mut world).len(), 1);
}

#[test]
fn pending_despawn_marks_destroyed_once() {
    let mut world = test_world();
    let e = spawn_flying(&mut world, ProjectileVariant::Standard, Vec2::new(5.0, 0.0));
    run_system_once(&mut world, flight::update_flight);

    world.entity_mut(e).insert(PendingDespawn);
    run_system_once(&mut world, flight::mark_destroyed);
    run_system_once(&mut world, flight::mark_destroyed);

    assert_eq!(state_of(&world, e), ProjectileState::Destroyed);
    assert_eq!(read_messages::<ProjectileDestroyed>(&mut world).len(), 1);
}

// --------------------------------------------------------------------------------------
// Abilities
// --------------------------------------------------------------------------------------

#[test]
fn explosion_impulse_falls_off_linearly() {
    let center = Vec2::new(500.0, 100.0);

    let near = explosion_impulse(center, center + Vec2::new(30.0, 0.0), 150.0, 3000.0).unwrap();
    assert!((near - Vec2::new(2400.0, 0.0)).length() < 1e-3);

    let mid = explosion_impulse(center, center + Vec2::new(0.0, -75.0), 150.0, 3000.0).unwrap();
    assert!((mid - Vec2::new(0.0, -1500.0)).length() < 1e-3);

    assert_eq!(explosion_impulse(center, center + Vec2::new(150.0, 0.0), 150.0, 3000.0), None);
    assert_eq!(explosion_impulse(center, center, 150.0, 3000.0), Some(Vec2::ZERO));
}

#[test]
fn accelerant_boosts_once() {
    let mut world = test_world();
    let e = spawn_flying(&mut world, ProjectileVariant::Accelerant, Vec2::new(300.0, 100.0));

    world.write_message(UseAbility { projectile: e });
    run_system_once(&mut world, ability::activate_abilities);
    world.write_message(UseAbility { projectile: e });
    run_system_once(&mut world, ability::activate_abilities);

    // Both requests are buffered for the second run's fresh reader; only the first counts.
    assert_eq!(world.get::<LinearVelocity>(e).unwrap().0, Vec2::new(600.0, 200.0));
    assert!(world.get::<Projectile>(e).unwrap().ability_used());
}

#[test]
fn ability_is_rejected_before_launch() {
    let mut world = test_world();
    let e = spawn_parked(&mut world, ProjectileVariant::Accelerant);

    world.write_message(UseAbility { projectile: e });
    run_system_once(&mut world, ability::activate_abilities);

    assert!(!world.get::<Projectile>(e).unwrap().ability_used());
}

#[test]
fn standard_projectile_consumes_flag_without_effect() {
    let mut world = test_world();
    let v = Vec2::new(300.0, 100.0);
    let e = spawn_flying(&mut world, ProjectileVariant::Standard, v);

    world.write_message(UseAbility { projectile: e });
    run_system_once(&mut world, ability::activate_abilities);

    assert!(world.get::<Projectile>(e).unwrap().ability_used());
    assert_eq!(world.get::<LinearVelocity>(e).unwrap().0, v);
}

#[test]
fn explosive_with_nothing_nearby_only_consumes_flag() {
    let mut world = test_world();
    let e = spawn_flying(&mut world, ProjectileVariant::Explosive, Vec2::new(300.0, 0.0));
    world.get_mut::<Transform>(e).unwrap().translation = Vec3::new(200.0, 300.0, 0.0);

    // Far outside the blast radius.
    let far_block = world
        .spawn((
            Destructible::new(Material::Soft, BlockShape::Square),
            Transform::from_xyz(1000.0, 80.0, 0.0),
            RigidBody::Dynamic,
            LinearVelocity::ZERO,
            ComputedMass::new(5.0),
        ))
        .id();

    world.write_message(UseAbility { projectile: e });
    run_system_once(&mut world, ability::activate_abilities);

    assert!(world.get::<Projectile>(e).unwrap().ability_used());
    assert_eq!(world.get::<Destructible>(far_block).unwrap().health(), 100.0);
    assert_eq!(world.get::<LinearVelocity>(far_block).unwrap().0, Vec2::ZERO);
    assert!(read_messages::<DestructibleDestroyed>(&mut world).is_empty());
}

#[test]
fn explosive_pushes_and_damages_bodies_in_radius() {
    let mut world = test_world();
    let e = spawn_flying(&mut world, ProjectileVariant::Explosive, Vec2::new(300.0, 0.0));
    world.get_mut::<Transform>(e).unwrap().translation = Vec3::new(500.0, 100.0, 0.0);

    let block = world
        .spawn((
            Destructible::new(Material::Fragile, BlockShape::Square),
            Transform::from_xyz(560.0, 100.0, 0.0),
            RigidBody::Dynamic,
            LinearVelocity::ZERO,
            ComputedMass::new(10.0),
        ))
        .id();
    let target = world
        .spawn((
            Target::new(TargetSize::Small),
            Transform::from_xyz(500.0, 175.0, 0.0),
            RigidBody::Dynamic,
            LinearVelocity::ZERO,
            ComputedMass::new(10.0),
        ))
        .id();
    // Static bodies are never pushed.
    let wall = world
        .spawn((
            Transform::from_xyz(520.0, 100.0, 0.0),
            RigidBody::Static,
            LinearVelocity::ZERO,
        ))
        .id();

    world.write_message(UseAbility { projectile: e });
    run_system_once(&mut world, ability::activate_abilities);

    // 3000 * (1 - 60/150) / 10 = 180 along +x
    let v_block = world.get::<LinearVelocity>(block).unwrap().0;
    assert!((v_block - Vec2::new(180.0, 0.0)).length() < 1e-3, "{v_block:?}");
    // 3000 * (1 - 75/150) / 10 = 150 along +y
    let v_target = world.get::<LinearVelocity>(target).unwrap().0;
    assert!((v_target - Vec2::new(0.0, 150.0)).length() < 1e-3, "{v_target:?}");
    assert_eq!(world.get::<LinearVelocity>(wall).unwrap().0, Vec2::ZERO);

    // Fragile block: 50 - 50 -> destroyed. Small target: 80 - 80 -> dead.
    assert!(world.get::<Destructible>(block).unwrap().is_destroyed());
    assert!(!world.get::<Target>(target).unwrap().is_alive());
    assert_eq!(read_messages::<DestructibleDestroyed>(&mut world).len(), 1);
    assert_eq!(
        read_messages::<TargetDied>(&mut world),
        vec![TargetDied { entity: target, score: 5000 }]
    );
}

#[test]
fn explosive_skips_retired_bodies_still_lingering() {
    let mut world = test_world();
    let e = spawn_flying(&mut world, ProjectileVariant::Explosive, Vec2::new(300.0, 0.0));
    world.get_mut::<Transform>(e).unwrap().translation = Vec3::new(500.0, 100.0, 0.0);

    let mut dead = Destructible::new(Material::Fragile, BlockShape::Square);
    dead.destroy();
    let retired = world
        .spawn((
            dead,
            Transform::from_xyz(540.0, 100.0, 0.0),
            RigidBody::Dynamic,
            LinearVelocity::ZERO,
            ComputedMass::new(10.0),
            inert_layers(Layer::Structure),
        ))
        .id();
    let live = world
        .spawn((
            Destructible::new(Material::Rigid, BlockShape::Square),
            Transform::from_xyz(460.0, 100.0, 0.0),
            RigidBody::Dynamic,
            LinearVelocity::ZERO,
            ComputedMass::new(10.0),
            live_layers(Layer::Structure),
        ))
        .id();

    world.write_message(UseAbility { projectile: e });
    run_system_once(&mut world, ability::activate_abilities);

    assert_eq!(world.get::<LinearVelocity>(retired).unwrap().0, Vec2::ZERO);
    assert!(world.get::<LinearVelocity>(live).unwrap().0.x < 0.0);
    assert_eq!(world.get::<Destructible>(live).unwrap().health(), 250.0);
    assert!(read_messages::<DestructibleDestroyed>(&mut world).is_empty());
}
