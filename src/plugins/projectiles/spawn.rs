//! Queue spawning.
//!
//! Every projectile of a round is spawned up front, parked out of play:
//! hidden, static, and colliding with nothing (empty filters). Loading it into the launcher
//! flips those values in place, without structural changes.

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::layers::{inert_layers, Layer};
use crate::common::state::GameState;
use crate::plugins::damage::collision::ImpactVelocity;

use super::components::{Projectile, ProjectileState, ProjectileVariant, Trail};

/// Spawn one parked projectile at `parking` (e.g. a waiting spot beside the launcher).
pub fn spawn_queued_projectile(
    commands: &mut Commands,
    variant: ProjectileVariant,
    parking: Vec2,
    slot: usize,
) -> Entity {
    let profile = variant.profile();

    commands
        .spawn((
            Name::new(format!("Projectile{slot}({variant:?})")),
            Projectile::new(variant),
            ProjectileState::Idle,
            Trail::default(),
            Sprite {
                color: profile.color,
                custom_size: Some(Vec2::splat(profile.radius * 2.0)),
                ..default()
            },
            Transform::from_translation(parking.extend(3.0)),
            Visibility::Hidden,
            (
                RigidBody::Static,
                Collider::circle(profile.radius),
                ColliderDensity(profile.density),
                Restitution::new(profile.restitution),
                Friction::new(profile.friction),
                LinearVelocity::ZERO,
                AngularVelocity(0.0),
                inert_layers(Layer::Projectile),
                CollisionEventsEnabled,
                ImpactVelocity::default(),
            ),
            DespawnOnExit(GameState::InGame),
        ))
        .id()
}
