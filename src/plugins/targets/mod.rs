//! Targets plugin: entities that must be eliminated for score.
//!
//! `Alive -> Dead` is terminal and happens at most once; `TargetDied` carries the size's fixed
//! score value and is written only on that transition (see `DamageSink`).

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::health::{DamageOutcome, HealthPool};
use crate::common::layers::{live_layers, Layer};
use crate::common::state::GameState;
use crate::plugins::damage::collision::ImpactVelocity;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetProfile {
    pub radius: f32,
    pub max_health: f32,
    pub score_value: u32,
    pub density: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TargetSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl TargetSize {
    const SMALL: TargetProfile = TargetProfile { radius: 20.0, max_health: 80.0, score_value: 5000, density: 0.01 };
    const MEDIUM: TargetProfile = TargetProfile { radius: 30.0, max_health: 150.0, score_value: 10000, density: 0.012 };
    const LARGE: TargetProfile = TargetProfile { radius: 40.0, max_health: 250.0, score_value: 15000, density: 0.015 };

    pub fn profile(self) -> &'static TargetProfile {
        match self {
            Self::Small => &Self::SMALL,
            Self::Medium => &Self::MEDIUM,
            Self::Large => &Self::LARGE,
        }
    }

    /// Unknown identifiers fall back to `Medium`.
    pub fn from_id(id: &str) -> Self {
        match id {
            "small" => Self::Small,
            "medium" => Self::Medium,
            "large" => Self::Large,
            other => {
                warn!("unknown target size {other:?}, using medium");
                Self::default()
            }
        }
    }
}

#[derive(Component, Debug, Clone)]
pub struct Target {
    size: TargetSize,
    health: HealthPool,
}

impl Target {
    pub fn new(size: TargetSize) -> Self {
        Self { size, health: HealthPool::full(size.profile().max_health) }
    }

    #[inline]
    pub fn size(&self) -> TargetSize {
        self.size
    }

    #[inline]
    pub fn health(&self) -> f32 {
        self.health.current()
    }

    #[inline]
    pub fn health_fraction(&self) -> f32 {
        self.health.fraction()
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        !self.health.is_depleted()
    }

    #[inline]
    pub fn score_value(&self) -> u32 {
        self.size.profile().score_value
    }

    /// `Destroyed` means this call killed the target; the caller must emit `TargetDied`.
    pub fn take_damage(&mut self, amount: f32) -> DamageOutcome {
        self.health.take(amount)
    }
}

#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct TargetDied {
    pub entity: Entity,
    pub score: u32,
}

pub fn plugin(app: &mut App) {
    app.add_message::<TargetDied>();
}

pub fn spawn_target(commands: &mut Commands, size: TargetSize, pos: Vec2) -> Entity {
    let profile = size.profile();

    commands
        .spawn((
            Name::new(format!("Target({size:?})")),
            Target::new(size),
            Sprite {
                color: Color::srgb(0.35, 0.8, 0.3),
                custom_size: Some(Vec2::splat(profile.radius * 2.0)),
                ..default()
            },
            Transform::from_translation(pos.extend(1.0)),
            RigidBody::Dynamic,
            Collider::circle(profile.radius),
            ColliderDensity(profile.density),
            Friction::new(0.5),
            Restitution::new(0.3),
            live_layers(Layer::Target),
            CollisionEventsEnabled,
            ImpactVelocity::default(),
            DespawnOnExit(GameState::InGame),
        ))
        .id()
}
