//! Destructibles plugin: stationary structural blocks with material-specific health.
//!
//! Facts live in `Destructible` (material, shape, health). Damage arrives through
//! `DamageSink` (contacts, explosions); this module only adds the out-of-map rule.
//!
//! Once destroyed, health is frozen and further damage is a no-op. The block stops colliding
//! immediately and is despawned after a short linger.

use avian2d::prelude::*;
use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::health::{DamageOutcome, HealthPool};
use crate::common::layers::{inert_layers, live_layers, Layer};
use crate::common::lifecycle::DespawnTimer;
use crate::common::state::GameState;
use crate::common::tunables::Tunables;
use crate::plugins::damage::collision::ImpactVelocity;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialProfile {
    pub density: f32,
    pub friction: f32,
    pub restitution: f32,
    pub max_health: f32,
    pub color: Color,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Material {
    #[default]
    Soft,
    Rigid,
    Fragile,
}

impl Material {
    const SOFT: MaterialProfile = MaterialProfile {
        density: 0.003,
        friction: 0.8,
        restitution: 0.2,
        max_health: 100.0,
        color: Color::srgb(0.55, 0.27, 0.07),
    };
    const RIGID: MaterialProfile = MaterialProfile {
        density: 0.008,
        friction: 0.9,
        restitution: 0.1,
        max_health: 300.0,
        color: Color::srgb(0.5, 0.5, 0.5),
    };
    const FRAGILE: MaterialProfile = MaterialProfile {
        density: 0.002,
        friction: 0.3,
        restitution: 0.8,
        max_health: 50.0,
        color: Color::srgb(0.53, 0.81, 0.92),
    };

    pub fn profile(self) -> &'static MaterialProfile {
        match self {
            Self::Soft => &Self::SOFT,
            Self::Rigid => &Self::RIGID,
            Self::Fragile => &Self::FRAGILE,
        }
    }

    /// Unknown identifiers fall back to `Soft`.
    pub fn from_id(id: &str) -> Self {
        match id {
            "soft" => Self::Soft,
            "rigid" => Self::Rigid,
            "fragile" => Self::Fragile,
            other => {
                warn!("unknown material {other:?}, using soft");
                Self::default()
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlockShape {
    Horizontal,
    Vertical,
    #[default]
    Square,
}

impl BlockShape {
    pub fn size(self) -> Vec2 {
        match self {
            Self::Horizontal => Vec2::new(80.0, 20.0),
            Self::Vertical => Vec2::new(20.0, 80.0),
            Self::Square => Vec2::new(40.0, 40.0),
        }
    }

    /// Unknown identifiers fall back to `Square`.
    pub fn from_id(id: &str) -> Self {
        match id {
            "horizontal" | "h" => Self::Horizontal,
            "vertical" | "v" => Self::Vertical,
            "square" => Self::Square,
            other => {
                warn!("unknown block shape {other:?}, using square");
                Self::default()
            }
        }
    }
}

#[derive(Component, Debug, Clone)]
pub struct Destructible {
    material: Material,
    shape: BlockShape,
    health: HealthPool,
}

impl Destructible {
    pub fn new(material: Material, shape: BlockShape) -> Self {
        Self { material, shape, health: HealthPool::full(material.profile().max_health) }
    }

    #[inline]
    pub fn material(&self) -> Material {
        self.material
    }

    #[inline]
    pub fn shape(&self) -> BlockShape {
        self.shape
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
    pub fn is_destroyed(&self) -> bool {
        self.health.is_depleted()
    }

    pub fn take_damage(&mut self, amount: f32) -> DamageOutcome {
        self.health.take(amount)
    }

    /// Destroy without damage (e.g. fell off the map).
    pub fn destroy(&mut self) -> DamageOutcome {
        self.health.deplete()
    }
}

#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct DestructibleDestroyed {
    pub entity: Entity,
}

pub fn plugin(app: &mut App) {
    app.add_message::<DestructibleDestroyed>();

    app.add_systems(
        FixedPostUpdate,
        destroy_fallen_structures
            .after(crate::plugins::damage::collision::resolve_collision_damage)
            .run_if(in_state(GameState::InGame)),
    );
}

pub fn spawn_destructible(commands: &mut Commands, material: Material, shape: BlockShape, pos: Vec2) -> Entity {
    let profile = material.profile();
    let size = shape.size();

    commands
        .spawn((
            Name::new(format!("Block({material:?},{shape:?})")),
            Destructible::new(material, shape),
            Sprite {
                color: profile.color,
                custom_size: Some(size),
                ..default()
            },
            Transform::from_translation(pos.extend(1.0)),
            RigidBody::Dynamic,
            Collider::rectangle(size.x, size.y),
            ColliderDensity(profile.density),
            Friction::new(profile.friction),
            Restitution::new(profile.restitution),
            live_layers(Layer::Structure),
            CollisionEventsEnabled,
            ImpactVelocity::default(),
            DespawnOnExit(GameState::InGame),
        ))
        .id()
}

/// Structures that fall below the kill line are destroyed like any other.
fn destroy_fallen_structures(
    tunables: Res<Tunables>,
    mut commands: Commands,
    mut destroyed: MessageWriter<DestructibleDestroyed>,
    mut q: Query<(Entity, &mut Destructible, &Transform)>,
) {
    for (e, mut block, tf) in &mut q {
        if tf.translation.y >= tunables.field.kill_y {
            continue;
        }
        if block.destroy() == DamageOutcome::Destroyed {
            info!("{:?} structure {e:?} fell off the map", block.material());
            destroyed.write(DestructibleDestroyed { entity: e });
            commands.entity(e).insert((
                inert_layers(Layer::Structure),
                DespawnTimer::from_seconds(tunables.damage.linger_secs),
            ));
        }
    }
}
