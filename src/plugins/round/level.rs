//! Level content: which projectiles the round gets and where blocks and targets stand.
//!
//! Kinds are given as string ids and resolved through the `from_id` fallbacks, so a typo
//! degrades to the default profile with a warning instead of failing the level.

use bevy::prelude::*;

use crate::common::tunables::Tunables;
use crate::plugins::destructibles::{spawn_destructible, BlockShape, Material};
use crate::plugins::projectiles::components::ProjectileVariant;
use crate::plugins::projectiles::spawn::spawn_queued_projectile;
use crate::plugins::targets::{spawn_target, TargetSize};

#[derive(Debug, Clone, PartialEq)]
pub struct BlockPlacement {
    pub material: String,
    pub shape: String,
    pub pos: Vec2,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TargetPlacement {
    pub size: String,
    pub pos: Vec2,
}

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct LevelLayout {
    pub projectiles: Vec<String>,
    pub blocks: Vec<BlockPlacement>,
    pub targets: Vec<TargetPlacement>,
}

fn block(material: &str, shape: &str, x: f32, y: f32) -> BlockPlacement {
    BlockPlacement { material: material.into(), shape: shape.into(), pos: Vec2::new(x, y) }
}

fn target(size: &str, x: f32, y: f32) -> TargetPlacement {
    TargetPlacement { size: size.into(), pos: Vec2::new(x, y) }
}

impl Default for LevelLayout {
    /// Two small towers and a target in the open, ground at y = 50.
    fn default() -> Self {
        Self {
            projectiles: vec!["standard".into(), "accelerant".into(), "explosive".into()],
            blocks: vec![
                block("soft", "vertical", 800.0, 90.0),
                block("soft", "vertical", 870.0, 90.0),
                block("soft", "horizontal", 835.0, 140.0),
                block("rigid", "vertical", 975.0, 90.0),
                block("rigid", "vertical", 1045.0, 90.0),
                block("fragile", "horizontal", 1010.0, 140.0),
                block("fragile", "square", 1010.0, 170.0),
            ],
            targets: vec![
                target("small", 835.0, 70.0),
                target("small", 1010.0, 70.0),
                target("medium", 1010.0, 220.0),
                target("large", 1130.0, 90.0),
            ],
        }
    }
}

pub struct SpawnedLevel {
    pub queue: Vec<Entity>,
    pub targets: usize,
}

/// Spawn the layout. Queued projectiles are parked left of the launcher, the first to fire
/// nearest to it.
pub fn spawn_level(commands: &mut Commands, layout: &LevelLayout, tunables: &Tunables) -> SpawnedLevel {
    for b in &layout.blocks {
        spawn_destructible(commands, Material::from_id(&b.material), BlockShape::from_id(&b.shape), b.pos);
    }

    for t in &layout.targets {
        spawn_target(commands, TargetSize::from_id(&t.size), t.pos);
    }

    let base = tunables.launcher.anchor.x - 70.0;
    let queue = layout
        .projectiles
        .iter()
        .enumerate()
        .map(|(slot, id)| {
            let variant = ProjectileVariant::from_id(id);
            let parking = Vec2::new(
                base - 45.0 * slot as f32,
                tunables.field.ground_y + variant.profile().radius,
            );
            spawn_queued_projectile(commands, variant, parking, slot)
        })
        .collect();

    SpawnedLevel { queue, targets: layout.targets.len() }
}
