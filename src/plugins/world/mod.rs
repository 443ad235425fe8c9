//! World plugin: ground, side walls and the launcher post.
//!
//! The ground's top surface sits exactly at `PlayField::ground_y`.

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::layers::{live_layers, Layer};
use crate::common::state::GameState;
use crate::common::tunables::Tunables;

const GROUND_DEPTH: f32 = 100.0;
const WALL_THICKNESS: f32 = 30.0;

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), (spawn_bounds, spawn_launcher_post));
}

fn spawn_bounds(mut commands: Commands, tunables: Res<Tunables>) {
    let field = tunables.field;
    let width = field.right - field.left;
    let wall_h = field.top - field.ground_y + GROUND_DEPTH * 4.0;

    let mut spawn_static = |name: &str, color: Color, pos: Vec2, size: Vec2| {
        commands.spawn((
            Name::new(name.to_string()),
            Sprite {
                color,
                custom_size: Some(size),
                ..default()
            },
            Transform::from_translation(pos.extend(0.0)),
            RigidBody::Static,
            Collider::rectangle(size.x, size.y),
            Friction::new(0.8),
            live_layers(Layer::Ground),
            DespawnOnExit(GameState::InGame),
        ));
    };

    spawn_static(
        "Ground",
        Color::srgb(0.36, 0.55, 0.25),
        Vec2::new(field.center().x, field.ground_y - GROUND_DEPTH * 0.5),
        Vec2::new(width + WALL_THICKNESS * 2.0, GROUND_DEPTH),
    );
    spawn_static(
        "WallLeft",
        Color::NONE,
        Vec2::new(field.left - WALL_THICKNESS * 0.5, field.ground_y + wall_h * 0.5),
        Vec2::new(WALL_THICKNESS, wall_h),
    );
    spawn_static(
        "WallRight",
        Color::NONE,
        Vec2::new(field.right + WALL_THICKNESS * 0.5, field.ground_y + wall_h * 0.5),
        Vec2::new(WALL_THICKNESS, wall_h),
    );
}

/// Decorative only: no collider, so it never blocks a launch.
fn spawn_launcher_post(mut commands: Commands, tunables: Res<Tunables>) {
    let anchor = tunables.launcher.anchor;
    let height = anchor.y - tunables.field.ground_y;

    commands.spawn((
        Name::new("LauncherPost"),
        Sprite {
            color: Color::srgb(0.4, 0.25, 0.12),
            custom_size: Some(Vec2::new(16.0, height)),
            ..default()
        },
        Transform::from_xyz(anchor.x, tunables.field.ground_y + height * 0.5, 0.5),
        DespawnOnExit(GameState::InGame),
    ));
}
