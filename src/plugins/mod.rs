//! Feature plugins.

use bevy::prelude::*;

use crate::plugins::projectiles::ProjectilesPlugin;

pub mod core;
pub mod damage;
pub mod destructibles;
pub mod launcher;
pub mod physics;
pub mod projectiles;
pub mod round;
pub mod targets;
pub mod world;

// Render-only
pub mod camera;
pub mod lighting;

/// Register gameplay plugins that work in headless tests.
pub fn register_gameplay(app: &mut App) {
    core::plugin(app);
    physics::plugin(app);
    world::plugin(app);
    app.add_plugins(ProjectilesPlugin);
    destructibles::plugin(app);
    targets::plugin(app);
    damage::plugin(app);
    launcher::plugin(app);
    round::plugin(app);
}

/// Register render-only plugins (requires DefaultPlugins / render infra).
pub fn register_render(app: &mut App) {
    lighting::plugin(app);
    camera::plugin(app);
}

