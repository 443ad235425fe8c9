//! Integration test harness.
//!
//! Keep integration tests headless:
//! - `MinimalPlugins` provides core ECS runtime.
//! - we then call `sling_siege::game::configure_headless` to install gameplay plugins.
#![allow(dead_code)]

use std::time::Duration;

use bevy::asset::AssetPlugin;
use bevy::prelude::*;
use bevy::scene::ScenePlugin;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;

pub fn app_headless() -> App {
    let mut app = App::new();

    // Add AssetPlugin + ScenePlugin so SceneSpawner exists.
    app.add_plugins((
        MinimalPlugins,
        StatesPlugin,
        AssetPlugin::default(),
        ScenePlugin,
    ));

    sling_siege::game::configure_headless(&mut app);
    // `App::run` would do this; tests drive `update()` directly, so finish plugin setup here.
    app.finish();
    app.cleanup();
    app
}

/// Headless app whose clock advances exactly `1/60 s` per `update()`.
pub fn app_stepped() -> App {
    let mut app = app_headless();
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(1.0 / 60.0)));
    app
}

/// Tick until `done` holds, at most `max_frames` frames. Returns the frames used.
pub fn run_until(app: &mut App, max_frames: usize, mut done: impl FnMut(&mut App) -> bool) -> Option<usize> {
    for frame in 0..max_frames {
        if done(app) {
            return Some(frame);
        }
        app.update();
    }
    None
}
