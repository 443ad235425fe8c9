//! Core plugin: shared resources, global settings and the deferred-despawn pipeline.

use bevy::prelude::*;

use crate::common::lifecycle::{despawn_marked, tick_despawn_timers};
use crate::common::state::GameState;
use crate::common::tunables::Tunables;

pub fn plugin(app: &mut App) {
    // Keep a `Tunables` the app was configured with before the plugins.
    app.init_resource::<Tunables>();
    app.insert_resource(ClearColor(Color::srgb(0.53, 0.75, 0.92)));

    app.add_systems(
        FixedPostUpdate,
        tick_despawn_timers.run_if(in_state(GameState::InGame)),
    );
    app.add_systems(PostUpdate, despawn_marked);
}
