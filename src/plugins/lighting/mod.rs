//! Lighting plugin (Firefly) (render-only).

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;
use bevy_firefly::prelude::*;

use crate::common::state::GameState;
use crate::plugins::projectiles::components::{Projectile, ProjectileState};

use crate::plugins::launcher::sling::Launcher;

#[derive(Component)]
pub struct FocusLight;

pub fn plugin(app: &mut App) {
    if !app.is_plugin_added::<FireflyPlugin>() {
        app.add_plugins(FireflyPlugin);
    }

    app.add_systems(OnEnter(GameState::InGame), setup)
        .add_systems(Update, follow_focus_light.run_if(in_state(GameState::InGame)));
}

fn setup(mut commands: Commands) {
    commands.spawn((
        Name::new("FocusLight"),
        FocusLight,
        PointLight2d {
            color: Color::srgb(1.0, 0.95, 0.8),
            radius: 600.0,
            ..default()
        },
        Transform::from_xyz(0.0, 0.0, 10.0),
        DespawnOnExit(GameState::InGame),
    ));
}

/// Lights the projectile in flight, otherwise the launcher.
fn follow_focus_light(
    launcher: Res<Launcher>,
    q_projectiles: Query<(&Transform, &ProjectileState), (With<Projectile>, Without<FocusLight>)>,
    mut q_light: Query<&mut Transform, (With<FocusLight>, Without<Projectile>)>,
) {
    let Ok(mut tf_light) = q_light.single_mut() else {
        return;
    };

    let focus = q_projectiles
        .iter()
        .find(|(_, s)| **s == ProjectileState::Flying)
        .map_or(launcher.anchor(), |(tf, _)| tf.translation.truncate());

    tf_light.translation.x = focus.x;
    tf_light.translation.y = focus.y;
}
