//! Preview dots: a fixed pool of sprites, toggled instead of spawned per frame.
//!
//! Dots are never despawned while in game; unused ones are simply hidden.

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::state::GameState;
use crate::common::tunables::Tunables;

use super::trajectory::TrajectoryPreview;

#[derive(Component, Debug, Clone, Copy)]
pub struct PreviewDot;

#[derive(Resource, Debug, Default)]
pub struct PreviewDots {
    pub dots: Vec<Entity>,
}

/// Pre-spawn one hidden dot per preview point.
pub fn spawn_preview_dots(mut commands: Commands, tunables: Res<Tunables>) {
    let cap = tunables.launcher.preview_points;
    let mut dots = Vec::with_capacity(cap);

    for i in 0..cap {
        // Dots shrink and fade along the path.
        let t = i as f32 / cap.max(1) as f32;
        let e = commands
            .spawn((
                Name::new("PreviewDot"),
                PreviewDot,
                Sprite {
                    color: Color::srgba(1.0, 1.0, 1.0, 0.8 - 0.5 * t),
                    custom_size: Some(Vec2::splat(6.0 - 3.0 * t)),
                    ..default()
                },
                Transform::from_xyz(0.0, 0.0, 2.0),
                Visibility::Hidden,
                DespawnOnExit(GameState::InGame),
            ))
            .id();
        dots.push(e);
    }

    commands.insert_resource(PreviewDots { dots });
}

pub fn sync_preview_dots(
    preview: Res<TrajectoryPreview>,
    pool: Res<PreviewDots>,
    mut q: Query<(&mut Transform, &mut Visibility), With<PreviewDot>>,
) {
    if !preview.is_changed() {
        return;
    }

    let points = preview.points();
    for (i, &e) in pool.dots.iter().enumerate() {
        let Ok((mut tf, mut vis)) = q.get_mut(e) else { continue; };
        match points.get(i) {
            Some(p) => {
                tf.translation.x = p.x;
                tf.translation.y = p.y;
                *vis = Visibility::Visible;
            }
            None => *vis = Visibility::Hidden,
        }
    }
}
