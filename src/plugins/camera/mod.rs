//! Camera plugin (render-only).
//!
//! The camera eases toward the focus: the projectile in flight if there is one, otherwise the
//! field center. Horizontal travel is capped so the launcher and the towers stay framed.
//!
//! B0001: a system cannot hold `Query<&Transform>` and `Query<&mut Transform>` unless Bevy can
//! prove them disjoint, so the projectile and camera queries are split with `Without<...>`.
//!
//! ```text
//! OnEnter(InGame): spawn MainCamera -> write MainCameraEntity resource
//! PostUpdate:      follow_focus uses the stored handle + disjoint queries
//! ```

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;
use bevy_firefly::prelude::*;

use crate::common::state::GameState;
use crate::common::tunables::Tunables;
use crate::plugins::projectiles::components::{Projectile, ProjectileState};

/// Farthest the camera drifts from the field center while following a shot.
const MAX_DRIFT_X: f32 = 150.0;

#[derive(Component)]
pub struct MainCamera {
    pub responsiveness: f32,
}

#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct MainCameraEntity(pub Option<Entity>);

pub fn plugin(app: &mut App) {
    app.init_resource::<MainCameraEntity>()
        .add_systems(OnEnter(GameState::InGame), spawn_camera)
        .add_systems(
            PostUpdate,
            follow_focus
                .before(TransformSystems::Propagate)
                .run_if(in_state(GameState::InGame)),
        );
}

/// Where the view should be centered right now.
pub fn focus_point(
    tunables: &Tunables,
    flying: impl IntoIterator<Item = (Vec2, ProjectileState)>,
) -> Vec2 {
    let center = tunables.field.center();
    flying
        .into_iter()
        .find(|(_, s)| *s == ProjectileState::Flying)
        .map_or(center, |(p, _)| {
            Vec2::new(p.x.clamp(center.x - MAX_DRIFT_X, center.x + MAX_DRIFT_X), center.y)
        })
}

fn spawn_camera(mut commands: Commands, tunables: Res<Tunables>) {
    let center = tunables.field.center();
    let e = commands
        .spawn((
            Name::new("MainCamera"),
            Camera2d,
            MainCamera { responsiveness: 3.0 },
            FireflyConfig::default(),
            Transform::from_xyz(center.x, center.y, 999.0),
            DespawnOnExit(GameState::InGame),
        ))
        .id();

    commands.insert_resource(MainCameraEntity(Some(e)));
}

fn follow_focus(
    time: Res<Time>,
    tunables: Res<Tunables>,
    cam_e: Res<MainCameraEntity>,
    // Disjointness proof: projectiles are not MainCamera entities.
    q_projectiles: Query<(&Transform, &ProjectileState), (With<Projectile>, Without<MainCamera>)>,
    // Disjointness proof: MainCamera entities are not projectiles.
    mut q_cam: Query<(&mut Transform, &MainCamera), Without<Projectile>>,
) {
    let Some(cam) = cam_e.0 else { return; };
    let Ok((mut tf_cam, main_cam)) = q_cam.get_mut(cam) else { return; };

    let focus = focus_point(
        &tunables,
        q_projectiles.iter().map(|(tf, s)| (tf.translation.truncate(), *s)),
    );

    let dt = time.delta_secs();
    let alpha = 1.0 - (-main_cam.responsiveness * dt).exp();

    tf_cam.translation.x += (focus.x - tf_cam.translation.x) * alpha;
    tf_cam.translation.y += (focus.y - tf_cam.translation.y) * alpha;
}
