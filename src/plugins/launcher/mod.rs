//! Launcher plugin: drag gesture → clamped pull → launch request, with a live trajectory
//! preview.
//!
//! ```text
//! Update
//!   read_pointer_input   mouse/keys -> PointerGesture, UseAbility
//!   drive_launcher       PointerGesture -> Launcher transitions
//!                          Move: reposition loaded projectile, republish TrajectoryPreview
//!                          Up:   cancel (reseat) or LaunchRequest
//!   sync_preview_dots    TrajectoryPreview -> dot sprites
//!   (projectiles) apply_launch_requests
//! ```
//!
//! The launcher never owns a projectile's lifetime; it only holds the loaded entity until
//! release.

pub mod input;
pub mod preview;
pub mod sling;
pub mod trajectory;

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::common::layers::{live_layers, Layer};
use crate::common::state::GameState;
use crate::common::tunables::Tunables;
use crate::plugins::projectiles::components::Projectile;
use crate::plugins::projectiles::launch::apply_launch_requests;
use crate::plugins::projectiles::messages::LaunchRequest;

use input::PointerGesture;
use sling::{Launcher, ReleaseOutcome};
use trajectory::{Trajectory, TrajectoryPreview};

pub fn plugin(app: &mut App) {
    app.add_message::<PointerGesture>()
        .init_resource::<Launcher>()
        .init_resource::<TrajectoryPreview>()
        .init_resource::<preview::PreviewDots>();

    app.add_systems(
        OnEnter(GameState::InGame),
        (reset_launcher, preview::spawn_preview_dots),
    );

    app.add_systems(
        Update,
        (
            input::read_pointer_input,
            drive_launcher,
            preview::sync_preview_dots,
        )
            .chain()
            .before(apply_launch_requests)
            .run_if(in_state(GameState::InGame)),
    );
}

/// Fresh launcher for a new round. Writes in place so later `OnEnter` systems see it.
pub fn reset_launcher(
    tunables: Res<Tunables>,
    mut launcher: ResMut<Launcher>,
    mut preview: ResMut<TrajectoryPreview>,
) {
    *launcher = Launcher::new(tunables.launcher, tunables.field);
    preview.clear();
}

/// Put a projectile at `point`, fixed in place but visible and colliding.
pub fn seat_projectile(commands: &mut Commands, projectile: Entity, point: Vec2) {
    commands.entity(projectile).insert((
        Transform::from_translation(point.extend(3.0)),
        Visibility::Visible,
        RigidBody::Static,
        LinearVelocity::ZERO,
        AngularVelocity(0.0),
        live_layers(Layer::Projectile),
    ));
}

pub fn drive_launcher(
    tunables: Res<Tunables>,
    fixed: Res<Time<Fixed>>,
    gravity: Res<Gravity>,
    mut commands: Commands,
    mut launcher: ResMut<Launcher>,
    mut preview: ResMut<TrajectoryPreview>,
    mut gestures: MessageReader<PointerGesture>,
    mut launches: MessageWriter<LaunchRequest>,
    mut q_projectiles: Query<&mut Transform, With<Projectile>>,
) {
    if let Some(loaded) = launcher.loaded()
        && !q_projectiles.contains(loaded)
    {
        warn!("loaded projectile {loaded:?} is gone, unloading");
        launcher.unload();
        preview.clear();
    }

    for gesture in gestures.read() {
        match *gesture {
            PointerGesture::Down(pointer) => {
                if launcher.begin_pull(pointer) {
                    debug!("pull started at {pointer:?}");
                } else {
                    debug!("pull rejected in {:?}", launcher.state());
                }
            }
            PointerGesture::Move(pointer) => {
                let Some(point) = launcher.update_pull(pointer) else { continue; };

                if let Some(loaded) = launcher.loaded()
                    && let Ok(mut tf) = q_projectiles.get_mut(loaded)
                {
                    tf.translation.x = point.x;
                    tf.translation.y = point.y;
                }

                preview.publish(Trajectory::new(
                    point,
                    launcher.pending_velocity(),
                    gravity.0,
                    fixed.timestep().as_secs_f32(),
                    tunables.launcher.preview_steps_per_point,
                    tunables.launcher.preview_points,
                    tunables.field,
                ));
            }
            PointerGesture::Up => match launcher.release() {
                ReleaseOutcome::Ignored => {}
                ReleaseOutcome::Cancelled { projectile } => {
                    debug!("pull shorter than {}, cancelled", tunables.launcher.min_pull);
                    seat_projectile(&mut commands, projectile, launcher.rest_point());
                    preview.clear();
                }
                ReleaseOutcome::Launched { projectile, velocity } => {
                    preview.clear();
                    launches.write(LaunchRequest { projectile, velocity });
                }
            },
        }
    }
}
