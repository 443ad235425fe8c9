//! Flight lifecycle: per-tick update, landing detection, watchdog, destruction.
//!
//! ```text
//! FixedUpdate      update_flight          Flying: trail, heading, landing predicate
//!                  tick_flight_watchdogs  Flying too long: force land
//!     land: Flying -> Landed, write ProjectileLanded, schedule DespawnTimer
//! FixedPostUpdate  tick_despawn_timers    (common) expired -> PendingDespawn
//! PostUpdate       mark_destroyed         -> Destroyed, write ProjectileDestroyed
//!                  despawn_marked         (common) body leaves the world
//! ```

use avian2d::prelude::*;
use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::common::lifecycle::{DespawnTimer, PendingDespawn};
use crate::common::tunables::{FlightTunables, Tunables};

use super::components::{FlightWatchdog, Projectile, ProjectileState, Trail};
use super::messages::{ProjectileDestroyed, ProjectileLanded};

/// Landing predicate: nearly still, or flying for a while and merely slow.
#[inline]
pub fn should_land(speed: f32, flight_secs: f32, cfg: &FlightTunables) -> bool {
    speed < cfg.rest_speed || (flight_secs > cfg.relaxed_after_secs && speed < cfg.relaxed_speed)
}

/// Take the `Flying -> Landed` edge if it is available.
///
/// The edge is taken at most once per projectile, so `ProjectileLanded` is written at most once.
fn land(
    commands: &mut Commands,
    landed: &mut MessageWriter<ProjectileLanded>,
    cfg: &FlightTunables,
    e: Entity,
    state: &mut ProjectileState,
) {
    if !state.land() {
        return;
    }

    commands
        .entity(e)
        .remove::<FlightWatchdog>()
        .insert(DespawnTimer::from_seconds(cfg.despawn_delay_secs));
    landed.write(ProjectileLanded { projectile: e });
}

pub fn update_flight(
    time: Res<Time<Fixed>>,
    tunables: Res<Tunables>,
    mut commands: Commands,
    mut landed: MessageWriter<ProjectileLanded>,
    mut q: Query<(
        Entity,
        &mut Projectile,
        &mut ProjectileState,
        &mut Trail,
        &mut Transform,
        &LinearVelocity,
    )>,
) {
    let cfg = &tunables.flight;
    let dt = time.delta_secs();

    for (e, mut projectile, mut state, mut trail, mut tf, vel) in &mut q {
        if *state != ProjectileState::Flying {
            continue;
        }

        trail.push(tf.translation.truncate(), cfg.trail_len);

        if vel.0.length_squared() > f32::EPSILON {
            tf.rotation = Quat::from_rotation_z(vel.0.y.atan2(vel.0.x));
        }

        projectile.flight_secs += dt;

        let speed = vel.0.length();
        if should_land(speed, projectile.flight_secs, cfg) {
            info!(
                "{:?} landed after {:.2}s (speed {speed:.1})",
                projectile.variant, projectile.flight_secs
            );
            land(&mut commands, &mut landed, cfg, e, &mut state);
        }
    }
}

pub fn tick_flight_watchdogs(
    time: Res<Time<Fixed>>,
    tunables: Res<Tunables>,
    mut commands: Commands,
    mut landed: MessageWriter<ProjectileLanded>,
    mut q: Query<(Entity, &mut FlightWatchdog, &mut ProjectileState)>,
) {
    for (e, mut watchdog, mut state) in &mut q {
        watchdog.tick(time.delta());
        if !watchdog.is_finished() {
            continue;
        }

        if *state == ProjectileState::Flying {
            warn!("{e:?} still flying after {:.1}s, forcing a landing", tunables.flight.watchdog_secs);
        }
        land(&mut commands, &mut landed, &tunables.flight, e, &mut state);
        commands.entity(e).remove::<FlightWatchdog>();
    }
}

/// Final transition for projectiles whose despawn was scheduled this frame.
pub fn mark_destroyed(
    mut destroyed: MessageWriter<ProjectileDestroyed>,
    mut q: Query<(Entity, &mut ProjectileState), (With<Projectile>, Added<PendingDespawn>)>,
) {
    for (e, mut state) in &mut q {
        if state.destroy() {
            destroyed.write(ProjectileDestroyed { projectile: e });
        }
    }
}
