//! Launch consumer: turn `LaunchRequest` intent into a flying projectile.

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::common::tunables::Tunables;

use super::components::{FlightWatchdog, Projectile, ProjectileState};
use super::messages::{LaunchRequest, ProjectileLaunched};

/// Only an `Idle` projectile can be launched; anything else is dropped.
pub fn apply_launch_requests(
    tunables: Res<Tunables>,
    mut commands: Commands,
    mut requests: MessageReader<LaunchRequest>,
    mut launched: MessageWriter<ProjectileLaunched>,
    mut q: Query<(
        &mut Projectile,
        &mut ProjectileState,
        &RigidBody,
        &mut LinearVelocity,
        &mut AngularVelocity,
    )>,
) {
    for req in requests.read() {
        let Ok((mut projectile, mut state, _body, mut vel, mut spin)) = q.get_mut(req.projectile) else {
            debug!("launch request for missing projectile {:?}", req.projectile);
            continue;
        };

        if !state.launch() {
            debug!("launch rejected: {:?} is {:?}", req.projectile, *state);
            continue;
        }

        vel.0 = req.velocity;
        spin.0 = tunables.launcher.spin;
        projectile.flight_secs = 0.0;

        commands
            .entity(req.projectile)
            .insert((
                RigidBody::Dynamic,
                FlightWatchdog::from_seconds(tunables.flight.watchdog_secs),
            ));

        info!(
            "{:?} launched with velocity ({:.1}, {:.1})",
            projectile.variant, req.velocity.x, req.velocity.y
        );
        launched.write(ProjectileLaunched { projectile: req.projectile });
    }
}
