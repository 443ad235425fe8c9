//! Round plugin: owns the projectile queue and the score.
//!
//! ```text
//! OnEnter(InGame)  start_round (after reset_launcher)
//!                    spawn LevelLayout, build Round, load_next
//! Update           track_launches   ProjectileLaunched -> arm landing watch
//!                  track_landings   ProjectileLanded   -> guarded, start advance delay
//!                  tally_score      TargetDied         -> score
//!                  advance_round    delay expired      -> current_index += 1, load_next,
//!                                                         clear guard
//!                  settle_round     Cleared / Failed   -> RoundFinished (once)
//! ```

pub mod controller;
pub mod level;

use std::time::Duration;

use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::common::state::GameState;
use crate::common::tunables::Tunables;
use crate::plugins::launcher::sling::Launcher;
use crate::plugins::launcher::{reset_launcher, seat_projectile};
use crate::plugins::projectiles::components::{Projectile, ProjectileState};
use crate::plugins::projectiles::launch::apply_launch_requests;
use crate::plugins::projectiles::messages::{ProjectileLanded, ProjectileLaunched};
use crate::plugins::targets::TargetDied;

use controller::{Round, RoundFinished};
use level::{spawn_level, LevelLayout};

pub fn plugin(app: &mut App) {
    app.add_message::<RoundFinished>()
        .init_resource::<LevelLayout>()
        .init_resource::<Round>();

    app.add_systems(OnEnter(GameState::InGame), start_round.after(reset_launcher));

    app.add_systems(
        Update,
        (
            track_launches,
            track_landings,
            tally_score,
            advance_round,
            settle_round,
        )
            .chain()
            .after(apply_launch_requests)
            .run_if(in_state(GameState::InGame)),
    );
}

/// Hand the projectile at `current_index` to the launcher, making it visible and interactive.
///
/// No-op while a load is in progress or once the queue is consumed.
pub fn load_next(round: &mut Round, launcher: &mut Launcher, commands: &mut Commands) -> Option<Entity> {
    let projectile = round.begin_load()?;

    if !launcher.load(projectile) {
        warn!("launcher refused {projectile:?} in {:?}", launcher.state());
        round.abort_load();
        return None;
    }

    seat_projectile(commands, projectile, launcher.rest_point());
    info!(
        "loaded projectile {}/{} ({projectile:?})",
        round.current_index() + 1,
        round.queue().len()
    );
    Some(projectile)
}

fn start_round(
    mut commands: Commands,
    tunables: Res<Tunables>,
    layout: Res<LevelLayout>,
    mut launcher: ResMut<Launcher>,
) {
    let spawned = spawn_level(&mut commands, &layout, &tunables);
    info!(
        "round started: {} projectiles, {} targets",
        spawned.queue.len(),
        spawned.targets
    );

    let mut round = Round::new(spawned.queue, spawned.targets);
    load_next(&mut round, &mut launcher, &mut commands);
    commands.insert_resource(round);
}

pub fn track_launches(mut round: ResMut<Round>, mut launched: MessageReader<ProjectileLaunched>) {
    for ev in launched.read() {
        if !round.on_launched(ev.projectile) {
            debug!("launch of {:?} is not the current projectile", ev.projectile);
        }
    }
}

pub fn track_landings(
    tunables: Res<Tunables>,
    mut round: ResMut<Round>,
    mut landed: MessageReader<ProjectileLanded>,
) {
    let delay = Duration::from_secs_f32(tunables.round.advance_delay_secs);
    for ev in landed.read() {
        if round.on_landed(ev.projectile, delay) {
            info!("{:?} landed, advancing in {:.1}s", ev.projectile, tunables.round.advance_delay_secs);
        } else {
            debug!("duplicate or unwatched landing of {:?} ignored", ev.projectile);
        }
    }
}

pub fn tally_score(mut round: ResMut<Round>, mut died: MessageReader<TargetDied>) {
    for ev in died.read() {
        round.on_target_died(ev.score);
        info!("score {} (+{})", round.score(), ev.score);
    }
}

pub fn advance_round(
    time: Res<Time>,
    mut commands: Commands,
    mut round: ResMut<Round>,
    mut launcher: ResMut<Launcher>,
) {
    if !round.tick_advance(time.delta()) {
        return;
    }

    info!("advancing to projectile index {} ({} remaining)", round.current_index(), round.remaining());
    load_next(&mut round, &mut launcher, &mut commands);
    round.finish_advance();
}

pub fn settle_round(
    mut round: ResMut<Round>,
    q_projectiles: Query<&ProjectileState, With<Projectile>>,
    mut finished: MessageWriter<RoundFinished>,
) {
    let any_flying = q_projectiles.iter().any(|s| *s == ProjectileState::Flying);
    if let Some(outcome) = round.settle(any_flying) {
        info!("round over: {outcome:?}, score {}", round.score());
        finished.write(RoundFinished { outcome, score: round.score() });
    }
}
