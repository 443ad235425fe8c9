//! Projectiles plugin: **message-based intent → single writer** for projectile state.
//!
//! The launcher and the input layer never touch a projectile's body directly. They only
//! enqueue intent (`LaunchRequest`, `UseAbility`); the systems here are the single writer of
//! `ProjectileState`, and every state edge publishes exactly one outcome message.
//!
//! # Data flow
//! ```text
//!   Update (variable dt)
//!┌────────────────────────────────────────────────────────────────────────────┐
//!│  (A) apply_launch_requests                                                 │
//!│      - reads: LaunchRequest                                                │
//!│      - Idle -> Flying, Dynamic body, velocity + spin, FlightWatchdog       │
//!│      - writes: ProjectileLaunched                                          │
//!│                                                                            │
//!│  (B) activate_abilities                                                    │
//!│      - reads: UseAbility                                                   │
//!│      - one-shot gate, then boost or blast (impulse + DamageSink)           │
//!└────────────────────────────────────────────────────────────────────────────┘
//!                │
//!                v
//!   FixedUpdate (fixed dt)
//!┌────────────────────────────────────────────────────────────────────────────┐
//!│  (C) update_flight: trail, heading, landing predicate                      │
//!│  (D) tick_flight_watchdogs: forced landing                                 │
//!│      - Flying -> Landed, writes ProjectileLanded, schedules DespawnTimer   │
//!└────────────────────────────────────────────────────────────────────────────┘
//!                │
//!                v
//!   PostUpdate
//!┌────────────────────────────────────────────────────────────────────────────┐
//!│  (E) mark_destroyed: -> Destroyed, writes ProjectileDestroyed              │
//!│  (F) despawn_marked (common)                                               │
//!└────────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Where do we still branch?
//! - Stale intent: a request can name a projectile that is gone or in the wrong state.
//!   Those are dropped with a debug log, never treated as bugs.

pub mod ability;
pub mod components;
pub mod flight;
pub mod launch;
pub mod messages;
pub mod spawn;

use bevy::prelude::*;

use crate::common::lifecycle::despawn_marked;
use crate::common::state::GameState;

pub struct ProjectilesPlugin;

impl Plugin for ProjectilesPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<messages::LaunchRequest>()
            .add_message::<messages::UseAbility>()
            .add_message::<messages::ProjectileLaunched>()
            .add_message::<messages::ProjectileLanded>()
            .add_message::<messages::ProjectileDestroyed>();

        app.add_systems(
            Update,
            (
                launch::apply_launch_requests,
                ability::activate_abilities.after(launch::apply_launch_requests),
            )
                .run_if(in_state(GameState::InGame)),
        );

        app.add_systems(
            FixedUpdate,
            (
                flight::update_flight,
                flight::tick_flight_watchdogs.after(flight::update_flight),
            )
                .run_if(in_state(GameState::InGame)),
        );

        app.add_systems(PostUpdate, flight::mark_destroyed.before(despawn_marked));
    }
}

#[cfg(test)]
mod tests;
