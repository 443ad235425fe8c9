//! Damage plugin: derives damage from physics contacts and routes it into the
//! structure / target health contracts.
//!
//! ```text
//! FixedPostUpdate
//!   record_impact_velocities (PhysicsSystems::First)  LinearVelocity -> ImpactVelocity
//!   avian: step, CollisionStart messages (bodies with CollisionEventsEnabled)
//!   resolve_collision_damage (after PhysicsSystems::StepSimulation)
//!     - owner = body or collider
//!     - snapshot pre-step speed and mass of both sides
//!     - |speedA - speedB| < threshold -> nothing
//!     - else each damageable side takes speed(other) * sqrt(mass(other)) * k
//!   DamageSink::apply -> Destructible/Target::take_damage
//!     - first terminal crossing -> DestructibleDestroyed / TargetDied
//! ```
//!
//! The resolver owns no entity state; everything it mutates is looked up per contact.

pub mod collision;
pub mod sink;

use avian2d::prelude::PhysicsSystems;
use bevy::prelude::*;

use crate::common::state::GameState;

pub fn plugin(app: &mut App) {
    app.add_systems(
        FixedPostUpdate,
        (
            collision::record_impact_velocities.in_set(PhysicsSystems::First),
            collision::resolve_collision_damage.after(PhysicsSystems::StepSimulation),
        )
            .run_if(in_state(GameState::InGame)),
    );
}
