//! Shared `take_damage` entry point.
//!
//! Both damage producers (contact resolver, explosive ability) go through `DamageSink`, so the
//! terminal side effects live in exactly one place:
//! - `Destroyed` (first crossing): write the death message, stop collisions, schedule despawn.
//! - `AlreadyDestroyed`: nothing.

use bevy::ecs::message::MessageWriter;
use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use crate::common::health::DamageOutcome;
use crate::common::layers::{inert_layers, Layer};
use crate::common::lifecycle::DespawnTimer;
use crate::common::tunables::Tunables;
use crate::plugins::destructibles::{Destructible, DestructibleDestroyed};
use crate::plugins::targets::{Target, TargetDied};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Damageable {
    Structure,
    Target,
}

#[derive(SystemParam)]
pub struct DamageSink<'w, 's> {
    commands: Commands<'w, 's>,
    tunables: Res<'w, Tunables>,
    structures: Query<'w, 's, &'static mut Destructible>,
    targets: Query<'w, 's, &'static mut Target>,
    destroyed: MessageWriter<'w, DestructibleDestroyed>,
    died: MessageWriter<'w, TargetDied>,
}

impl DamageSink<'_, '_> {
    /// Which damage contract (if any) the entity carries.
    pub fn kind_of(&self, entity: Entity) -> Option<Damageable> {
        if self.structures.contains(entity) {
            Some(Damageable::Structure)
        } else if self.targets.contains(entity) {
            Some(Damageable::Target)
        } else {
            None
        }
    }

    /// Apply `amount` to `entity`. `None` when the entity is neither a structure nor a target.
    pub fn apply(&mut self, entity: Entity, amount: f32) -> Option<DamageOutcome> {
        if let Ok(mut structure) = self.structures.get_mut(entity) {
            let outcome = structure.take_damage(amount);
            if outcome == DamageOutcome::Destroyed {
                info!("{:?} structure {entity:?} destroyed", structure.material());
                self.destroyed.write(DestructibleDestroyed { entity });
                self.retire(entity, Layer::Structure);
            }
            return Some(outcome);
        }

        if let Ok(mut target) = self.targets.get_mut(entity) {
            let outcome = target.take_damage(amount);
            if outcome == DamageOutcome::Destroyed {
                let score = target.score_value();
                info!("{:?} target {entity:?} eliminated (+{score})", target.size());
                self.died.write(TargetDied { entity, score });
                self.retire(entity, Layer::Target);
            }
            return Some(outcome);
        }

        None
    }

    /// Terminal entities stop interacting immediately and linger briefly before despawn.
    fn retire(&mut self, entity: Entity, membership: Layer) {
        self.commands.entity(entity).insert((
            inert_layers(membership),
            DespawnTimer::from_seconds(self.tunables.damage.linger_secs),
        ));
    }
}
