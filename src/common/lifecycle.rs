//! Delayed removal of entities.
//!
//! A `DespawnTimer` is a one-shot scheduled despawn living on the entity it acts on, so
//! despawning the entity early (or removing the component) cancels it.
//!
//! We avoid despawning physics entities inside the fixed physics step.
//! An expired timer marks `PendingDespawn` and the actual despawn happens in PostUpdate,
//! after every other system had a chance to observe the marker.

use bevy::prelude::*;

#[derive(Component, Debug, Clone, Deref, DerefMut)]
pub struct DespawnTimer(pub Timer);

impl DespawnTimer {
    pub fn from_seconds(secs: f32) -> Self {
        Self(Timer::from_seconds(secs, TimerMode::Once))
    }
}

/// Marker: entity should be removed from the world at the end of this frame.
#[derive(Component, Debug, Clone, Copy)]
pub struct PendingDespawn;

pub fn tick_despawn_timers(
    time: Res<Time<Fixed>>,
    mut commands: Commands,
    mut q: Query<(Entity, &mut DespawnTimer), Without<PendingDespawn>>,
) {
    for (e, mut timer) in &mut q {
        timer.tick(time.delta());
        if timer.is_finished() {
            commands.entity(e).remove::<DespawnTimer>().insert(PendingDespawn);
        }
    }
}

/// Centralizing despawn in one system keeps structural changes predictable.
pub fn despawn_marked(mut commands: Commands, q: Query<Entity, With<PendingDespawn>>) {
    for e in &q {
        commands.entity(e).despawn();
    }
}
