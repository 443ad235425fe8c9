//! Round bookkeeping: the projectile queue, score and the two guard flags.
//!
//! - `loading`: a load is in progress (a projectile was handed to the launcher and has not
//!   launched yet). `begin_load` is a no-op while it is set.
//! - `awaiting_landing`: a landing was accepted and the queue advance is pending. Every
//!   further landing is rejected until the advance has run, so a re-signalled landing can
//!   never advance the queue twice.

use std::time::Duration;

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundOutcome {
    /// Every target died.
    Cleared,
    /// The queue ran out with targets still alive.
    Failed,
}

#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoundFinished {
    pub outcome: RoundOutcome,
    pub score: u32,
}

#[derive(Resource, Debug, Clone, Default)]
pub struct Round {
    queue: Vec<Entity>,
    current_index: usize,
    score: u32,
    targets_total: usize,
    targets_killed: usize,
    loading: bool,
    awaiting_landing: bool,
    /// Projectile whose landing advances the queue (armed on launch, consumed on landing).
    watching: Option<Entity>,
    advance: Option<Timer>,
    outcome: Option<RoundOutcome>,
}

impl Round {
    pub fn new(queue: Vec<Entity>, targets_total: usize) -> Self {
        Self { queue, targets_total, ..default() }
    }

    #[inline]
    pub fn queue(&self) -> &[Entity] {
        &self.queue
    }

    #[inline]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    #[inline]
    pub fn current(&self) -> Option<Entity> {
        self.queue.get(self.current_index).copied()
    }

    #[inline]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Projectiles not yet consumed, including the one currently loaded or flying.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.queue.len().saturating_sub(self.current_index)
    }

    #[inline]
    pub fn is_awaiting_landing(&self) -> bool {
        self.awaiting_landing
    }

    #[inline]
    pub fn outcome(&self) -> Option<RoundOutcome> {
        self.outcome
    }

    /// Queue consumed and nothing left in the air.
    #[inline]
    pub fn is_exhausted(&self, any_flying: bool) -> bool {
        self.current_index >= self.queue.len() && !any_flying
    }

    #[inline]
    pub fn all_targets_dead(&self) -> bool {
        self.targets_total > 0 && self.targets_killed >= self.targets_total
    }

    /// Start loading the projectile at `current_index`. `None` while a load is in progress or
    /// once the queue is consumed.
    pub fn begin_load(&mut self) -> Option<Entity> {
        if self.loading {
            return None;
        }
        let next = self.current()?;
        self.loading = true;
        Some(next)
    }

    /// The launcher refused the projectile; allow a later retry.
    pub fn abort_load(&mut self) {
        self.loading = false;
    }

    /// Arm the landing watch for the current projectile. Launches of anything else are ignored.
    pub fn on_launched(&mut self, projectile: Entity) -> bool {
        if self.current() != Some(projectile) {
            return false;
        }
        self.loading = false;
        self.watching = Some(projectile);
        true
    }

    /// Accept the first landing of the watched projectile and schedule the advance.
    pub fn on_landed(&mut self, projectile: Entity, delay: Duration) -> bool {
        if self.awaiting_landing || self.watching != Some(projectile) {
            return false;
        }
        self.awaiting_landing = true;
        self.watching = None;
        self.advance = Some(Timer::new(delay, TimerMode::Once));
        true
    }

    /// Tick the pending advance. Returns true on the tick that moved `current_index`; the caller
    /// then loads the next projectile and calls `finish_advance`.
    pub fn tick_advance(&mut self, delta: Duration) -> bool {
        let Some(timer) = self.advance.as_mut() else {
            return false;
        };
        timer.tick(delta);
        if !timer.is_finished() {
            return false;
        }
        self.advance = None;
        self.current_index += 1;
        true
    }

    pub fn finish_advance(&mut self) {
        self.awaiting_landing = false;
    }

    pub fn on_target_died(&mut self, score: u32) {
        self.score = self.score.saturating_add(score);
        self.targets_killed += 1;
    }

    /// Decide the outcome once. Returns it only on the call that decided it.
    pub fn settle(&mut self, any_flying: bool) -> Option<RoundOutcome> {
        if self.outcome.is_some() {
            return None;
        }
        let outcome = if self.all_targets_dead() {
            RoundOutcome::Cleared
        } else if self.is_exhausted(any_flying) && !self.awaiting_landing {
            RoundOutcome::Failed
        } else {
            return None;
        };
        self.outcome = Some(outcome);
        Some(outcome)
    }
}
