//! The launcher state machine, free of ECS plumbing.
//!
//! ```text
//! Idle --load--> Idle(loaded) --begin_pull--> Pulling --release--> Idle
//!                     ^                          |         (ReleaseOutcome::Launched)
//!                     +------- cancelled --------+
//! ```
//!
//! A successful release hands the projectile off and returns to `Idle` in the same call, so
//! the launched state is only ever visible as the `ReleaseOutcome`.
//!
//! Pointer positions are in world space (+Y up). The pull point starts at the anchor, so a
//! press without any drag releases as a cancel.

use bevy::prelude::*;

use crate::common::tunables::{LauncherTunables, PlayField};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LauncherState {
    #[default]
    Idle,
    Pulling,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReleaseOutcome {
    /// Not pulling; nothing happened.
    Ignored,
    /// Pull shorter than the minimum. The projectile stays loaded and `Idle`.
    Cancelled { projectile: Entity },
    Launched { projectile: Entity, velocity: Vec2 },
}

/// Clamp a raw pointer to a usable pull point.
///
/// Radial clamp to `max_pull` first, then the vertical band
/// `[ground_y + floor_margin, top - ceiling_margin]`. The vertical clamp may shorten the pull
/// further.
pub fn clamp_pull(pointer: Vec2, cfg: &LauncherTunables, field: &PlayField) -> Vec2 {
    let offset = (pointer - cfg.anchor).clamp_length_max(cfg.max_pull);
    let mut point = cfg.anchor + offset;

    let floor = field.ground_y + cfg.floor_margin;
    let ceiling = field.top - cfg.ceiling_margin;
    point.y = point.y.max(floor).min(ceiling);
    point
}

/// Release velocity for a pull `offset` (pull point minus anchor).
///
/// The sling flings opposite to the pull on both axes. The trajectory preview uses this same
/// function, so the preview's initial velocity is the launch velocity.
#[inline]
pub fn launch_velocity(offset: Vec2, force_factor: f32) -> Vec2 {
    -offset * force_factor
}

#[derive(Resource, Debug, Clone)]
pub struct Launcher {
    cfg: LauncherTunables,
    field: PlayField,
    state: LauncherState,
    loaded: Option<Entity>,
    pull_point: Vec2,
    drag_origin: Option<Vec2>,
}

impl Default for Launcher {
    fn default() -> Self {
        Self::new(LauncherTunables::default(), PlayField::default())
    }
}

impl Launcher {
    pub fn new(cfg: LauncherTunables, field: PlayField) -> Self {
        Self {
            pull_point: cfg.anchor,
            cfg,
            field,
            state: LauncherState::Idle,
            loaded: None,
            drag_origin: None,
        }
    }

    #[inline]
    pub fn state(&self) -> LauncherState {
        self.state
    }

    #[inline]
    pub fn loaded(&self) -> Option<Entity> {
        self.loaded
    }

    #[inline]
    pub fn anchor(&self) -> Vec2 {
        self.cfg.anchor
    }

    #[inline]
    pub fn rest_point(&self) -> Vec2 {
        self.cfg.rest_point()
    }

    #[inline]
    pub fn pull_point(&self) -> Vec2 {
        self.pull_point
    }

    /// Where the active drag started.
    #[inline]
    pub fn drag_origin(&self) -> Option<Vec2> {
        self.drag_origin
    }

    #[inline]
    pub fn is_pulling(&self) -> bool {
        self.state == LauncherState::Pulling
    }

    /// Velocity a release would produce right now.
    #[inline]
    pub fn pending_velocity(&self) -> Vec2 {
        launch_velocity(self.pull_point - self.cfg.anchor, self.cfg.force_factor)
    }

    /// True when `pointer` is inside the square grab zone around the anchor.
    pub fn in_grab_zone(&self, pointer: Vec2) -> bool {
        let d = (pointer - self.cfg.anchor).abs();
        d.x <= self.cfg.grab_half_extent && d.y <= self.cfg.grab_half_extent
    }

    /// Hand a projectile to the launcher. Only from `Idle` with nothing loaded.
    pub fn load(&mut self, projectile: Entity) -> bool {
        if self.loaded.is_some() || self.state != LauncherState::Idle {
            return false;
        }
        self.loaded = Some(projectile);
        self.pull_point = self.cfg.anchor;
        true
    }

    pub fn begin_pull(&mut self, pointer: Vec2) -> bool {
        if self.loaded.is_none() || self.state != LauncherState::Idle {
            return false;
        }
        self.state = LauncherState::Pulling;
        self.pull_point = self.cfg.anchor;
        self.drag_origin = Some(pointer);
        true
    }

    /// Move the pull to `pointer`. Returns the clamped point, or `None` when not pulling.
    pub fn update_pull(&mut self, pointer: Vec2) -> Option<Vec2> {
        if self.state != LauncherState::Pulling {
            return None;
        }
        self.pull_point = clamp_pull(pointer, &self.cfg, &self.field);
        Some(self.pull_point)
    }

    pub fn release(&mut self) -> ReleaseOutcome {
        if self.state != LauncherState::Pulling {
            return ReleaseOutcome::Ignored;
        }
        let Some(projectile) = self.loaded else {
            self.state = LauncherState::Idle;
            self.drag_origin = None;
            return ReleaseOutcome::Ignored;
        };

        let offset = self.pull_point - self.cfg.anchor;
        self.pull_point = self.cfg.anchor;
        self.drag_origin = None;
        self.state = LauncherState::Idle;

        if offset.length() < self.cfg.min_pull {
            return ReleaseOutcome::Cancelled { projectile };
        }

        self.loaded = None;
        ReleaseOutcome::Launched { projectile, velocity: launch_velocity(offset, self.cfg.force_factor) }
    }

    /// Drop the loaded projectile without launching (e.g. it was despawned).
    pub fn unload(&mut self) {
        self.loaded = None;
        self.state = LauncherState::Idle;
        self.pull_point = self.cfg.anchor;
        self.drag_origin = None;
    }
}
