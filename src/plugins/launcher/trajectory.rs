//! Trajectory preview.
//!
//! Forward semi-implicit Euler, the same integrator shape the physics step uses:
//! `v += g * dt; p += v * dt`, with `dt` the fixed timestep. A point is published every
//! `steps_per_point` steps. The sequence ends early at the first point outside the field;
//! that point is not published.

use bevy::prelude::*;

use crate::common::tunables::PlayField;

/// Restartable (`Clone`) and finite sequence of predicted positions.
#[derive(Debug, Clone)]
pub struct Trajectory {
    pos: Vec2,
    vel: Vec2,
    gravity: Vec2,
    dt: f32,
    steps_per_point: usize,
    remaining: usize,
    field: PlayField,
}

impl Trajectory {
    pub fn new(
        start: Vec2,
        velocity: Vec2,
        gravity: Vec2,
        dt: f32,
        steps_per_point: usize,
        max_points: usize,
        field: PlayField,
    ) -> Self {
        Self {
            pos: start,
            vel: velocity,
            gravity,
            dt: dt.max(0.0),
            steps_per_point: steps_per_point.max(1),
            remaining: max_points,
            field,
        }
    }

    #[inline]
    pub fn initial_velocity(&self) -> Vec2 {
        self.vel
    }
}

impl Iterator for Trajectory {
    type Item = Vec2;

    fn next(&mut self) -> Option<Vec2> {
        if self.remaining == 0 {
            return None;
        }

        for _ in 0..self.steps_per_point {
            self.vel += self.gravity * self.dt;
            self.pos += self.vel * self.dt;
        }

        if self.field.is_outside(self.pos) {
            self.remaining = 0;
            return None;
        }

        self.remaining -= 1;
        Some(self.pos)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining))
    }
}

/// Published preview for the current pull. Empty whenever nothing is being aimed.
#[derive(Resource, Debug, Default, Clone)]
pub struct TrajectoryPreview {
    points: Vec<Vec2>,
    initial_velocity: Option<Vec2>,
}

impl TrajectoryPreview {
    pub fn publish(&mut self, trajectory: Trajectory) {
        self.initial_velocity = Some(trajectory.initial_velocity());
        self.points.clear();
        self.points.extend(trajectory);
    }

    pub fn clear(&mut self) {
        self.points.clear();
        self.initial_velocity = None;
    }

    #[inline]
    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    #[inline]
    pub fn initial_velocity(&self) -> Option<Vec2> {
        self.initial_velocity
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
