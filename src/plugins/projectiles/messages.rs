//! Projectile lifecycle messages.
//!
//! Requests (`LaunchRequest`, `UseAbility`) are *intent* written by the launcher / input layer;
//! the projectile systems are the single writer of projectile state and publish the outcome
//! (`ProjectileLaunched`, `ProjectileLanded`, `ProjectileDestroyed`).
//!
//! Each outcome message is written at most once per transition, because it is only written
//! when the corresponding `ProjectileState` edge was actually taken.

use bevy::prelude::*;

#[derive(Message, Clone, Copy, Debug, PartialEq)]
pub struct LaunchRequest {
    pub projectile: Entity,
    pub velocity: Vec2,
}

#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct UseAbility {
    pub projectile: Entity,
}

#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProjectileLaunched {
    pub projectile: Entity,
}

#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProjectileLanded {
    pub projectile: Entity,
}

#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProjectileDestroyed {
    pub projectile: Entity,
}
