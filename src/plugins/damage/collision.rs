use avian2d::prelude::*;
use bevy::ecs::message::MessageReader;
use bevy::platform::collections::HashSet;
use bevy::prelude::*;

use crate::common::tunables::{DamageTunables, Tunables};

use super::sink::DamageSink;

/// Velocity a body had when the current physics step began.
///
/// Contact messages arrive after the solver has already separated the pair, so
/// `LinearVelocity` at that point is the rebound, not the impact.
#[derive(Component, Debug, Default, Clone, Copy, PartialEq)]
pub struct ImpactVelocity(pub Vec2);

pub fn record_impact_velocities(mut q_bodies: Query<(&LinearVelocity, &mut ImpactVelocity)>) {
    for (vel, mut impact) in &mut q_bodies {
        impact.0 = vel.0;
    }
}

/// Kinematic snapshot of one side of a contact, taken before any damage is applied.
///
/// Missing physics state reads as zero (e.g. a body torn down mid-frame).
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct BodySnapshot {
    pub speed: f32,
    pub mass: f32,
}

/// Damage dealt to each side of a contact, `(to_a, to_b)`.
///
/// Each side is hurt by what hit it: `speed(other) * sqrt(mass(other)) * multiplier`.
/// Returns `None` when the speed difference is below the chatter threshold.
pub fn contact_damage(a: BodySnapshot, b: BodySnapshot, cfg: &DamageTunables) -> Option<(f32, f32)> {
    let relative_speed = (a.speed - b.speed).abs();
    if relative_speed < cfg.min_relative_speed {
        return None;
    }

    let hit = |attacker: BodySnapshot| attacker.speed * attacker.mass.max(0.0).sqrt() * cfg.multiplier;
    Some((hit(b), hit(a)))
}

/// Gameplay owner of a contact side: the rigid body if known, otherwise the collider itself.
#[inline]
fn owners(ev: &CollisionStart) -> (Entity, Entity) {
    (ev.body1.unwrap_or(ev.collider1), ev.body2.unwrap_or(ev.collider2))
}

/// Unordered pair key for per-frame dedupe.
#[inline]
fn pair_key(a: Entity, b: Entity) -> (Entity, Entity) {
    if a <= b { (a, b) } else { (b, a) }
}

pub fn resolve_collision_damage(
    tunables: Res<Tunables>,
    mut started: MessageReader<CollisionStart>,
    q_bodies: Query<(Option<&ImpactVelocity>, Option<&LinearVelocity>, Option<&ComputedMass>)>,
    mut sink: DamageSink,
    // Per-frame dedupe: a pair is resolved once even if re-signalled.
    mut seen: Local<HashSet<(Entity, Entity)>>,
) {
    seen.clear();

    let snapshot = |e: Entity| -> BodySnapshot {
        q_bodies
            .get(e)
            .map(|(impact, vel, mass)| BodySnapshot {
                // Bodies without a recorded impact velocity (walls, ground) use the current one.
                speed: impact.map(|v| v.0).or(vel.map(|v| v.0)).map_or(0.0, Vec2::length),
                mass: mass.map_or(0.0, |m| m.value()),
            })
            .unwrap_or_default()
    };

    for ev in started.read() {
        let (a, b) = owners(ev);
        if !seen.insert(pair_key(a, b)) {
            continue;
        }

        let kind_a = sink.kind_of(a);
        let kind_b = sink.kind_of(b);
        if kind_a.is_none() && kind_b.is_none() {
            trace!("contact {a:?} <-> {b:?}: no damageable side");
            continue;
        }

        // Both snapshots are taken before either side is damaged.
        let (snap_a, snap_b) = (snapshot(a), snapshot(b));

        let Some((to_a, to_b)) = contact_damage(snap_a, snap_b, &tunables.damage) else {
            trace!(
                "contact {a:?} <-> {b:?}: relative speed {:.1} below threshold",
                (snap_a.speed - snap_b.speed).abs()
            );
            continue;
        };

        if kind_a.is_some() {
            sink.apply(a, to_a);
        }
        if kind_b.is_some() {
            sink.apply(b, to_b);
        }
        debug!("contact {a:?} <-> {b:?}: damage {to_a:.1} / {to_b:.1}");
    }
}
