//! One-shot special abilities.
//!
//! `Projectile::try_use_ability` is the single gate: it rejects anything but the first request
//! while `Flying`. The effect itself is dispatched on the variant's profile.

use avian2d::prelude::*;
use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::common::health::DamageOutcome;
use crate::common::layers::is_inert;
use crate::common::tunables::{AbilityTunables, Tunables};
use crate::plugins::damage::sink::{DamageSink, Damageable};

use super::components::{AbilityKind, Projectile, ProjectileState};
use super::messages::UseAbility;

/// Body data the abilities read and write.
type BodyQuery<'w, 's> = Query<
    'w,
    's,
    (
        Entity,
        &'static Transform,
        &'static RigidBody,
        &'static mut LinearVelocity,
        Option<&'static ComputedMass>,
        Option<&'static CollisionLayers>,
    ),
>;

/// Radial impulse for a body at `body` from a blast at `center`.
///
/// Linear falloff: full `max_impulse` at the center, zero at `radius`. `None` outside.
#[inline]
pub fn explosion_impulse(center: Vec2, body: Vec2, radius: f32, max_impulse: f32) -> Option<Vec2> {
    let offset = body - center;
    let distance = offset.length();
    if distance >= radius {
        return None;
    }
    let magnitude = max_impulse * (1.0 - distance / radius);
    Some(offset.normalize_or_zero() * magnitude)
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BlastReport {
    pub bodies_pushed: usize,
    pub entities_damaged: usize,
}

fn detonate(
    source: Entity,
    center: Vec2,
    cfg: &AbilityTunables,
    bodies: &mut BodyQuery,
    sink: &mut DamageSink,
) -> BlastReport {
    let mut report = BlastReport::default();

    for (e, tf, body, mut vel, mass, layers) in bodies.iter_mut() {
        // Retired blocks and targets linger inert until despawn; the blast leaves them alone.
        if e == source || !body.is_dynamic() || layers.is_some_and(is_inert) {
            continue;
        }

        let Some(impulse) = explosion_impulse(
            center,
            tf.translation.truncate(),
            cfg.explosion_radius,
            cfg.explosion_impulse,
        ) else {
            continue;
        };

        let mass = mass.map_or(0.0, |m| m.value());
        if mass > 0.0 {
            vel.0 += impulse / mass;
        }
        report.bodies_pushed += 1;

        let amount = match sink.kind_of(e) {
            Some(Damageable::Structure) => cfg.explosion_structure_damage,
            Some(Damageable::Target) => cfg.explosion_target_damage,
            None => continue,
        };
        if matches!(sink.apply(e, amount), Some(DamageOutcome::Damaged | DamageOutcome::Destroyed)) {
            report.entities_damaged += 1;
        }
    }

    report
}

pub fn activate_abilities(
    tunables: Res<Tunables>,
    mut requests: MessageReader<UseAbility>,
    mut q_projectiles: Query<(&mut Projectile, &ProjectileState)>,
    mut bodies: BodyQuery,
    mut sink: DamageSink,
) {
    let cfg = &tunables.ability;

    for req in requests.read() {
        let Ok((mut projectile, state)) = q_projectiles.get_mut(req.projectile) else {
            continue;
        };

        if !projectile.try_use_ability(*state) {
            debug!("ability rejected for {:?} ({:?}, used: {})", req.projectile, state, projectile.ability_used());
            continue;
        }

        match projectile.variant.profile().ability {
            Some(AbilityKind::Accelerant) => {
                if let Ok((_, _, _, mut vel, ..)) = bodies.get_mut(req.projectile) {
                    vel.0 *= cfg.boost_factor;
                }
                info!("accelerant boost x{}", cfg.boost_factor);
            }
            Some(AbilityKind::Explosive) => {
                let center = bodies
                    .get(req.projectile)
                    .map(|(_, tf, ..)| tf.translation.truncate())
                    .unwrap_or(Vec2::ZERO);
                let report = detonate(req.projectile, center, cfg, &mut bodies, &mut sink);
                info!(
                    "explosion at ({:.0}, {:.0}): pushed {}, damaged {}",
                    center.x, center.y, report.bodies_pushed, report.entities_damaged
                );
            }
            None => {}
        }
    }
}
