//! Tunable gameplay constants.
//!
//! World units are pixels with +Y up. The play field spans `[left, right] x [0, top]`
//! and the ground surface sits at `ground_y`.
//!
//! Everything the simulation thresholds on lives here so it can be tuned (or overridden by
//! inserting a different `Tunables` resource) without touching the systems.

use bevy::prelude::*;

#[derive(Resource, Debug, Clone)]
pub struct Tunables {
    pub pixels_per_meter: f32,
    /// Downward gravity magnitude (px/s²).
    pub gravity: f32,
    pub field: PlayField,
    pub launcher: LauncherTunables,
    pub flight: FlightTunables,
    pub ability: AbilityTunables,
    pub damage: DamageTunables,
    pub round: RoundTunables,
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            pixels_per_meter: 50.0,
            gravity: 1500.0,
            field: PlayField::default(),
            launcher: LauncherTunables::default(),
            flight: FlightTunables::default(),
            ability: AbilityTunables::default(),
            damage: DamageTunables::default(),
            round: RoundTunables::default(),
        }
    }
}

/// Screen-space bounds of the level, in world coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayField {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub ground_y: f32,
    /// Structures that fall below this line are removed.
    pub kill_y: f32,
}

impl Default for PlayField {
    fn default() -> Self {
        Self { left: 0.0, right: 1200.0, top: 600.0, ground_y: 50.0, kill_y: -200.0 }
    }
}

impl PlayField {
    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new((self.left + self.right) * 0.5, self.top * 0.5)
    }

    /// True once `p` has hit the ground line or left the visible field.
    #[inline]
    pub fn is_outside(&self, p: Vec2) -> bool {
        p.y < self.ground_y || p.y > self.top || p.x < self.left || p.x > self.right
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LauncherTunables {
    /// Pull center.
    pub anchor: Vec2,
    /// A loaded projectile rests this far above the anchor.
    pub rest_offset: f32,
    pub min_pull: f32,
    pub max_pull: f32,
    /// Release speed per pixel of pull (1/s).
    pub force_factor: f32,
    /// The pull point may not come closer than this to the ground.
    pub floor_margin: f32,
    /// The pull point may not come closer than this to the top of the field.
    pub ceiling_margin: f32,
    /// Half extent of the square zone around the anchor that accepts a drag start.
    pub grab_half_extent: f32,
    pub spin: f32,
    pub preview_points: usize,
    /// Physics steps integrated between two published preview points.
    pub preview_steps_per_point: usize,
}

impl Default for LauncherTunables {
    fn default() -> Self {
        Self {
            anchor: Vec2::new(250.0, 200.0),
            rest_offset: 12.0,
            min_pull: 10.0,
            max_pull: 150.0,
            force_factor: 9.0,
            floor_margin: 30.0,
            ceiling_margin: 100.0,
            grab_half_extent: 250.0,
            spin: 6.0,
            preview_points: 50,
            preview_steps_per_point: 3,
        }
    }
}

impl LauncherTunables {
    #[inline]
    pub fn rest_point(&self) -> Vec2 {
        self.anchor + Vec2::Y * self.rest_offset
    }
}

/// Landing policy: a projectile lands when it is nearly still, or when it has been flying for a
/// while and is merely slow. The watchdog forces a landing regardless of speed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlightTunables {
    pub rest_speed: f32,
    pub relaxed_after_secs: f32,
    pub relaxed_speed: f32,
    pub watchdog_secs: f32,
    pub despawn_delay_secs: f32,
    pub trail_len: usize,
}

impl Default for FlightTunables {
    fn default() -> Self {
        Self {
            rest_speed: 30.0,
            relaxed_after_secs: 5.0,
            relaxed_speed: 90.0,
            watchdog_secs: 10.0,
            despawn_delay_secs: 3.0,
            trail_len: 20,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AbilityTunables {
    pub boost_factor: f32,
    pub explosion_radius: f32,
    /// Impulse magnitude at the blast center (falls off linearly to zero at the radius).
    pub explosion_impulse: f32,
    pub explosion_structure_damage: f32,
    pub explosion_target_damage: f32,
}

impl Default for AbilityTunables {
    fn default() -> Self {
        Self {
            boost_factor: 2.0,
            explosion_radius: 150.0,
            explosion_impulse: 3000.0,
            explosion_structure_damage: 50.0,
            explosion_target_damage: 80.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageTunables {
    /// Contacts whose speed difference is below this deal no damage.
    pub min_relative_speed: f32,
    pub multiplier: f32,
    /// How long a destroyed structure / dead target lingers before despawn.
    pub linger_secs: f32,
}

impl Default for DamageTunables {
    fn default() -> Self {
        Self { min_relative_speed: 120.0, multiplier: 0.02, linger_secs: 0.5 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundTunables {
    pub advance_delay_secs: f32,
}

impl Default for RoundTunables {
    fn default() -> Self {
        Self { advance_delay_secs: 1.0 }
    }
}
