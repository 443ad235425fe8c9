use std::collections::VecDeque;

use bevy::prelude::*;

/// Special ability carried by a projectile variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbilityKind {
    /// Multiply the current velocity once.
    Accelerant,
    /// Radial impulse + fixed damage around the projectile.
    Explosive,
}

/// Fixed physical profile of a projectile variant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectileProfile {
    pub radius: f32,
    pub density: f32,
    pub restitution: f32,
    pub friction: f32,
    pub ability: Option<AbilityKind>,
    pub color: Color,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProjectileVariant {
    #[default]
    Standard,
    Accelerant,
    Explosive,
}

impl ProjectileVariant {
    const STANDARD: ProjectileProfile = ProjectileProfile {
        radius: 25.0,
        density: 0.01,
        restitution: 0.5,
        friction: 0.5,
        ability: None,
        color: Color::srgb(0.85, 0.15, 0.15),
    };
    const ACCELERANT: ProjectileProfile = ProjectileProfile {
        radius: 22.0,
        density: 0.008,
        restitution: 0.5,
        friction: 0.5,
        ability: Some(AbilityKind::Accelerant),
        color: Color::srgb(0.95, 0.85, 0.2),
    };
    const EXPLOSIVE: ProjectileProfile = ProjectileProfile {
        radius: 30.0,
        density: 0.015,
        restitution: 0.3,
        friction: 0.5,
        ability: Some(AbilityKind::Explosive),
        color: Color::srgb(0.12, 0.12, 0.14),
    };

    pub fn profile(self) -> &'static ProjectileProfile {
        match self {
            Self::Standard => &Self::STANDARD,
            Self::Accelerant => &Self::ACCELERANT,
            Self::Explosive => &Self::EXPLOSIVE,
        }
    }

    /// Resolve a level-file identifier. Unknown identifiers fall back to `Standard`.
    pub fn from_id(id: &str) -> Self {
        match id {
            "standard" => Self::Standard,
            "accelerant" => Self::Accelerant,
            "explosive" => Self::Explosive,
            other => {
                warn!("unknown projectile variant {other:?}, using standard");
                Self::default()
            }
        }
    }
}

/// Flight lifecycle. `Idle -> Flying -> Landed -> Destroyed`, no back-edges.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProjectileState {
    #[default]
    Idle,
    Flying,
    Landed,
    Destroyed,
}

impl ProjectileState {
    /// `Idle -> Flying`. Returns false (and changes nothing) from any other state.
    #[inline]
    pub fn launch(&mut self) -> bool {
        if *self != Self::Idle {
            return false;
        }
        *self = Self::Flying;
        true
    }

    /// `Flying -> Landed`. Re-entry from `Landed`/`Destroyed` (or a stray call while `Idle`)
    /// is a no-op.
    #[inline]
    pub fn land(&mut self) -> bool {
        if *self != Self::Flying {
            return false;
        }
        *self = Self::Landed;
        true
    }

    /// Any state `-> Destroyed`, once.
    #[inline]
    pub fn destroy(&mut self) -> bool {
        if *self == Self::Destroyed {
            return false;
        }
        *self = Self::Destroyed;
        true
    }
}

#[derive(Component, Debug, Clone)]
pub struct Projectile {
    pub variant: ProjectileVariant,
    ability_used: bool,
    /// Seconds spent in `Flying` so far.
    pub flight_secs: f32,
}

impl Projectile {
    pub fn new(variant: ProjectileVariant) -> Self {
        Self { variant, ability_used: false, flight_secs: 0.0 }
    }

    #[inline]
    pub fn ability_used(&self) -> bool {
        self.ability_used
    }

    /// Consume the one-shot ability. Only valid once, and only while `Flying`.
    ///
    /// The flag flips even for variants without an ability.
    pub fn try_use_ability(&mut self, state: ProjectileState) -> bool {
        if self.ability_used || state != ProjectileState::Flying {
            return false;
        }
        self.ability_used = true;
        true
    }
}

/// Most-recent-N positions, for rendering only.
#[derive(Component, Debug, Clone, Default)]
pub struct Trail {
    points: VecDeque<Vec2>,
}

impl Trail {
    pub fn push(&mut self, p: Vec2, max_len: usize) {
        self.points.push_back(p);
        while self.points.len() > max_len {
            self.points.pop_front();
        }
    }

    pub fn points(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.points.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Fail-safe: forces a landing once it expires, whatever the speed.
///
/// Inserted on launch, removed on landing; despawning the projectile cancels it.
#[derive(Component, Debug, Clone, Deref, DerefMut)]
pub struct FlightWatchdog(pub Timer);

impl FlightWatchdog {
    pub fn from_seconds(secs: f32) -> Self {
        Self(Timer::from_seconds(secs, TimerMode::Once))
    }
}
