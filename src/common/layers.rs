//! Collision layers.

use avian2d::prelude::*;

#[derive(PhysicsLayer, Default, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layer {
    #[default]
    Default,
    Ground,
    Projectile,
    Structure,
    Target,
}

/// Everything a live gameplay body collides with.
pub const LIVE_FILTERS: [Layer; 4] = [Layer::Ground, Layer::Projectile, Layer::Structure, Layer::Target];

#[inline]
pub fn live_layers(membership: Layer) -> CollisionLayers {
    CollisionLayers::new(membership, LIVE_FILTERS)
}

/// "Disabled" without structural changes: empty filters means we collide with nothing.
#[inline]
pub fn inert_layers(membership: Layer) -> CollisionLayers {
    CollisionLayers::new(membership, [] as [Layer; 0])
}

/// Parked or retired: present in the world but colliding with nothing.
#[inline]
pub fn is_inert(layers: &CollisionLayers) -> bool {
    layers.filters == LayerMask::NONE
}
