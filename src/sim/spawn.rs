//! Procedural level population
//!
//! Rolls enemy and treasure placements from the world RNG. Enemies that land
//! on top of the player's spawn point get pushed out onto a ring around it.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use super::state::{Enemy, EnemyKind, Treasure, TreasureKind};
use crate::Bounds;
use crate::consts::*;

/// Uniform position for a box of `size` fully inside the canvas
fn random_origin<R: Rng>(rng: &mut R, bounds: &Bounds, size: Vec2) -> Vec2 {
    let max = bounds.max_origin(size);
    Vec2::new(rng.random::<f32>() * max.x, rng.random::<f32>() * max.y)
}

/// Spawn `count` enemies of random kind
pub fn spawn_enemies<R: Rng>(rng: &mut R, count: usize, bounds: &Bounds) -> Vec<Enemy> {
    let size = Vec2::splat(ENEMY_SIZE);
    let center = bounds.center();

    (0..count)
        .map(|_| {
            let kind = EnemyKind::ALL[rng.random_range(0..EnemyKind::ALL.len())];
            let mut pos = random_origin(rng, bounds, size);

            if pos.distance(center) < SPAWN_EXCLUSION_RADIUS {
                // Re-place on a ring around the center. Clamping can pull it
                // back in on small canvases.
                let angle = rng.random::<f32>() * TAU;
                let radius = RESPAWN_MIN_RADIUS + rng.random::<f32>() * RESPAWN_RING_WIDTH;
                pos = bounds.clamp(center + Vec2::from_angle(angle) * radius, size);
            }

            Enemy::new(kind, pos)
        })
        .collect()
}

/// Spawn `count` treasures of random kind
pub fn spawn_treasures<R: Rng>(
    rng: &mut R,
    count: usize,
    bounds: &Bounds,
) -> Vec<Treasure> {
    let size = Vec2::splat(TREASURE_SIZE);

    (0..count)
        .map(|_| {
            let kind = TreasureKind::ALL[rng.random_range(0..TreasureKind::ALL.len())];
            Treasure::new(kind, random_origin(rng, bounds, size))
        })
        .collect()
}
