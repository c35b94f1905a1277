//! Idle/demo mode - AI plays the game
//!
//! Produces the same `TickInput` a human would, so the simulation cannot tell
//! the difference.

use glam::Vec2;

use super::collision::Bounded;
use super::state::GameWorld;
use super::tick::TickInput;

/// Enemies whose centers come closer than this get avoided instead of ignored
const DANGER_RADIUS: f32 = 56.0;

fn center_of<T: Bounded>(entity: &T) -> Vec2 {
    let rect = entity.rect();
    rect.pos + rect.size / 2.0
}

/// Press the keys that move along `heading`, ignoring components too small to matter
fn keys_toward(heading: Vec2, dead_zone: f32) -> TickInput {
    TickInput {
        left: heading.x < -dead_zone,
        right: heading.x > dead_zone,
        up: heading.y < -dead_zone,
        down: heading.y > dead_zone,
    }
}

/// Pick the input for the next tick
pub fn autopilot_input(world: &GameWorld) -> TickInput {
    let me = center_of(&world.player);
    let dead_zone = (world.rules.player_speed / 2.0).max(0.5);

    // Run from the closest threatening enemy first
    let threat = world
        .enemies
        .iter()
        .map(|e| center_of(e) - me)
        .filter(|offset| offset.length() < DANGER_RADIUS)
        .min_by(|a, b| {
            a.length_squared()
                .partial_cmp(&b.length_squared())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
    if let Some(offset) = threat {
        let away = -offset.normalize_or_zero() * DANGER_RADIUS;
        return keys_toward(away, dead_zone);
    }

    // Otherwise go grab the nearest treasure
    world
        .treasures
        .iter()
        .map(|t| center_of(t) - me)
        .min_by(|a, b| {
            a.length_squared()
                .partial_cmp(&b.length_squared())
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|heading| keys_toward(heading, dead_zone))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::state::{Enemy, EnemyKind, Treasure, TreasureKind};
    use crate::sim::tick;

    fn world() -> GameWorld {
        let mut world = GameWorld::new(&Settings::default(), 5);
        world.start();
        world.enemies.clear();
        world.treasures.clear();
        world
    }

    #[test]
    fn test_heads_for_nearest_treasure() {
        let mut world = world();
        world
            .treasures
            .push(Treasure::new(TreasureKind::Gold, Vec2::new(700.0, 304.0)));
        world
            .treasures
            .push(Treasure::new(TreasureKind::Gem, Vec2::new(100.0, 100.0)));

        let input = autopilot_input(&world);
        assert!(input.right);
        assert!(!input.left && !input.up && !input.down);
    }

    #[test]
    fn test_idle_without_targets() {
        let world = world();
        assert_eq!(autopilot_input(&world), TickInput::default());
    }

    #[test]
    fn test_evades_close_enemy() {
        let mut world = world();
        world
            .treasures
            .push(Treasure::new(TreasureKind::Gold, Vec2::new(700.0, 304.0)));
        world
            .enemies
            .push(Enemy::new(EnemyKind::Orc, Vec2::new(440.0, 300.0)));

        let input = autopilot_input(&world);
        assert!(input.left);
        assert!(!input.right);
    }

    #[test]
    fn test_reaches_treasure() {
        let mut world = world();
        world
            .treasures
            .push(Treasure::new(TreasureKind::Crystal, Vec2::new(600.0, 450.0)));
        world
            .treasures
            .push(Treasure::new(TreasureKind::Gold, Vec2::new(20.0, 20.0)));

        for _ in 0..200 {
            let input = autopilot_input(&world);
            tick::tick(&mut world, &input);
            if world.session.score > 0 {
                break;
            }
        }
        assert_eq!(world.session.score, 50);
    }
}
