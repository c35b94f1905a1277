//! Fixed timestep simulation tick
//!
//! One call advances the world by one interval. The stages run in a fixed
//! order and later stages read positions written by earlier ones.

use glam::Vec2;

use super::collision::Bounded;
use super::state::{Direction, GameEvent, GamePhase, GameWorld};
use crate::consts::*;

/// Directional input sampled for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

/// Advance the world by one tick. Does nothing unless the session is playing.
pub fn tick(world: &mut GameWorld, input: &TickInput) {
    if !world.session.is_running() {
        return;
    }

    world.events.clear();
    world.time_ticks += 1;

    move_player(world, input);

    let target = world.player.pos;
    for enemy in &mut world.enemies {
        enemy.pursue(target, &world.bounds);
    }

    collect_treasures(world);
    resolve_enemy_contacts(world);
    check_death(world);
    check_level_clear(world);
}

/// Translate the player from held keys.
///
/// Keys are checked left, right, up, down; on each axis the later key wins
/// the displacement and the last held key sets the facing.
fn move_player(world: &mut GameWorld, input: &TickInput) {
    let speed = world.rules.player_speed;
    let mut step = Vec2::ZERO;
    let mut direction = world.player.direction;

    if input.left {
        step.x = -speed;
        direction = Direction::Left;
    }
    if input.right {
        step.x = speed;
        direction = Direction::Right;
    }
    if input.up {
        step.y = -speed;
        direction = Direction::Up;
    }
    if input.down {
        step.y = speed;
        direction = Direction::Down;
    }

    if world.rules.normalize_diagonal && step.x != 0.0 && step.y != 0.0 {
        step = step.normalize() * speed;
    }

    let player = &mut world.player;
    player.pos = world.bounds.clamp(player.pos + step, player.size);
    player.direction = direction;
}

fn collect_treasures(world: &mut GameWorld) {
    let player_rect = world.player.rect();
    let mut collected = Vec::new();
    world.treasures.retain(|treasure| {
        let hit = treasure.rect().overlaps(&player_rect);
        if hit {
            collected.push((treasure.kind, treasure.value));
        }
        !hit
    });

    for (kind, value) in collected {
        world.session.score += u64::from(value);
        world.player.experience += value;
        log::debug!("Collected {} (+{})", kind.as_str(), value);
        world.events.push(GameEvent::TreasureCollected { kind, value });
    }
}

fn resolve_enemy_contacts(world: &mut GameWorld) {
    let player_rect = world.player.rect();
    let mut hits = Vec::new();
    world.enemies.retain(|enemy| {
        let hit = enemy.rect().overlaps(&player_rect);
        if hit {
            hits.push((enemy.kind, enemy.damage));
        }
        !hit
    });

    for (kind, damage) in hits {
        world.player.take_damage(damage);
        log::debug!(
            "Hit by {} for {} (health {})",
            kind.as_str(),
            damage,
            world.player.health
        );
        world.events.push(GameEvent::PlayerHit { kind, damage });
    }
}

fn check_death(world: &mut GameWorld) {
    if !world.player.is_dead() {
        return;
    }

    if world.session.lives > 1 {
        world.session.lives -= 1;
        world.player.refill();
        log::info!("Life lost, {} remaining", world.session.lives);
        world.events.push(GameEvent::LifeLost {
            lives_left: world.session.lives,
        });
    } else {
        world.session.lives = 0;
        world.session.phase = GamePhase::GameOver;
        log::info!("Game over with score {}", world.session.score);
        world.events.push(GameEvent::GameOver {
            score: world.session.score,
        });
    }
}

/// Regenerate the level once every treasure is gone.
///
/// Spawn counts use the level being cleared, before the increment.
fn check_level_clear(world: &mut GameWorld) {
    if !world.treasures.is_empty() {
        return;
    }

    let cleared = world.session.level;
    let extra = cleared as usize;
    world.populate(BASE_ENEMY_COUNT + extra, BASE_TREASURE_COUNT + extra);
    world.session.level += 1;

    log::info!(
        "Level {} cleared: {} enemies, {} treasures",
        cleared,
        world.enemies.len(),
        world.treasures.len()
    );
    world.events.push(GameEvent::LevelCleared { level: cleared });
}
