//! Game state and core simulation types
//!
//! The whole mutable game lives in one `GameWorld`. Only the session actions
//! (`start`, `toggle_pause`, `reset`) and `tick` mutate it.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::{Bounded, Rect};
use super::spawn::{spawn_enemies, spawn_treasures};
use crate::Bounds;
use crate::consts::*;
use crate::settings::{Rules, Settings};

/// Session phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for start (initial and post-reset state)
    #[default]
    Idle,
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Lives exhausted, waiting for reset
    GameOver,
}

/// Facing of the player sprite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    #[default]
    Down,
    Left,
    Right,
}

/// The player avatar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub size: Vec2,
    pub health: u32,
    pub max_health: u32,
    /// Total experience, never reset during a run
    pub experience: u32,
    pub level: u32,
    pub direction: Direction,
}

impl Player {
    /// Spawn at the canvas center with full health.
    ///
    /// The center is the top-left corner, pulled back onto the canvas when
    /// the canvas is smaller than twice the player.
    pub fn new(bounds: &Bounds, max_health: u32) -> Self {
        let size = Vec2::splat(PLAYER_SIZE);
        Self {
            pos: bounds.clamp(bounds.center(), size),
            size,
            health: max_health,
            max_health,
            experience: 0,
            level: 1,
            direction: Direction::Down,
        }
    }

    /// Apply contact damage, floored at zero. Returns the health actually lost.
    pub fn take_damage(&mut self, damage: u32) -> u32 {
        let before = self.health;
        self.health = self.health.saturating_sub(damage);
        before - self.health
    }

    pub fn refill(&mut self) {
        self.health = self.max_health;
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.health == 0
    }

    /// Health as a 0-1 fraction
    pub fn health_fraction(&self) -> f32 {
        if self.max_health == 0 {
            return 0.0;
        }
        self.health as f32 / self.max_health as f32
    }

    /// Experience within the current HUD bar (0-99)
    pub fn experience_progress(&self) -> u32 {
        self.experience % EXPERIENCE_PER_BAR
    }
}

impl Bounded for Player {
    fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }
}

/// Enemy types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnemyKind {
    Goblin,
    Orc,
    Demon,
}

/// Fixed stats shared by every enemy of a kind
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyTemplate {
    pub health: u32,
    pub damage: u32,
    pub speed: f32,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 3] = [EnemyKind::Goblin, EnemyKind::Orc, EnemyKind::Demon];

    pub fn template(&self) -> EnemyTemplate {
        match self {
            EnemyKind::Goblin => EnemyTemplate {
                health: 30,
                damage: 15,
                speed: 1.0,
            },
            EnemyKind::Orc => EnemyTemplate {
                health: 50,
                damage: 25,
                speed: 0.8,
            },
            EnemyKind::Demon => EnemyTemplate {
                health: 80,
                damage: 35,
                speed: 1.2,
            },
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EnemyKind::Goblin => "goblin",
            EnemyKind::Orc => "orc",
            EnemyKind::Demon => "demon",
        }
    }
}

/// An enemy that chases the player and is consumed on contact
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub pos: Vec2,
    pub size: Vec2,
    /// Carried from the template; nothing damages enemies
    pub health: u32,
    pub damage: u32,
    pub speed: f32,
}

impl Enemy {
    pub fn new(kind: EnemyKind, pos: Vec2) -> Self {
        let template = kind.template();
        Self {
            kind,
            pos,
            size: Vec2::splat(ENEMY_SIZE),
            health: template.health,
            damage: template.damage,
            speed: template.speed,
        }
    }

    /// Step toward `target` at this enemy's speed, staying on the canvas
    pub fn pursue(&mut self, target: Vec2, bounds: &Bounds) {
        let delta = target - self.pos;
        let distance = delta.length();
        if distance > 0.0 {
            let step = delta / distance * self.speed;
            self.pos = bounds.clamp(self.pos + step, self.size);
        }
    }
}

impl Bounded for Enemy {
    fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }
}

/// Treasure types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TreasureKind {
    Gold,
    Gem,
    Crystal,
}

impl TreasureKind {
    pub const ALL: [TreasureKind; 3] = [
        TreasureKind::Gold,
        TreasureKind::Gem,
        TreasureKind::Crystal,
    ];

    /// Score and experience awarded on pickup
    pub fn value(&self) -> u32 {
        match self {
            TreasureKind::Gold => 10,
            TreasureKind::Gem => 25,
            TreasureKind::Crystal => 50,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TreasureKind::Gold => "gold",
            TreasureKind::Gem => "gem",
            TreasureKind::Crystal => "crystal",
        }
    }
}

/// A collectible treasure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Treasure {
    pub kind: TreasureKind,
    pub pos: Vec2,
    pub size: Vec2,
    pub value: u32,
}

impl Treasure {
    pub fn new(kind: TreasureKind, pos: Vec2) -> Self {
        Self {
            kind,
            pos,
            size: Vec2::splat(TREASURE_SIZE),
            value: kind.value(),
        }
    }
}

impl Bounded for Treasure {
    fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }
}

/// Something that happened during the last tick (for HUD/audio collaborators)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    TreasureCollected { kind: TreasureKind, value: u32 },
    PlayerHit { kind: EnemyKind, damage: u32 },
    LifeLost { lives_left: u32 },
    GameOver { score: u64 },
    LevelCleared { level: u32 },
}

/// Session counters and phase
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub phase: GamePhase,
    pub score: u64,
    pub level: u32,
    pub lives: u32,
}

impl Session {
    pub fn new(lives: u32) -> Self {
        Self {
            phase: GamePhase::Idle,
            score: 0,
            level: STARTING_LEVEL,
            lives,
        }
    }

    /// True once started, until reset (stays true through game over)
    pub fn is_playing(&self) -> bool {
        self.phase != GamePhase::Idle
    }

    pub fn is_paused(&self) -> bool {
        self.phase == GamePhase::Paused
    }

    pub fn game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Whether the simulation step should run
    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Playing
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameWorld {
    /// Seed of the current run
    pub seed: u64,
    pub bounds: Bounds,
    pub rules: Rules,
    pub session: Session,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub treasures: Vec<Treasure>,
    /// Events produced by the most recent executed tick
    pub events: Vec<GameEvent>,
    /// Executed simulation ticks since start
    pub time_ticks: u64,
    rng: Pcg32,
}

impl GameWorld {
    /// Create an idle world (no entities until `start`)
    pub fn new(settings: &Settings, seed: u64) -> Self {
        let bounds = settings.bounds();
        let rules = settings.rules();
        Self {
            seed,
            bounds,
            rules,
            session: Session::new(rules.starting_lives),
            player: Player::new(&bounds, rules.max_health),
            enemies: Vec::new(),
            treasures: Vec::new(),
            events: Vec::new(),
            time_ticks: 0,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.session.phase
    }

    /// Idle -> Playing. Returns false (and changes nothing) from any other phase.
    pub fn start(&mut self) -> bool {
        if self.session.phase != GamePhase::Idle {
            log::debug!("Start ignored in {:?}", self.session.phase);
            return false;
        }

        self.session = Session::new(self.rules.starting_lives);
        self.session.phase = GamePhase::Playing;
        self.player = Player::new(&self.bounds, self.rules.max_health);
        self.events.clear();
        self.time_ticks = 0;
        self.populate(BASE_ENEMY_COUNT, BASE_TREASURE_COUNT);

        log::info!(
            "Game started: {} enemies, {} treasures",
            self.enemies.len(),
            self.treasures.len()
        );
        true
    }

    /// Playing <-> Paused. No-op (returns false) outside those phases.
    pub fn toggle_pause(&mut self) -> bool {
        self.session.phase = match self.session.phase {
            GamePhase::Playing => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Playing,
            other => {
                log::debug!("Pause toggle ignored in {:?}", other);
                return false;
            }
        };
        log::info!("Phase -> {:?}", self.session.phase);
        true
    }

    /// Any phase -> Idle with fresh counters. Entities are left in place.
    pub fn reset(&mut self) {
        self.session = Session::new(self.rules.starting_lives);
        self.events.clear();
        log::info!("Game reset");
    }

    /// Replace enemies and treasures with a freshly rolled set
    pub fn populate(&mut self, enemy_count: usize, treasure_count: usize) {
        self.enemies = spawn_enemies(&mut self.rng, enemy_count, &self.bounds);
        self.treasures = spawn_treasures(&mut self.rng, treasure_count, &self.bounds);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world() -> GameWorld {
        GameWorld::new(&Settings::default(), 7)
    }

    #[test]
    fn test_new_world_is_idle() {
        let w = world();
        assert_eq!(w.phase(), GamePhase::Idle);
        assert!(!w.session.is_playing());
        assert_eq!(w.session.score, 0);
        assert_eq!(w.session.level, 1);
        assert_eq!(w.session.lives, 3);
        assert!(w.enemies.is_empty());
        assert!(w.treasures.is_empty());
        assert_eq!(w.player.pos, Vec2::new(400.0, 300.0));
        assert_eq!(w.player.direction, Direction::Down);
    }

    #[test]
    fn test_player_spawn_stays_on_small_canvas() {
        let json = r#"{ "canvas_width": 50, "canvas_height": 50 }"#;
        let settings = Settings::from_json(json).unwrap();
        let mut w = GameWorld::new(&settings, 7);
        let max = w.bounds.max_origin(w.player.size);
        assert_eq!(max, Vec2::new(18.0, 18.0));
        assert_eq!(w.player.pos, Vec2::new(18.0, 18.0));

        assert!(w.start());
        assert!(w.player.pos.x <= max.x && w.player.pos.y <= max.y);
        assert!(w.player.pos.x >= 0.0 && w.player.pos.y >= 0.0);
    }

    #[test]
    fn test_start_spawns_first_level() {
        let mut w = world();
        assert!(w.start());
        assert_eq!(w.phase(), GamePhase::Playing);
        assert!(w.session.is_playing());
        assert_eq!(w.enemies.len(), BASE_ENEMY_COUNT);
        assert_eq!(w.treasures.len(), BASE_TREASURE_COUNT);

        // Starting again while playing does nothing
        w.session.score = 40;
        assert!(!w.start());
        assert_eq!(w.session.score, 40);
    }

    #[test]
    fn test_toggle_pause_round_trip() {
        let mut w = world();
        w.start();
        let before = (w.session.score, w.session.level, w.session.lives);
        let player_pos = w.player.pos;

        assert!(w.toggle_pause());
        assert!(w.session.is_paused());
        assert!(w.toggle_pause());
        assert!(!w.session.is_paused());

        assert_eq!(w.phase(), GamePhase::Playing);
        assert_eq!((w.session.score, w.session.level, w.session.lives), before);
        assert_eq!(w.player.pos, player_pos);
    }

    #[test]
    fn test_toggle_pause_illegal_outside_play() {
        let mut w = world();
        assert!(!w.toggle_pause());
        assert_eq!(w.phase(), GamePhase::Idle);

        w.start();
        w.session.phase = GamePhase::GameOver;
        assert!(!w.toggle_pause());
        assert!(w.session.game_over());
        // Game over still counts as playing in the boolean view
        assert!(w.session.is_playing());
    }

    #[test]
    fn test_reset_from_any_phase() {
        for phase in [
            GamePhase::Idle,
            GamePhase::Playing,
            GamePhase::Paused,
            GamePhase::GameOver,
        ] {
            let mut w = world();
            w.start();
            w.session.phase = phase;
            w.session.score = 500;
            w.session.level = 4;
            w.session.lives = 1;

            w.reset();
            assert_eq!(w.phase(), GamePhase::Idle);
            assert!(!w.session.is_playing());
            assert!(!w.session.is_paused());
            assert!(!w.session.game_over());
            assert_eq!(w.session.score, 0);
            assert_eq!(w.session.level, 1);
            assert_eq!(w.session.lives, 3);
        }
    }

    #[test]
    fn test_game_over_requires_reset_before_start() {
        let mut w = world();
        w.start();
        w.session.phase = GamePhase::GameOver;
        assert!(!w.start());
        w.reset();
        assert!(w.start());
    }

    #[test]
    fn test_player_damage_floors_at_zero() {
        let mut p = Player::new(&Bounds::default(), 100);
        assert_eq!(p.take_damage(35), 35);
        assert_eq!(p.health, 65);
        assert_eq!(p.take_damage(80), 65);
        assert_eq!(p.health, 0);
        assert!(p.is_dead());
        p.refill();
        assert_eq!(p.health, 100);
    }

    #[test]
    fn test_experience_progress_wraps() {
        let mut p = Player::new(&Bounds::default(), 100);
        p.experience = 235;
        assert_eq!(p.experience_progress(), 35);
        assert_eq!(p.experience, 235);
    }

    #[test]
    fn test_enemy_pursuit_step() {
        let bounds = Bounds::default();
        let mut e = Enemy::new(EnemyKind::Goblin, Vec2::new(100.0, 100.0));
        e.pursue(Vec2::new(200.0, 100.0), &bounds);
        assert!((e.pos.x - 101.0).abs() < 1e-5);
        assert!((e.pos.y - 100.0).abs() < 1e-5);

        // Already on target: no movement
        let mut e = Enemy::new(EnemyKind::Demon, Vec2::new(50.0, 50.0));
        e.pursue(Vec2::new(50.0, 50.0), &bounds);
        assert_eq!(e.pos, Vec2::new(50.0, 50.0));
    }

    #[test]
    fn test_templates() {
        assert_eq!(EnemyKind::Orc.template().damage, 25);
        assert_eq!(EnemyKind::Demon.template().health, 80);
        assert_eq!(TreasureKind::Gem.value(), 25);
        assert_eq!(Treasure::new(TreasureKind::Crystal, Vec2::ZERO).value, 50);
    }
}
