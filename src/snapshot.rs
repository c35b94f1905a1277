//! Read-only frame view handed to the renderer and HUD
//!
//! Borrows straight from the world, so building one per frame costs nothing
//! until it is serialized.

use serde::Serialize;

use crate::Bounds;
use crate::sim::{Enemy, GameEvent, GamePhase, GameWorld, Player, Treasure};

/// Enemies on the field above which the status line warns
const CROWDED_ENEMIES: usize = 5;
/// Treasures left below which the status line says the level is nearly done
const FEW_TREASURES: usize = 3;

/// Status line under the HUD bars
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HudStatus {
    CollectAll,
    AlmostDone,
    Danger,
    LevelComplete,
}

impl HudStatus {
    /// First match wins: level complete, then crowding, then nearly done
    pub fn for_counts(enemies_left: usize, treasures_left: usize) -> Self {
        if treasures_left == 0 {
            HudStatus::LevelComplete
        } else if enemies_left > CROWDED_ENEMIES {
            HudStatus::Danger
        } else if treasures_left < FEW_TREASURES {
            HudStatus::AlmostDone
        } else {
            HudStatus::CollectAll
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            HudStatus::CollectAll => "Collect all treasures!",
            HudStatus::AlmostDone => "Almost there!",
            HudStatus::Danger => "Danger! Many enemies nearby!",
            HudStatus::LevelComplete => "Level complete!",
        }
    }
}

/// Health bar color band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthTier {
    Healthy,
    Warning,
    Danger,
}

impl HealthTier {
    pub fn from_percent(percent: f32) -> Self {
        if percent > 60.0 {
            HealthTier::Healthy
        } else if percent > 30.0 {
            HealthTier::Warning
        } else {
            HealthTier::Danger
        }
    }
}

/// Values the HUD shows that are derived rather than stored
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Hud {
    /// Health bar fill, 0-100
    pub health_percent: f32,
    pub health_tier: HealthTier,
    /// Experience bar fill, 0-99
    pub experience_progress: u32,
    pub enemies_left: usize,
    pub treasures_left: usize,
    pub status: HudStatus,
    pub status_message: &'static str,
}

impl Hud {
    pub fn from_world(world: &GameWorld) -> Self {
        let health_percent = world.player.health_fraction() * 100.0;
        let enemies_left = world.enemies.len();
        let treasures_left = world.treasures.len();
        let status = HudStatus::for_counts(enemies_left, treasures_left);
        Self {
            health_percent,
            health_tier: HealthTier::from_percent(health_percent),
            experience_progress: world.player.experience_progress(),
            enemies_left,
            treasures_left,
            status,
            status_message: status.message(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FrameSnapshot<'a> {
    pub phase: GamePhase,
    /// RNG seed of this run, for replaying it
    pub seed: u64,
    pub is_playing: bool,
    pub is_paused: bool,
    pub game_over: bool,
    pub score: u64,
    pub level: u32,
    pub lives: u32,
    pub bounds: Bounds,
    pub player: &'a Player,
    pub enemies: &'a [Enemy],
    pub treasures: &'a [Treasure],
    pub events: &'a [GameEvent],
    pub hud: Hud,
}

impl<'a> FrameSnapshot<'a> {
    pub fn capture(world: &'a GameWorld) -> Self {
        let session = &world.session;
        Self {
            phase: session.phase,
            seed: world.seed,
            is_playing: session.is_playing(),
            is_paused: session.is_paused(),
            game_over: session.game_over(),
            score: session.score,
            level: session.level,
            lives: session.lives,
            bounds: world.bounds,
            player: &world.player,
            enemies: &world.enemies,
            treasures: &world.treasures,
            events: &world.events,
            hud: Hud::from_world(world),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;

    #[test]
    fn test_snapshot_reflects_world() {
        let mut world = GameWorld::new(&Settings::default(), 3);
        world.start();
        world.player.health = 40;
        world.player.experience = 130;
        world.session.score = 130;

        let snap = FrameSnapshot::capture(&world);
        assert_eq!(snap.phase, GamePhase::Playing);
        assert_eq!(snap.seed, 3);
        assert!(snap.is_playing && !snap.is_paused && !snap.game_over);
        assert_eq!(snap.hud.health_percent, 40.0);
        assert_eq!(snap.hud.experience_progress, 30);
        assert_eq!(snap.hud.enemies_left, 5);
        assert_eq!(snap.hud.treasures_left, 8);
        assert_eq!(snap.hud.health_tier, HealthTier::Warning);
        assert_eq!(snap.hud.status, HudStatus::CollectAll);
    }

    #[test]
    fn test_hud_status_line() {
        assert_eq!(HudStatus::for_counts(5, 8), HudStatus::CollectAll);
        assert_eq!(HudStatus::for_counts(5, 2), HudStatus::AlmostDone);
        assert_eq!(HudStatus::for_counts(6, 8), HudStatus::Danger);
        // Crowding outranks a nearly finished level
        assert_eq!(HudStatus::for_counts(6, 1), HudStatus::Danger);
        // An empty field always reads complete
        assert_eq!(HudStatus::for_counts(9, 0), HudStatus::LevelComplete);
    }

    #[test]
    fn test_health_tiers() {
        assert_eq!(HealthTier::from_percent(100.0), HealthTier::Healthy);
        assert_eq!(HealthTier::from_percent(61.0), HealthTier::Healthy);
        assert_eq!(HealthTier::from_percent(60.0), HealthTier::Warning);
        assert_eq!(HealthTier::from_percent(31.0), HealthTier::Warning);
        assert_eq!(HealthTier::from_percent(30.0), HealthTier::Danger);
        assert_eq!(HealthTier::from_percent(0.0), HealthTier::Danger);
    }

    #[test]
    fn test_hud_follows_world() {
        let mut world = GameWorld::new(&Settings::default(), 3);
        world.start();
        world.player.health = 20;
        world.treasures.truncate(2);
        let extra = world.enemies[0].clone();
        world.enemies.push(extra);

        let hud = FrameSnapshot::capture(&world).hud;
        assert_eq!(hud.health_tier, HealthTier::Danger);
        assert_eq!(hud.status, HudStatus::Danger);
        assert_eq!(hud.status_message, "Danger! Many enemies nearby!");

        world.enemies.clear();
        world.treasures.clear();
        let hud = Hud::from_world(&world);
        assert_eq!(hud.status, HudStatus::LevelComplete);
    }

    #[test]
    fn test_snapshot_json_shape() {
        let mut world = GameWorld::new(&Settings::default(), 3);
        world.start();
        let json = FrameSnapshot::capture(&world).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["phase"], "Playing");
        assert_eq!(value["lives"], 3);
        assert_eq!(value["seed"], 3);
        assert_eq!(value["hud"]["status"], "collect_all");
        assert_eq!(value["hud"]["health_tier"], "healthy");
        assert_eq!(value["player"]["direction"], "down");
        assert_eq!(value["enemies"].as_array().map(|a| a.len()), Some(5));
        assert!(value["treasures"][0]["kind"].is_string());
        assert!(value["events"].as_array().is_some_and(|a| a.is_empty()));
    }
}
