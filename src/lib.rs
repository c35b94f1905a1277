//! Pixel Quest - A top-down treasure hunting arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, pursuit, collisions, session)
//! - `input`: Held-key tracking and per-tick input sampling
//! - `controller`: Command handling and interval timer control
//! - `snapshot`: Read-only frame view for the renderer/HUD
//! - `settings`: Gameplay configuration

pub mod controller;
pub mod input;
pub mod settings;
pub mod sim;
pub mod snapshot;

pub use controller::{Command, Controller, TimerDirective};
pub use input::HeldKeys;
pub use settings::Settings;
pub use snapshot::FrameSnapshot;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Canvas dimensions
    pub const CANVAS_WIDTH: f32 = 800.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;

    /// Interval between simulation ticks (~60 Hz)
    pub const TICK_INTERVAL_MS: u32 = 1000 / 60;

    /// Player defaults
    pub const PLAYER_SIZE: f32 = 32.0;
    pub const PLAYER_SPEED: f32 = 4.0;
    pub const PLAYER_MAX_HEALTH: u32 = 100;
    /// Experience shown per HUD bar before it wraps
    pub const EXPERIENCE_PER_BAR: u32 = 100;

    /// Entity sizes
    pub const ENEMY_SIZE: f32 = 32.0;
    pub const TREASURE_SIZE: f32 = 24.0;

    /// Session defaults
    pub const STARTING_LIVES: u32 = 3;
    pub const STARTING_LEVEL: u32 = 1;

    /// Spawn counts at level 1; each level adds one of each
    pub const BASE_ENEMY_COUNT: usize = 5;
    pub const BASE_TREASURE_COUNT: usize = 8;

    /// Enemies rolled closer than this to the canvas center get re-placed
    pub const SPAWN_EXCLUSION_RADIUS: f32 = 100.0;
    /// Re-placement ring around the canvas center
    pub const RESPAWN_MIN_RADIUS: f32 = 150.0;
    pub const RESPAWN_RING_WIDTH: f32 = 200.0;
}

/// Playfield extents (origin top-left)
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            width: consts::CANVAS_WIDTH,
            height: consts::CANVAS_HEIGHT,
        }
    }
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Canvas center (the player's spawn point)
    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Clamp a top-left position so a box of `size` stays on the canvas
    #[inline]
    pub fn clamp(&self, pos: Vec2, size: Vec2) -> Vec2 {
        Vec2::new(
            pos.x.clamp(0.0, (self.width - size.x).max(0.0)),
            pos.y.clamp(0.0, (self.height - size.y).max(0.0)),
        )
    }

    /// Largest top-left coordinate a box of `size` can occupy
    #[inline]
    pub fn max_origin(&self, size: Vec2) -> Vec2 {
        Vec2::new(
            (self.width - size.x).max(0.0),
            (self.height - size.y).max(0.0),
        )
    }
}
