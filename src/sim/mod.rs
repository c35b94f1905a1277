//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod spawn;
pub mod state;
pub mod tick;

pub use autopilot::autopilot_input;
pub use collision::{Bounded, Rect, overlaps};
pub use spawn::{spawn_enemies, spawn_treasures};
pub use state::{
    Direction, Enemy, EnemyKind, EnemyTemplate, GameEvent, GamePhase, GameWorld, Player, Session,
    Treasure, TreasureKind,
};
pub use tick::{TickInput, tick};
