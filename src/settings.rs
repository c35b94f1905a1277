//! Gameplay settings
//!
//! Read from JSON (a file on native, an inline `<script>` element on the web).
//! Missing fields fall back to defaults; out-of-range values are sanitized.

use serde::{Deserialize, Serialize};

use crate::Bounds;
use crate::consts::*;

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Playfield ===
    pub canvas_width: f32,
    pub canvas_height: f32,

    // === Timing ===
    /// Milliseconds between simulation ticks
    pub tick_interval_ms: u32,

    // === Player ===
    /// Units moved per tick on each held axis
    pub player_speed: f32,
    pub max_health: u32,
    pub starting_lives: u32,
    /// Scale diagonal movement back to `player_speed`
    pub normalize_diagonal: bool,

    // === Input ===
    /// Key (lowercased `KeyboardEvent.key`) that toggles pause
    pub pause_key: String,

    // === Determinism ===
    /// Fixed run seed; random per run when unset
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,
            tick_interval_ms: TICK_INTERVAL_MS,
            player_speed: PLAYER_SPEED,
            max_health: PLAYER_MAX_HEALTH,
            starting_lives: STARTING_LIVES,
            normalize_diagonal: false,
            pause_key: " ".to_string(),
            seed: None,
        }
    }
}

/// Per-run gameplay rules copied into the world
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rules {
    pub player_speed: f32,
    pub max_health: u32,
    pub starting_lives: u32,
    pub normalize_diagonal: bool,
}

impl Default for Rules {
    fn default() -> Self {
        Settings::default().rules()
    }
}

impl Settings {
    /// Parse settings from JSON and sanitize them
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        Ok(settings.sanitized())
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Clamp values into ranges the simulation can run with
    pub fn sanitized(mut self) -> Self {
        let min_extent = PLAYER_SIZE.max(ENEMY_SIZE).max(TREASURE_SIZE);
        if !self.canvas_width.is_finite() || self.canvas_width < min_extent {
            log::warn!("canvas_width {} too small, using {}", self.canvas_width, min_extent);
            self.canvas_width = min_extent;
        }
        if !self.canvas_height.is_finite() || self.canvas_height < min_extent {
            log::warn!("canvas_height {} too small, using {}", self.canvas_height, min_extent);
            self.canvas_height = min_extent;
        }
        if !self.player_speed.is_finite() || self.player_speed < 0.0 {
            self.player_speed = 0.0;
        }
        self.tick_interval_ms = self.tick_interval_ms.max(1);
        self.max_health = self.max_health.max(1);
        self.starting_lives = self.starting_lives.max(1);
        self.pause_key = self.pause_key.to_lowercase();
        self
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.canvas_width, self.canvas_height)
    }

    pub fn rules(&self) -> Rules {
        Rules {
            player_speed: self.player_speed,
            max_health: self.max_health,
            starting_lives: self.starting_lives,
            normalize_diagonal: self.normalize_diagonal,
        }
    }

    /// Element holding inline JSON settings on the page
    #[allow(dead_code)]
    const ELEMENT_ID: &'static str = "pixel-quest-settings";

    /// Load settings from the page (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let json = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(Self::ELEMENT_ID))
            .and_then(|el| el.text_content());

        if let Some(json) = json {
            match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from page");
                    return settings;
                }
                Err(e) => log::warn!("Ignoring invalid settings: {}", e),
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Load settings from an optional JSON file (native)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: Option<&std::path::Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };

        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Invalid settings in {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Could not read {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{ "player_speed": 6.0, "seed": 9 }"#).unwrap();
        assert_eq!(settings.player_speed, 6.0);
        assert_eq!(settings.seed, Some(9));
        assert_eq!(settings.canvas_width, CANVAS_WIDTH);
        assert_eq!(settings.starting_lives, STARTING_LIVES);
        assert!(!settings.normalize_diagonal);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(Settings::from_json("{ not json").is_err());
        assert!(Settings::from_json(r#"{ "max_health": "lots" }"#).is_err());
    }

    #[test]
    fn test_sanitize_clamps_ranges() {
        let settings = Settings {
            canvas_width: 10.0,
            canvas_height: f32::NAN,
            tick_interval_ms: 0,
            player_speed: -3.0,
            max_health: 0,
            starting_lives: 0,
            pause_key: "P".to_string(),
            ..Default::default()
        }
        .sanitized();

        assert_eq!(settings.canvas_width, 32.0);
        assert_eq!(settings.canvas_height, 32.0);
        assert_eq!(settings.tick_interval_ms, 1);
        assert_eq!(settings.player_speed, 0.0);
        assert_eq!(settings.max_health, 1);
        assert_eq!(settings.starting_lives, 1);
        assert_eq!(settings.pause_key, "p");
    }

    #[test]
    fn test_json_round_trip_preserves_rules() {
        let settings = Settings {
            normalize_diagonal: true,
            ..Default::default()
        };
        let json = settings.to_json().unwrap();
        let parsed = Settings::from_json(&json).unwrap();
        assert_eq!(parsed, settings);
        assert!(parsed.rules().normalize_diagonal);
    }
}
