//! Game controller
//!
//! Owns the world and the held-key set. Everything from the outside (button
//! presses, key events, timer ticks) arrives as a `Command`; the controller
//! answers with what the platform should do with its interval timer.
//!
//! Each timer run gets a fresh id and every `Tick` carries the id of the run
//! that produced it. Ticks from a run that has since been stopped are dropped,
//! so a late tick can never touch a world that was reset or paused.

use crate::input::HeldKeys;
use crate::settings::Settings;
use crate::sim::{GamePhase, GameWorld, TickInput, autopilot_input, tick};
use crate::snapshot::FrameSnapshot;

/// Identifier of one interval timer run
pub type TimerId = u64;

/// Inputs to the controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Start a new run (only from Idle)
    Start,
    /// Pause/resume
    TogglePause,
    /// Back to Idle from anywhere
    Reset,
    KeyDown(String),
    KeyUp(String),
    /// Window blurred or tab hidden
    FocusLost,
    /// Let the AI drive instead of the held keys
    SetAutopilot(bool),
    /// Posted by the interval timer
    Tick { timer: TimerId },
}

/// What the platform should do with its interval timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerDirective {
    /// Start posting `Tick { timer }` every `interval_ms`
    Start { timer: TimerId, interval_ms: u32 },
    /// Clear the running interval
    Stop,
}

pub struct Controller {
    world: GameWorld,
    keys: HeldKeys,
    pause_key: String,
    interval_ms: u32,
    autopilot: bool,
    /// Timer run currently allowed to tick
    active_timer: Option<TimerId>,
    next_timer: TimerId,
}

impl Controller {
    pub fn new(settings: &Settings, seed: u64) -> Self {
        Self {
            world: GameWorld::new(settings, seed),
            keys: HeldKeys::new(),
            pause_key: settings.pause_key.to_lowercase(),
            interval_ms: settings.tick_interval_ms,
            autopilot: false,
            active_timer: None,
            next_timer: 1,
        }
    }

    /// Read-only view of the world
    pub fn world(&self) -> &GameWorld {
        &self.world
    }

    pub fn snapshot(&self) -> FrameSnapshot<'_> {
        FrameSnapshot::capture(&self.world)
    }

    pub fn phase(&self) -> GamePhase {
        self.world.phase()
    }

    pub fn active_timer(&self) -> Option<TimerId> {
        self.active_timer
    }

    pub fn autopilot(&self) -> bool {
        self.autopilot
    }

    /// Apply one command and report any timer change
    pub fn handle(&mut self, command: Command) -> Option<TimerDirective> {
        match command {
            Command::Start => {
                self.world.start();
            }
            Command::TogglePause => {
                self.world.toggle_pause();
            }
            Command::Reset => {
                self.world.reset();
            }
            Command::KeyDown(key) => {
                let key = key.to_lowercase();
                let fresh = self.keys.press(&key);
                // Auto-repeat sends more keydowns while held; only the first toggles
                if fresh && key == self.pause_key {
                    self.world.toggle_pause();
                }
            }
            Command::KeyUp(key) => {
                self.keys.release(&key);
            }
            Command::FocusLost => {
                self.keys.clear();
                if self.world.phase() == GamePhase::Playing {
                    log::info!("Auto-paused (focus lost)");
                    self.world.toggle_pause();
                }
            }
            Command::SetAutopilot(enabled) => {
                if self.autopilot != enabled {
                    log::info!("Autopilot {}", if enabled { "on" } else { "off" });
                }
                self.autopilot = enabled;
            }
            Command::Tick { timer } => {
                if self.active_timer != Some(timer) {
                    log::debug!("Dropping tick from stale timer {}", timer);
                    return None;
                }
                let input = self.sample_input();
                tick(&mut self.world, &input);
            }
        }

        self.sync_timer()
    }

    fn sample_input(&self) -> TickInput {
        if self.autopilot {
            autopilot_input(&self.world)
        } else {
            self.keys.sample()
        }
    }

    /// The timer runs exactly while the session is Playing
    fn sync_timer(&mut self) -> Option<TimerDirective> {
        let should_run = self.world.session.is_running();
        match (should_run, self.active_timer) {
            (true, None) => {
                let timer = self.next_timer;
                self.next_timer += 1;
                self.active_timer = Some(timer);
                log::debug!("Starting timer {}", timer);
                Some(TimerDirective::Start {
                    timer,
                    interval_ms: self.interval_ms,
                })
            }
            (false, Some(timer)) => {
                self.active_timer = None;
                log::debug!("Stopping timer {}", timer);
                Some(TimerDirective::Stop)
            }
            _ => None,
        }
    }
}
