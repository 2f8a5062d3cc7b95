pub mod loader;

use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use crate::game::{
    BOARD_COLUMNS, BOARD_ROWS, EVENT_LOG_CAPACITY, FRAME_MS, GRAVITY_MS, MAX_BOARD_BLOCKS,
    MIN_BOARD_COLUMNS, MIN_BOARD_ROWS, TICK_MS,
};

// Global configuration instance with thread-safe access
pub static CONFIG: once_cell::sync::Lazy<Arc<RwLock<Config>>> =
    once_cell::sync::Lazy::new(|| Arc::new(RwLock::new(Config::default())));

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub board: BoardConfig,
    pub timing: TimingConfig,
    pub audio: AudioConfig,
    pub events: EventsConfig,
}

// Play area size, in blocks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub columns: usize,
    pub rows: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            columns: BOARD_COLUMNS,
            rows: BOARD_ROWS,
        }
    }
}

impl BoardConfig {
    /// The same board with both dimensions pulled into the playable range.
    #[must_use]
    pub fn clamped(&self) -> Self {
        Self {
            columns: self.columns.clamp(MIN_BOARD_COLUMNS, MAX_BOARD_BLOCKS),
            rows: self.rows.clamp(MIN_BOARD_ROWS, MAX_BOARD_BLOCKS),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub frame_ms: u64,
    pub tick_ms: u64,
    pub gravity_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            frame_ms: FRAME_MS,
            tick_ms: TICK_MS,
            gravity_ms: GRAVITY_MS,
        }
    }
}

impl TimingConfig {
    #[must_use]
    pub fn frame_rate(&self) -> Duration {
        Duration::from_millis(self.frame_ms.max(1))
    }

    #[must_use]
    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_ms.max(1))
    }

    #[must_use]
    pub fn gravity_seconds(&self) -> f32 {
        Duration::from_millis(self.gravity_ms).as_secs_f32()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    pub music_enabled: bool,
    pub sound_enabled: bool,
    pub volume: f32,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            music_enabled: true,
            sound_enabled: true,
            volume: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventsConfig {
    // How many recent events the info panel keeps
    pub log_capacity: usize,
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self {
            log_capacity: EVENT_LOG_CAPACITY,
        }
    }
}

impl Config {
    /// Pull out-of-range values back into something the game can run with.
    #[must_use]
    pub fn validated(mut self) -> Self {
        let board = self.board.clamped();
        if board != self.board {
            log::warn!(
                "Board size {}x{} is out of range, using {}x{}",
                self.board.columns,
                self.board.rows,
                board.columns,
                board.rows
            );
            self.board = board;
        }
        self
    }

    /// Snapshot of the global configuration.
    #[must_use]
    pub fn current() -> Self {
        CONFIG.read().map(|c| c.clone()).unwrap_or_default()
    }

    // Force reload the configuration from file
    pub fn force_reload() -> bool {
        match loader::load_config_from_file() {
            Ok(new_config) => {
                if let Ok(mut config) = CONFIG.write() {
                    *config = new_config;
                    return true;
                }
                false
            }
            Err(e) => {
                log::warn!("Keeping previous configuration: {e}");
                false
            }
        }
    }
}
