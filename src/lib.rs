pub mod app;
pub mod brick;
pub mod components;
pub mod config;
pub mod event;
pub mod game;
pub mod sound;
pub mod systems;
pub mod ui;

#[cfg(test)]
mod tests;

use bevy_ecs::prelude::Resource;
use std::time::{Duration, Instant};

/// Frame timing plus the game clock events are stamped with.
#[derive(Resource, Debug, Clone)]
pub struct Time {
    delta: Duration,
    started: Instant,
    last_update: Instant,
}

impl Time {
    #[must_use]
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            delta: Duration::default(),
            started: now,
            last_update: now,
        }
    }

    pub fn update(&mut self) {
        let now = Instant::now();
        self.delta = now.duration_since(self.last_update);
        self.last_update = now;
    }

    #[must_use]
    pub fn delta(&self) -> Duration {
        self.delta
    }

    #[must_use]
    pub fn delta_seconds(&self) -> f32 {
        self.delta.as_secs_f32()
    }

    /// Time since the clock was created.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}
