#![warn(clippy::all, clippy::pedantic)]

use bevy_ecs::prelude::*;
use log::info;
use std::error;

use crate::Time;
use crate::brick::Brick;
use crate::components::{Board, EventLog, GameState, Input};
use crate::config::Config;
use crate::event::EventType;
use crate::sound::AudioState;
use crate::systems::{self, emit, spawn_brick};

pub type AppResult<T> = std::result::Result<T, Box<dyn error::Error>>;

pub struct App {
    pub world: World,
    pub config: Config,
    pub should_quit: bool,
}

impl App {
    /// Build an app with an audio thread.
    #[must_use]
    pub fn new(config: Config) -> Self {
        let audio = AudioState::new(&config.audio);
        Self::with_audio(config, audio)
    }

    #[must_use]
    pub fn with_audio(config: Config, audio: AudioState) -> Self {
        let config = config.validated();
        let mut world = World::new();
        world.insert_resource(Time::new());
        world.insert_resource(audio);
        world.insert_resource(Input::default());
        world.insert_resource(GameState::default());
        world.insert_resource(EventLog::with_capacity(config.events.log_capacity));
        world.insert_resource(Board::new(config.board.columns, config.board.rows));

        Self {
            world,
            config,
            should_quit: false,
        }
    }

    /// Begin play: drop the first brick and let gravity run from here on.
    pub fn start(&mut self) {
        if self.world.resource::<GameState>().started {
            return;
        }
        self.world.resource_mut::<GameState>().started = true;
        emit(&mut self.world, None, EventType::GameStarted);
        info!("Game started");

        if self.active_brick().is_none() {
            spawn_brick(&mut self.world);
        }
    }

    pub fn quit(&mut self) {
        let brick = self.active_brick();
        emit(&mut self.world, brick.as_ref(), EventType::GameQuit);
        self.should_quit = true;
    }

    pub fn record_render(&mut self) {
        emit(&mut self.world, None, EventType::Render);
    }

    #[must_use]
    pub fn active_brick(&mut self) -> Option<Brick> {
        systems::active_brick(&mut self.world).map(|(_, brick)| brick)
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.world.resource::<GameState>().game_over
    }

    /// One game-logic step: input, gravity, then sounds for whatever happened.
    pub fn on_tick(&mut self, delta_seconds: f32) {
        self.world.resource_mut::<Time>().update();

        if self.world.resource::<GameState>().started {
            systems::input_system(&mut self.world);
            systems::game_tick_system(
                &mut self.world,
                delta_seconds,
                self.config.timing.gravity_seconds(),
            );
        }

        self.apply_audio_controls();

        let pending = self.world.resource_mut::<EventLog>().take_pending();
        let audio = self.world.resource::<AudioState>();
        for event in &pending {
            audio.play_event(event);
        }
    }

    fn apply_audio_controls(&mut self) {
        let (toggle_music, toggle_sound, volume_up, volume_down) = {
            let mut input = self.world.resource_mut::<Input>();
            let controls = (
                input.toggle_music,
                input.toggle_sound,
                input.volume_up,
                input.volume_down,
            );
            input.toggle_music = false;
            input.toggle_sound = false;
            input.volume_up = false;
            input.volume_down = false;
            controls
        };

        let mut audio = self.world.resource_mut::<AudioState>();
        if toggle_music {
            audio.toggle_music();
        }
        if toggle_sound {
            audio.toggle_sound();
        }
        if volume_up {
            let volume = audio.get_volume();
            audio.set_volume(volume + 0.1);
        }
        if volume_down {
            let volume = audio.get_volume();
            audio.set_volume(volume - 0.1);
        }
    }

    /// Clear the stage and start over, keeping the audio settings.
    pub fn reset(&mut self) {
        self.world.resource_mut::<GameState>().reset();
        self.world.resource_mut::<Board>().clear();
        self.world.resource_mut::<EventLog>().clear();
        self.world.insert_resource(Input::default());

        let stale: Vec<Entity> = self
            .world
            .query_filtered::<Entity, With<Brick>>()
            .iter(&self.world)
            .collect();
        for entity in stale {
            self.world.despawn(entity);
        }

        self.start();
    }
}
