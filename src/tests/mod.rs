#![warn(clippy::all, clippy::pedantic)]

pub mod brick_tests;
pub mod event_tests;

pub mod test_utils {
    use crate::Time;
    use crate::app::App;
    use crate::components::{Board, EventLog, GameState, Input};
    use crate::config::{AudioConfig, Config};
    use crate::event::EventType;
    use crate::sound::AudioState;
    use bevy_ecs::prelude::*;

    /// A world with every game resource and play already started.
    #[must_use]
    pub fn create_test_world() -> World {
        let mut world = World::new();
        world.insert_resource(Board::new(
            crate::game::BOARD_COLUMNS,
            crate::game::BOARD_ROWS,
        ));
        world.insert_resource(GameState {
            started: true,
            ..GameState::default()
        });
        world.insert_resource(Input::default());
        world.insert_resource(EventLog::with_capacity(256));
        world.insert_resource(Time::new());
        world
    }

    /// An app that never opens an audio device.
    #[must_use]
    pub fn create_test_app() -> App {
        App::with_audio(Config::default(), AudioState::silent(&AudioConfig::default()))
    }

    /// Kinds of the recorded events, oldest first.
    #[must_use]
    pub fn event_kinds(world: &World) -> Vec<EventType> {
        world
            .resource::<EventLog>()
            .recent()
            .map(crate::event::Event::kind)
            .collect()
    }

    // Helper to fill a board with a specific pattern for testing
    pub fn fill_test_board(board: &mut Board, cells: &[(usize, usize)]) {
        for &(column, row) in cells {
            if column < board.columns && row < board.rows {
                board.cells[column][row] = Some(ratatui::style::Color::Gray);
            }
        }
    }
}
