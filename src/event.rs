#![warn(clippy::all, clippy::pedantic)]

//! Timestamped records of what happened to the brick and the game.

use std::fmt;
use std::time::Duration;

use crate::brick::{Brick, Position};

/// Every kind of occurrence the game loop reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EventType {
    /// Time to draw a frame
    Render,
    NewBrickDrop,
    BrickMovingUp,
    BrickStopMovingUp,
    BrickMovingDown,
    BrickStopMovingDown,
    BrickMovingLeft,
    BrickStopMovingLeft,
    BrickMovingRight,
    BrickStopMovingRight,
    BrickRotate,
    BrickStopRotate,
    /// The brick was blocked by the stack or landed on it
    BrickHitWall,
    /// A move would have taken the brick outside the play area
    BrickOutOfBounds,
    RowCompleted,
    /// No room left on the stage for a new brick
    NoSpaceAvailable,
    GameStarted,
    GameOver,
    /// The player closed the game
    GameQuit,
    #[default]
    Undefined,
}

impl EventType {
    pub const ALL: [EventType; 20] = [
        EventType::Render,
        EventType::NewBrickDrop,
        EventType::BrickMovingUp,
        EventType::BrickStopMovingUp,
        EventType::BrickMovingDown,
        EventType::BrickStopMovingDown,
        EventType::BrickMovingLeft,
        EventType::BrickStopMovingLeft,
        EventType::BrickMovingRight,
        EventType::BrickStopMovingRight,
        EventType::BrickRotate,
        EventType::BrickStopRotate,
        EventType::BrickHitWall,
        EventType::BrickOutOfBounds,
        EventType::RowCompleted,
        EventType::NoSpaceAvailable,
        EventType::GameStarted,
        EventType::GameOver,
        EventType::GameQuit,
        EventType::Undefined,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            EventType::Render => "RENDER",
            EventType::NewBrickDrop => "NEW_BRICK_DROP",
            EventType::BrickMovingUp => "BRICK_MOVING_UP",
            EventType::BrickStopMovingUp => "BRICK_STOP_MOVING_UP",
            EventType::BrickMovingDown => "BRICK_MOVING_DOWN",
            EventType::BrickStopMovingDown => "BRICK_STOP_MOVING_DOWN",
            EventType::BrickMovingLeft => "BRICK_MOVING_LEFT",
            EventType::BrickStopMovingLeft => "BRICK_STOP_MOVING_LEFT",
            EventType::BrickMovingRight => "BRICK_MOVING_RIGHT",
            EventType::BrickStopMovingRight => "BRICK_STOP_MOVING_RIGHT",
            EventType::BrickRotate => "BRICK_ROTATE",
            EventType::BrickStopRotate => "BRICK_STOP_ROTATE",
            EventType::BrickHitWall => "BRICK_HIT_WALL",
            EventType::BrickOutOfBounds => "BRICK_OUT_OF_BOUNDS",
            EventType::RowCompleted => "ROW_COMPLETED",
            EventType::NoSpaceAvailable => "NO_SPACE_AVAILABLE",
            EventType::GameStarted => "GAME_STARTED",
            EventType::GameOver => "GAME_OVER",
            EventType::GameQuit => "GAME_QUIT",
            EventType::Undefined => "UNDEFINED",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single point-in-time observation.
///
/// The brick positions are copied when the event is built, so moving the
/// brick afterwards never changes an event that already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Event {
    kind: EventType,
    time: Duration,
    brick_loc: [Position; 4],
}

impl Event {
    /// An `Undefined` event carrying the brick's current positions.
    #[must_use]
    pub fn from_brick(brick: &Brick, time: Duration) -> Self {
        Self::new(brick, EventType::Undefined, time)
    }

    #[must_use]
    pub fn new(brick: &Brick, kind: EventType, time: Duration) -> Self {
        let mut brick_loc = [Position::default(); 4];
        brick.get_position(&mut brick_loc);
        Self {
            kind,
            time,
            brick_loc,
        }
    }

    /// An event with no brick involved, positions stay zeroed.
    #[must_use]
    pub fn without_brick(kind: EventType, time: Duration) -> Self {
        Self {
            kind,
            time,
            brick_loc: [Position::default(); 4],
        }
    }

    #[must_use]
    pub fn kind(&self) -> EventType {
        self.kind
    }

    #[must_use]
    pub fn time(&self) -> Duration {
        self.time
    }

    #[must_use]
    pub fn brick_loc(&self) -> [Position; 4] {
        self.brick_loc
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} @ {}.{:03}s [",
            self.kind,
            self.time.as_secs(),
            self.time.subsec_millis()
        )?;
        for (i, p) in self.brick_loc.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{p}")?;
        }
        f.write_str("]")
    }
}
