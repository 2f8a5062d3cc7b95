#![warn(clippy::all, clippy::pedantic)]

use bevy_ecs::prelude::*;
use log::{debug, info};

use crate::Time;
use crate::brick::{Brick, Position, Shape};
use crate::components::{Board, Controls, EventLog, GameState, Input};
use crate::event::{Event, EventType};
use crate::game::BLOCK_SIZE;

/// What happened to an attempted translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved,
    /// The brick would have left the play area
    OutOfBounds,
    /// The brick would have overlapped the stack
    Blocked,
}

/// Stamp an event with the game clock and record it.
pub fn emit(world: &mut World, brick: Option<&Brick>, kind: EventType) {
    let time = world
        .get_resource::<Time>()
        .map(Time::elapsed)
        .unwrap_or_default();

    let event = match brick {
        Some(brick) => Event::new(brick, kind, time),
        None => Event::without_brick(kind, time),
    };

    if let Some(mut log) = world.get_resource_mut::<EventLog>() {
        log.push(event);
    }
}

#[must_use]
pub fn active_brick(world: &mut World) -> Option<(Entity, Brick)> {
    let mut query = world.query::<(Entity, &Brick)>();
    query
        .iter(world)
        .next()
        .map(|(entity, brick)| (entity, brick.clone()))
}

/// Top-centre offset a new brick starts from.
#[must_use]
pub fn spawn_offset(board: &Board) -> Position {
    let column = (board.columns / 2).saturating_sub(2);
    let column = i16::try_from(column).unwrap_or(0);
    Position::new(column.saturating_mul(BLOCK_SIZE), 0)
}

pub fn spawn_brick(world: &mut World) -> bool {
    let offset = spawn_offset(world.resource::<Board>());
    place_brick(world, Brick::with_shape(Shape::random(), offset))
}

/// Make `brick` the falling piece, or end the game if the stage has no room for it.
pub fn place_brick(world: &mut World, brick: Brick) -> bool {
    // Keys held for the previous brick must not move the new one, but the
    // previous tick stays so releases still report their stop events
    if let Some(mut input) = world.get_resource_mut::<Input>() {
        input.current = Controls::default();
    }

    let stale: Vec<Entity> = world
        .query_filtered::<Entity, With<Brick>>()
        .iter(world)
        .collect();
    for entity in stale {
        world.despawn(entity);
    }

    if !world.resource::<Board>().fits(&brick) {
        info!("No space left for a new {:?} brick", brick.shape());
        emit(world, Some(&brick), EventType::NoSpaceAvailable);
        emit(world, Some(&brick), EventType::GameOver);
        world.resource_mut::<GameState>().game_over = true;
        return false;
    }

    {
        let mut game_state = world.resource_mut::<GameState>();
        game_state.bricks_dropped += 1;
        game_state.drop_timer = 0.0;
    }

    emit(world, Some(&brick), EventType::NewBrickDrop);
    world.spawn(brick);
    true
}

/// Translate `brick` by `offset` if it stays on the stage and clear of the stack.
pub fn try_move(world: &World, brick: &mut Brick, offset: Position) -> MoveOutcome {
    let board = world.resource::<Board>();

    brick.move_by(offset);
    let outcome = if !brick.inbound(board.area()) {
        MoveOutcome::OutOfBounds
    } else if !board.fits(brick) {
        MoveOutcome::Blocked
    } else {
        return MoveOutcome::Moved;
    };

    brick.move_by(-offset);
    outcome
}

/// Rotate on a copy and commit only if the result fits.
pub fn try_rotate(world: &World, brick: &mut Brick) -> bool {
    let board = world.resource::<Board>();

    let mut rotated = brick.clone();
    if rotated.rotate(board.area()) && board.fits(&rotated) {
        *brick = rotated;
        true
    } else {
        false
    }
}

// Move the brick one step and report it, the wall events are shared by every direction
fn step(world: &mut World, brick: &mut Brick, offset: Position, moving: EventType) -> bool {
    match try_move(world, brick, offset) {
        MoveOutcome::Moved => {
            emit(world, Some(&*brick), moving);
            true
        }
        MoveOutcome::OutOfBounds => {
            emit(world, Some(&*brick), EventType::BrickOutOfBounds);
            false
        }
        MoveOutcome::Blocked => {
            emit(world, Some(&*brick), EventType::BrickHitWall);
            false
        }
    }
}

pub fn input_system(world: &mut World) {
    let (current, previous) = {
        let input = world.resource::<Input>();
        (input.current, input.previous)
    };

    let game_over = world.resource::<GameState>().game_over;
    let Some((entity, mut brick)) = active_brick(world).filter(|_| !game_over) else {
        world.resource_mut::<Input>().advance();
        return;
    };

    // Keys released since the last tick
    let released = [
        (previous.up && !current.up, EventType::BrickStopMovingUp),
        (previous.down && !current.down, EventType::BrickStopMovingDown),
        (previous.left && !current.left, EventType::BrickStopMovingLeft),
        (previous.right && !current.right, EventType::BrickStopMovingRight),
        (previous.rotate && !current.rotate, EventType::BrickStopRotate),
    ];
    for (_, kind) in released.iter().filter(|(stopped, _)| *stopped) {
        emit(world, Some(&brick), *kind);
    }

    if current.rotate {
        if try_rotate(world, &mut brick) {
            emit(world, Some(&brick), EventType::BrickRotate);
        } else {
            emit(world, Some(&brick), EventType::BrickHitWall);
        }
    }

    if current.left {
        step(
            world,
            &mut brick,
            Position::new(-BLOCK_SIZE, 0),
            EventType::BrickMovingLeft,
        );
    } else if current.right {
        step(
            world,
            &mut brick,
            Position::new(BLOCK_SIZE, 0),
            EventType::BrickMovingRight,
        );
    }

    if current.up {
        step(
            world,
            &mut brick,
            Position::new(0, -BLOCK_SIZE),
            EventType::BrickMovingUp,
        );
    }

    let mut landed = false;
    if current.down {
        if try_move(world, &mut brick, Position::new(0, BLOCK_SIZE)) == MoveOutcome::Moved {
            emit(world, Some(&brick), EventType::BrickMovingDown);
            world.resource_mut::<GameState>().drop_timer = 0.0;
        } else {
            landed = true;
        }
    }

    world.entity_mut(entity).insert(brick.clone());
    world.resource_mut::<Input>().advance();

    if landed {
        lock_brick(world, entity, &brick);
    }
}

/// Gravity: pull the brick down one block every `gravity_seconds`.
pub fn game_tick_system(world: &mut World, delta_seconds: f32, gravity_seconds: f32) {
    {
        let game_state = world.resource::<GameState>();
        if game_state.game_over || !game_state.started {
            return;
        }
    }

    let due = {
        let mut game_state = world.resource_mut::<GameState>();
        game_state.drop_timer += delta_seconds;
        if game_state.drop_timer >= gravity_seconds {
            game_state.drop_timer = 0.0;
            true
        } else {
            false
        }
    };
    if !due {
        return;
    }

    let Some((entity, mut brick)) = active_brick(world) else {
        spawn_brick(world);
        return;
    };

    if try_move(world, &mut brick, Position::new(0, BLOCK_SIZE)) == MoveOutcome::Moved {
        world.entity_mut(entity).insert(brick);
    } else {
        lock_brick(world, entity, &brick);
    }
}

/// Land the brick on the stack, clear completed rows and drop the next brick.
pub fn lock_brick(world: &mut World, entity: Entity, brick: &Brick) {
    emit(world, Some(brick), EventType::BrickHitWall);

    world.despawn(entity);
    world.resource_mut::<Board>().lock(brick);

    let completed = world.resource::<Board>().completed_rows();
    for _ in &completed {
        emit(world, Some(brick), EventType::RowCompleted);
    }

    if !completed.is_empty() {
        let cleared = world.resource_mut::<Board>().clear_rows();
        world.resource_mut::<GameState>().add_rows(cleared);
        debug!("Cleared rows {completed:?}");
    }

    spawn_brick(world);
}
