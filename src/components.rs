#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Allow truncation when casting from usize to u16 since board dimensions are always small
    clippy::cast_possible_truncation,
    // Allow more than 3 bools in structs for input handling where bools represent distinct keys
    clippy::struct_excessive_bools
)]

use std::collections::VecDeque;

use bevy_ecs::prelude::*;
use log::{debug, trace};
use ratatui::style::Color;

use crate::brick::{Area, Brick};
use crate::event::{Event, EventType};
use crate::game::{BLOCK_SIZE, EVENT_LOG_CAPACITY};

/// The stack of locked sub-blocks, indexed as `cells[column][row]`.
#[derive(Resource, Debug, Clone)]
pub struct Board {
    pub columns: usize,
    pub rows: usize,
    pub cells: Vec<Vec<Option<Color>>>,
}

impl Board {
    #[must_use]
    pub fn new(columns: usize, rows: usize) -> Self {
        Self {
            columns,
            rows,
            cells: vec![vec![None; rows]; columns],
        }
    }

    /// A board covering `area`, rounded down to whole blocks.
    #[must_use]
    pub fn from_area(area: Area) -> Self {
        let block = BLOCK_SIZE.unsigned_abs();
        Self::new(
            usize::from(area.width / block),
            usize::from(area.height / block),
        )
    }

    /// Size of the play area in stage units.
    #[must_use]
    pub fn area(&self) -> Area {
        let block = BLOCK_SIZE.unsigned_abs();
        let to_units = |blocks: usize| {
            u16::try_from(blocks)
                .unwrap_or(u16::MAX)
                .saturating_mul(block)
        };
        Area::new(to_units(self.columns), to_units(self.rows))
    }

    pub fn clear(&mut self) {
        for column in &mut self.cells {
            column.fill(None);
        }
    }

    #[must_use]
    pub fn is_occupied(&self, column: usize, row: usize) -> bool {
        self.cells
            .get(column)
            .and_then(|c| c.get(row))
            .is_some_and(Option::is_some)
    }

    /// True if the brick is inside the play area and overlaps no locked block.
    #[must_use]
    pub fn fits(&self, brick: &Brick) -> bool {
        if !brick.inbound(self.area()) {
            return false;
        }

        brick
            .cells()
            .iter()
            .all(|cell| matches!(cell, Some((c, r)) if !self.is_occupied(*c, *r)))
    }

    pub fn lock(&mut self, brick: &Brick) {
        for (column, row) in brick.cells().into_iter().flatten() {
            if column < self.columns && row < self.rows {
                self.cells[column][row] = Some(brick.color());
            }
        }
    }

    /// Indices of the rows with every column filled, top to bottom.
    #[must_use]
    pub fn completed_rows(&self) -> Vec<usize> {
        (0..self.rows)
            .filter(|&row| (0..self.columns).all(|column| self.cells[column][row].is_some()))
            .collect()
    }

    /// Removes completed rows, dropping everything above them, and returns how many went.
    pub fn clear_rows(&mut self) -> usize {
        let completed = self.completed_rows();

        // Top to bottom keeps the indices of the remaining completed rows valid
        for &row in &completed {
            for column in &mut self.cells {
                column.remove(row);
                column.insert(0, None);
            }
        }

        completed.len()
    }
}

#[derive(Debug, Resource, Clone, Default)]
pub struct GameState {
    pub score: u32,
    pub rows_completed: u32,
    pub bricks_dropped: u32,
    pub started: bool,
    pub game_over: bool,
    pub drop_timer: f32,
    pub was_paused_for_resize: bool,
}

impl GameState {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Score stub: a flat amount per completed row.
    pub fn add_rows(&mut self, rows: usize) {
        let rows = u32::try_from(rows).unwrap_or(u32::MAX);
        self.rows_completed = self.rows_completed.saturating_add(rows);
        self.score = self
            .score
            .saturating_add(rows.saturating_mul(crate::game::POINTS_PER_ROW));
    }
}

/// Keys held during a single game tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Controls {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub rotate: bool,
}

// Input state for keyboard controls
#[derive(Resource, Debug, Clone, Default)]
pub struct Input {
    pub current: Controls,
    pub previous: Controls,
    pub toggle_music: bool,
    pub toggle_sound: bool,
    pub volume_up: bool,
    pub volume_down: bool,
}

impl Input {
    /// Close out a tick: the pressed keys become the previous ones.
    pub fn advance(&mut self) {
        self.previous = self.current;
        self.current = Controls::default();
    }
}

/// Recent events kept for display, plus a queue the audio layer drains.
#[derive(Resource, Debug, Clone)]
pub struct EventLog {
    capacity: usize,
    recent: VecDeque<Event>,
    pending: Vec<Event>,
}

impl Default for EventLog {
    fn default() -> Self {
        Self::with_capacity(EVENT_LOG_CAPACITY)
    }
}

impl EventLog {
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            recent: VecDeque::with_capacity(capacity),
            pending: Vec::new(),
        }
    }

    pub fn push(&mut self, event: Event) {
        // Render ticks would flood both the log file and the panel
        if event.kind() == EventType::Render {
            trace!("{event}");
            return;
        }

        debug!("{event}");
        if self.capacity > 0 {
            if self.recent.len() == self.capacity {
                self.recent.pop_front();
            }
            self.recent.push_back(event);
        }
        self.pending.push(event);
    }

    /// Oldest first.
    pub fn recent(&self) -> impl DoubleEndedIterator<Item = &Event> {
        self.recent.iter()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.recent.is_empty()
    }

    pub fn take_pending(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.pending)
    }

    pub fn clear(&mut self) {
        self.recent.clear();
        self.pending.clear();
    }
}
