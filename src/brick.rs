#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Allow sign loss when going from signed to unsigned types since we check values are non-negative before casting
    clippy::cast_sign_loss
)]

//! The falling piece: four square sub-blocks laid out from a fixed shape table.

use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub};

use bevy_ecs::prelude::*;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::widgets::Widget;

use crate::game::BLOCK_SIZE;

/// The seven brick shapes, in shape table order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    I,
    Z,
    S,
    T,
    L,
    J,
    O,
}

/// Cell indices of each shape in a 4x2 grid (row = index / 2, column = index % 2).
pub const SHAPE_TABLE: [[u8; 4]; 7] = [
    [1, 3, 5, 7], // I
    [2, 4, 5, 7], // Z
    [3, 5, 4, 6], // S
    [3, 5, 4, 7], // T
    [2, 3, 5, 7], // L
    [3, 5, 7, 6], // J
    [2, 3, 4, 5], // O
];

impl Shape {
    pub const ALL: [Shape; 7] = [
        Shape::I,
        Shape::Z,
        Shape::S,
        Shape::T,
        Shape::L,
        Shape::J,
        Shape::O,
    ];

    #[must_use]
    pub fn random() -> Self {
        Self::ALL[fastrand::usize(..Self::ALL.len())]
    }

    #[must_use]
    pub fn cells(self) -> [u8; 4] {
        SHAPE_TABLE[self as usize]
    }

    /// Offsets of the four sub-blocks relative to the brick origin.
    #[must_use]
    pub fn offsets(self) -> [Position; 4] {
        self.cells().map(|n| {
            let row = i16::from(n / 2);
            let col = i16::from(n % 2);
            Position::new(row * BLOCK_SIZE, col * BLOCK_SIZE)
        })
    }
}

/// A point on the stage, also used as a translation offset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i16,
    pub y: i16,
}

impl Position {
    #[must_use]
    pub const fn new(x: i16, y: i16) -> Self {
        Self { x, y }
    }
}

impl Add for Position {
    type Output = Position;

    fn add(self, rhs: Position) -> Position {
        Position::new(self.x.wrapping_add(rhs.x), self.y.wrapping_add(rhs.y))
    }
}

impl AddAssign for Position {
    fn add_assign(&mut self, rhs: Position) {
        *self = *self + rhs;
    }
}

impl Sub for Position {
    type Output = Position;

    fn sub(self, rhs: Position) -> Position {
        Position::new(self.x.wrapping_sub(rhs.x), self.y.wrapping_sub(rhs.y))
    }
}

impl Neg for Position {
    type Output = Position;

    fn neg(self) -> Position {
        Position::new(self.x.wrapping_neg(), self.y.wrapping_neg())
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

/// Size of a play area anchored at the origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Area {
    pub width: u16,
    pub height: u16,
}

impl Area {
    #[must_use]
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn contains(self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && i32::from(position.x) < i32::from(self.width)
            && i32::from(position.y) < i32::from(self.height)
    }
}

/// Map an integer to one of the brick fill colours.
#[must_use]
pub fn fill_color(n: u32) -> Color {
    match n % 7 {
        0 => Color::Cyan,
        1 => Color::Red,
        2 => Color::Green,
        3 => Color::Magenta,
        4 => Color::LightYellow,
        5 => Color::Blue,
        _ => Color::Yellow,
    }
}

/// A brick made of exactly four sub-blocks.
///
/// Positions are in stage units, one sub-block spans [`BLOCK_SIZE`] units.
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct Brick {
    blocks: [Position; 4],
    shape: Shape,
    color: Color,
}

impl Brick {
    /// Place a brick of the first table shape at `offset`.
    #[must_use]
    pub fn new(offset: Position) -> Self {
        Self::with_shape(Shape::I, offset)
    }

    #[must_use]
    pub fn with_shape(shape: Shape, offset: Position) -> Self {
        Self::with_color_seed(shape, offset, fastrand::u32(..))
    }

    #[must_use]
    pub fn with_color_seed(shape: Shape, offset: Position, seed: u32) -> Self {
        Self {
            blocks: shape.offsets().map(|p| p + offset),
            shape,
            color: fill_color(seed),
        }
    }

    #[must_use]
    pub fn shape(&self) -> Shape {
        self.shape
    }

    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }

    /// Rotate 90° counterclockwise around the second sub-block.
    ///
    /// Nothing changes if any rotated sub-block would leave `area`.
    /// Returns whether the rotation was applied.
    pub fn rotate(&mut self, area: Area) -> bool {
        let pivot = self.blocks[1];
        let rotated = self.blocks.map(|p| {
            let d = p - pivot;
            pivot + Position::new(d.y, d.x.wrapping_neg())
        });

        if rotated.iter().all(|p| area.contains(*p)) {
            self.blocks = rotated;
            true
        } else {
            false
        }
    }

    /// Translate every sub-block by `offset`. No bounds are enforced here.
    pub fn move_by(&mut self, offset: Position) {
        for block in &mut self.blocks {
            *block += offset;
        }
    }

    #[must_use]
    pub fn inbound(&self, area: Area) -> bool {
        self.blocks.iter().all(|p| area.contains(*p))
    }

    pub fn get_position(&self, out: &mut [Position; 4]) {
        out.copy_from_slice(&self.blocks);
    }

    #[must_use]
    pub fn positions(&self) -> [Position; 4] {
        self.blocks
    }

    /// Board column and row of each sub-block, `None` for negative positions.
    #[must_use]
    pub fn cells(&self) -> [Option<(usize, usize)>; 4] {
        self.blocks.map(|p| {
            if p.x < 0 || p.y < 0 {
                None
            } else {
                Some(((p.x / BLOCK_SIZE) as usize, (p.y / BLOCK_SIZE) as usize))
            }
        })
    }
}

impl Widget for &Brick {
    /// Draw each sub-block as a two column cell inside `area`.
    fn render(self, area: Rect, buf: &mut Buffer) {
        for (col, row) in self.cells().into_iter().flatten() {
            let Ok(col) = u16::try_from(col) else {
                continue;
            };
            let Ok(row) = u16::try_from(row) else {
                continue;
            };

            let x = area.left().saturating_add(col.saturating_mul(2));
            let y = area.top().saturating_add(row);
            if y >= area.bottom() {
                continue;
            }

            for dx in 0..2 {
                let x = x.saturating_add(dx);
                if x >= area.right() {
                    break;
                }
                if let Some(cell) = buf.cell_mut((x, y)) {
                    cell.set_symbol("█");
                    cell.set_fg(self.color);
                    cell.set_bg(Color::Black);
                }
            }
        }
    }
}
