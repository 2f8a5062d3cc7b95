#![warn(clippy::all, clippy::pedantic)]

// Brick geometry, in position units
pub const BLOCK_SIZE: i16 = 30;
pub const WALL_SIZE: i16 = 15;

// Default play area dimensions, in blocks
pub const BOARD_COLUMNS: usize = 10;
pub const BOARD_ROWS: usize = 20;

// Configurable board limits: a brick spans 4 columns and 2 rows, and every
// stage coordinate has to fit in an i16
pub const MIN_BOARD_COLUMNS: usize = 4;
pub const MIN_BOARD_ROWS: usize = 2;
pub const MAX_BOARD_BLOCKS: usize = (i16::MAX / BLOCK_SIZE) as usize;

// Game timing (milliseconds)
pub const FRAME_MS: u64 = 33; // ~30 FPS
pub const TICK_MS: u64 = 50; // Game logic updates less often
pub const GRAVITY_MS: u64 = 500; // One block down per gravity interval

// Score stub: points per completed row
pub const POINTS_PER_ROW: u32 = 100;

// Number of recent events kept for the info panel
pub const EVENT_LOG_CAPACITY: usize = 12;
