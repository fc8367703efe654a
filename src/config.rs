//! Compile-time game constants. Geometry is expressed in board units: the
//! board is `WINDOW_SIZE` units square and split into cells of `SIZE` units.

use std::time::Duration;

/// Edge length of one cell.
pub const SIZE: i32 = 50;

pub const WINDOW_SIZE: i32 = 800;

/// Cells along one edge of the whole board, border ring included.
pub const BOARD_CELLS: i32 = WINDOW_SIZE / SIZE;

/// Usable cells along one edge of the play area.
pub const GRID_CELLS: i32 = 14;

/// Inclusive bounds of the play area on both axes.
pub const PLAY_MIN: i32 = SIZE;
pub const PLAY_MAX: i32 = WINDOW_SIZE - SIZE - 1;

pub const INITIAL_LENGTH: usize = 2;
pub const START_POSITION: (i32, i32) = (SIZE * 3, SIZE * 3);

/// A snake this long covers every playable cell.
pub const WIN_LENGTH: usize = (GRID_CELLS * GRID_CELLS) as usize;

pub const FOOD_SCORE: u64 = 3;
pub const SCORE_INTERVAL: Duration = Duration::from_secs(3);

pub const TICK_INTERVAL: Duration = Duration::from_millis(100);
pub const COLLISION_PAUSE: Duration = Duration::from_secs(1);
