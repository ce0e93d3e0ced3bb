//! Constants for board geometry, evaluation weights, and search parameters.
//!
//! The board is a fixed 6x6 grid made of four 3x3 quadrants. Cells are stored
//! quadrant by quadrant, and every logical coordinate is routed through
//! [`ROTATIONS`] so that turning a quadrant only changes its rotation state.

// =============================================================================
// Board Geometry
// =============================================================================

/// Board width (and height) in cells.
pub const BOARD_WIDTH: usize = 6;

/// Total number of cells on the board.
pub const BOARD_CELLS: usize = BOARD_WIDTH * BOARD_WIDTH;

/// Width of a single quadrant.
pub const QUAD_WIDTH: usize = BOARD_WIDTH / 2;

/// Number of cells in a quadrant.
pub const QUAD_CELLS: usize = QUAD_WIDTH * QUAD_WIDTH;

/// Number of quadrants, numbered 0-3 in row-major order.
pub const QUADRANTS: usize = 4;

/// Number of distinct rotation states of a quadrant (0, 90, 180, 270 degrees).
pub const ROTATION_STATES: usize = 4;

/// Stones in an unbroken line needed to win.
pub const NUM_TO_WIN: usize = 5;

/// Bits used per cell in the packed board.
pub const CELL_BITS: usize = 2;

// =============================================================================
// Rotation Indirection
// =============================================================================

/// Physical in-quadrant slot for each logical in-quadrant offset, per rotation
/// state. Offsets are row-major inside the quadrant; state `k` is `k` quarter
/// turns clockwise.
pub const ROTATIONS: [[u8; QUAD_CELLS]; ROTATION_STATES] = [
    [0, 1, 2, 3, 4, 5, 6, 7, 8],
    [6, 3, 0, 7, 4, 1, 8, 5, 2],
    [8, 7, 6, 5, 4, 3, 2, 1, 0],
    [2, 5, 8, 1, 4, 7, 0, 3, 6],
];

// =============================================================================
// Scan Lines
// =============================================================================

/// A straight line of cells scanned by the evaluator.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Line {
    /// Starting cell `(x, y)`.
    pub start: (usize, usize),
    /// Step added to `(x, y)` for each following cell.
    pub step: (isize, isize),
    /// Number of cells in the line.
    pub len: usize,
}

/// The diagonals long enough to hold a win: three falling, three rising.
const DIAGONALS: [Line; 6] = [
    Line { start: (0, 1), step: (1, 1), len: 5 },
    Line { start: (0, 0), step: (1, 1), len: 6 },
    Line { start: (1, 0), step: (1, 1), len: 5 },
    Line { start: (4, 0), step: (-1, 1), len: 5 },
    Line { start: (5, 0), step: (-1, 1), len: 6 },
    Line { start: (5, 1), step: (-1, 1), len: 5 },
];

/// Number of lines that can hold a win.
pub const LINE_COUNT: usize = 2 * BOARD_WIDTH + DIAGONALS.len();

/// All scanned lines: rows top to bottom, columns left to right, then diagonals.
pub const LINES: [Line; LINE_COUNT] = build_lines();

const fn build_lines() -> [Line; LINE_COUNT] {
    let mut lines = [Line { start: (0, 0), step: (0, 0), len: 0 }; LINE_COUNT];
    let mut i = 0;
    while i < BOARD_WIDTH {
        lines[i] = Line { start: (0, i), step: (1, 0), len: BOARD_WIDTH };
        lines[BOARD_WIDTH + i] = Line { start: (i, 0), step: (0, 1), len: BOARD_WIDTH };
        i += 1;
    }
    let mut d = 0;
    while d < DIAGONALS.len() {
        lines[2 * BOARD_WIDTH + d] = DIAGONALS[d];
        d += 1;
    }
    lines
}

// =============================================================================
// Evaluation and Search Defaults
// =============================================================================

/// Default streak weights. Row `i` scores windows `i + NUM_TO_WIN` long,
/// column `j` the number of stones already inside the window.
pub const DEFAULT_STREAK_SCORES: [[f64; BOARD_WIDTH]; BOARD_WIDTH - NUM_TO_WIN + 1] =
    [[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], [2.0, 3.0, 4.0, 5.0, 6.0, 7.0]];

/// Default search depth in plies for the AI player.
pub const AI_SEARCH_DEPTH: u32 = 3;
