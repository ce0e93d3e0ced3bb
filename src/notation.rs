//! Text notation for moves.
//!
//! A move is written `B/C QD`:
//! - `B` is the block (quadrant) 1-4, row-major: 1 2 on top, 3 4 below
//! - `C` is the cell 1-9 inside the block, row-major
//! - `Q` is the block to rotate, 1-4
//! - `D` is `L` (counter-clockwise) or `R` (clockwise), case-insensitive
//!
//! For example `1/5 3R` places in the center of the top-left block and turns
//! the bottom-left block clockwise.

use std::fmt;

use crate::board::{Direction, Loc, Move, Rotation};
use crate::constants::{QUAD_CELLS, QUAD_WIDTH, QUADRANTS};

/// Reasons a move string is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotationError {
    /// Not of the form `B/C QD`.
    Malformed,
    /// Block number outside 1-4.
    BadBlock(String),
    /// Cell number outside 1-9.
    BadCell(String),
    /// Rotation direction other than `L` or `R`.
    BadDirection(String),
    /// The target cell already holds a stone.
    Occupied,
}

impl fmt::Display for NotationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotationError::Malformed => write!(f, "expected a move like \"1/5 3R\""),
            NotationError::BadBlock(s) => write!(f, "block must be 1-{QUADRANTS}, got {s:?}"),
            NotationError::BadCell(s) => write!(f, "cell must be 1-{QUAD_CELLS}, got {s:?}"),
            NotationError::BadDirection(s) => write!(f, "direction must be L or R, got {s:?}"),
            NotationError::Occupied => write!(f, "that cell is already taken"),
        }
    }
}

impl std::error::Error for NotationError {}

/// Parse a 1-based number in `1..=max`.
fn parse_index(s: &str, max: usize) -> Option<usize> {
    s.parse::<usize>().ok().filter(|n| (1..=max).contains(n)).map(|n| n - 1)
}

/// Board location of a 0-based block and cell.
pub fn block_cell_to_loc(block: usize, cell: usize) -> Loc {
    Loc::new(
        QUAD_WIDTH * (block % 2) + cell % QUAD_WIDTH,
        QUAD_WIDTH * (block / 2) + cell / QUAD_WIDTH,
    )
}

/// Parse a move string such as `"2/9 4L"`.
pub fn parse_move(text: &str) -> Result<Move, NotationError> {
    let parts: Vec<&str> = text.split_whitespace().collect();
    let [place, turn] = parts.as_slice() else {
        return Err(NotationError::Malformed);
    };

    let (block, cell) = place.split_once('/').ok_or(NotationError::Malformed)?;
    let block = parse_index(block, QUADRANTS).ok_or_else(|| NotationError::BadBlock(block.into()))?;
    let cell = parse_index(cell, QUAD_CELLS).ok_or_else(|| NotationError::BadCell(cell.into()))?;

    let mut chars = turn.chars();
    let (Some(q), Some(d), None) = (chars.next(), chars.next(), chars.next()) else {
        return Err(NotationError::Malformed);
    };
    let quadrant = parse_index(q.encode_utf8(&mut [0; 4]), QUADRANTS)
        .ok_or_else(|| NotationError::BadBlock(q.to_string()))?;
    let direction = match d.to_ascii_lowercase() {
        'l' => Direction::CounterClockwise,
        'r' => Direction::Clockwise,
        _ => return Err(NotationError::BadDirection(d.to_string())),
    };

    Ok(Move::new(
        block_cell_to_loc(block, cell),
        Rotation::new(quadrant, direction),
    ))
}

/// Format a move in the same notation. A move with no rotation prints only `B/C`.
pub fn format_move(mv: &Move) -> String {
    let block = mv.loc.quadrant() + 1;
    let cell = mv.loc.offset() + 1;
    match mv.rotation {
        Some(rotation) => {
            let dir = match rotation.direction {
                Direction::CounterClockwise => 'L',
                Direction::Clockwise => 'R',
            };
            format!("{block}/{cell} {}{dir}", rotation.quadrant + 1)
        }
        None => format!("{block}/{cell}"),
    }
}
