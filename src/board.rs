//! Pentago board representation.
//!
//! The 36 cells are packed two bits apiece into a single `u128`, stored
//! quadrant by quadrant. Each quadrant carries a rotation state, and every
//! logical `(x, y)` lookup goes through [`ROTATIONS`], so a quarter turn is a
//! single counter update rather than nine cell moves.
//!
//! Search mutates one shared board in place. [`Board::placed`] and
//! [`Board::rotated`] hand out guards that undo the change when dropped, so
//! every exit from a search step leaves the board as it found it.

use std::fmt;
use std::ops::{Deref, DerefMut};

use crate::constants::{
    BOARD_CELLS, BOARD_WIDTH, CELL_BITS, QUAD_CELLS, QUAD_WIDTH, QUADRANTS, ROTATION_STATES,
    ROTATIONS,
};
use crate::eval::{Score, StreakScores, scan};

const CELL_MASK: u128 = 0b11;
const BLACK_CODE: u128 = 0b01;
const WHITE_CODE: u128 = 0b11;

/// A player's stone color. White scores positive, Black negative.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    Black,
    White,
}

impl Color {
    pub fn opponent(self) -> Color {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    /// `+1.0` for White, `-1.0` for Black.
    #[inline]
    pub fn sign(self) -> f64 {
        match self {
            Color::Black => -1.0,
            Color::White => 1.0,
        }
    }

    fn code(self) -> u128 {
        match self {
            Color::Black => BLACK_CODE,
            Color::White => WHITE_CODE,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Black => write!(f, "B"),
            Color::White => write!(f, "W"),
        }
    }
}

/// A logical board coordinate, `x` to the right and `y` downward.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Loc {
    pub x: usize,
    pub y: usize,
}

impl Loc {
    pub const fn new(x: usize, y: usize) -> Self {
        Loc { x, y }
    }

    /// Quadrant holding this cell, 0-3 in row-major order.
    #[inline]
    pub fn quadrant(self) -> usize {
        (self.y / QUAD_WIDTH) * 2 + self.x / QUAD_WIDTH
    }

    /// Row-major offset of this cell inside its quadrant.
    #[inline]
    pub fn offset(self) -> usize {
        (self.y % QUAD_WIDTH) * QUAD_WIDTH + self.x % QUAD_WIDTH
    }
}

/// Direction of a quarter turn.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    CounterClockwise,
    Clockwise,
}

impl Direction {
    pub const ALL: [Direction; 2] = [Direction::CounterClockwise, Direction::Clockwise];

    /// Rotation state delta: `+1` for clockwise, `-1` for counter-clockwise.
    #[inline]
    pub fn steps(self) -> i32 {
        match self {
            Direction::CounterClockwise => -1,
            Direction::Clockwise => 1,
        }
    }
}

/// A quarter turn of one quadrant.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Rotation {
    pub quadrant: usize,
    pub direction: Direction,
}

impl Rotation {
    pub const fn new(quadrant: usize, direction: Direction) -> Self {
        Rotation { quadrant, direction }
    }

    /// Every rotation in search order: quadrant by quadrant, counter-clockwise first.
    pub fn all() -> impl Iterator<Item = Rotation> {
        (0..QUADRANTS).flat_map(|q| Direction::ALL.into_iter().map(move |d| Rotation::new(q, d)))
    }
}

/// A full turn: a placement followed by an optional rotation.
///
/// The rotation is `None` when the placement alone ends the game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub loc: Loc,
    pub rotation: Option<Rotation>,
}

impl Move {
    pub fn new(loc: Loc, rotation: Rotation) -> Self {
        Move { loc, rotation: Some(rotation) }
    }

    pub fn place_only(loc: Loc) -> Self {
        Move { loc, rotation: None }
    }
}

/// A 6x6 Pentago board.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Board {
    /// Two bits per physical slot, slot `q * 9 + k` for quadrant `q`.
    cells: u128,
    /// Rotation state per quadrant, in quarter turns clockwise.
    rotation: [u8; QUADRANTS],
    /// Stones currently on the board.
    turns: usize,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    pub fn new() -> Self {
        Board {
            cells: 0,
            rotation: [0; QUADRANTS],
            turns: 0,
        }
    }

    /// Bit shift of the physical slot currently shown at `loc`.
    #[inline]
    fn shift(&self, loc: Loc) -> usize {
        debug_assert!(loc.x < BOARD_WIDTH && loc.y < BOARD_WIDTH, "{loc:?} off board");
        let quad = loc.quadrant();
        let slot = ROTATIONS[self.rotation[quad] as usize][loc.offset()] as usize;
        (quad * QUAD_CELLS + slot) * CELL_BITS
    }

    /// Get the stone at `loc`, or `None` if empty.
    #[inline]
    pub fn get(&self, loc: Loc) -> Option<Color> {
        match (self.cells >> self.shift(loc)) & CELL_MASK {
            BLACK_CODE => Some(Color::Black),
            WHITE_CODE => Some(Color::White),
            _ => None,
        }
    }

    /// Place a stone. The cell must be empty; this is not checked in release builds.
    #[inline]
    pub fn set(&mut self, loc: Loc, color: Color) {
        debug_assert!(self.get(loc).is_none(), "{loc:?} already occupied");
        self.cells |= color.code() << self.shift(loc);
        self.turns += 1;
    }

    /// Remove the stone at `loc`. Only valid for a cell previously [`set`](Self::set).
    #[inline]
    pub fn clear(&mut self, loc: Loc) {
        debug_assert!(self.get(loc).is_some(), "{loc:?} already empty");
        self.cells &= !(CELL_MASK << self.shift(loc));
        self.turns -= 1;
    }

    /// Turn quadrant `quadrant` by `steps` quarter turns (positive is clockwise).
    #[inline]
    pub fn rotate_quadrant(&mut self, quadrant: usize, steps: i32) {
        let state = self.rotation[quadrant] as i32 + steps;
        self.rotation[quadrant] = state.rem_euclid(ROTATION_STATES as i32) as u8;
    }

    /// Apply a single quarter turn.
    #[inline]
    pub fn rotate(&mut self, rotation: Rotation) {
        self.rotate_quadrant(rotation.quadrant, rotation.direction.steps());
    }

    /// Current rotation state of a quadrant, 0-3.
    pub fn rotation_state(&self, quadrant: usize) -> u8 {
        self.rotation[quadrant]
    }

    /// Number of stones on the board.
    pub fn turns(&self) -> usize {
        self.turns
    }

    pub fn is_full(&self) -> bool {
        self.turns >= BOARD_CELLS
    }

    /// Evaluate the position. See [`crate::eval`] for the scoring rules.
    pub fn evaluate(&self, scores: &StreakScores) -> Score {
        scan(self, scores)
    }

    /// Every empty cell, row by row.
    pub fn empty_cells(&self) -> Vec<Loc> {
        let mut out = Vec::with_capacity(BOARD_CELLS - self.turns);
        for y in 0..BOARD_WIDTH {
            for x in 0..BOARD_WIDTH {
                let loc = Loc::new(x, y);
                if self.get(loc).is_none() {
                    out.push(loc);
                }
            }
        }
        out
    }

    /// Play a full turn: place `color` at `loc`, then rotate unless the
    /// placement already decided the game.
    ///
    /// Returns the evaluation after the whole move.
    pub fn play_move(&mut self, color: Color, loc: Loc, rotation: Option<Rotation>) -> Score {
        self.set(loc, color);
        let placed = self.evaluate(&StreakScores::ZERO);
        match rotation {
            Some(rotation) if !placed.is_decided() => {
                self.rotate(rotation);
                self.evaluate(&StreakScores::ZERO)
            }
            _ => placed,
        }
    }

    /// Place a stone for the lifetime of the returned guard.
    pub fn placed(&mut self, loc: Loc, color: Color) -> Placed<'_> {
        self.set(loc, color);
        Placed { board: self, loc }
    }

    /// Rotate a quadrant for the lifetime of the returned guard.
    pub fn rotated(&mut self, rotation: Rotation) -> Rotated<'_> {
        self.rotate(rotation);
        Rotated { board: self, rotation }
    }
}

/// A stone placed on a borrowed board, cleared again on drop.
pub struct Placed<'a> {
    board: &'a mut Board,
    loc: Loc,
}

impl Placed<'_> {
    pub fn loc(&self) -> Loc {
        self.loc
    }
}

impl Deref for Placed<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        self.board
    }
}

impl DerefMut for Placed<'_> {
    fn deref_mut(&mut self) -> &mut Board {
        self.board
    }
}

impl Drop for Placed<'_> {
    fn drop(&mut self) {
        self.board.clear(self.loc);
    }
}

/// A quadrant turned on a borrowed board, turned back on drop.
pub struct Rotated<'a> {
    board: &'a mut Board,
    rotation: Rotation,
}

impl Deref for Rotated<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        self.board
    }
}

impl DerefMut for Rotated<'_> {
    fn deref_mut(&mut self) -> &mut Board {
        self.board
    }
}

impl Drop for Rotated<'_> {
    fn drop(&mut self) {
        self.board
            .rotate_quadrant(self.rotation.quadrant, -self.rotation.direction.steps());
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..BOARD_WIDTH {
            for x in 0..BOARD_WIDTH {
                let ch = match self.get(Loc::new(x, y)) {
                    Some(Color::White) => 'w',
                    Some(Color::Black) => 'b',
                    None => '_',
                };
                write!(f, "{ch}|")?;
            }
            writeln!(f, "  ")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board(turns={}, rotation={:?})\n{self}", self.turns, self.rotation)
    }
}
