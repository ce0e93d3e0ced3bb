//! Position evaluation by streak scanning.
//!
//! Every line that can hold five in a row is walked once, left to right. A
//! *streak* is a maximal run of cells that are empty or one color, i.e. a
//! stretch where that color could still make five. Each streak whose length
//! is between [`NUM_TO_WIN`] and [`BOARD_WIDTH`] adds its weight for White or
//! subtracts it for Black. Unbroken runs of five end the game; if both colors
//! complete one in the same position the game is a tie.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::board::{Board, Color, Loc};
use crate::constants::{BOARD_WIDTH, DEFAULT_STREAK_SCORES, LINES, NUM_TO_WIN};

/// Result of evaluating a position.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Score {
    /// The given color has won.
    Decisive(Color),
    /// The game is over with no winner.
    Tie,
    /// The game goes on; positive favors White.
    Ongoing(f64),
}

impl Score {
    /// Whether the game is over.
    #[inline]
    pub fn is_decided(self) -> bool {
        !matches!(self, Score::Ongoing(_))
    }

    /// Numeric value on White's scale: wins are infinite, a tie is zero.
    #[inline]
    pub fn value(self) -> f64 {
        match self {
            Score::Decisive(color) => color.sign() * f64::INFINITY,
            Score::Tie => 0.0,
            Score::Ongoing(v) => v,
        }
    }

    /// Compare by [`value`](Self::value).
    pub fn cmp_value(self, other: Score) -> Ordering {
        self.value()
            .partial_cmp(&other.value())
            .unwrap_or(Ordering::Equal)
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Score::Decisive(color) => write!(f, "{color} wins"),
            Score::Tie => write!(f, "tie"),
            Score::Ongoing(v) => write!(f, "{v:+.1}"),
        }
    }
}

/// Number of window lengths that can hold a win.
const STREAK_LENGTHS: usize = BOARD_WIDTH - NUM_TO_WIN + 1;

/// Weights for open streaks.
///
/// `weight(len, filled)` is the value of a window `len` cells long, all empty
/// or one color, with `filled` of them already taken.
#[derive(Clone, Debug, PartialEq)]
pub struct StreakScores([[f64; BOARD_WIDTH]; STREAK_LENGTHS]);

impl Default for StreakScores {
    fn default() -> Self {
        StreakScores(DEFAULT_STREAK_SCORES)
    }
}

impl StreakScores {
    /// All weights zero: evaluation only reports wins and ties.
    pub const ZERO: StreakScores = StreakScores([[0.0; BOARD_WIDTH]; STREAK_LENGTHS]);

    /// Panics if any weight is NaN or infinite.
    pub fn new(table: [[f64; BOARD_WIDTH]; STREAK_LENGTHS]) -> Self {
        assert!(
            table.iter().flatten().all(|w| w.is_finite()),
            "streak weights must be finite"
        );
        StreakScores(table)
    }

    /// Weight of a streak; lengths outside `[NUM_TO_WIN, BOARD_WIDTH]` are worth nothing.
    #[inline]
    pub fn weight(&self, len: usize, filled: usize) -> f64 {
        len.checked_sub(NUM_TO_WIN)
            .and_then(|row| self.0.get(row))
            .and_then(|row| row.get(filled))
            .copied()
            .unwrap_or(0.0)
    }
}

/// Parses `"1,2,3,4,5,6;2,3,4,5,6,7"`: one `;`-separated row per window length.
impl FromStr for StreakScores {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = s.split(';').collect();
        if rows.len() != STREAK_LENGTHS {
            return Err(format!("expected {STREAK_LENGTHS} rows, got {}", rows.len()));
        }
        let mut table = [[0.0; BOARD_WIDTH]; STREAK_LENGTHS];
        for (row, text) in table.iter_mut().zip(rows) {
            let values: Vec<&str> = text.split(',').map(str::trim).collect();
            if values.len() != BOARD_WIDTH {
                return Err(format!(
                    "expected {BOARD_WIDTH} weights per row, got {}",
                    values.len()
                ));
            }
            for (slot, v) in row.iter_mut().zip(values) {
                *slot = v
                    .parse::<f64>()
                    .ok()
                    .filter(|w| w.is_finite())
                    .ok_or_else(|| format!("invalid weight: {v:?}"))?;
            }
        }
        Ok(StreakScores(table))
    }
}

/// Evaluate `board` with the given weights.
///
/// Returns the latched win or tie if some line holds five in a row, a tie if
/// the board is full, and the accumulated streak score otherwise.
pub fn scan(board: &Board, scores: &StreakScores) -> Score {
    let mut collector = StreakCollector::new(scores);

    for line in &LINES {
        collector.new_line();
        let (mut x, mut y) = (line.start.0 as isize, line.start.1 as isize);
        for _ in 0..line.len {
            collector.add(board.get(Loc::new(x as usize, y as usize)));
            x += line.step.0;
            y += line.step.1;
        }
        collector.finish_line();
    }

    match collector.decided {
        Some(outcome) => outcome,
        None if board.is_full() => Score::Tie,
        None => Score::Ongoing(collector.score),
    }
}

/// Single-pass streak accumulator shared across all lines of one evaluation.
struct StreakCollector<'a> {
    weights: &'a StreakScores,
    /// Length of the open streak.
    cur_streak: usize,
    /// Stones inside the open streak.
    actual: usize,
    /// Consecutive stones of one color with no gap.
    actual_in_a_row: usize,
    /// Color of the last stone seen on this line.
    prev: Option<Color>,
    /// Position just after the last stone seen on this line.
    first_empty: usize,
    /// Cells consumed on this line.
    count: usize,
    score: f64,
    /// Set once a line holds five in a row; freezes `score`.
    decided: Option<Score>,
}

impl<'a> StreakCollector<'a> {
    fn new(weights: &'a StreakScores) -> Self {
        StreakCollector {
            weights,
            cur_streak: 0,
            actual: 0,
            actual_in_a_row: 0,
            prev: None,
            first_empty: 0,
            count: 0,
            score: 0.0,
            decided: None,
        }
    }

    fn new_line(&mut self) {
        self.cur_streak = 0;
        self.actual = 0;
        self.actual_in_a_row = 0;
        self.prev = None;
        self.first_empty = 0;
        self.count = 0;
    }

    /// Side a streak ending at `prev` counts for. Before any stone, Black.
    fn owner(prev: Option<Color>) -> Color {
        prev.unwrap_or(Color::Black)
    }

    fn add(&mut self, cell: Option<Color>) {
        match cell {
            None => {
                self.cur_streak += 1;
                self.actual_in_a_row = 0;
            }
            Some(color) if self.prev.is_none() || self.prev == Some(color) => {
                // The empty gap before this stone is an open window for the other side.
                self.tally(color.opponent(), self.count - self.first_empty, 0);
                self.cur_streak += 1;
                self.actual += 1;
                self.actual_in_a_row += 1;

                if self.actual_in_a_row == NUM_TO_WIN {
                    self.decided = Some(match self.decided {
                        None => Score::Decisive(color),
                        Some(Score::Decisive(winner)) if winner == color => {
                            Score::Decisive(winner)
                        }
                        Some(_) => Score::Tie,
                    });
                }

                self.first_empty = self.count + 1;
                self.prev = Some(color);
            }
            Some(color) => {
                self.tally(Self::owner(self.prev), self.cur_streak, self.actual);
                // New streak: the empties right before this stone plus the stone.
                self.cur_streak = self.count - self.first_empty + 1;
                self.actual = 1;
                self.actual_in_a_row = 1;
                self.prev = Some(color);
                self.first_empty = self.count + 1;
            }
        }
        self.count += 1;
    }

    fn finish_line(&mut self) {
        let owner = Self::owner(self.prev);
        self.tally(owner, self.cur_streak, self.actual);
        self.tally(owner.opponent(), self.count - self.first_empty, 0);
    }

    fn tally(&mut self, color: Color, len: usize, filled: usize) {
        if self.decided.is_none() && (NUM_TO_WIN..=BOARD_WIDTH).contains(&len) {
            self.score += color.sign() * self.weights.weight(len, filled);
        }
    }
}
