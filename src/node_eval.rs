//! Search results and their ordering.
//!
//! A [`NodeEval`] pairs a [`Score`] with the ply at which a decisive result
//! was reached and the move that leads there. Results are ordered on White's
//! scale: higher is better for White, lower is better for Black. Among equal
//! wins the faster one ranks higher, among equal losses the slower one does.

use std::cmp::Ordering;

use crate::board::{Color, Move};
use crate::eval::Score;

/// An evaluation plus move recommendation for one search node.
#[derive(Copy, Clone, Debug)]
pub struct NodeEval {
    pub score: Score,
    /// Plies from the search root to where the score was produced.
    pub terminal_depth: u32,
    /// Recommended move, `None` at leaves.
    pub best_move: Option<Move>,
}

impl NodeEval {
    /// The least element of the order: a Black win with the earliest terminal depth.
    pub const LOWEST: NodeEval = NodeEval {
        score: Score::Decisive(Color::Black),
        terminal_depth: 0,
        best_move: None,
    };

    /// The greatest element of the order: a White win with the earliest terminal depth.
    pub const HIGHEST: NodeEval = NodeEval {
        score: Score::Decisive(Color::White),
        terminal_depth: 0,
        best_move: None,
    };

    pub fn new(score: Score, terminal_depth: u32, best_move: Option<Move>) -> Self {
        NodeEval { score, terminal_depth, best_move }
    }

    /// A leaf result with no move attached.
    pub fn terminal(score: Score, terminal_depth: u32) -> Self {
        NodeEval::new(score, terminal_depth, None)
    }

    /// Same result reached through `mv`.
    pub fn with_move(self, mv: Move) -> Self {
        NodeEval { best_move: Some(mv), ..self }
    }

    /// Whether `self` is strictly better than `other` for `color`.
    #[inline]
    pub fn better_for(&self, color: Color, other: &NodeEval) -> bool {
        match color {
            Color::White => self > other,
            Color::Black => self < other,
        }
    }
}

impl Ord for NodeEval {
    fn cmp(&self, other: &Self) -> Ordering {
        let comp = self.score.cmp_value(other.score);
        let value = self.score.value();
        if comp != Ordering::Equal || value == 0.0 {
            return comp;
        }
        if value > 0.0 {
            other.terminal_depth.cmp(&self.terminal_depth)
        } else {
            self.terminal_depth.cmp(&other.terminal_depth)
        }
    }
}

impl PartialOrd for NodeEval {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Equality is equivalence under the ordering; the move is ignored.
impl PartialEq for NodeEval {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for NodeEval {}
