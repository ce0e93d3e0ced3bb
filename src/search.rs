//! Fixed-depth minimax search with alpha-beta pruning.
//!
//! A move is a placement followed by one of eight quarter turns, so each
//! node branches up to `8 * empty` ways. Placements are tried in order of
//! their one-ply evaluation for the side to move, which does not change the
//! result but makes cutoffs come much earlier.
//!
//! White maximizes and Black minimizes over the [`NodeEval`] order. The
//! board is shared by the whole search and mutated through the guards in
//! [`crate::board`], so it is restored on every return path including
//! immediate wins and cutoffs.

use std::cmp::Ordering;

use log::debug;

use crate::board::{Board, Color, Loc, Move, Rotation};
use crate::eval::{Score, StreakScores};
use crate::node_eval::NodeEval;

/// The alpha-beta window, passed by value down the tree.
#[derive(Copy, Clone, Debug)]
struct Window {
    alpha: NodeEval,
    beta: NodeEval,
}

impl Window {
    /// Narrow the window with a new best result for `color`.
    fn tighten(&mut self, color: Color, result: &NodeEval) {
        match color {
            Color::White if *result > self.alpha => self.alpha = *result,
            Color::Black if *result < self.beta => self.beta = *result,
            _ => {}
        }
    }

    fn is_closed(&self) -> bool {
        self.alpha >= self.beta
    }
}

/// Game tree searcher.
pub struct Search {
    scores: StreakScores,
    pruning: bool,
    nodes: u64,
}

impl Search {
    /// Create an alpha-beta searcher using the given streak weights.
    pub fn new(scores: StreakScores) -> Self {
        Search { scores, pruning: true, nodes: 0 }
    }

    /// Create a searcher that visits the full tree with no cutoffs.
    pub fn exhaustive(scores: StreakScores) -> Self {
        Search { scores, pruning: false, nodes: 0 }
    }

    pub fn scores(&self) -> &StreakScores {
        &self.scores
    }

    /// Nodes visited since this searcher was created.
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Search `depth` plies for `color` with an open window.
    pub fn best_move(&mut self, board: &mut Board, color: Color, depth: u32) -> NodeEval {
        self.evaluate_at_depth(board, color, depth, NodeEval::LOWEST, NodeEval::HIGHEST)
    }

    /// Evaluate `board` for `color` to move, `depth` plies deep, within `[alpha, beta]`.
    ///
    /// The board is left exactly as it was passed in.
    pub fn evaluate_at_depth(
        &mut self,
        board: &mut Board,
        color: Color,
        depth: u32,
        alpha: NodeEval,
        beta: NodeEval,
    ) -> NodeEval {
        let start = self.nodes;
        let result = self.search(board, color, depth, 0, Window { alpha, beta });
        debug!(
            "search {color} depth {depth}: {} nodes, score {} (terminal depth {}), move {:?}",
            self.nodes - start,
            result.score,
            result.terminal_depth,
            result.best_move
        );
        result
    }

    fn search(
        &mut self,
        board: &mut Board,
        color: Color,
        depth: u32,
        ply: u32,
        mut window: Window,
    ) -> NodeEval {
        self.nodes += 1;

        let score = board.evaluate(&self.scores);
        if depth == 0 || score.is_decided() {
            return NodeEval::terminal(score, ply);
        }

        let mut best: Option<NodeEval> = None;

        for loc in self.ordered_placements(board, color) {
            let mut placed = board.placed(loc, color);
            let placed_score = placed.evaluate(&self.scores);

            if placed_score == Score::Decisive(color) {
                return NodeEval::new(placed_score, ply, Some(Move::place_only(loc)));
            }

            if placed_score.is_decided() {
                // Last empty cell filled without a five: no rotation follows.
                let result = NodeEval::new(placed_score, ply, Some(Move::place_only(loc)));
                if self.consider(color, result, &mut best, &mut window) {
                    return best.unwrap_or(result);
                }
                continue;
            }

            for rotation in Rotation::all() {
                let child = {
                    let mut rotated = placed.rotated(rotation);
                    self.search(&mut rotated, color.opponent(), depth - 1, ply + 1, window)
                };
                let result = child.with_move(Move::new(loc, rotation));
                if self.consider(color, result, &mut best, &mut window) {
                    return best.unwrap_or(result);
                }
            }
        }

        best.unwrap_or_else(|| NodeEval::terminal(score, ply))
    }

    /// Record `result` if it beats `best` for `color`. Returns `true` on cutoff.
    fn consider(
        &self,
        color: Color,
        result: NodeEval,
        best: &mut Option<NodeEval>,
        window: &mut Window,
    ) -> bool {
        let improves = match best {
            Some(current) => result.better_for(color, current),
            None => true,
        };
        if improves {
            *best = Some(result);
            if self.pruning {
                window.tighten(color, &result);
            }
        }
        self.pruning && window.is_closed()
    }

    /// Every empty cell, best one-ply placement for `color` first.
    ///
    /// Each cell is filled with `color`, evaluated, and cleared again; the
    /// sort is stable so equal cells keep row-major order.
    pub fn ordered_placements(&self, board: &mut Board, color: Color) -> Vec<Loc> {
        let mut scored: Vec<(Loc, f64)> = board
            .empty_cells()
            .into_iter()
            .map(|loc| {
                let placed = board.placed(loc, color);
                (loc, color.sign() * placed.evaluate(&self.scores).value())
            })
            .collect();
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        scored.into_iter().map(|(loc, _)| loc).collect()
    }
}
