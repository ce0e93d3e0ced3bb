//! Integration tests for pentago-rust
//!
//! These exercise the public API the way a front-end does: build boards,
//! evaluate them, and search for moves.

use std::io::Cursor;

use pentago_rust::board::{Board, Color, Direction, Loc, Move, Rotation};
use pentago_rust::console::{ConsoleGame, GameConfig, self_play};
use pentago_rust::constants::{BOARD_CELLS, BOARD_WIDTH, QUADRANTS};
use pentago_rust::eval::{Score, StreakScores};
use pentago_rust::node_eval::NodeEval;
use pentago_rust::notation::{format_move, parse_move};
use pentago_rust::search::Search;

// =============================================================================
// Helper functions for setting up test positions
// =============================================================================

fn all_locs() -> Vec<Loc> {
    (0..BOARD_WIDTH)
        .flat_map(|y| (0..BOARD_WIDTH).map(move |x| Loc::new(x, y)))
        .collect()
}

/// Snapshot of every cell as seen through the current rotations.
fn cells(board: &Board) -> Vec<Option<Color>> {
    all_locs().into_iter().map(|l| board.get(l)).collect()
}

/// Place `stones` random stones, alternating colors, and give each quadrant a
/// random number of turns.
fn random_board(rng: &mut fastrand::Rng, stones: usize) -> Board {
    let mut board = Board::new();
    let mut color = Color::White;
    for _ in 0..stones {
        let empty = board.empty_cells();
        let loc = empty[rng.usize(..empty.len())];
        board.set(loc, color);
        color = color.opponent();
    }
    for q in 0..QUADRANTS {
        board.rotate_quadrant(q, rng.i32(0..4));
    }
    board
}

/// Apply a sequence of `B/C QD` moves, alternating White then Black.
fn setup_position(moves: &[&str]) -> Board {
    let mut board = Board::new();
    let mut color = Color::White;
    for text in moves {
        let mv = parse_move(text).unwrap_or_else(|e| panic!("bad move {text}: {e}"));
        assert!(board.get(mv.loc).is_none(), "{text} is occupied");
        board.play_move(color, mv.loc, mv.rotation);
        color = color.opponent();
    }
    board
}

// =============================================================================
// Board invariants
// =============================================================================

#[test]
fn test_rotation_round_trip() {
    let mut rng = fastrand::Rng::with_seed(7);
    for _ in 0..20 {
        let mut board = random_board(&mut rng, 12);
        let before = cells(&board);
        let q = rng.usize(..QUADRANTS);
        let k = rng.i32(-6..=6);
        board.rotate_quadrant(q, k);
        board.rotate_quadrant(q, -k);
        assert_eq!(cells(&board), before);
    }
}

#[test]
fn test_set_clear_inverse() {
    let mut rng = fastrand::Rng::with_seed(11);
    let mut board = random_board(&mut rng, 15);
    let before = board.clone();
    for loc in board.empty_cells() {
        board.set(loc, Color::Black);
        board.clear(loc);
        assert_eq!(board, before);
    }
}

#[test]
fn test_full_after_36_stones() {
    let mut board = Board::new();
    let mut color = Color::Black;
    for (i, loc) in all_locs().into_iter().enumerate() {
        assert!(!board.is_full());
        board.set(loc, color);
        assert_eq!(board.turns(), i + 1);
        color = color.opponent();
    }
    assert!(board.is_full());
    assert!(board.empty_cells().is_empty());
}

#[test]
fn test_rotation_completes_a_five() {
    let mut board = Board::new();
    for x in 0..3 {
        board.set(Loc::new(x, 0), Color::White);
    }
    board.set(Loc::new(3, 1), Color::White);
    board.set(Loc::new(3, 2), Color::White);
    let scores = StreakScores::default();
    assert!(!board.evaluate(&scores).is_decided());

    // A clockwise turn brings the quadrant's left column up into its top row.
    board.rotate(Rotation::new(1, Direction::Clockwise));
    assert_eq!(board.get(Loc::new(3, 0)), Some(Color::White));
    assert_eq!(board.get(Loc::new(4, 0)), Some(Color::White));
    assert_eq!(board.evaluate(&scores), Score::Decisive(Color::White));

    board.rotate(Rotation::new(1, Direction::CounterClockwise));
    assert!(!board.evaluate(&scores).is_decided());
}

// =============================================================================
// Evaluation
// =============================================================================

#[test]
fn test_evaluate_outcomes_on_random_boards() {
    let mut rng = fastrand::Rng::with_seed(3);
    let scores = StreakScores::default();
    for stones in [10, 20, 28, 36] {
        for _ in 0..25 {
            let board = random_board(&mut rng, stones);
            let white = has_five(&board, Color::White);
            let black = has_five(&board, Color::Black);
            let expected = match (white, black) {
                (true, true) => Some(Score::Tie),
                (true, false) => Some(Score::Decisive(Color::White)),
                (false, true) => Some(Score::Decisive(Color::Black)),
                (false, false) if board.is_full() => Some(Score::Tie),
                (false, false) => None,
            };
            let got = board.evaluate(&scores);
            match expected {
                Some(score) => assert_eq!(got, score, "{board:?}"),
                None => assert!(!got.is_decided(), "{board:?}"),
            }
        }
    }
}

/// Brute-force five-in-a-row check in all four directions.
fn has_five(board: &Board, color: Color) -> bool {
    let dirs: [(isize, isize); 4] = [(1, 0), (0, 1), (1, 1), (-1, 1)];
    for loc in all_locs() {
        for (dx, dy) in dirs {
            let hit = (0..5).all(|i| {
                let x = loc.x as isize + dx * i;
                let y = loc.y as isize + dy * i;
                (0..BOARD_WIDTH as isize).contains(&x)
                    && (0..BOARD_WIDTH as isize).contains(&y)
                    && board.get(Loc::new(x as usize, y as usize)) == Some(color)
            });
            if hit {
                return true;
            }
        }
    }
    false
}

// =============================================================================
// Search
// =============================================================================

#[test]
fn test_depth_zero_matches_evaluate() {
    let mut rng = fastrand::Rng::with_seed(5);
    let scores = StreakScores::default();
    let mut search = Search::new(scores.clone());
    for _ in 0..10 {
        let mut board = random_board(&mut rng, 8);
        let result = search.evaluate_at_depth(
            &mut board,
            Color::White,
            0,
            NodeEval::LOWEST,
            NodeEval::HIGHEST,
        );
        assert_eq!(result.score, board.evaluate(&scores));
        assert_eq!(result.terminal_depth, 0);
        assert!(result.best_move.is_none());
    }
}

#[test]
fn test_empty_board_depth_one() {
    let mut board = Board::new();
    let scores = StreakScores::new([
        [1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
        [2.0, 3.0, 4.0, 5.0, 6.0, 7.0],
    ]);
    let mut search = Search::new(scores);
    let result = search.best_move(&mut board, Color::White, 1);

    assert!(matches!(result.score, Score::Ongoing(v) if v.is_finite()));
    let mv = result.best_move.expect("a move from the empty board");
    assert!(mv.loc.x < BOARD_WIDTH && mv.loc.y < BOARD_WIDTH);
    let rotation = mv.rotation.expect("a rotation follows a quiet placement");
    assert!(rotation.quadrant < QUADRANTS);
    assert_eq!(board, Board::new());
}

#[test]
fn test_completes_four_in_a_row() {
    for color in [Color::White, Color::Black] {
        let mut board = Board::new();
        for y in 1..5 {
            board.set(Loc::new(5, y), color);
        }
        board.set(Loc::new(5, 0), color.opponent());
        board.set(Loc::new(0, 0), color.opponent());

        for depth in 1..=2 {
            let mut search = Search::new(StreakScores::default());
            let result = search.best_move(&mut board, color, depth);
            assert_eq!(result.score, Score::Decisive(color));
            assert_eq!(result.terminal_depth, 0);
            assert_eq!(result.best_move, Some(Move::place_only(Loc::new(5, 5))));
        }
    }
}

#[test]
fn test_alpha_beta_matches_minimax() {
    let mut rng = fastrand::Rng::with_seed(2024);
    let scores = StreakScores::default();
    let cases = [(1, 4), (1, 20), (2, 22), (2, 26), (3, 31)];

    for (depth, stones) in cases {
        for round in 0..4 {
            let mut board = random_board(&mut rng, stones);
            let color = if round % 2 == 0 { Color::White } else { Color::Black };
            let before = board.clone();

            let mut pruned = Search::new(scores.clone());
            let mut full = Search::exhaustive(scores.clone());
            let a = pruned.best_move(&mut board, color, depth);
            assert_eq!(board, before);
            let b = full.best_move(&mut board, color, depth);
            assert_eq!(board, before);

            assert_eq!(a, b, "depth {depth}, {stones} stones:\n{board:?}");
            assert_eq!(a.score.value(), b.score.value());
            assert!(pruned.nodes() <= full.nodes());
        }
    }
}

#[test]
fn test_search_is_deterministic() {
    let board = setup_position(&["1/5 2R", "4/5 3L", "2/5 1R"]);
    let mut a = board.clone();
    let mut b = board.clone();
    let ra = Search::new(StreakScores::default()).best_move(&mut a, Color::Black, 2);
    let rb = Search::new(StreakScores::default()).best_move(&mut b, Color::Black, 2);
    assert_eq!(ra.best_move, rb.best_move);
    assert_eq!(ra, rb);
}

// =============================================================================
// Front-end
// =============================================================================

#[test]
fn test_notation_round_trip_all_cells() {
    for loc in all_locs() {
        let mv = Move::new(loc, Rotation::new(loc.quadrant(), Direction::Clockwise));
        assert_eq!(parse_move(&format_move(&mv)).unwrap(), mv);
    }
}

#[test]
fn test_console_game_finishes() {
    // A human who tries every cell in order until one is free.
    let mut script = String::from("Alice\nx\nw\nBot\n");
    for _ in 0..20 {
        for loc in all_locs() {
            let mv = Move::new(loc, Rotation::new(0, Direction::Clockwise));
            script.push_str(&format_move(&mv));
            script.push('\n');
        }
    }

    let config = GameConfig { depth: 1, scores: StreakScores::default(), seed: Some(9) };
    let mut game = ConsoleGame::new(Cursor::new(script), Vec::new(), config);
    let score = game.run().expect("game runs to the end");
    assert!(score.is_decided());
    assert!(game.board().turns() <= BOARD_CELLS);

    let out = String::from_utf8(game.into_output()).unwrap();
    assert!(out.contains("Invalid color, try again: "));
    assert!(out.contains("Starting Board:"));
    assert!(out.contains("AI move: "));
    assert!(out.contains("beat") || out.contains("tied!"));
}

#[test]
fn test_self_play_finishes() {
    let mut out = Vec::new();
    let score = self_play(&mut out, 1, StreakScores::default()).unwrap();
    assert!(score.is_decided());
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("Result: "));
}
