//! Interactive console front-end.
//!
//! Plays one game between a human at the console and the search engine:
//! asks for the players' names and the human's color, flips a coin for who
//! moves first, then alternates turns until the game is decided. Human moves
//! are read in the notation of [`crate::notation`]; bad input is reported and
//! asked for again.
//!
//! The game runs over any `BufRead`/`Write` pair so it can be driven from
//! tests as well as from stdin/stdout.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result, bail};
use log::info;

use crate::board::{Board, Color};
use crate::eval::{Score, StreakScores};
use crate::notation::{NotationError, format_move, parse_move};
use crate::search::Search;

/// Settings for a console game.
#[derive(Clone, Debug)]
pub struct GameConfig {
    /// Search depth in plies for the AI.
    pub depth: u32,
    /// Streak weights used by the AI and for deciding the game.
    pub scores: StreakScores,
    /// Seed for the first-player coin flip; random when `None`.
    pub seed: Option<u64>,
}

#[derive(Clone, Debug)]
struct Player {
    name: String,
    color: Color,
    human: bool,
}

impl Player {
    fn label(&self) -> &'static str {
        if self.human { "Human" } else { "AI" }
    }
}

/// A human-vs-AI game over a line reader and a writer.
pub struct ConsoleGame<R, W> {
    input: R,
    output: W,
    config: GameConfig,
    board: Board,
    search: Search,
}

impl ConsoleGame<io::StdinLock<'static>, io::Stdout> {
    /// A game on the process's stdin and stdout.
    pub fn stdio(config: GameConfig) -> Self {
        ConsoleGame::new(io::stdin().lock(), io::stdout(), config)
    }
}

impl<R: BufRead, W: Write> ConsoleGame<R, W> {
    pub fn new(input: R, output: W, config: GameConfig) -> Self {
        let search = Search::new(config.scores.clone());
        ConsoleGame {
            input,
            output,
            config,
            board: Board::new(),
            search,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Consume the game, returning the writer.
    pub fn into_output(self) -> W {
        self.output
    }

    fn prompt(&mut self, text: &str) -> Result<String> {
        write!(self.output, "{text}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line).context("reading input")? == 0 {
            bail!("input closed");
        }
        Ok(line.trim().to_string())
    }

    fn ask_color(&mut self) -> Result<Color> {
        let mut answer = self.prompt("Enter human color (B/W): ")?;
        loop {
            match answer.to_ascii_lowercase().as_str() {
                "b" => return Ok(Color::Black),
                "w" => return Ok(Color::White),
                _ => answer = self.prompt("Invalid color, try again: ")?,
            }
        }
    }

    /// Play one full game and return the final evaluation.
    pub fn run(&mut self) -> Result<Score> {
        let human_name = self.prompt("Enter human name: ")?;
        let human_color = self.ask_color()?;
        let ai_name = self.prompt("Enter AI player name: ")?;

        let mut rng = match self.config.seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        };
        let human = Player { name: human_name, color: human_color, human: true };
        let ai = Player { name: ai_name, color: human_color.opponent(), human: false };
        let mut players = [human, ai];
        if rng.bool() {
            players.swap(0, 1);
        }

        writeln!(self.output, "\n\nPlayer 1: {}({})", players[0].name, players[0].label())?;
        writeln!(self.output, "Player 2: {}({})", players[1].name, players[1].label())?;
        writeln!(self.output, "*****************************")?;
        writeln!(self.output, "Starting Board:\n{}", self.board)?;
        info!("{} moves first", players[0].name);

        let mut turn = 0;
        let score = loop {
            let player = players[turn].clone();
            writeln!(self.output, "{}'s({}) turn", player.name, player.label())?;
            writeln!(self.output, "Color: {}", player.color)?;

            if player.human {
                self.human_turn(player.color)?;
            } else {
                self.ai_turn(player.color)?;
            }
            writeln!(self.output, "\n{}", self.board)?;

            let score = self.board.evaluate(&self.config.scores);
            if score.is_decided() {
                break score;
            }
            turn = 1 - turn;
        };

        match score {
            Score::Decisive(color) => {
                let (winner, loser) = if players[0].color == color {
                    (&players[0], &players[1])
                } else {
                    (&players[1], &players[0])
                };
                writeln!(self.output, "{} beat {}!", winner.name, loser.name)?;
                info!("{} ({}) won", winner.name, winner.color);
            }
            _ => {
                writeln!(self.output, "{} and {} tied!", players[0].name, players[1].name)?;
                info!("game tied");
            }
        }
        Ok(score)
    }

    fn human_turn(&mut self, color: Color) -> Result<()> {
        let mut text = self.prompt("Enter human move: ")?;
        loop {
            let parsed = parse_move(&text).and_then(|mv| match self.board.get(mv.loc) {
                Some(_) => Err(NotationError::Occupied),
                None => Ok(mv),
            });
            match parsed {
                Ok(mv) => {
                    self.board.play_move(color, mv.loc, mv.rotation);
                    return Ok(());
                }
                Err(e) => text = self.prompt(&format!("Invalid move ({e}), try again: "))?,
            }
        }
    }

    fn ai_turn(&mut self, color: Color) -> Result<()> {
        let result = self.search.best_move(&mut self.board, color, self.config.depth);
        let Some(mv) = result.best_move else {
            bail!("search returned no move at depth {}", self.config.depth);
        };
        self.board.play_move(color, mv.loc, mv.rotation);
        writeln!(self.output, "AI move: {}", format_move(&mv))?;
        info!("AI played {} ({})", format_move(&mv), result.score);
        Ok(())
    }
}

/// Let the engine play both sides, White first, writing each move to `output`.
pub fn self_play<W: Write>(mut output: W, depth: u32, scores: StreakScores) -> Result<Score> {
    let mut board = Board::new();
    let mut search = Search::new(scores.clone());
    let mut color = Color::White;

    loop {
        let result = search.best_move(&mut board, color, depth);
        let Some(mv) = result.best_move else {
            bail!("search returned no move at depth {depth}");
        };
        board.play_move(color, mv.loc, mv.rotation);
        writeln!(output, "{color}: {}  (eval {})", format_move(&mv), result.score)?;
        writeln!(output, "{board}")?;

        let score = board.evaluate(&scores);
        if score.is_decided() {
            writeln!(output, "Result: {score}")?;
            info!("self-play finished after {} stones, {} nodes", board.turns(), search.nodes());
            return Ok(score);
        }
        color = color.opponent();
    }
}
