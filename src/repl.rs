//! Text-mode play loop.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use tracing::{debug, warn};

use rookery_core::{Game, GameStatus, Outcome, Piece, Square};
use rookery_uci::{BestMove, BridgeConfig, EngineProcess, suggest};

const HELP: &str = "\
e2             - list legal moves of the piece on e2
e2e4           - play a move (pawns reaching the last rank become queens)
hint           - ask the engine for a move
auto           - let the engine play for the side to move
fen            - print the position as FEN
import <fen>   - load a position
board          - print the board
new            - start a new game
quit           - exit";

/// What the loop should do after a command.
#[derive(Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub struct Repl {
    game: Game,
    bridge: BridgeConfig,
    engine: Option<EngineProcess>,
}

impl Repl {
    pub fn new(bridge: BridgeConfig) -> Self {
        Self {
            game: Game::new(),
            bridge,
            engine: None,
        }
    }

    /// Read commands from stdin until `quit` or end of input.
    pub fn run(&mut self) -> Result<()> {
        let stdin = io::stdin();
        let mut out = io::stdout().lock();
        writeln!(out, "{}", self.game.board().pretty())?;
        writeln!(out, "type `help` for instructions")?;

        let mut lines = stdin.lock().lines();
        loop {
            write!(out, "> ")?;
            out.flush()?;
            let Some(line) = lines.next() else {
                break;
            };
            if self.handle(line?.trim(), &mut out)? == Flow::Exit {
                break;
            }
        }

        if let Some(engine) = self.engine.take()
            && let Err(err) = engine.quit()
        {
            warn!(error = %err, "engine did not shut down cleanly");
        }
        Ok(())
    }

    /// Execute one command, writing any response to `out`.
    pub fn handle(&mut self, input: &str, out: &mut impl Write) -> Result<Flow> {
        debug!(%input, "command");
        match input {
            "" => {}
            "help" => writeln!(out, "{HELP}")?,
            "quit" | "exit" => return Ok(Flow::Exit),
            "new" => {
                self.game.new_game();
                writeln!(out, "{}", self.game.board().pretty())?;
            }
            "fen" => writeln!(out, "{}", self.game.fen())?,
            "board" => writeln!(out, "{}", self.game.board().pretty())?,
            "hint" => match self.engine_move() {
                Ok(Some((from, to))) => writeln!(out, "engine suggests {from}{to}")?,
                Ok(None) => writeln!(out, "engine has no move")?,
                Err(err) => writeln!(out, "engine error: {err}")?,
            },
            "auto" => match self.engine_move() {
                Ok(Some((from, to))) => self.play(from, to, out)?,
                Ok(None) => writeln!(out, "engine has no move")?,
                Err(err) => writeln!(out, "engine error: {err}")?,
            },
            _ if input.starts_with("import ") => match Game::from_fen(&input[7..]) {
                Ok(game) => {
                    self.game = game;
                    writeln!(out, "{}", self.game.board().pretty())?;
                    self.report_status(out)?;
                }
                Err(err) => writeln!(out, "error: {err}")?,
            },
            _ if input.len() == 2 => match input.parse::<Square>() {
                Ok(square) => self.list_moves(square, out)?,
                Err(err) => writeln!(out, "error: {err}")?,
            },
            _ => match BestMove::parse(input) {
                Ok(mv) => self.play(mv.from, mv.to, out)?,
                Err(_) => writeln!(out, "unknown command `{input}`, type `help`")?,
            },
        }
        Ok(Flow::Continue)
    }

    fn list_moves(&mut self, square: Square, out: &mut impl Write) -> Result<()> {
        let Some(id) = self.game.select(square) else {
            writeln!(out, "no piece on {square}")?;
            return Ok(());
        };
        let label = self.game.describe(square).unwrap_or_default();
        let mut targets = self.game.valid_moves(id);
        targets.sort();
        let moves: Vec<String> = targets.iter().map(Square::to_string).collect();
        if moves.is_empty() {
            writeln!(out, "{label} on {square} has no legal moves")?;
        } else {
            writeln!(out, "{label} on {square}: {}", moves.join(" "))?;
        }
        Ok(())
    }

    fn play(&mut self, from: Square, to: Square, out: &mut impl Write) -> Result<()> {
        match self.game.play(from, to) {
            Ok(record) => {
                writeln!(out, "{}", self.game.board().pretty())?;
                writeln!(out, "played {record}")?;
                self.report_status(out)
            }
            Err(err) => {
                writeln!(out, "error: {err}")?;
                Ok(())
            }
        }
    }

    fn report_status(&mut self, out: &mut impl Write) -> Result<()> {
        let side = self.game.side_to_move();
        match self.game.status() {
            GameStatus::InProgress if self.game.is_in_check(side) => {
                writeln!(out, "{} to move, in check", side.name())?;
            }
            GameStatus::InProgress => writeln!(out, "{} to move", side.name())?,
            GameStatus::Over(Outcome::Checkmate { winner }) => {
                writeln!(out, "checkmate, {} wins", winner.name())?;
            }
            GameStatus::Over(Outcome::Stalemate) => writeln!(out, "stalemate")?,
        }
        Ok(())
    }

    /// Start the engine on first use, then ask it for a move as an origin
    /// and destination square.
    fn engine_move(&mut self) -> Result<Option<(Square, Square)>> {
        let engine = match &mut self.engine {
            Some(engine) => engine,
            slot => slot.insert(EngineProcess::spawn(&self.bridge)?),
        };
        let Some((id, to)) = suggest(engine, &mut self.game)? else {
            return Ok(None);
        };
        let from = self
            .game
            .board()
            .piece(id)
            .map(Piece::square)
            .context("engine moved a piece that is not on the board")?;
        Ok(Some((from, to)))
    }
}
