//! Talking to an external UCI engine over its standard streams.

use std::io::{BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, Command, Stdio};
use std::sync::mpsc::{self, Receiver};

use tracing::{debug, info, trace, warn};

use rookery_core::{Game, PieceId, Square};

use crate::command::{BestMove, EngineLine, go_command, parse_engine_line, position_command};
use crate::config::BridgeConfig;
use crate::error::UciError;

/// Something that can propose a move for a FEN position.
pub trait MoveAdvisor {
    /// The engine's choice, or `None` if it has no move.
    fn best_move(&mut self, fen: &str) -> Result<Option<BestMove>, UciError>;
}

/// Ask `advisor` for a move in `game` and translate it to a piece and
/// destination. `Ok(None)` means the advisor had no move to offer.
pub fn suggest<A>(advisor: &mut A, game: &mut Game) -> Result<Option<(PieceId, Square)>, UciError>
where
    A: MoveAdvisor + ?Sized,
{
    let fen = game.fen();
    match advisor.best_move(&fen)? {
        Some(mv) => {
            debug!(%fen, mv = %mv, "engine suggestion");
            mv.resolve(game).map(Some)
        }
        None => Ok(None),
    }
}

/// The protocol half of an engine connection: commands go out through
/// `input`, output lines arrive on `lines`.
pub struct Session<W: Write> {
    input: W,
    lines: Receiver<String>,
    depth: u8,
}

impl<W: Write> Session<W> {
    pub fn new(input: W, lines: Receiver<String>, depth: u8) -> Self {
        Self {
            input,
            lines,
            depth,
        }
    }

    /// Write one command line.
    pub fn send(&mut self, command: &str) -> Result<(), UciError> {
        trace!(%command, "to engine");
        writeln!(self.input, "{command}")?;
        self.input.flush()?;
        Ok(())
    }

    /// Block for the next line of engine output.
    pub fn next_line(&mut self) -> Result<EngineLine, UciError> {
        let line = self.lines.recv().map_err(|_| UciError::EngineExited)?;
        trace!(line = %line.trim_end(), "from engine");
        parse_engine_line(&line)
    }

    /// `uci` / `uciok`, then `isready` / `readyok`.
    pub fn handshake(&mut self) -> Result<(), UciError> {
        self.send("uci")?;
        while self.next_line()? != EngineLine::UciOk {}
        self.send("isready")?;
        while self.next_line()? != EngineLine::ReadyOk {}
        Ok(())
    }
}

impl<W: Write> MoveAdvisor for Session<W> {
    fn best_move(&mut self, fen: &str) -> Result<Option<BestMove>, UciError> {
        self.send(&position_command(fen))?;
        self.send(&go_command(self.depth))?;
        loop {
            match self.next_line()? {
                EngineLine::BestMove(mv) => return Ok(mv),
                EngineLine::Info(_) => {}
                other => warn!(line = ?other, "ignoring engine output during search"),
            }
        }
    }
}

/// A running engine process.
///
/// A reader thread forwards the engine's stdout line by line; it ends when
/// the engine closes its output. Dropping the handle kills the process.
pub struct EngineProcess {
    child: Child,
    session: Session<ChildStdin>,
}

impl EngineProcess {
    /// Start the engine at `config.engine_path` and complete the handshake.
    pub fn spawn(config: &BridgeConfig) -> Result<Self, UciError> {
        let path = config.engine_path.display().to_string();
        let mut child = Command::new(&config.engine_path)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| UciError::Spawn {
                path: path.clone(),
                source,
            })?;

        let stdin = child.stdin.take().ok_or(UciError::EngineExited)?;
        let stdout = child.stdout.take().ok_or(UciError::EngineExited)?;

        let (tx, rx) = mpsc::channel();
        std::thread::spawn(move || {
            for line in BufReader::new(stdout).lines() {
                let Ok(line) = line else {
                    break;
                };
                if tx.send(line).is_err() {
                    break;
                }
            }
        });

        let mut engine = Self {
            child,
            session: Session::new(stdin, rx, config.depth),
        };
        engine.session.handshake()?;
        info!(%path, depth = config.depth, "engine ready");
        Ok(engine)
    }

    /// Send `quit` and wait for the process to exit.
    pub fn quit(mut self) -> Result<(), UciError> {
        self.session.send("quit")?;
        let status = self.child.wait()?;
        debug!(%status, "engine exited");
        Ok(())
    }
}

impl MoveAdvisor for EngineProcess {
    fn best_move(&mut self, fen: &str) -> Result<Option<BestMove>, UciError> {
        self.session.best_move(fen)
    }
}

impl Drop for EngineProcess {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}
