//! UCI bridge errors.

use rookery_core::Square;

/// Errors that can occur while talking to an external engine.
#[derive(Debug, thiserror::Error)]
pub enum UciError {
    /// A `bestmove` line without a move.
    #[error("malformed bestmove line: \"{line}\"")]
    MalformedBestMove {
        /// The offending line.
        line: String,
    },

    /// A move string that is not a coordinate pair like `e2e4`.
    #[error("invalid move: {uci_move}")]
    InvalidMove {
        /// The UCI move string that failed to parse.
        uci_move: String,
    },

    /// The suggested origin square is empty.
    #[error("engine moved from {square}, which is empty")]
    NoPieceAt { square: Square },

    /// The suggested move is not legal in the current game.
    #[error("engine suggested illegal move {uci_move}")]
    IllegalSuggestion { uci_move: String },

    /// The engine's output closed before it answered.
    #[error("engine exited")]
    EngineExited,

    /// The engine binary could not be started.
    #[error("failed to start engine {path}: {source}")]
    Spawn {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// An I/O error occurred while talking to the engine.
    #[error("I/O error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },
}
