//! Error types for coordinates, FEN parsing, board validation and move entry.

use crate::square::Square;

/// A coordinate string that does not name a square.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid square: \"{found}\"")]
pub struct ParseSquareError {
    /// The rejected input.
    pub found: String,
}

/// Errors that occur when parsing a FEN string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FenError {
    /// The FEN string does not have exactly 6 space-separated fields.
    #[error("expected 6 FEN fields, found {found}")]
    WrongFieldCount { found: usize },
    /// The piece placement section does not have exactly 8 ranks.
    #[error("expected 8 ranks in piece placement, found {found}")]
    WrongRankCount { found: usize },
    /// A rank in the piece placement describes more or fewer than 8 squares.
    #[error("rank {rank} describes {length} squares, expected 8")]
    BadRankLength {
        /// Rank as printed on the board (8 for the first FEN segment).
        rank: u8,
        length: usize,
    },
    #[error("invalid piece character: '{character}'")]
    InvalidPieceChar { character: char },
    #[error("invalid active color: \"{found}\"")]
    InvalidColor { found: String },
    #[error("invalid castling character: '{character}'")]
    InvalidCastlingChar { character: char },
    #[error("invalid en passant square: \"{found}\"")]
    InvalidEnPassant { found: String },
    #[error("invalid {field}: \"{found}\"")]
    InvalidMoveCounter {
        /// "halfmove clock" or "fullmove number".
        field: &'static str,
        found: String,
    },
    /// The side that is not to move has its king attacked.
    #[error("{color} is in check but it is not their move")]
    OpponentInCheck { color: &'static str },
    /// The parsed board fails structural validation.
    #[error("invalid board: {source}")]
    InvalidBoard {
        #[from]
        source: BoardError,
    },
}

/// Errors from structural validation of a [`Board`](crate::Board).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("no {color} king on the board")]
    MissingKing { color: &'static str },
    #[error("expected 1 {color} king, found {count}")]
    ExtraKing { color: &'static str, count: usize },
    /// Pawns occupy the first or eighth rank.
    #[error("pawns found on back rank")]
    PawnsOnBackRank,
    /// The grid and the rosters disagree about a square.
    #[error("grid and rosters disagree at {square}")]
    RosterMismatch { square: Square },
}

/// A move rejected by [`Game::play`](crate::Game::play).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("no piece on {square}")]
    NoPieceAt { square: Square },
    #[error("the piece on {square} belongs to {color}, who is not to move")]
    NotYourTurn { square: Square, color: &'static str },
    #[error("illegal move {from}{to}")]
    IllegalMove { from: Square, to: Square },
    /// The id does not refer to a live piece (captured or promoted away).
    #[error("piece {id} is not on the board")]
    UnknownPiece { id: crate::PieceId },
}
