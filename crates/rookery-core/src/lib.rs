//! Chess rules: board representation, move patterns, legality, turn control
//! and FEN.

mod board;
mod castle;
mod color;
mod error;
mod fen;
mod game;
pub mod legality;
mod make_move;
pub mod movegen;
pub mod perft;
mod piece;
mod piece_kind;
mod square;

pub use board::{Board, PrettyBoard};
pub use castle::{CastleRights, CastleSide};
pub use color::Color;
pub use error::{BoardError, FenError, GameError, ParseSquareError};
pub use fen::{Placement, STARTING_FEN};
pub use game::{Game, GameStatus, MoveRecord, Outcome, TurnState};
pub use piece::{Piece, PieceId};
pub use piece_kind::PieceKind;
pub use square::Square;
