//! Turn control: applying moves, the clocks, and end-of-game detection.

use std::fmt;

use tracing::{debug, info};

use crate::board::Board;
use crate::castle::CastleSide;
use crate::color::Color;
use crate::error::GameError;
use crate::legality::{is_in_check, valid_moves};
use crate::make_move::after_move;
use crate::piece::PieceId;
use crate::piece_kind::PieceKind;
use crate::square::Square;

/// Side to move and the two move counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TurnState {
    side_to_move: Color,
    /// Plies since the last pawn move or capture.
    halfmove_clock: u16,
    /// Completed Black moves; starts at 0.
    fullmove_number: u16,
}

impl TurnState {
    /// White to move with both counters at zero.
    pub const fn new() -> TurnState {
        TurnState {
            side_to_move: Color::White,
            halfmove_clock: 0,
            fullmove_number: 0,
        }
    }

    pub(crate) const fn from_parts(
        side_to_move: Color,
        halfmove_clock: u16,
        fullmove_number: u16,
    ) -> TurnState {
        TurnState {
            side_to_move,
            halfmove_clock,
            fullmove_number,
        }
    }

    #[inline]
    pub const fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    pub const fn halfmove_clock(&self) -> u16 {
        self.halfmove_clock
    }

    #[inline]
    pub const fn fullmove_number(&self) -> u16 {
        self.fullmove_number
    }

    fn advance(&mut self, reset_clock: bool) {
        self.halfmove_clock = if reset_clock {
            0
        } else {
            self.halfmove_clock.saturating_add(1)
        };
        if self.side_to_move == Color::Black {
            self.fullmove_number = self.fullmove_number.saturating_add(1);
        }
        self.side_to_move = !self.side_to_move;
    }
}

impl Default for TurnState {
    fn default() -> Self {
        TurnState::new()
    }
}

/// Everything an applied move did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRecord {
    /// The mover's id before the move. A promoted pawn's id is dead afterwards.
    pub piece: PieceId,
    pub kind: PieceKind,
    pub color: Color,
    pub from: Square,
    pub to: Square,
    /// Kind of the piece taken, on the destination or en passant.
    pub captured: Option<PieceKind>,
    pub en_passant: bool,
    pub castle: Option<CastleSide>,
    /// Id of the Queen that replaced a promoting pawn.
    pub promotion: Option<PieceId>,
}

impl fmt::Display for MoveRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if self.promotion.is_some() {
            write!(f, "q")?;
        }
        Ok(())
    }
}

/// How a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Checkmate { winner: Color },
    Stalemate,
}

/// Whether the side to move can still play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Over(Outcome),
}

/// A chess game: the board plus whose turn it is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    board: Board,
    turn: TurnState,
}

impl Game {
    /// A game at the standard starting position, White to move.
    pub fn new() -> Game {
        Game {
            board: Board::starting_position(),
            turn: TurnState::new(),
        }
    }

    pub(crate) fn from_parts(board: Board, turn: TurnState) -> Game {
        Game { board, turn }
    }

    /// Discard the current game and start over.
    pub fn new_game(&mut self) {
        *self = Game::new();
        info!("new game");
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn turn(&self) -> &TurnState {
        &self.turn
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.turn.side_to_move
    }

    /// The id of the piece on `square`, if any.
    #[inline]
    pub fn select(&self, square: Square) -> Option<PieceId> {
        self.board.select(square)
    }

    /// Label of the piece on `square`, such as "White Knight".
    pub fn describe(&self, square: Square) -> Option<String> {
        self.board.piece_on(square).map(|piece| piece.label())
    }

    /// Legal destinations for `id`.
    pub fn valid_moves(&mut self, id: PieceId) -> Vec<Square> {
        valid_moves(&mut self.board, id)
    }

    /// Every legal `(piece, destination)` pair for `color`.
    pub fn legal_moves(&mut self, color: Color) -> Vec<(PieceId, Square)> {
        let roster = self.board.roster(color).to_vec();
        roster
            .into_iter()
            .flat_map(|id| {
                valid_moves(&mut self.board, id)
                    .into_iter()
                    .map(move |to| (id, to))
            })
            .collect()
    }

    /// Whether `color` has no legal move at all. Checkmate and stalemate
    /// both count; [`Game::status`] tells them apart.
    pub fn is_game_over(&mut self, color: Color) -> bool {
        let roster = self.board.roster(color).to_vec();
        roster
            .into_iter()
            .all(|id| valid_moves(&mut self.board, id).is_empty())
    }

    /// Whether the king of `color` is attacked.
    pub fn is_in_check(&self, color: Color) -> bool {
        is_in_check(&self.board, color)
    }

    /// Status from the point of view of the side to move.
    pub fn status(&mut self) -> GameStatus {
        let side = self.side_to_move();
        if !self.is_game_over(side) {
            return GameStatus::InProgress;
        }
        if self.is_in_check(side) {
            GameStatus::Over(Outcome::Checkmate { winner: !side })
        } else {
            GameStatus::Over(Outcome::Stalemate)
        }
    }

    /// Move `id` to `to` without checking legality or whose turn it is.
    ///
    /// Relocates the piece (capturing any occupant), applies castling, en
    /// passant and promotion, updates the half-move clock, passes the turn and
    /// bumps the full-move number after Black's move.
    pub fn apply_move(&mut self, id: PieceId, to: Square) -> Result<MoveRecord, GameError> {
        let mover = *self.board.piece(id).ok_or(GameError::UnknownPiece { id })?;
        let captured = self.board.set_piece(Some(id), to, true);
        let effects = after_move(&mut self.board, id, &mover, to);
        let captured = captured.or(effects.en_passant_capture);

        self.turn.advance(mover.is_pawn() || captured.is_some());

        let record = MoveRecord {
            piece: id,
            kind: mover.kind(),
            color: mover.color(),
            from: mover.square(),
            to,
            captured: captured.map(|piece| piece.kind()),
            en_passant: effects.en_passant_capture.is_some(),
            castle: effects.castle,
            promotion: effects.promotion,
        };
        debug!(
            mv = %record,
            piece = %mover,
            captured = ?record.captured,
            halfmove = self.turn.halfmove_clock,
            "applied move"
        );
        Ok(record)
    }

    /// Validate and apply a move given by its origin and destination squares.
    pub fn play(&mut self, from: Square, to: Square) -> Result<MoveRecord, GameError> {
        let id = self
            .board
            .select(from)
            .ok_or(GameError::NoPieceAt { square: from })?;
        let color = self
            .board
            .piece(id)
            .map(|piece| piece.color())
            .ok_or(GameError::NoPieceAt { square: from })?;
        if color != self.side_to_move() {
            return Err(GameError::NotYourTurn {
                square: from,
                color: color.name(),
            });
        }
        if !self.valid_moves(id).contains(&to) {
            return Err(GameError::IllegalMove { from, to });
        }
        self.apply_move(id, to)
    }
}

impl Default for Game {
    fn default() -> Self {
        Game::new()
    }
}
