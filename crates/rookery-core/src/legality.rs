//! Check detection and the legal-move filter.
//!
//! Candidate moves are tried on the real board through a [`Probe`], which
//! puts everything back when it goes out of scope.

use std::ops::Deref;

use crate::board::Board;
use crate::color::Color;
use crate::movegen::{en_passant_victim, possible_moves};
use crate::piece::PieceId;
use crate::square::Square;

/// A tentative, non-destructive move held for the duration of a scan.
///
/// Nothing leaves a roster while the probe is alive: a displaced occupant is
/// only hidden from the grid, and so is a pawn taken en passant. Dropping the
/// probe restores the mover and both hidden pieces, including during
/// unwinding.
struct Probe<'a> {
    board: &'a mut Board,
    mover: PieceId,
    color: Color,
    origin: Square,
    target: Square,
    displaced: Option<PieceId>,
    lifted: Option<(PieceId, Square)>,
}

impl<'a> Probe<'a> {
    fn new(board: &'a mut Board, mover: PieceId, target: Square) -> Option<Probe<'a>> {
        let piece = *board.piece(mover)?;
        let displaced = board.select(target);
        let lifted = en_passant_victim(board, &piece, target)
            .and_then(|id| board.piece(id).map(|victim| (id, victim.square())));

        if let Some((_, square)) = lifted {
            board.place(None, square);
        }
        board.set_piece(Some(mover), target, false);

        Some(Probe {
            board,
            mover,
            color: piece.color(),
            origin: piece.square(),
            target,
            displaced,
            lifted,
        })
    }

    /// Whether `id` is off the grid for the duration of the probe.
    fn is_hidden(&self, id: PieceId) -> bool {
        self.displaced == Some(id) || self.lifted.is_some_and(|(lifted, _)| lifted == id)
    }
}

impl Deref for Probe<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        self.board
    }
}

impl Drop for Probe<'_> {
    fn drop(&mut self) {
        self.board.set_piece(Some(self.mover), self.origin, false);
        self.board.place(self.displaced, self.target);
        if let Some((id, square)) = self.lifted {
            self.board.place(Some(id), square);
        }
    }
}

/// Whether `id` attacks the opposing king from where it stands.
///
/// # Panics
///
/// Panics if the opposing side has no king.
pub fn is_checking(board: &Board, id: PieceId) -> bool {
    let Some(piece) = board.piece(id) else {
        return false;
    };
    let king = board.king_square(!piece.color());
    possible_moves(board, id).contains(&king)
}

/// Whether the king of `color` is attacked right now.
pub fn is_in_check(board: &Board, color: Color) -> bool {
    board
        .roster(!color)
        .iter()
        .any(|&id| is_checking(board, id))
}

/// Whether moving `id` to `candidate` would leave its own king attacked.
///
/// The board is modified only for the duration of the call and compares
/// equal to its prior state afterwards.
pub fn will_leave_in_check(board: &mut Board, id: PieceId, candidate: Square) -> bool {
    let Some(probe) = Probe::new(board, id, candidate) else {
        return false;
    };
    probe
        .roster(!probe.color)
        .iter()
        .filter(|&&other| !probe.is_hidden(other))
        .any(|&other| is_checking(&probe, other))
}

/// Legal destinations for `id`: its pseudo-legal moves that keep its king
/// safe. A castle is also refused when the king starts in check or crosses
/// an attacked square.
pub fn valid_moves(board: &mut Board, id: PieceId) -> Vec<Square> {
    let mut moves = possible_moves(board, id);
    moves.retain(|&to| !will_leave_in_check(board, id, to) && !castles_through_check(board, id, to));
    moves
}

fn castles_through_check(board: &mut Board, id: PieceId, to: Square) -> bool {
    let Some(king) = board.piece(id).copied().filter(|p| p.is_king()) else {
        return false;
    };
    let from = king.square();
    if from.rank() != to.rank() || from.file().abs_diff(to.file()) != 2 {
        return false;
    }
    let transit = Square::new(from.rank(), (from.file() + to.file()) / 2);
    is_in_check(board, king.color()) || will_leave_in_check(board, id, transit)
}
