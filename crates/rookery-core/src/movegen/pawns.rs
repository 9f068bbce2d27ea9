//! Pawn pushes and captures.

use crate::board::Board;
use crate::piece::{Piece, PieceId};
use crate::square::Square;

pub(super) fn pawn_moves(board: &Board, pawn: &Piece) -> Vec<Square> {
    let mut moves = Vec::with_capacity(4);
    let from = pawn.square();
    let forward = pawn.color().forward();

    if let Some(one) = from.offset(forward, 0).filter(|&sq| !board.is_occupied(sq)) {
        moves.push(one);
        if !pawn.has_moved()
            && let Some(two) = one.offset(forward, 0).filter(|&sq| !board.is_occupied(sq))
        {
            moves.push(two);
        }
    }

    for side in [-1, 1] {
        let Some(target) = from.offset(forward, side) else {
            continue;
        };
        if board.has_opposite_color(from, target) || en_passant_victim(board, pawn, target).is_some()
        {
            moves.push(target);
        }
    }

    moves
}

/// The pawn that `pawn` would take by moving diagonally onto `target` en
/// passant.
///
/// `target` must be the board's en passant square and the square beside
/// `pawn` on the target's file must hold an enemy pawn.
pub(crate) fn en_passant_victim(board: &Board, pawn: &Piece, target: Square) -> Option<PieceId> {
    let from = pawn.square();
    if !pawn.is_pawn() || board.en_passant() != Some(target) || from.file() == target.file() {
        return None;
    }
    let passed = Square::new(from.rank(), target.file());
    let victim = board.select(passed)?;
    board
        .piece(victim)
        .is_some_and(|p| p.is_pawn() && p.color() != pawn.color())
        .then_some(victim)
}
