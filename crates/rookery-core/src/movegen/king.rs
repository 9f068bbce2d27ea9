//! King steps and castling.

use crate::board::Board;
use crate::castle::CastleSide;
use crate::piece::{Piece, PieceId};
use crate::square::Square;

use super::step_targets;

const KING_OFFSETS: [(i8, i8); 8] = [
    (1, 1),
    (1, 0),
    (1, -1),
    (0, 1),
    (0, -1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

pub(super) fn king_moves(board: &Board, id: PieceId, from: Square) -> Vec<Square> {
    let mut moves: Vec<Square> = step_targets(board, id, from, &KING_OFFSETS).collect();
    for side in CastleSide::ALL {
        if can_castle(board, id, side) {
            moves.push(Square::new(from.rank(), side.king_destination_file()));
        }
    }
    moves
}

/// The king has never moved and the corner on `side` holds an unmoved piece
/// of the king's color.
pub fn allow_castle(board: &Board, king: PieceId, side: CastleSide) -> bool {
    let Some(king) = board.piece(king).filter(|k| k.is_king() && !k.has_moved()) else {
        return false;
    };
    let corner = Square::new(king.square().rank(), side.rook_file());
    board
        .piece_on(corner)
        .is_some_and(|p| p.color() == king.color() && !p.has_moved())
}

/// [`allow_castle`] holds, the corner piece is a rook and every square
/// between king and rook is empty.
///
/// Attacked squares are not considered here; the legality filter handles
/// them.
pub fn can_castle(board: &Board, king: PieceId, side: CastleSide) -> bool {
    if !allow_castle(board, king, side) {
        return false;
    }
    let Some(from) = board.piece(king).map(Piece::square) else {
        return false;
    };
    let corner = Square::new(from.rank(), side.rook_file());
    if !board.piece_on(corner).is_some_and(Piece::is_rook) {
        return false;
    }
    let (low, high) = if from.file() < corner.file() {
        (from.file(), corner.file())
    } else {
        (corner.file(), from.file())
    };
    (low + 1..high).all(|file| !board.is_occupied(Square::new(from.rank(), file)))
}
