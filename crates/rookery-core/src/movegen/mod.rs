//! Pseudo-legal move patterns, one per piece kind.
//!
//! The destinations produced here ignore whether the mover's own king would
//! be left in check; [`crate::legality`] filters them.

mod king;
mod knights;
mod pawns;
mod sliders;

use crate::board::Board;
use crate::piece::PieceId;
use crate::piece_kind::PieceKind;
use crate::square::Square;

pub use self::king::{allow_castle, can_castle};
pub(crate) use self::pawns::en_passant_victim;

use self::king::king_moves;
use self::knights::knight_moves;
use self::pawns::pawn_moves;
use self::sliders::{BISHOP_DIRECTIONS, QUEEN_DIRECTIONS, ROOK_DIRECTIONS, slider_moves};

/// Destinations `id` could move to by its movement pattern alone.
///
/// Returns an empty list if `id` is not a live piece.
pub fn possible_moves(board: &Board, id: PieceId) -> Vec<Square> {
    let Some(piece) = board.piece(id) else {
        return Vec::new();
    };
    match piece.kind() {
        PieceKind::Pawn => pawn_moves(board, piece),
        PieceKind::Knight => knight_moves(board, id, piece.square()),
        PieceKind::Bishop => slider_moves(board, id, piece.square(), &BISHOP_DIRECTIONS),
        PieceKind::Rook => slider_moves(board, id, piece.square(), &ROOK_DIRECTIONS),
        PieceKind::Queen => slider_moves(board, id, piece.square(), &QUEEN_DIRECTIONS),
        PieceKind::King => king_moves(board, id, piece.square()),
    }
}

/// Single-step targets from `from`, each gated by [`Board::accessible`].
fn step_targets<'a>(
    board: &'a Board,
    id: PieceId,
    from: Square,
    offsets: &'a [(i8, i8)],
) -> impl Iterator<Item = Square> + 'a {
    offsets.iter().filter_map(move |&(d_rank, d_file)| {
        let target = from.offset(d_rank, d_file);
        board.accessible(id, target).then_some(target).flatten()
    })
}
