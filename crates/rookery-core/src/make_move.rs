//! Per-piece side effects applied after a piece has been relocated.

use tracing::debug;

use crate::board::Board;
use crate::castle::CastleSide;
use crate::movegen::en_passant_victim;
use crate::piece::{Piece, PieceId};
use crate::square::Square;

/// What a move did besides relocating the mover.
#[derive(Debug, Default)]
pub(crate) struct SideEffects {
    pub en_passant_capture: Option<Piece>,
    pub promotion: Option<PieceId>,
    pub castle: Option<CastleSide>,
}

/// Apply the rules that follow a move of `id` from `from` to `to`.
///
/// `mover` is the piece as it was before the move, so the en passant target
/// it is compared against is the one the move was generated with. The
/// previous target is cleared before anything else; a double step sets a
/// new one.
pub(crate) fn after_move(board: &mut Board, id: PieceId, mover: &Piece, to: Square) -> SideEffects {
    let mut effects = SideEffects::default();
    let from = mover.square();

    if let Some(victim) = en_passant_victim(board, mover, to)
        && let Some(passed) = board.piece(victim).map(Piece::square)
    {
        effects.en_passant_capture = board.set_piece(None, passed, true);
        debug!(%passed, "en passant capture");
    }

    board.set_en_passant(None);
    if let Some(piece) = board.piece_mut(id) {
        piece.set_moved(true);
    }

    if mover.is_pawn() {
        if from.rank().abs_diff(to.rank()) == 2 {
            board.set_en_passant(Some(Square::new((from.rank() + to.rank()) / 2, from.file())));
        }
        if to.rank() == mover.color().promotion_rank() {
            effects.promotion = board.promote(id);
        }
    } else if mover.is_king()
        && from.rank() == to.rank()
        && let Some(side) = CastleSide::from_king_shift(from.file(), to.file())
    {
        let corner = Square::new(to.rank(), side.rook_file());
        if let Some(rook) = board.select(corner) {
            let landing = Square::new(to.rank(), side.rook_destination_file());
            board.set_piece(Some(rook), landing, false);
            if let Some(rook) = board.piece_mut(rook) {
                rook.set_moved(true);
            }
            debug!(?side, rook = %landing, "castled");
        }
        effects.castle = Some(side);
    }

    effects
}
