//! Knight moves.

use crate::board::Board;
use crate::piece::PieceId;
use crate::square::Square;

use super::step_targets;

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
];

pub(super) fn knight_moves(board: &Board, id: PieceId, from: Square) -> Vec<Square> {
    step_targets(board, id, from, &KNIGHT_OFFSETS).collect()
}
