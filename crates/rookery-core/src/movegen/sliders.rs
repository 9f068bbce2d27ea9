//! Bishop, rook, and queen rays.

use crate::board::Board;
use crate::piece::PieceId;
use crate::square::Square;

pub(super) const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
pub(super) const ROOK_DIRECTIONS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
pub(super) const QUEEN_DIRECTIONS: [(i8, i8); 8] = [
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
];

/// Walk each ray until the edge or the first occupied square, which is
/// included only when it holds an enemy piece.
pub(super) fn slider_moves(
    board: &Board,
    id: PieceId,
    from: Square,
    directions: &[(i8, i8)],
) -> Vec<Square> {
    let mut moves = Vec::with_capacity(14);
    for &(d_rank, d_file) in directions {
        let mut current = from;
        while let Some(next) = current.offset(d_rank, d_file) {
            if !board.accessible(id, Some(next)) {
                break;
            }
            moves.push(next);
            if board.is_occupied(next) {
                break;
            }
            current = next;
        }
    }
    moves
}

#[cfg(test)]
mod tests {
    use crate::movegen::possible_moves;
    use crate::{Board, Color, PieceKind, Square};

    #[test]
    fn rook_on_empty_board() {
        let mut board = Board::empty();
        let rook = board.spawn(PieceKind::Rook, Color::White, Square::D4);
        assert_eq!(possible_moves(&board, rook).len(), 14);
    }

    #[test]
    fn bishop_stops_at_blockers() {
        let mut board = Board::empty();
        let bishop = board.spawn(PieceKind::Bishop, Color::White, Square::C1);
        board.spawn(PieceKind::Pawn, Color::White, Square::D2);
        board.spawn(PieceKind::Pawn, Color::Black, Square::A3);
        let mut moves = possible_moves(&board, bishop);
        moves.sort();
        assert_eq!(moves, vec![Square::B2, Square::A3]);
    }

    #[test]
    fn queen_combines_rays() {
        let mut board = Board::empty();
        let queen = board.spawn(PieceKind::Queen, Color::Black, Square::D4);
        assert_eq!(possible_moves(&board, queen).len(), 27);
    }

    #[test]
    fn boxed_in_sliders_have_no_moves() {
        let board = Board::starting_position();
        for square in [Square::A1, Square::C1, Square::D1, Square::F8] {
            let id = board.select(square).unwrap();
            assert!(possible_moves(&board, id).is_empty(), "{square}");
        }
    }
}
