//! The chess board: an 8x8 grid of piece handles backed by a piece arena.

use std::fmt;

use tracing::debug;

use crate::color::Color;
use crate::error::BoardError;
use crate::fen::Placement;
use crate::piece::{Piece, PieceId};
use crate::piece_kind::PieceKind;
use crate::square::Square;

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Piece placement plus the en passant target.
///
/// Pieces live in an arena owned by the board and are addressed by
/// [`PieceId`]. The grid and the per-color rosters hold ids only: a piece is
/// on the grid at its stored square if and only if it is in its color's
/// roster.
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    /// Indexed `[rank][file]`.
    grid: [[Option<PieceId>; 8]; 8],
    arena: Vec<Option<Piece>>,
    /// Live pieces per side, indexed by [`Color::index()`].
    rosters: [Vec<PieceId>; Color::COUNT],
    /// Square passed over by the last double pawn step, for one ply only.
    en_passant: Option<Square>,
}

impl Board {
    /// A board with no pieces.
    pub fn empty() -> Board {
        Board {
            grid: [[None; 8]; 8],
            arena: Vec::with_capacity(32),
            rosters: [Vec::with_capacity(16), Vec::with_capacity(16)],
            en_passant: None,
        }
    }

    /// Return the standard starting position.
    pub fn starting_position() -> Board {
        let mut board = Board::empty();
        for color in Color::ALL {
            for (file, kind) in (0u8..).zip(BACK_RANK) {
                board.spawn(kind, color, Square::new(color.back_rank(), file));
            }
            for file in 0u8..8 {
                board.spawn(PieceKind::Pawn, color, Square::new(color.pawn_rank(), file));
            }
        }
        board
    }

    /// Create a new unmoved piece on an empty square and add it to its
    /// color's roster.
    pub fn spawn(&mut self, kind: PieceKind, color: Color, square: Square) -> PieceId {
        debug_assert!(!self.is_occupied(square), "spawning onto occupied {square}");
        let id = PieceId::new(self.arena.len());
        self.arena.push(Some(Piece::new(kind, color, square)));
        self.rosters[color.index()].push(id);
        self.place(Some(id), square);
        id
    }

    /// Look up a live piece by id.
    #[inline]
    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.arena.get(id.index()).and_then(Option::as_ref)
    }

    #[inline]
    pub(crate) fn piece_mut(&mut self, id: PieceId) -> Option<&mut Piece> {
        self.arena.get_mut(id.index()).and_then(Option::as_mut)
    }

    /// The id of the piece on `square`, if any.
    #[inline]
    pub fn select(&self, square: Square) -> Option<PieceId> {
        self.grid[square.rank() as usize][square.file() as usize]
    }

    /// The piece on `square`, if any.
    #[inline]
    pub fn piece_on(&self, square: Square) -> Option<&Piece> {
        self.select(square).and_then(|id| self.piece(id))
    }

    /// Return the color of the piece on `square`, or `None` if empty.
    #[inline]
    pub fn color_on(&self, square: Square) -> Option<Color> {
        self.piece_on(square).map(Piece::color)
    }

    #[inline]
    pub fn is_occupied(&self, square: Square) -> bool {
        self.select(square).is_some()
    }

    /// Both squares hold pieces of the same color. False if either is empty.
    pub fn has_same_color(&self, a: Square, b: Square) -> bool {
        matches!((self.color_on(a), self.color_on(b)), (Some(x), Some(y)) if x == y)
    }

    /// Both squares hold pieces of different colors. False if either is empty.
    pub fn has_opposite_color(&self, a: Square, b: Square) -> bool {
        matches!((self.color_on(a), self.color_on(b)), (Some(x), Some(y)) if x != y)
    }

    /// Whether `piece` could step onto `target`: the target is on the board
    /// (`Some`) and not held by a piece of the same color.
    pub fn accessible(&self, piece: PieceId, target: Option<Square>) -> bool {
        let (Some(target), Some(piece)) = (target, self.piece(piece)) else {
            return false;
        };
        self.color_on(target) != Some(piece.color())
    }

    /// Live pieces of one side, in creation order.
    #[inline]
    pub fn roster(&self, color: Color) -> &[PieceId] {
        &self.rosters[color.index()]
    }

    /// Iterate over the live pieces of one side with their ids.
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = (PieceId, &Piece)> + '_ {
        self.roster(color)
            .iter()
            .filter_map(|&id| self.piece(id).map(|piece| (id, piece)))
    }

    /// Raw grid write. Updates the stored square of `piece` but does no
    /// capture accounting and does not clear the piece's previous square.
    pub fn place(&mut self, piece: Option<PieceId>, square: Square) {
        if let Some(id) = piece
            && let Some(p) = self.piece_mut(id)
        {
            p.set_square(square);
        }
        self.grid[square.rank() as usize][square.file() as usize] = piece;
    }

    /// Move `piece` onto `square`, vacating the square it came from.
    ///
    /// With `destructive` set, an occupant of `square` is captured: it leaves
    /// its roster and the arena, and is returned. Without it, the occupant is
    /// simply overwritten on the grid and stays in its roster; callers that do
    /// this must put it back themselves.
    pub fn set_piece(
        &mut self,
        piece: Option<PieceId>,
        square: Square,
        destructive: bool,
    ) -> Option<Piece> {
        if let Some(id) = piece
            && let Some(from) = self.piece(id).map(Piece::square)
        {
            self.place(None, from);
        }
        let captured = match self.select(square) {
            Some(occupant) if destructive => self.capture(occupant),
            _ => None,
        };
        self.place(piece, square);
        captured
    }

    fn capture(&mut self, id: PieceId) -> Option<Piece> {
        let piece = self.arena.get_mut(id.index())?.take()?;
        self.rosters[piece.color().index()].retain(|&other| other != id);
        debug!(piece = %piece, square = %piece.square(), "captured");
        Some(piece)
    }

    /// Replace a pawn by a new Queen of the same color on the same square.
    ///
    /// The pawn's slot is discarded and the Queen takes its place in the
    /// roster. Returns the Queen's id.
    pub(crate) fn promote(&mut self, id: PieceId) -> Option<PieceId> {
        let pawn = self.arena.get_mut(id.index())?.take()?;
        let queen = PieceId::new(self.arena.len());
        self.arena
            .push(Some(Piece::new(PieceKind::Queen, pawn.color(), pawn.square())));
        if let Some(slot) = self.rosters[pawn.color().index()]
            .iter_mut()
            .find(|slot| **slot == id)
        {
            *slot = queen;
        }
        self.place(Some(queen), pawn.square());
        debug!(square = %pawn.square(), color = pawn.color().name(), "promoted to queen");
        Some(queen)
    }

    /// The king of `color`, if it is on the board.
    pub fn king(&self, color: Color) -> Option<PieceId> {
        self.pieces(color)
            .find(|(_, piece)| piece.is_king())
            .map(|(id, _)| id)
    }

    /// The king of `color`.
    ///
    /// # Panics
    ///
    /// Panics if `color` has no king. Every position reachable through
    /// [`Game`](crate::Game) has one.
    pub fn find_king(&self, color: Color) -> PieceId {
        match self.king(color) {
            Some(id) => id,
            None => panic!("board has no {} king", color.name()),
        }
    }

    /// Return the square of the king for the given color.
    ///
    /// # Panics
    ///
    /// Panics if `color` has no king.
    pub fn king_square(&self, color: Color) -> Square {
        match self.piece(self.find_king(color)) {
            Some(king) => king.square(),
            None => panic!("board has no {} king", color.name()),
        }
    }

    /// The square a pawn passed over on the previous ply, if any.
    #[inline]
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    #[inline]
    pub(crate) fn set_en_passant(&mut self, square: Option<Square>) {
        self.en_passant = square;
    }

    /// Validate structural invariants: grid and rosters agree, each side has
    /// exactly one king, no pawns stand on the first or eighth rank.
    pub fn validate(&self) -> Result<(), BoardError> {
        for color in Color::ALL {
            for (id, piece) in self.pieces(color) {
                if piece.color() != color || self.select(piece.square()) != Some(id) {
                    return Err(BoardError::RosterMismatch {
                        square: piece.square(),
                    });
                }
            }
        }

        for square in Square::all() {
            let Some(id) = self.select(square) else {
                continue;
            };
            let listed = self.piece(id).is_some_and(|piece| {
                piece.square() == square && self.roster(piece.color()).contains(&id)
            });
            if !listed {
                return Err(BoardError::RosterMismatch { square });
            }
        }

        for color in Color::ALL {
            let count = self.pieces(color).filter(|(_, p)| p.is_king()).count();
            match count {
                0 => return Err(BoardError::MissingKing { color: color.name() }),
                1 => {}
                _ => {
                    return Err(BoardError::ExtraKing {
                        color: color.name(),
                        count,
                    });
                }
            }
        }

        let pawn_on_edge = Color::ALL
            .into_iter()
            .flat_map(|color| self.pieces(color))
            .any(|(_, p)| p.is_pawn() && matches!(p.square().rank(), 0 | 7));
        if pawn_on_edge {
            return Err(BoardError::PawnsOnBackRank);
        }

        Ok(())
    }

    /// Return a wrapper that displays the board as an 8x8 grid.
    pub fn pretty(&self) -> PrettyBoard<'_> {
        PrettyBoard(self)
    }

    /// Return a wrapper that displays the FEN piece placement field.
    pub fn placement(&self) -> Placement<'_> {
        Placement::new(self)
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::starting_position()
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board(\"{}\")", self.placement())
    }
}

/// Wrapper for pretty-printing a board as an 8x8 grid.
pub struct PrettyBoard<'a>(&'a Board);

impl fmt::Display for PrettyBoard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let board = self.0;
        for rank in (0u8..8).rev() {
            write!(f, "{}  ", rank + 1)?;
            for file in 0u8..8 {
                let c = board
                    .piece_on(Square::new(rank, file))
                    .map_or('.', Piece::fen_char);
                if file < 7 {
                    write!(f, "{c} ")?;
                } else {
                    write!(f, "{c}")?;
                }
            }
            writeln!(f)?;
        }
        write!(f, "   a b c d e f g h")
    }
}

#[cfg(test)]
mod tests {
    use super::Board;
    use crate::error::BoardError;
    use crate::{Color, PieceKind, Square};

    #[test]
    fn starting_position_validates() {
        let board = Board::starting_position();
        board.validate().unwrap();
        assert_eq!(board.roster(Color::White).len(), 16);
        assert_eq!(board.roster(Color::Black).len(), 16);
    }

    #[test]
    fn starting_position_piece_on() {
        let board = Board::starting_position();
        let e1 = board.piece_on(Square::E1).unwrap();
        assert_eq!(e1.kind(), PieceKind::King);
        assert_eq!(e1.color(), Color::White);
        let d8 = board.piece_on(Square::D8).unwrap();
        assert_eq!(d8.kind(), PieceKind::Queen);
        assert_eq!(d8.color(), Color::Black);
        assert!(board.piece_on(Square::E4).is_none());
    }

    #[test]
    fn king_lookup() {
        let board = Board::starting_position();
        assert_eq!(board.king_square(Color::White), Square::E1);
        assert_eq!(board.king_square(Color::Black), Square::E8);
        assert_eq!(board.find_king(Color::White), board.select(Square::E1).unwrap());
        assert_eq!(Board::empty().king(Color::White), None);
    }

    #[test]
    #[should_panic(expected = "no White king")]
    fn find_king_panics_without_king() {
        Board::empty().find_king(Color::White);
    }

    #[test]
    #[should_panic(expected = "no Black king")]
    fn king_square_panics_like_find_king() {
        let mut board = Board::empty();
        board.spawn(PieceKind::King, Color::White, Square::E1);
        board.king_square(Color::Black);
    }

    #[test]
    fn color_comparisons() {
        let board = Board::starting_position();
        assert!(board.has_same_color(Square::A1, Square::H2));
        assert!(board.has_opposite_color(Square::A1, Square::A8));
        assert!(!board.has_same_color(Square::A1, Square::A4));
        assert!(!board.has_opposite_color(Square::A4, Square::A8));
    }

    #[test]
    fn accessible_gates_on_color_and_bounds() {
        let board = Board::starting_position();
        let knight = board.select(Square::G1).unwrap();
        assert!(board.accessible(knight, Some(Square::F3)));
        assert!(board.accessible(knight, Some(Square::G7)));
        assert!(!board.accessible(knight, Some(Square::E2)));
        assert!(!board.accessible(knight, Square::G1.offset(-1, 2)));
    }

    #[test]
    fn set_piece_captures_when_destructive() {
        let mut board = Board::starting_position();
        let rook = board.select(Square::A1).unwrap();
        let victim = board.select(Square::A7).unwrap();
        let captured = board.set_piece(Some(rook), Square::A7, true).unwrap();
        assert_eq!(captured.kind(), PieceKind::Pawn);
        assert_eq!(captured.color(), Color::Black);
        assert_eq!(board.select(Square::A1), None);
        assert_eq!(board.select(Square::A7), Some(rook));
        assert_eq!(board.piece(rook).unwrap().square(), Square::A7);
        assert!(board.piece(victim).is_none());
        assert!(!board.roster(Color::Black).contains(&victim));
        board.validate().unwrap();
    }

    #[test]
    fn set_piece_keeps_occupant_when_not_destructive() {
        let mut board = Board::starting_position();
        let rook = board.select(Square::A1).unwrap();
        let pawn = board.select(Square::A7).unwrap();
        assert!(board.set_piece(Some(rook), Square::A7, false).is_none());
        assert!(board.roster(Color::Black).contains(&pawn));
        assert_eq!(board.piece(pawn).unwrap().square(), Square::A7);

        board.set_piece(Some(rook), Square::A1, false);
        board.place(Some(pawn), Square::A7);
        assert_eq!(board, Board::starting_position());
    }

    #[test]
    fn promote_swaps_roster_entry() {
        let mut board = Board::empty();
        board.spawn(PieceKind::King, Color::White, Square::E1);
        board.spawn(PieceKind::King, Color::Black, Square::E8);
        let pawn = board.spawn(PieceKind::Pawn, Color::White, Square::A7);
        board.set_piece(Some(pawn), Square::A8, true);
        let queen = board.promote(pawn).unwrap();

        assert!(board.piece(pawn).is_none());
        assert!(!board.roster(Color::White).contains(&pawn));
        assert!(board.roster(Color::White).contains(&queen));
        assert_eq!(board.select(Square::A8), Some(queen));
        assert_eq!(board.piece(queen).unwrap().kind(), PieceKind::Queen);
        board.validate().unwrap();
    }

    #[test]
    fn validate_reports_missing_king() {
        let mut board = Board::empty();
        board.spawn(PieceKind::King, Color::White, Square::E1);
        assert_eq!(
            board.validate(),
            Err(BoardError::MissingKing { color: "Black" })
        );
    }

    #[test]
    fn validate_reports_extra_king() {
        let mut board = Board::starting_position();
        board.spawn(PieceKind::King, Color::White, Square::E4);
        assert_eq!(
            board.validate(),
            Err(BoardError::ExtraKing {
                color: "White",
                count: 2
            })
        );
    }

    #[test]
    fn validate_reports_pawn_on_back_rank() {
        let mut board = Board::empty();
        board.spawn(PieceKind::King, Color::White, Square::E1);
        board.spawn(PieceKind::King, Color::Black, Square::E8);
        board.spawn(PieceKind::Pawn, Color::Black, Square::A1);
        assert_eq!(board.validate(), Err(BoardError::PawnsOnBackRank));
    }

    #[test]
    fn validate_reports_stale_grid_entry() {
        let mut board = Board::starting_position();
        let knight = board.select(Square::B1).unwrap();
        board.place(Some(knight), Square::C3);
        assert_eq!(
            board.validate(),
            Err(BoardError::RosterMismatch { square: Square::B1 })
        );
    }

    #[test]
    fn pretty_print() {
        let text = Board::starting_position().pretty().to_string();
        let first = text.lines().next().unwrap();
        assert_eq!(first, "8  r n b q k b n r");
        assert!(text.ends_with("   a b c d e f g h"));
    }
}
