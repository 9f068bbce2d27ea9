//! Pieces stored in the board's arena and the handles that refer to them.

use std::fmt;

use crate::color::Color;
use crate::piece_kind::PieceKind;
use crate::square::Square;

/// Handle to a piece in a [`Board`](crate::Board) arena.
///
/// Ids are never reused: a captured or promoted piece leaves its slot empty,
/// so a stale id resolves to `None` rather than to another piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PieceId(u16);

impl PieceId {
    #[inline]
    pub(crate) fn new(index: usize) -> PieceId {
        debug_assert!(index <= u16::MAX as usize, "piece arena overflow");
        PieceId(index as u16)
    }

    /// Arena slot index.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A piece on the board: kind, color, where it stands and whether it has
/// ever moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    kind: PieceKind,
    color: Color,
    square: Square,
    moved: bool,
}

impl Piece {
    pub(crate) const fn new(kind: PieceKind, color: Color, square: Square) -> Piece {
        Piece {
            kind,
            color,
            square,
            moved: false,
        }
    }

    #[inline]
    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    #[inline]
    pub const fn color(&self) -> Color {
        self.color
    }

    /// The square this piece currently stands on.
    #[inline]
    pub const fn square(&self) -> Square {
        self.square
    }

    /// Whether this piece has moved since it was created.
    #[inline]
    pub const fn has_moved(&self) -> bool {
        self.moved
    }

    #[inline]
    pub fn is_king(&self) -> bool {
        self.kind == PieceKind::King
    }

    #[inline]
    pub fn is_rook(&self) -> bool {
        self.kind == PieceKind::Rook
    }

    #[inline]
    pub fn is_pawn(&self) -> bool {
        self.kind == PieceKind::Pawn
    }

    /// FEN character: uppercase for White, lowercase for Black.
    pub fn fen_char(&self) -> char {
        let c = self.kind.fen_char();
        match self.color {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }

    /// Display label such as "White Knight".
    pub fn label(&self) -> String {
        format!("{} {}", self.color.name(), self.kind.name())
    }

    #[inline]
    pub(crate) fn set_square(&mut self, square: Square) {
        self.square = square;
    }

    #[inline]
    pub(crate) fn set_moved(&mut self, moved: bool) {
        self.moved = moved;
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.color.name(), self.kind.name())
    }
}
