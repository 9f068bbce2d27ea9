//! Castling sides and the castling field of a FEN record.

use std::fmt;

use crate::board::Board;
use crate::color::Color;
use crate::error::FenError;
use crate::movegen::allow_castle;

/// Which side of the board to castle toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastleSide {
    KingSide,
    QueenSide,
}

impl CastleSide {
    /// Both sides, king side first (FEN letter order).
    pub const ALL: [CastleSide; 2] = [CastleSide::KingSide, CastleSide::QueenSide];

    /// File of the corner rook.
    #[inline]
    pub const fn rook_file(self) -> u8 {
        match self {
            CastleSide::KingSide => 7,
            CastleSide::QueenSide => 0,
        }
    }

    /// File the king lands on.
    #[inline]
    pub const fn king_destination_file(self) -> u8 {
        match self {
            CastleSide::KingSide => 6,
            CastleSide::QueenSide => 2,
        }
    }

    /// File the rook lands on, next to the king.
    #[inline]
    pub const fn rook_destination_file(self) -> u8 {
        match self {
            CastleSide::KingSide => 5,
            CastleSide::QueenSide => 3,
        }
    }

    /// The side implied by a king moving from `from_file` to `to_file`, if the
    /// move is a two-file shift.
    pub const fn from_king_shift(from_file: u8, to_file: u8) -> Option<CastleSide> {
        match to_file as i8 - from_file as i8 {
            2 => Some(CastleSide::KingSide),
            -2 => Some(CastleSide::QueenSide),
            _ => None,
        }
    }
}

/// Snapshot of which castles are still allowed, as written in FEN.
///
/// The board does not store this; it is derived from the moved flags of the
/// kings and corner pieces. Bit 0 = WK, 1 = WQ, 2 = BK, 3 = BQ.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct CastleRights(u8);

impl CastleRights {
    /// No castling rights.
    pub const NONE: CastleRights = CastleRights(0);
    /// All castling rights.
    pub const ALL: CastleRights = CastleRights(0b1111);

    /// Return `true` if no castling rights remain.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Check whether a specific color and side can castle.
    #[inline]
    pub const fn has(self, color: Color, side: CastleSide) -> bool {
        self.0 & Self::bit(color, side) != 0
    }

    /// Return new rights with the given color and side added.
    #[inline]
    pub const fn with(self, color: Color, side: CastleSide) -> CastleRights {
        CastleRights(self.0 | Self::bit(color, side))
    }

    #[inline]
    const fn bit(color: Color, side: CastleSide) -> u8 {
        let shift = color.index() * 2
            + match side {
                CastleSide::KingSide => 0,
                CastleSide::QueenSide => 1,
            };
        1 << shift
    }

    /// Derive the rights from the board: every side for which
    /// [`allow_castle`] holds.
    pub fn from_board(board: &Board) -> CastleRights {
        let mut rights = CastleRights::NONE;
        for color in Color::ALL {
            let Some(king) = board.king(color) else {
                continue;
            };
            for side in CastleSide::ALL {
                if allow_castle(board, king, side) {
                    rights = rights.with(color, side);
                }
            }
        }
        rights
    }

    /// Parse castling rights from the FEN castling field (e.g. "KQkq", "Kq", "-").
    pub fn from_fen(s: &str) -> Result<CastleRights, FenError> {
        if s == "-" {
            return Ok(CastleRights::NONE);
        }

        s.chars().try_fold(CastleRights::NONE, |rights, c| {
            let (color, side) = match c {
                'K' => (Color::White, CastleSide::KingSide),
                'Q' => (Color::White, CastleSide::QueenSide),
                'k' => (Color::Black, CastleSide::KingSide),
                'q' => (Color::Black, CastleSide::QueenSide),
                _ => return Err(FenError::InvalidCastlingChar { character: c }),
            };
            Ok(rights.with(color, side))
        })
    }

    /// Serialize castling rights to the FEN castling field.
    pub fn to_fen(self) -> String {
        if self.is_empty() {
            return "-".to_string();
        }

        let mut s = String::with_capacity(4);
        for color in Color::ALL {
            for side in CastleSide::ALL {
                if self.has(color, side) {
                    let c = match side {
                        CastleSide::KingSide => 'k',
                        CastleSide::QueenSide => 'q',
                    };
                    s.push(match color {
                        Color::White => c.to_ascii_uppercase(),
                        Color::Black => c,
                    });
                }
            }
        }
        s
    }
}

impl fmt::Display for CastleRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_fen())
    }
}

impl fmt::Debug for CastleRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CastleRights({})", self.to_fen())
    }
}
