//! FEN serialization and parsing for [`Game`].

use std::fmt;
use std::str::FromStr;

use crate::board::Board;
use crate::castle::{CastleRights, CastleSide};
use crate::color::Color;
use crate::error::FenError;
use crate::game::{Game, TurnState};
use crate::legality;
use crate::piece::Piece;
use crate::piece_kind::PieceKind;
use crate::square::Square;

/// The FEN string for the standard starting position.
///
/// The full-move field counts completed Black moves, so a fresh game starts
/// at 0.
pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 0";

/// Display wrapper for the piece placement field.
pub struct Placement<'a>(&'a Board);

impl<'a> Placement<'a> {
    pub(crate) fn new(board: &'a Board) -> Placement<'a> {
        Placement(board)
    }
}

impl fmt::Display for Placement<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0u8..8).rev() {
            let mut empty_count = 0u8;

            for file in 0u8..8 {
                match self.0.piece_on(Square::new(rank, file)) {
                    Some(piece) => {
                        if empty_count > 0 {
                            write!(f, "{empty_count}")?;
                            empty_count = 0;
                        }
                        write!(f, "{}", piece.fen_char())?;
                    }
                    None => empty_count += 1,
                }
            }

            if empty_count > 0 {
                write!(f, "{empty_count}")?;
            }
            if rank > 0 {
                write!(f, "/")?;
            }
        }
        Ok(())
    }
}

impl Game {
    /// Parse a game from a FEN string.
    pub fn from_fen(fen: &str) -> Result<Game, FenError> {
        fen.parse()
    }

    /// Serialize the position to FEN.
    pub fn fen(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let board = self.board();
        let turn = self.turn();
        write!(f, "{}", board.placement())?;
        write!(f, " {}", turn.side_to_move())?;
        write!(f, " {}", CastleRights::from_board(board))?;
        match board.en_passant() {
            Some(sq) => write!(f, " {sq}")?,
            None => write!(f, " -")?,
        }
        write!(f, " {} {}", turn.halfmove_clock(), turn.fullmove_number())
    }
}

impl FromStr for Game {
    type Err = FenError;

    fn from_str(fen: &str) -> Result<Game, FenError> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        let &[placement, color, castling, en_passant, halfmove, fullmove] = fields.as_slice() else {
            return Err(FenError::WrongFieldCount {
                found: fields.len(),
            });
        };

        let mut board = parse_placement(placement)?;

        let side_to_move = match color {
            "w" => Color::White,
            "b" => Color::Black,
            other => {
                return Err(FenError::InvalidColor {
                    found: other.to_string(),
                });
            }
        };

        let rights = CastleRights::from_fen(castling)?;
        let ids: Vec<_> = Color::ALL
            .into_iter()
            .flat_map(|color| board.roster(color).to_vec())
            .collect();
        for id in ids {
            if let Some(piece) = board.piece_mut(id) {
                let unmoved = starts_unmoved(piece, rights);
                piece.set_moved(!unmoved);
            }
        }

        if en_passant != "-" {
            let square = Square::from_algebraic(en_passant).ok_or_else(|| {
                FenError::InvalidEnPassant {
                    found: en_passant.to_string(),
                }
            })?;
            board.set_en_passant(Some(square));
        }

        let halfmove_clock = parse_counter(halfmove, "halfmove clock")?;
        let fullmove_number = parse_counter(fullmove, "fullmove number")?;

        board.validate()?;
        // The side that just moved cannot still be in check.
        if legality::is_in_check(&board, !side_to_move) {
            return Err(FenError::OpponentInCheck {
                color: (!side_to_move).name(),
            });
        }
        Ok(Game::from_parts(
            board,
            TurnState::from_parts(side_to_move, halfmove_clock, fullmove_number),
        ))
    }
}

fn parse_placement(placement: &str) -> Result<Board, FenError> {
    let ranks: Vec<&str> = placement.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::WrongRankCount { found: ranks.len() });
    }

    let mut board = Board::empty();
    // FEN ranks go from 8 to 1 (top to bottom)
    for (rank, rank_str) in (0u8..8).rev().zip(ranks) {
        let mut file: u8 = 0;

        for c in rank_str.chars() {
            if let Some(digit) = c.to_digit(10) {
                if !(1..=8).contains(&digit) {
                    return Err(FenError::InvalidPieceChar { character: c });
                }
                file += digit as u8;
                if file > 8 {
                    return Err(FenError::BadRankLength {
                        rank: rank + 1,
                        length: file as usize,
                    });
                }
                continue;
            }

            let kind = PieceKind::from_fen_char(c).ok_or(FenError::InvalidPieceChar { character: c })?;
            let color = if c.is_ascii_uppercase() {
                Color::White
            } else {
                Color::Black
            };
            if file >= 8 {
                return Err(FenError::BadRankLength {
                    rank: rank + 1,
                    length: file as usize + 1,
                });
            }
            board.spawn(kind, color, Square::new(rank, file));
            file += 1;
        }

        if file != 8 {
            return Err(FenError::BadRankLength {
                rank: rank + 1,
                length: file as usize,
            });
        }
    }
    Ok(board)
}

fn parse_counter(text: &str, field: &'static str) -> Result<u16, FenError> {
    text.parse::<u16>().map_err(|_| FenError::InvalidMoveCounter {
        field,
        found: text.to_string(),
    })
}

/// Whether a piece found in a FEN position can be treated as never having
/// moved. FEN has no moved flags, so they are inferred from where the piece
/// stands and, for kings and rooks, from the castling field.
fn starts_unmoved(piece: &Piece, rights: CastleRights) -> bool {
    let square = piece.square();
    let color = piece.color();
    let home = square.rank() == color.back_rank();
    match piece.kind() {
        PieceKind::Pawn => square.rank() == color.pawn_rank(),
        PieceKind::Knight => home && matches!(square.file(), 1 | 6),
        PieceKind::Bishop => home && matches!(square.file(), 2 | 5),
        PieceKind::Queen => home && square.file() == 3,
        PieceKind::King => {
            home && square.file() == 4 && CastleSide::ALL.into_iter().any(|side| rights.has(color, side))
        }
        PieceKind::Rook => {
            home && CastleSide::ALL
                .into_iter()
                .any(|side| square.file() == side.rook_file() && rights.has(color, side))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::STARTING_FEN;
    use crate::error::FenError;
    use crate::{Color, Game, PieceKind, Square};

    #[test]
    fn starting_position_serializes() {
        assert_eq!(Game::new().fen(), STARTING_FEN);
    }

    #[test]
    fn parse_starting_fen_matches_new_game() {
        let game: Game = STARTING_FEN.parse().unwrap();
        assert_eq!(game, Game::new());
    }

    #[test]
    fn roundtrip_positions() {
        let fens = [
            STARTING_FEN,
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
            "rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 2",
            "r3k3/8/8/8/8/8/8/4K2R b Kq - 5 30",
        ];
        for fen in fens {
            let game: Game = fen.parse().unwrap();
            assert_eq!(game.fen(), fen, "roundtrip failed for {fen}");
        }
    }

    #[test]
    fn castling_field_drives_moved_flags() {
        let game: Game = "r3k2r/8/8/8/8/8/8/R3K2R w Kq - 0 1".parse().unwrap();
        let board = game.board();
        assert!(!board.piece_on(Square::E1).unwrap().has_moved());
        assert!(!board.piece_on(Square::H1).unwrap().has_moved());
        assert!(board.piece_on(Square::A1).unwrap().has_moved());
        assert!(board.piece_on(Square::H8).unwrap().has_moved());
        assert!(!board.piece_on(Square::A8).unwrap().has_moved());
    }

    #[test]
    fn pawn_home_rank_drives_moved_flag() {
        let game: Game = "4k3/p7/1p6/8/8/6P1/7P/4K3 w - - 0 1".parse().unwrap();
        let board = game.board();
        assert!(!board.piece_on(Square::A7).unwrap().has_moved());
        assert!(board.piece_on(Square::B6).unwrap().has_moved());
        assert!(board.piece_on(Square::G3).unwrap().has_moved());
        assert!(!board.piece_on(Square::H2).unwrap().has_moved());
    }

    #[test]
    fn parses_fields() {
        let game: Game = "4k3/8/8/3pP3/8/8/8/4K3 w - d6 3 17".parse().unwrap();
        assert_eq!(game.side_to_move(), Color::White);
        assert_eq!(game.board().en_passant(), Some(Square::D6));
        assert_eq!(game.turn().halfmove_clock(), 3);
        assert_eq!(game.turn().fullmove_number(), 17);
        assert_eq!(
            game.board().piece_on(Square::D5).unwrap().kind(),
            PieceKind::Pawn
        );
    }

    #[test]
    fn wrong_field_count() {
        let err = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq".parse::<Game>();
        assert_eq!(err.unwrap_err(), FenError::WrongFieldCount { found: 3 });
    }

    #[test]
    fn wrong_rank_count() {
        let err = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP w KQkq - 0 1".parse::<Game>();
        assert_eq!(err.unwrap_err(), FenError::WrongRankCount { found: 7 });
    }

    #[test]
    fn bad_rank_length() {
        let err = "rnbqkbnr/ppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1".parse::<Game>();
        assert_eq!(
            err.unwrap_err(),
            FenError::BadRankLength { rank: 7, length: 7 }
        );
    }

    #[test]
    fn invalid_piece_char() {
        let err = "rnbqkbnr/ppppxppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1".parse::<Game>();
        assert_eq!(err.unwrap_err(), FenError::InvalidPieceChar { character: 'x' });
    }

    #[test]
    fn invalid_color() {
        let err = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x KQkq - 0 1".parse::<Game>();
        assert!(matches!(err.unwrap_err(), FenError::InvalidColor { .. }));
    }

    #[test]
    fn invalid_en_passant() {
        let err = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq z9 0 1".parse::<Game>();
        assert!(matches!(err.unwrap_err(), FenError::InvalidEnPassant { .. }));
    }

    #[test]
    fn invalid_counter() {
        let err = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - x 1".parse::<Game>();
        assert!(matches!(
            err.unwrap_err(),
            FenError::InvalidMoveCounter {
                field: "halfmove clock",
                ..
            }
        ));
    }

    #[test]
    fn overlong_digit_rank() {
        let fen = "8".repeat(40) + "/8/8/8/8/8/8/4K2k w - - 0 1";
        let err = fen.parse::<Game>();
        assert_eq!(
            err.unwrap_err(),
            FenError::BadRankLength { rank: 8, length: 16 }
        );
    }

    #[test]
    fn side_not_to_move_in_check() {
        let err = "4k3/8/8/8/8/8/4Q3/4K3 w - - 0 1".parse::<Game>();
        assert_eq!(
            err.unwrap_err(),
            FenError::OpponentInCheck { color: "Black" }
        );
    }

    #[test]
    fn side_to_move_in_check_is_accepted() {
        let game: Game = "4k3/8/8/8/8/8/4Q3/4K3 b - - 0 1".parse().unwrap();
        assert!(game.is_in_check(Color::Black));
    }

    #[test]
    fn stray_en_passant_square_offers_no_capture() {
        let mut game: Game = "4k3/8/8/8/3P4/8/8/4K3 w - c5 0 1".parse().unwrap();
        assert_eq!(game.board().en_passant(), Some(Square::C5));
        let pawn = game.select(Square::D4).unwrap();
        assert_eq!(game.valid_moves(pawn), vec![Square::D5]);
    }

    #[test]
    fn missing_king_is_invalid_board() {
        let err = "8/8/8/8/8/8/8/4K3 w - - 0 1".parse::<Game>();
        assert!(matches!(err.unwrap_err(), FenError::InvalidBoard { .. }));
    }
}
