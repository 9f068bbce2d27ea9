//! UCI command formatting and engine output parsing.

use std::fmt;

use tracing::warn;

use rookery_core::{Game, PieceId, PieceKind, Square};

use crate::error::UciError;

/// `position fen <fen>`.
pub fn position_command(fen: &str) -> String {
    format!("position fen {fen}")
}

/// `go depth <depth>`.
pub fn go_command(depth: u8) -> String {
    format!("go depth {depth}")
}

/// A move in UCI coordinate notation (`e2e4`, `e7e8q`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BestMove {
    pub from: Square,
    pub to: Square,
    /// Requested promotion piece, if any.
    pub promotion: Option<PieceKind>,
}

impl BestMove {
    /// Parse a coordinate move string.
    pub fn parse(text: &str) -> Result<BestMove, UciError> {
        let invalid = || UciError::InvalidMove {
            uci_move: text.to_string(),
        };
        if !text.is_ascii() || !(4..=5).contains(&text.len()) {
            return Err(invalid());
        }

        let from = Square::from_algebraic(&text[..2]).ok_or_else(invalid)?;
        let to = Square::from_algebraic(&text[2..4]).ok_or_else(invalid)?;
        let promotion = match text[4..].chars().next() {
            None => None,
            Some(c) => Some(
                PieceKind::from_fen_char(c)
                    .filter(|kind| !matches!(kind, PieceKind::Pawn | PieceKind::King))
                    .ok_or_else(invalid)?,
            ),
        };

        Ok(BestMove {
            from,
            to,
            promotion,
        })
    }

    /// Translate the move into a piece and destination of `game`.
    ///
    /// The piece must belong to the side to move and the destination must be
    /// among its legal moves. Promotions always produce a Queen, whatever
    /// piece was requested.
    pub fn resolve(&self, game: &mut Game) -> Result<(PieceId, Square), UciError> {
        let id = game
            .select(self.from)
            .ok_or(UciError::NoPieceAt { square: self.from })?;
        let own = game
            .board()
            .piece(id)
            .is_some_and(|piece| piece.color() == game.side_to_move());
        if !own || !game.valid_moves(id).contains(&self.to) {
            return Err(UciError::IllegalSuggestion {
                uci_move: self.to_string(),
            });
        }
        if let Some(kind) = self.promotion
            && kind != PieceKind::Queen
        {
            warn!(%kind, mv = %self, "underpromotion requested, promoting to queen");
        }
        Ok((id, self.to))
    }
}

impl fmt::Display for BestMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(kind) = self.promotion {
            write!(f, "{}", kind.fen_char())?;
        }
        Ok(())
    }
}

/// A line of engine output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineLine {
    /// `uciok` -- the engine finished identifying itself.
    UciOk,
    /// `readyok` -- answer to `isready`.
    ReadyOk,
    /// `bestmove <move>`. `None` when the engine has no move (`0000`,
    /// `(none)`).
    BestMove(Option<BestMove>),
    /// `info ...`, with the keyword stripped.
    Info(String),
    /// Anything else (`id`, `option`, banners).
    Other(String),
}

/// Parse a single line of engine output.
pub fn parse_engine_line(line: &str) -> Result<EngineLine, UciError> {
    let mut tokens = line.split_whitespace();
    match tokens.next() {
        Some("uciok") => Ok(EngineLine::UciOk),
        Some("readyok") => Ok(EngineLine::ReadyOk),
        Some("bestmove") => match tokens.next() {
            None => Err(UciError::MalformedBestMove {
                line: line.trim().to_string(),
            }),
            Some("0000" | "(none)") => Ok(EngineLine::BestMove(None)),
            Some(mv) => BestMove::parse(mv).map(|mv| EngineLine::BestMove(Some(mv))),
        },
        Some("info") => {
            let rest = tokens.collect::<Vec<_>>().join(" ");
            Ok(EngineLine::Info(rest))
        }
        _ => Ok(EngineLine::Other(line.trim().to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rookery_core::Game;

    #[test]
    fn format_commands() {
        assert_eq!(
            position_command(rookery_core::STARTING_FEN),
            "position fen rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 0"
        );
        assert_eq!(go_command(13), "go depth 13");
    }

    #[test]
    fn parse_plain_move() {
        let mv = BestMove::parse("e2e4").unwrap();
        assert_eq!(mv.from, Square::E2);
        assert_eq!(mv.to, Square::E4);
        assert_eq!(mv.promotion, None);
        assert_eq!(mv.to_string(), "e2e4");
    }

    #[test]
    fn parse_promotion_move() {
        let mv = BestMove::parse("a7a8n").unwrap();
        assert_eq!(mv.promotion, Some(PieceKind::Knight));
        assert_eq!(mv.to_string(), "a7a8n");
    }

    #[test]
    fn parse_rejects_garbage() {
        for text in ["", "e2", "e2e9", "z1a1", "e7e8k", "e2e4qq", "é2e4"] {
            assert!(
                matches!(BestMove::parse(text), Err(UciError::InvalidMove { .. })),
                "{text}"
            );
        }
    }

    #[test]
    fn parse_engine_lines() {
        assert_eq!(parse_engine_line("uciok").unwrap(), EngineLine::UciOk);
        assert_eq!(parse_engine_line("readyok\n").unwrap(), EngineLine::ReadyOk);
        assert_eq!(
            parse_engine_line("bestmove e2e4 ponder e7e5").unwrap(),
            EngineLine::BestMove(Some(BestMove::parse("e2e4").unwrap()))
        );
        assert_eq!(
            parse_engine_line("bestmove (none)").unwrap(),
            EngineLine::BestMove(None)
        );
        assert_eq!(
            parse_engine_line("info depth 13 score cp 20").unwrap(),
            EngineLine::Info("depth 13 score cp 20".to_string())
        );
        assert_eq!(
            parse_engine_line("id name Stockfish").unwrap(),
            EngineLine::Other("id name Stockfish".to_string())
        );
    }

    #[test]
    fn bare_bestmove_is_malformed() {
        assert!(matches!(
            parse_engine_line("bestmove"),
            Err(UciError::MalformedBestMove { .. })
        ));
    }

    #[test]
    fn resolve_legal_move() {
        let mut game = Game::new();
        let (id, to) = BestMove::parse("g1f3").unwrap().resolve(&mut game).unwrap();
        assert_eq!(game.select(Square::G1), Some(id));
        assert_eq!(to, Square::F3);
    }

    #[test]
    fn resolve_rejects_empty_origin() {
        let mut game = Game::new();
        let err = BestMove::parse("e4e5").unwrap().resolve(&mut game);
        assert!(matches!(err, Err(UciError::NoPieceAt { square }) if square == Square::E4));
    }

    #[test]
    fn resolve_rejects_illegal_and_wrong_side() {
        let mut game = Game::new();
        for text in ["e2e5", "e7e5"] {
            let err = BestMove::parse(text).unwrap().resolve(&mut game);
            assert!(
                matches!(err, Err(UciError::IllegalSuggestion { .. })),
                "{text}"
            );
        }
    }
}
