//! Structural properties that must hold after every move.

use rookery_core::legality::{is_in_check, will_leave_in_check};
use rookery_core::movegen::possible_moves;
use rookery_core::{Color, Game, Square};

/// A short game with captures, castling on both wings and a checking queen
/// taken by the king.
const SCRIPT: &[&str] = &[
    "e2e4", "d7d5", "e4d5", "g8f6", "g1f3", "f6d5", "f1c4", "c8e6", "e1g1", "b8c6", "d2d4",
    "d8d7", "c1g5", "e8c8", "c4d5", "e6d5", "b1c3", "d5f3", "d1f3", "c6d4", "f3b7", "c8b7",
];

fn coords(mv: &str) -> (Square, Square) {
    (mv[..2].parse().unwrap(), mv[2..4].parse().unwrap())
}

fn assert_grid_matches_rosters(game: &Game) {
    let board = game.board();
    board.validate().unwrap();
    for color in Color::ALL {
        for (id, piece) in board.pieces(color) {
            assert_eq!(board.select(piece.square()), Some(id));
            assert_eq!(piece.color(), color);
        }
    }
    let occupied = Square::all().filter(|&sq| board.is_occupied(sq)).count();
    let listed = board.roster(Color::White).len() + board.roster(Color::Black).len();
    assert_eq!(occupied, listed);
}

#[test]
fn grid_and_rosters_agree_throughout() {
    let mut game = Game::new();
    assert_grid_matches_rosters(&game);
    for mv in SCRIPT {
        let (from, to) = coords(mv);
        if let Err(err) = game.play(from, to) {
            panic!("move {mv} rejected: {err}");
        }
        assert_grid_matches_rosters(&game);
    }
}

#[test]
fn valid_moves_never_leave_king_attacked() {
    let mut game = Game::new();
    for mv in SCRIPT {
        let side = game.side_to_move();
        for (id, to) in game.legal_moves(side) {
            let mut after = game.clone();
            after.apply_move(id, to).unwrap();
            assert!(!is_in_check(after.board(), side), "{id} to {to} after {mv}");
        }
        let (from, to) = coords(mv);
        game.play(from, to).unwrap();
    }
}

#[test]
fn probing_is_idempotent() {
    let mut game = Game::new();
    for mv in SCRIPT {
        let mut board = game.board().clone();
        let before = board.clone();
        for color in Color::ALL {
            for id in board.roster(color).to_vec() {
                for to in possible_moves(&board, id) {
                    will_leave_in_check(&mut board, id, to);
                }
            }
        }
        assert_eq!(board, before, "before {mv}");
        let (from, to) = coords(mv);
        game.play(from, to).unwrap();
    }
}

#[test]
fn pieces_never_share_a_square() {
    let mut game = Game::new();
    for mv in SCRIPT {
        let (from, to) = coords(mv);
        game.play(from, to).unwrap();
        let board = game.board();
        let mut squares: Vec<Square> = Color::ALL
            .into_iter()
            .flat_map(|color| board.pieces(color).map(|(_, p)| p.square()))
            .collect();
        let count = squares.len();
        squares.sort();
        squares.dedup();
        assert_eq!(squares.len(), count);
    }
}
