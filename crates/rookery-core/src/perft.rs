//! Perft (performance test): counts leaf positions of the legal move tree to
//! verify move generation.

use crate::game::Game;

/// Count the number of leaf nodes at the given depth.
///
/// Depth 0 returns 1 (the current position). Depth 1 returns the number
/// of legal moves without applying them.
pub fn perft(game: &Game, depth: usize) -> u64 {
    if depth == 0 {
        return 1;
    }

    let mut game = game.clone();
    let side = game.side_to_move();
    let moves = game.legal_moves(side);

    if depth == 1 {
        return moves.len() as u64;
    }

    let mut nodes = 0u64;
    for (id, to) in moves {
        let mut child = game.clone();
        if child.apply_move(id, to).is_ok() {
            nodes += perft(&child, depth - 1);
        }
    }
    nodes
}

/// Run perft with per-move breakdown (useful for debugging).
///
/// Returns `(coordinate_move, node_count)` pairs sorted alphabetically.
pub fn divide(game: &Game, depth: usize) -> Vec<(String, u64)> {
    let mut game = game.clone();
    let side = game.side_to_move();
    let mut results: Vec<(String, u64)> = game
        .legal_moves(side)
        .into_iter()
        .filter_map(|(id, to)| {
            let mut child = game.clone();
            let record = child.apply_move(id, to).ok()?;
            let count = if depth <= 1 { 1 } else { perft(&child, depth - 1) };
            Some((record.to_string(), count))
        })
        .collect();
    results.sort_by(|a, b| a.0.cmp(&b.0));
    results
}
