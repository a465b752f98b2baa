//! Perft (performance test) for move generation correctness verification

use crate::board::Board;
use crate::movegen;
use crate::moves;

/// Counts the leaf nodes of the legal move tree at the given depth
///
/// Depth 0 returns 1 (the current position). Depth 1 returns the number of
/// legal moves without making any of them.
pub fn perft(board: &Board, depth: usize) -> u64 {
    if depth == 0 {
        return 1;
    }

    let list = movegen::legal(board);

    if depth == 1 {
        return list.len() as u64;
    }

    let mut board = board.clone();
    let mut nodes = 0_u64;
    for mv in list.iter() {
        let u = unsafe { moves::make_move_unchecked(&mut board, *mv) };
        nodes += perft(&board, depth - 1);
        unsafe { moves::unmake_move_unchecked(&mut board, *mv, u) };
    }
    nodes
}

/// Runs perft with a per-move breakdown, useful for debugging
///
/// Returns `(uci_move, node_count)` pairs sorted alphabetically.
pub fn divide(board: &Board, depth: usize) -> Vec<(String, u64)> {
    let mut board = board.clone();
    let list = movegen::legal(&board);
    let mut results: Vec<(String, u64)> = list
        .iter()
        .map(|mv| {
            let u = unsafe { moves::make_move_unchecked(&mut board, *mv) };
            let count = if depth <= 1 { 1 } else { perft(&board, depth - 1) };
            unsafe { moves::unmake_move_unchecked(&mut board, *mv, u) };
            (mv.to_string(), count)
        })
        .collect();
    results.sort_by(|a, b| a.0.cmp(&b.0));
    results
}
