use draughts_core::{apply_move_to_board, Board, Color, Move};

use super::killers::KillerTable;
use crate::evaluation::quick_evaluate;

const TT_MOVE: i32 = 1_000_000;
const CAPTURE_BASE: i32 = 500_000;
const CAPTURE_PER_PIECE: i32 = 1_000;
const PRIMARY_KILLER: i32 = 400_000;
const SECONDARY_KILLER: i32 = 399_000;

// Scores and sorts the legal moves at a node, highest priority first:
// the transposition table's remembered best move, then captures (scaled by
// how many pieces they take), then killer moves, then the quiet evaluator.
pub fn order_moves(
    moves: Vec<Move>,
    board: &Board,
    to_move: Color,
    tt_move_index: Option<usize>,
    killers: &KillerTable,
    depth: u8,
) -> Vec<Move> {
    let mut rated: Vec<(i32, Move)> = moves.into_iter().enumerate()
        .map(|(index, mv)| {
            let score = rate_move(&mv, index, board, to_move, tt_move_index, killers, depth);
            (score, mv)
        })
        .collect();

    rated.sort_by(|a, b| b.0.cmp(&a.0));
    rated.into_iter().map(|(_, mv)| mv).collect()
}

fn rate_move(
    mv: &Move,
    index: usize,
    board: &Board,
    to_move: Color,
    tt_move_index: Option<usize>,
    killers: &KillerTable,
    depth: u8,
) -> i32 {
    if tt_move_index == Some(index) {
        return TT_MOVE;
    }

    if mv.is_capture() {
        return CAPTURE_BASE + CAPTURE_PER_PIECE * mv.captured_count() as i32;
    }

    match killers.is_killer(depth, mv.killer_signature()) {
        Some(0) => return PRIMARY_KILLER,
        Some(_) => return SECONDARY_KILLER,
        None => {}
    }

    let child = apply_move_to_board(board, mv);
    quick_evaluate(&child, to_move)
}
