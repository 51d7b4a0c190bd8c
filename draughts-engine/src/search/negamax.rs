use rand::Rng;
use draughts_core::{apply_move_to_board, generate_legal_moves, zobrist_key, Board, Color};

use super::killers::KillerTable;
use super::move_ordering::order_moves;
use super::transposition::{NodeType, TTEntry, TTable};
use crate::evaluation::evaluate;
use crate::time::TimeManager;

const TIME_CHECK_INTERVAL: u64 = 4096;
const LOSS_SCORE: i32 = -10_000;

// Symmetric infinities: using i32::MIN here would overflow on negation at
// the call site, so the search never sees it.
pub const NEG_INF: i32 = -i32::MAX;
pub const POS_INF: i32 = i32::MAX;

pub struct SearchState {
    pub tt: Option<TTable>,
    pub killers: Option<KillerTable>,
    pub timer: TimeManager,
    pub rng: rand::rngs::StdRng,
    pub nodes: u64,
    pub aborted: bool,
    pub feature_scale: f64,
    pub noise_amp: i32,
}

impl SearchState {
    fn check_time(&mut self) {
        self.nodes += 1;
        if self.nodes % TIME_CHECK_INTERVAL == 0 && self.timer.is_expired() {
            self.aborted = true;
        }
    }

    fn leaf_noise(&mut self) -> i32 {
        if self.noise_amp <= 0 {
            return 0;
        }
        let half = self.noise_amp as f64 / 2.0;
        self.rng.gen_range(-half..=half).round() as i32
    }
}

// Fail-soft NegaMax with alpha-beta pruning. Scores are always from
// `to_move`'s perspective; `apply_move_to_board` plus sign negation handles
// the perspective flip between plies.
pub fn negamax(state: &mut SearchState, board: &Board, to_move: Color, depth: u8, mut alpha: i32, mut beta: i32) -> i32 {
    state.check_time();
    if state.aborted {
        return 0;
    }

    if depth == 0 {
        return evaluate(board, to_move, state.feature_scale) + state.leaf_noise();
    }

    let key = zobrist_key(board, to_move);
    let original_alpha = alpha;

    let mut tt_move_index = None;
    if let Some(tt) = state.tt.as_ref() {
        if let Some(entry) = tt.probe(key) {
            tt_move_index = entry.best_move_index;
            if entry.depth >= depth {
                match entry.kind {
                    NodeType::Exact => return entry.score,
                    NodeType::LowerBound => alpha = alpha.max(entry.score),
                    NodeType::UpperBound => beta = beta.min(entry.score),
                }
                if alpha >= beta {
                    return entry.score;
                }
            }
        }
    }

    let moves = generate_legal_moves(board, to_move);
    if moves.is_empty() {
        return LOSS_SCORE;
    }

    let ordered = match state.killers.as_ref() {
        Some(killers) => order_moves(moves, board, to_move, tt_move_index, killers, depth),
        None => order_moves(moves, board, to_move, tt_move_index, &KillerTable::new(), depth),
    };

    let mut best_score = i32::MIN;
    let mut best_index = None;

    for (index, mv) in ordered.iter().enumerate() {
        let child = apply_move_to_board(board, mv);
        let score = -negamax(state, &child, !to_move, depth - 1, -beta, -alpha);

        if state.aborted {
            return 0;
        }

        if score > best_score {
            best_score = score;
            best_index = Some(index);
        }
        if best_score > alpha {
            alpha = best_score;
        }
        if alpha >= beta {
            if !mv.is_capture() {
                if let Some(killers) = state.killers.as_mut() {
                    killers.record(depth, mv.killer_signature());
                }
            }
            break;
        }
    }

    let kind = if best_score <= original_alpha {
        NodeType::UpperBound
    } else if best_score >= beta {
        NodeType::LowerBound
    } else {
        NodeType::Exact
    };

    if let Some(tt) = state.tt.as_mut() {
        tt.store(TTEntry { key, score: best_score, depth, kind, best_move_index: best_index });
    }

    best_score
}
