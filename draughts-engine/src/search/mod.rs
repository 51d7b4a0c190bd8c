mod killers;
mod move_ordering;
mod negamax;
mod transposition;

use rand::{Rng, SeedableRng};
use draughts_core::{apply_move_to_board, generate_legal_moves, zobrist_key, Board, Color, Move};

use self::killers::KillerTable;
use self::move_ordering::order_moves;
use self::negamax::{negamax, SearchState, NEG_INF, POS_INF};
use self::transposition::{NodeType, TTEntry, TTable};
use crate::evaluation::quick_evaluate;
use crate::time::TimeManager;

const TT_SIZE: usize = 1 << 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    Easy,
    Medium,
    Hard,
    Expert,
}

struct ProfileParams {
    max_depth: u8,
    time_ms: u64,
    noise_amp: i32,
    blunder_prob: f64,
    blunder_margin: i32,
    feature_scale: f64,
    tt: bool,
    killers: bool,
}

impl Profile {
    fn params(self) -> ProfileParams {
        match self {
            Profile::Easy => ProfileParams {
                max_depth: 3, time_ms: 1500, noise_amp: 150,
                blunder_prob: 0.20, blunder_margin: 200, feature_scale: 0.3,
                tt: false, killers: false,
            },
            Profile::Medium => ProfileParams {
                max_depth: 5, time_ms: 3000, noise_amp: 40,
                blunder_prob: 0.05, blunder_margin: 80, feature_scale: 0.7,
                tt: true, killers: true,
            },
            Profile::Hard => ProfileParams {
                max_depth: 8, time_ms: 5000, noise_amp: 5,
                blunder_prob: 0.005, blunder_margin: 20, feature_scale: 1.0,
                tt: true, killers: true,
            },
            Profile::Expert => ProfileParams {
                max_depth: 20, time_ms: 5000, noise_amp: 0,
                blunder_prob: 0.0, blunder_margin: 0, feature_scale: 1.0,
                tt: true, killers: true,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub mv: Move,
    pub score: i32,
    pub depth_reached: u32,
    pub nodes_evaluated: u64,
}

// Entry point for move selection. Seeds its RNG from the OS; use
// `find_best_move_seeded` wherever the noise and blunder streams must be
// reproducible, such as in tests.
pub fn find_best_move(board: &Board, player: Color, profile: Profile) -> Option<SearchResult> {
    find_best_move_seeded(board, player, profile, rand::random())
}

pub fn find_best_move_seeded(board: &Board, player: Color, profile: Profile, seed: u64) -> Option<SearchResult> {
    let legal_moves = generate_legal_moves(board, player);
    if legal_moves.is_empty() {
        return None;
    }
    if legal_moves.len() == 1 {
        return Some(SearchResult { mv: legal_moves[0].clone(), score: 0, depth_reached: 0, nodes_evaluated: 0 });
    }

    let params = profile.params();
    let mut state = SearchState {
        tt: params.tt.then(|| TTable::new(TT_SIZE)),
        killers: params.killers.then(KillerTable::new),
        timer: TimeManager::new(params.time_ms),
        rng: rand::rngs::StdRng::seed_from_u64(seed),
        nodes: 0,
        aborted: false,
        feature_scale: params.feature_scale,
        noise_amp: params.noise_amp,
    };

    let mut best: Option<(Move, i32)> = None;
    let mut depth_reached = 0;

    for depth in 1..=params.max_depth {
        let Some((mv, score)) = root_search(&mut state, board, player, &legal_moves, depth) else {
            log::trace!("search aborted at depth {depth}, keeping depth {depth_reached} result");
            break;
        };
        log::trace!("depth {depth} complete: {mv:?} score {score}, {} nodes so far", state.nodes);
        best = Some((mv, score));
        depth_reached = depth;

        if state.timer.is_expired() {
            break;
        }
    }

    let (mut mv, mut score) = best.unwrap_or_else(|| (legal_moves[0].clone(), 0));

    if params.blunder_prob > 0.0 && state.rng.gen_range(0.0..1.0) < params.blunder_prob {
        if let Some(alt) = pick_blunder(board, player, &legal_moves, &mv, &mut state.rng, params.blunder_margin) {
            log::debug!("blunder policy swapped {mv:?} for {alt:?}");
            mv = alt;
            score = quick_evaluate(&apply_move_to_board(board, &mv), player);
        }
    }

    log::debug!("chose {mv:?} at depth {depth_reached}, score {score}, {} nodes", state.nodes);
    Some(SearchResult { mv, score, depth_reached: depth_reached as u32, nodes_evaluated: state.nodes })
}

// The root node of one iterative-deepening pass: same TT-probe, move-order,
// alpha-beta shape as `negamax`, but tracking which child move produced the
// best score rather than just the score itself.
fn root_search(state: &mut SearchState, board: &Board, player: Color, legal_moves: &[Move], depth: u8) -> Option<(Move, i32)> {
    let key = zobrist_key(board, player);
    let original_alpha = NEG_INF;
    let mut alpha = NEG_INF;
    let beta = POS_INF;

    let mut tt_move_index = None;
    if let Some(tt) = state.tt.as_ref() {
        if let Some(entry) = tt.probe(key) {
            tt_move_index = entry.best_move_index;
        }
    }

    let ordered = match state.killers.as_ref() {
        Some(killers) => order_moves(legal_moves.to_vec(), board, player, tt_move_index, killers, depth),
        None => order_moves(legal_moves.to_vec(), board, player, tt_move_index, &KillerTable::new(), depth),
    };

    let mut best_score = NEG_INF;
    let mut best_move = None;
    let mut best_index = None;

    for (index, mv) in ordered.iter().enumerate() {
        let child = apply_move_to_board(board, mv);
        let score = -negamax(state, &child, !player, depth - 1, -beta, -alpha);

        if state.aborted {
            return None;
        }

        if score > best_score {
            best_score = score;
            best_move = Some(mv.clone());
            best_index = Some(index);
        }
        if best_score > alpha {
            alpha = best_score;
        }
    }

    if let Some(tt) = state.tt.as_mut() {
        let kind = if best_score <= original_alpha { NodeType::UpperBound } else { NodeType::Exact };
        tt.store(TTEntry { key, score: best_score, depth, kind, best_move_index: best_index });
    }

    best_move.map(|mv| (mv, best_score))
}

// Re-scores every root move statically and, with probability `blunder_prob`,
// swaps the search's choice for a uniformly random move within
// `blunder_margin` of the best static score (excluding the preferred move).
fn pick_blunder(
    board: &Board,
    player: Color,
    legal_moves: &[Move],
    preferred: &Move,
    rng: &mut rand::rngs::StdRng,
    blunder_margin: i32,
) -> Option<Move> {
    let scored: Vec<(Move, i32)> = legal_moves.iter()
        .map(|mv| (mv.clone(), quick_evaluate(&apply_move_to_board(board, mv), player)))
        .collect();

    let best_static = scored.iter().map(|(_, s)| *s).max()?;

    let candidates: Vec<&Move> = scored.iter()
        .filter(|(mv, s)| !mv.same_move_as(preferred) && best_static - s <= blunder_margin)
        .map(|(mv, _)| mv)
        .collect();

    if candidates.is_empty() {
        return None;
    }

    let index = rng.gen_range(0..candidates.len());
    Some(candidates[index].clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use draughts_core::initial_board;

    #[test]
    fn expert_search_is_deterministic_given_a_fixed_seed() {
        let board = initial_board();
        let a = find_best_move_seeded(&board, Color::White, Profile::Expert, 42).unwrap();
        let b = find_best_move_seeded(&board, Color::White, Profile::Expert, 42).unwrap();
        assert_eq!(a.mv, b.mv);
        assert_eq!(a.score, b.score);
    }

    #[test]
    fn a_single_legal_move_is_returned_immediately_at_depth_zero() {
        let mut board = Board::empty();
        board.set(1, Some(draughts_core::Piece::man(Color::White)));
        let result = find_best_move_seeded(&board, Color::White, Profile::Easy, 1).unwrap();
        assert_eq!(result.depth_reached, 0);
    }

    #[test]
    fn no_legal_moves_returns_none() {
        let mut board = Board::empty();
        board.set(46, Some(draughts_core::Piece::man(Color::White)));
        board.set(50, Some(draughts_core::Piece::king(Color::Black)));
        board.set(45, Some(draughts_core::Piece::king(Color::Black)));
        board.set(49, Some(draughts_core::Piece::king(Color::Black)));
        assert!(find_best_move_seeded(&board, Color::White, Profile::Easy, 1).is_none());
    }
}
