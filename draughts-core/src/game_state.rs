use serde::{Serialize, Deserialize};
use thiserror::Error;

use crate::board::{apply_move_to_board, generate_legal_moves, initial_board, Board};
use crate::game_elements::{format_move, Color, Move};
use crate::zobrist::position_hash;

const KING_ONLY_PLY_LIMIT: u32 = 50;
const ENDGAME_PLY_LIMIT: u32 = 32;
const REPETITION_THRESHOLD: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    InProgress,
    WhiteWins,
    BlackWins,
    Draw,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrawReason {
    ThreefoldRepetition,
    KingsOnlyFiftyMoveRule,
    SixteenMoveEndgameRule,
    Agreement,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawState {
    pub position_hashes: Vec<u64>,
    pub king_only_plies: u32,
    pub endgame_plies: u32,
    pub endgame_rule_active: bool,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            position_hashes: Vec::new(),
            king_only_plies: 0,
            endgame_plies: 0,
            endgame_rule_active: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub mv: Move,
    pub notation: String,
    pub player: Color,
    pub move_number: u32,
    pub timestamp: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub board: Board,
    pub to_move: Color,
    pub move_history: Vec<MoveRecord>,
    pub phase: Phase,
    pub draw_reason: Option<DrawReason>,
    pub white_count: u8,
    pub black_count: u8,
    pub draw_state: DrawState,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoveError {
    #[error("move is not among the legal moves for the side to move")]
    Illegal,
    #[error("the game is not in progress")]
    NotInProgress,
    #[error("there is no piece on the move's origin square")]
    NoPieceAtOrigin,
}

pub fn initial_game_state() -> GameState {
    let board = initial_board();
    let mut draw_state = DrawState::default();
    draw_state.position_hashes.push(position_hash(&board, Color::White));

    GameState {
        board,
        to_move: Color::White,
        move_history: Vec::new(),
        phase: Phase::InProgress,
        draw_reason: None,
        white_count: 20,
        black_count: 20,
        draw_state,
    }
}

// The single authoritative legality gate: `mv` is accepted iff it is
// structurally equal to one of `generate_legal_moves`'s results for the
// side to move.
pub fn apply_move(state: &GameState, mv: Move, timestamp: u64) -> Result<GameState, MoveError> {
    if state.phase != Phase::InProgress {
        return Err(MoveError::NotInProgress);
    }

    if state.board.piece_on(mv.from()).is_none() {
        return Err(MoveError::NoPieceAtOrigin);
    }

    let legal_moves = generate_legal_moves(&state.board, state.to_move);
    let matched = legal_moves.into_iter()
        .find(|candidate| candidate.same_move_as(&mv))
        .ok_or(MoveError::Illegal)?;

    let mover = state.to_move;
    let next_to_move = !mover;
    let new_board = apply_move_to_board(&state.board, &matched);

    let mut move_history = state.move_history.clone();
    move_history.push(MoveRecord {
        notation: format_move(&matched),
        player: mover,
        move_number: move_history.len() as u32 + 1,
        timestamp,
        mv: matched.clone(),
    });

    let white_count = new_board.count(Color::White);
    let black_count = new_board.count(Color::Black);

    let mut draw_state = state.draw_state.clone();
    let new_hash = position_hash(&new_board, next_to_move);
    draw_state.position_hashes.push(new_hash);

    let no_men_left = new_board.man_count(Color::White) == 0 && new_board.man_count(Color::Black) == 0;
    draw_state.king_only_plies = if !matched.is_capture() && no_men_left {
        draw_state.king_only_plies + 1
    } else {
        0
    };

    let endgame_active = new_board.is_weak_endgame_configuration();
    draw_state.endgame_plies = if endgame_active && !matched.is_capture() {
        draw_state.endgame_plies + 1
    } else {
        0
    };
    draw_state.endgame_rule_active = endgame_active;

    let future_moves = generate_legal_moves(&new_board, next_to_move);

    let (phase, draw_reason) = if future_moves.is_empty() {
        let winner_phase = if mover == Color::White { Phase::WhiteWins } else { Phase::BlackWins };
        (winner_phase, None)
    } else if draw_state.position_hashes.iter().filter(|&&h| h == new_hash).count() >= REPETITION_THRESHOLD {
        (Phase::Draw, Some(DrawReason::ThreefoldRepetition))
    } else if draw_state.king_only_plies >= KING_ONLY_PLY_LIMIT {
        (Phase::Draw, Some(DrawReason::KingsOnlyFiftyMoveRule))
    } else if draw_state.endgame_plies >= ENDGAME_PLY_LIMIT {
        (Phase::Draw, Some(DrawReason::SixteenMoveEndgameRule))
    } else {
        (Phase::InProgress, None)
    };

    Ok(GameState {
        board: new_board,
        to_move: next_to_move,
        move_history,
        phase,
        draw_reason,
        white_count,
        black_count,
        draw_state,
    })
}

pub fn resign(state: &GameState) -> Result<GameState, MoveError> {
    if state.phase != Phase::InProgress {
        return Err(MoveError::NotInProgress);
    }

    let mut next = state.clone();
    next.phase = if state.to_move == Color::White { Phase::BlackWins } else { Phase::WhiteWins };
    Ok(next)
}

pub fn offer_draw_accepted(state: &GameState) -> Result<GameState, MoveError> {
    if state.phase != Phase::InProgress {
        return Err(MoveError::NotInProgress);
    }

    let mut next = state.clone();
    next.phase = Phase::Draw;
    next.draw_reason = Some(DrawReason::Agreement);
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_elements::{CaptureStep, Piece};

    #[test]
    fn initial_state_is_in_progress_with_twenty_pieces_per_side() {
        let state = initial_game_state();
        assert_eq!(state.phase, Phase::InProgress);
        assert_eq!(state.white_count, 20);
        assert_eq!(state.black_count, 20);
        assert_eq!(state.to_move, Color::White);
    }

    #[test]
    fn applying_a_legal_move_toggles_the_side_to_move_and_records_history() {
        let state = initial_game_state();
        let mv = Move::Quiet { from: 18, to: 22 };
        let next = apply_move(&state, mv, 1).unwrap();
        assert_eq!(next.to_move, Color::Black);
        assert_eq!(next.move_history.len(), 1);
        assert_eq!(next.move_history[0].notation, "18-22");
    }

    #[test]
    fn illegal_move_is_rejected_without_mutating_phase() {
        let state = initial_game_state();
        let mv = Move::Quiet { from: 18, to: 27 };
        let err = apply_move(&state, mv, 1).unwrap_err();
        assert_eq!(err, MoveError::Illegal);
    }

    #[test]
    fn resign_hands_the_win_to_the_other_side() {
        let state = initial_game_state();
        let next = resign(&state).unwrap();
        assert_eq!(next.phase, Phase::BlackWins);
    }

    #[test]
    fn offer_draw_accepted_sets_agreement_reason() {
        let state = initial_game_state();
        let next = offer_draw_accepted(&state).unwrap();
        assert_eq!(next.phase, Phase::Draw);
        assert_eq!(next.draw_reason, Some(DrawReason::Agreement));
    }

    #[test]
    fn capturing_the_last_piece_ends_the_game_with_no_legal_moves_for_the_loser() {
        // White man on 22, black man on 27: the single mandatory capture
        // 22x31 removes black's only piece, leaving Black with no legal
        // moves of any kind on the following turn.
        let mut board = Board::empty();
        board.set(22, Some(Piece::man(Color::White)));
        board.set(27, Some(Piece::man(Color::Black)));
        let state = GameState {
            board,
            to_move: Color::White,
            move_history: Vec::new(),
            phase: Phase::InProgress,
            draw_reason: None,
            white_count: 1,
            black_count: 1,
            draw_state: DrawState::default(),
        };
        let mv = Move::Capture { steps: vec![CaptureStep { from: 22, to: 31, captured: 27 }] };
        let next = apply_move(&state, mv, 1).unwrap();
        assert_eq!(next.phase, Phase::WhiteWins);
        assert_eq!(next.black_count, 0);
    }

    // Two kings, far enough apart that neither ever threatens a capture;
    // the draw-rule counters are preset just one ply short of their
    // thresholds so a single additional quiet move tips them over.
    fn two_kings_board() -> Board {
        let mut board = Board::empty();
        board.set(3, Some(Piece::king(Color::White)));
        board.set(48, Some(Piece::king(Color::Black)));
        board
    }

    #[test]
    fn fifty_ply_kings_only_rule_declares_a_draw() {
        let board = two_kings_board();
        let mut draw_state = DrawState::default();
        draw_state.position_hashes.push(position_hash(&board, Color::White));
        draw_state.king_only_plies = 49;
        let state = GameState {
            board,
            to_move: Color::White,
            move_history: Vec::new(),
            phase: Phase::InProgress,
            draw_reason: None,
            white_count: 1,
            black_count: 1,
            draw_state,
        };

        let next = apply_move(&state, Move::Quiet { from: 3, to: 9 }, 1).unwrap();

        assert_eq!(next.phase, Phase::Draw);
        assert_eq!(next.draw_reason, Some(DrawReason::KingsOnlyFiftyMoveRule));
    }

    #[test]
    fn sixteen_move_endgame_rule_declares_a_draw_in_a_weak_configuration() {
        // White carries three kings against a single lone black king: a
        // weak configuration per `Board::is_weak_endgame_configuration`.
        let mut board = Board::empty();
        board.set(1, Some(Piece::king(Color::White)));
        board.set(46, Some(Piece::king(Color::White)));
        board.set(50, Some(Piece::king(Color::White)));
        board.set(25, Some(Piece::king(Color::Black)));
        assert!(board.is_weak_endgame_configuration());

        let mut draw_state = DrawState::default();
        draw_state.position_hashes.push(position_hash(&board, Color::White));
        draw_state.endgame_plies = 31;
        draw_state.endgame_rule_active = true;
        let state = GameState {
            board,
            to_move: Color::White,
            move_history: Vec::new(),
            phase: Phase::InProgress,
            draw_reason: None,
            white_count: 3,
            black_count: 1,
            draw_state,
        };

        let next = apply_move(&state, Move::Quiet { from: 1, to: 7 }, 1).unwrap();

        assert_eq!(next.phase, Phase::Draw);
        assert_eq!(next.draw_reason, Some(DrawReason::SixteenMoveEndgameRule));
    }
}
