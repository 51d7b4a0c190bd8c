mod board;
mod game_elements;
mod game_state;
mod zobrist;

pub use board::{
    Board, Direction, adjacent, ray, generate_legal_moves, quiet_moves,
    apply_move_to_board, initial_board, resolve_skeleton,
};
pub use game_elements::{
    Color, Piece, PieceType, Move, CaptureStep, Square, ParseError, MoveSkeleton,
    format_move, parse_move,
};
pub use game_state::{
    GameState, Phase, DrawReason, DrawState, MoveRecord, MoveError,
    initial_game_state, apply_move, resign, offer_draw_accepted,
};
pub use zobrist::{position_hash, zobrist_key};
