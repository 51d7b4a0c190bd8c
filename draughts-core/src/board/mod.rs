mod board;
mod movegen;
mod topology;

pub use board::{initial_board, Board};
pub use movegen::{apply_move_to_board, generate_legal_moves, quiet_moves, resolve_skeleton};
pub use topology::{adjacent, ray, Direction};
