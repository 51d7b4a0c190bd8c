use std::sync::OnceLock;

use crate::game_elements::{Color, Piece, PieceType};
use crate::board::Board;

// 50 squares * 4 (piece kind, color) combinations, plus one side-to-move key.
const TABLE_LEN: usize = 50 * 4 + 1;
const SIDE_TO_MOVE_INDEX: usize = TABLE_LEN - 1;
const SEED: u32 = 0x9E3779B9;

fn piece_index(piece: Piece) -> usize {
    match (piece.kind, piece.color) {
        (PieceType::Man, Color::White) => 0,
        (PieceType::King, Color::White) => 1,
        (PieceType::Man, Color::Black) => 2,
        (PieceType::King, Color::Black) => 3,
    }
}

// xorshift32, the same small deterministic generator used to seed Zobrist
// tables when there's no prior-art table to bake in as a literal.
struct XorShift32 {
    state: u32,
}

impl XorShift32 {
    fn new(seed: u32) -> Self {
        Self { state: if seed == 0 { 1 } else { seed } }
    }

    fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }
}

fn table() -> &'static [u32; TABLE_LEN] {
    static TABLE: OnceLock<[u32; TABLE_LEN]> = OnceLock::new();
    TABLE.get_or_init(|| {
        let mut rng = XorShift32::new(SEED);
        let mut values = [0u32; TABLE_LEN];
        for v in values.iter_mut() {
            *v = rng.next_u32();
        }
        values
    })
}

fn key_for(square: u8, piece: Piece) -> u32 {
    let index = (square as usize - 1) * 4 + piece_index(piece);
    table()[index]
}

fn side_to_move_key(color: Color) -> u32 {
    match color {
        Color::White => 0,
        Color::Black => table()[SIDE_TO_MOVE_INDEX],
    }
}

// 32-bit key used to index the transposition table. Two distinct positions
// may collide; that's an accepted TT cost, not a correctness requirement
// (see `position_hash` below for the wider key used for repetition).
pub fn zobrist_key(board: &Board, to_move: Color) -> u32 {
    let mut key = side_to_move_key(to_move);
    for (square, piece) in board.all_pieces() {
        key ^= key_for(square, piece);
    }
    key
}

// Stable 64-bit polynomial hash over board contents and side to move, wide
// enough that collisions across a game's repetition history are not a
// practical concern. Kept distinct from `zobrist_key`, which is deliberately
// narrow because it only has to index a small TT array.
pub fn position_hash(board: &Board, to_move: Color) -> u64 {
    let mut hash: u64 = 0;
    for square in 1..=50u8 {
        let digit: u64 = match board.piece_on(square) {
            None => 0,
            Some(Piece { kind: PieceType::Man, color: Color::White }) => 1,
            Some(Piece { kind: PieceType::King, color: Color::White }) => 2,
            Some(Piece { kind: PieceType::Man, color: Color::Black }) => 3,
            Some(Piece { kind: PieceType::King, color: Color::Black }) => 4,
        };
        hash = hash.wrapping_mul(5).wrapping_add(digit);
    }
    hash.wrapping_mul(31).wrapping_add(to_move.to_index() as u64 + 1)
}
