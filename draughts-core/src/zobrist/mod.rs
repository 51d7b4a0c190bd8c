mod zobrist_utils;

pub use zobrist_utils::{position_hash, zobrist_key};
