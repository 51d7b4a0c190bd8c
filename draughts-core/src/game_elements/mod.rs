mod color;
mod movement;
mod piece;
mod square;

pub use color::Color;
pub use movement::{CaptureStep, Move, MoveSkeleton, ParseError, format_move, parse_move};
pub use piece::{Piece, PieceType};
pub use square::Square;
