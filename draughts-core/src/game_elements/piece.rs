use std::fmt::Display;
use serde::{Serialize, Deserialize};

use super::Color;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PieceType {
    Man,
    King,
}

impl PieceType {
    pub const fn material_value(&self) -> i32 {
        match self {
            Self::Man => 100,
            Self::King => 300,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceType,
    pub color: Color,
}

impl Piece {
    pub const fn new(kind: PieceType, color: Color) -> Self {
        Self { kind, color }
    }

    pub const fn man(color: Color) -> Self {
        Self::new(PieceType::Man, color)
    }

    pub const fn king(color: Color) -> Self {
        Self::new(PieceType::King, color)
    }

    pub const fn is_king(&self) -> bool {
        matches!(self.kind, PieceType::King)
    }

    // A man promotes the moment it lands on its color's promotion row
    pub fn promote_if_eligible(self, to: u8) -> Self {
        if !self.is_king() && to.is_promotion_square(self.color) {
            Self::king(self.color)
        } else {
            self
        }
    }
}

trait PromotionSquare {
    fn is_promotion_square(self, color: Color) -> bool;
}

impl PromotionSquare for u8 {
    fn is_promotion_square(self, color: Color) -> bool {
        super::Square::row_of(self) == color.promotion_row()
    }
}

impl Display for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let c = match (self.color, self.kind) {
            (Color::White, PieceType::Man) => 'w',
            (Color::White, PieceType::King) => 'W',
            (Color::Black, PieceType::Man) => 'b',
            (Color::Black, PieceType::King) => 'B',
        };
        write!(f, "{c}")
    }
}
