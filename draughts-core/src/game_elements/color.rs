use std::fmt::Display;
use std::ops::Not;
use serde::{Serialize, Deserialize};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Color {
    White,
    Black,
}

impl Color {
    // Used for zobrist keys and array indexing
    pub const fn to_index(&self) -> usize {
        match self {
            Self::Black => 0,
            Self::White => 1,
        }
    }

    // Used as a multiplier to swap the sign in score calculations
    pub const fn sign(&self) -> i32 {
        match self {
            Self::White => 1,
            Self::Black => -1,
        }
    }

    // The row on which a man of this color starts, used to score advancement
    pub const fn home_row(&self) -> u8 {
        match self {
            Self::White => 0,
            Self::Black => 9,
        }
    }

    // The row on which a man of this color promotes to a king
    pub const fn promotion_row(&self) -> u8 {
        match self {
            Self::White => 9,
            Self::Black => 0,
        }
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Color::White => f.write_str("White"),
            Color::Black => f.write_str("Black"),
        }
    }
}

impl Not for Color {
    type Output = Color;

    fn not(self) -> Self::Output {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}
