use std::sync::OnceLock;

// The 50 playable (dark) squares of a 10x10 board, numbered 1..=50 in FMJD
// order: row 0 holds squares 1-5, row 1 holds 6-10, and so on, with each
// row's column offsets alternating parity. Square numbers are plain `u8`s
// everywhere else in this crate (in `Move`, notation, etc.) — this type is
// just the namespace for the row/col <-> square-number bijection.
pub struct Square;

struct SquareTable {
    row_of: [u8; 51],
    col_of: [u8; 51],
    // square_of[row][col], 0 when the cell is a light square (unused)
    square_of: [[u8; 10]; 10],
}

fn table() -> &'static SquareTable {
    static TABLE: OnceLock<SquareTable> = OnceLock::new();
    TABLE.get_or_init(|| {
        let mut row_of = [0u8; 51];
        let mut col_of = [0u8; 51];
        let mut square_of = [[0u8; 10]; 10];
        let mut next = 1u8;

        for row in 0..10u8 {
            for col in 0..10u8 {
                if (row + col) % 2 == 1 {
                    row_of[next as usize] = row;
                    col_of[next as usize] = col;
                    square_of[row as usize][col as usize] = next;
                    next += 1;
                }
            }
        }

        SquareTable { row_of, col_of, square_of }
    })
}

impl Square {
    pub fn is_valid(square: u8) -> bool {
        (1..=50).contains(&square)
    }

    pub fn row_of(square: u8) -> u8 {
        table().row_of[square as usize]
    }

    pub fn col_of(square: u8) -> u8 {
        table().col_of[square as usize]
    }

    pub fn row_col(square: u8) -> (u8, u8) {
        (Self::row_of(square), Self::col_of(square))
    }

    // Returns the square number at (row, col), or None if out of bounds or
    // on a light (non-playable) square.
    pub fn from_row_col(row: i8, col: i8) -> Option<u8> {
        if !(0..10).contains(&row) || !(0..10).contains(&col) {
            return None;
        }
        let sq = table().square_of[row as usize][col as usize];
        (sq != 0).then_some(sq)
    }
}
