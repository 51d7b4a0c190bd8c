use std::sync::OnceLock;
use arrayvec::ArrayVec;

use crate::game_elements::{Color, Square};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    NE,
    NW,
    SE,
    SW,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::NE, Direction::NW, Direction::SE, Direction::SW];

    // Forward directions are rows increasing for White (toward row 9, its
    // promotion row) and rows decreasing for Black (toward row 0).
    pub const fn forward_for(color: Color) -> [Direction; 2] {
        match color {
            Color::White => [Direction::SE, Direction::SW],
            Color::Black => [Direction::NE, Direction::NW],
        }
    }

    const fn row_col_delta(&self) -> (i8, i8) {
        match self {
            Direction::NE => (-1, 1),
            Direction::NW => (-1, -1),
            Direction::SE => (1, 1),
            Direction::SW => (1, -1),
        }
    }

    const fn index(&self) -> usize {
        match self {
            Direction::NE => 0,
            Direction::NW => 1,
            Direction::SE => 2,
            Direction::SW => 3,
        }
    }
}

pub type Ray = ArrayVec<u8, 9>;

struct Topology {
    adjacent: [[Option<u8>; 4]; 51],
    rays: [[Ray; 4]; 51],
}

fn topology() -> &'static Topology {
    static TABLE: OnceLock<Topology> = OnceLock::new();
    TABLE.get_or_init(|| {
        let mut adjacent = [[None; 4]; 51];
        let rays: Vec<[Ray; 4]> = (0..=50)
            .map(|square| {
                if square == 0 || !Square::is_valid(square) {
                    return [Ray::new(), Ray::new(), Ray::new(), Ray::new()];
                }

                let (row, col) = Square::row_col(square);
                let mut per_dir: [Ray; 4] = [Ray::new(), Ray::new(), Ray::new(), Ray::new()];

                for dir in Direction::ALL {
                    let (dr, dc) = dir.row_col_delta();
                    let mut cur_row = row as i8;
                    let mut cur_col = col as i8;
                    let mut ray = Ray::new();

                    loop {
                        cur_row += dr;
                        cur_col += dc;
                        match Square::from_row_col(cur_row, cur_col) {
                            Some(next) => ray.push(next),
                            None => break,
                        }
                    }

                    if let Some(&first) = ray.first() {
                        adjacent[square as usize][dir.index()] = Some(first);
                    }
                    per_dir[dir.index()] = ray;
                }

                per_dir
            })
            .collect();

        let rays: [[Ray; 4]; 51] = rays.try_into().unwrap_or_else(|_| unreachable!());
        Topology { adjacent, rays }
    })
}

// The next playable square from `square` along `dir`, or None at the edge.
pub fn adjacent(square: u8, dir: Direction) -> Option<u8> {
    topology().adjacent[square as usize][dir.index()]
}

// The full ray of playable squares from `square` along `dir`, nearest first,
// not including `square` itself.
pub fn ray(square: u8, dir: Direction) -> &'static Ray {
    &topology().rays[square as usize][dir.index()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corner_square_has_no_ray_off_the_board() {
        // Square 5 is (row 0, col 9): NE and NW run off both edges immediately
        assert!(ray(5, Direction::NE).is_empty());
        assert!(ray(5, Direction::NW).is_empty());
        assert!(!ray(5, Direction::SW).is_empty());
    }

    #[test]
    fn ray_from_46_matches_spec_scenario() {
        // §8 scenario 5: white king on 46, ray toward NE passes through
        // 41, 37, 32, 23, 19, 14, 10, 5 after the first enemy on 28
        let r = ray(46, Direction::NE);
        assert_eq!(r.as_slice(), &[41, 37, 32, 28, 23, 19, 14, 10, 5]);
    }

    #[test]
    fn adjacent_is_first_of_ray() {
        for square in 1..=50u8 {
            for dir in Direction::ALL {
                assert_eq!(adjacent(square, dir), ray(square, dir).first().copied());
            }
        }
    }

    #[test]
    fn forward_directions_match_color_convention() {
        assert_eq!(Direction::forward_for(Color::White), [Direction::SE, Direction::SW]);
        assert_eq!(Direction::forward_for(Color::Black), [Direction::NE, Direction::NW]);
    }
}
