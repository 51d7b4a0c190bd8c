use draughts_core::{adjacent, quiet_moves, ray, Board, Color, Direction, Piece, PieceType, Square};

// Squares making up the board's center, per the evaluator's weight table.
const CENTER: [u8; 12] = [17, 18, 19, 22, 23, 24, 27, 28, 29, 32, 33, 34];
const INNER_CENTER: [u8; 5] = [22, 23, 24, 28, 29];

const W_CENTER: f64 = 5.0;
const W_INNER_CENTER: f64 = 5.0;
const W_ADVANCEMENT: f64 = 3.0;
const W_BACK_ROW: f64 = 8.0;
const W_KING_CENTER: f64 = 4.0;
const W_MAN_MOBILITY: f64 = 1.0;
const W_KING_MOBILITY: f64 = 2.0;
const W_IMBALANCE: f64 = -3.0;
const W_LOCKED: f64 = -10.0;
const W_RUNAWAY: f64 = 30.0;
const W_TEMPO: f64 = 2.0;
const W_ENDGAME_KING: f64 = 20.0;
const W_CONNECTIVITY: f64 = 4.0;

const FIRST_KING_BONUS: i32 = 50;
const ENDGAME_PIECE_LIMIT: u8 = 10;

// Evaluate how favorable `board` is for `player`, on a centipawn-like scale.
// `feature_scale` dials the positional terms from off (0.0) to full (1.0);
// the material term is always applied at full weight.
pub fn evaluate(board: &Board, player: Color, feature_scale: f64) -> i32 {
    let opponent = !player;
    if board.count(opponent) == 0 {
        return 10_000;
    }
    if board.count(player) == 0 {
        return -10_000;
    }

    let material = material_score(board) as f64;
    let positional = side_positional_score(board, Color::White)
        - side_positional_score(board, Color::Black)
        + endgame_king_term(board);

    let white_perspective = material + feature_scale * positional;
    (white_perspective.round() as i32) * player.sign()
}

// Material only, used by move ordering and the blunder policy's static re-scoring.
pub fn quick_evaluate(board: &Board, player: Color) -> i32 {
    material_score(board) * player.sign()
}

fn material_score(board: &Board) -> i32 {
    let white = piece_material(board, Color::White) + first_king_bonus(board, Color::White);
    let black = piece_material(board, Color::Black) + first_king_bonus(board, Color::Black);
    white - black
}

fn piece_material(board: &Board, color: Color) -> i32 {
    board.man_count(color) as i32 * PieceType::Man.material_value()
        + board.king_count(color) as i32 * PieceType::King.material_value()
}

fn first_king_bonus(board: &Board, color: Color) -> i32 {
    let own_kings = board.king_count(color);
    let other_kings = board.king_count(!color);
    if own_kings > 0 && other_kings == 0 {
        FIRST_KING_BONUS
    } else {
        0
    }
}

fn endgame_king_term(board: &Board) -> f64 {
    let total = board.count(Color::White) + board.count(Color::Black);
    if total > ENDGAME_PIECE_LIMIT {
        return 0.0;
    }
    let net_kings = board.king_count(Color::White) as f64 - board.king_count(Color::Black) as f64;
    W_ENDGAME_KING * net_kings
}

fn side_positional_score(board: &Board, color: Color) -> f64 {
    let quiets = quiet_moves(board, color);
    let man_mobility = quiets.iter()
        .filter(|mv| board.piece_on(mv.from()).is_some_and(|p| p.kind == PieceType::Man))
        .count() as f64;
    let king_mobility = quiets.iter()
        .filter(|mv| board.piece_on(mv.from()).is_some_and(|p| p.kind == PieceType::King))
        .count() as f64;

    let mut total = man_mobility * W_MAN_MOBILITY + king_mobility * W_KING_MOBILITY;

    if quiets.len() <= 2 && board.count(color) > 2 {
        total += W_LOCKED;
    }

    let mut left = 0i32;
    let mut right = 0i32;

    for (square, piece) in board.pieces(color) {
        let (row, col) = Square::row_col(square);

        if CENTER.contains(&square) {
            total += W_CENTER;
        }
        if INNER_CENTER.contains(&square) {
            total += W_INNER_CENTER;
        }
        if col < 5 { left += 1 } else { right += 1 }

        match piece.kind {
            PieceType::Man => {
                let advancement = match color {
                    Color::White => row as i32,
                    Color::Black => 9 - row as i32,
                };
                total += advancement as f64 * W_ADVANCEMENT;
                if row == color.home_row() {
                    total += W_BACK_ROW;
                }
                if has_runaway_corridor(board, square, color) {
                    total += W_RUNAWAY;
                }
            }
            PieceType::King => {
                let centralization = (7.0 - ((row as f64 - 4.5).abs() + (col as f64 - 4.5).abs())).round();
                total += centralization * W_KING_CENTER;
            }
        }

        if row as i32 == col as i32 || row as i32 + col as i32 == 9 {
            total += W_TEMPO;
        }

        if has_same_color_neighbor(board, square, piece) {
            total += W_CONNECTIVITY;
        }
    }

    total + W_IMBALANCE * (left - right).unsigned_abs() as f64
}

// A man has a clear run to promotion when both its forward diagonals are
// free of enemy pieces for the remaining distance, capped at 4 rows out.
fn has_runaway_corridor(board: &Board, square: u8, color: Color) -> bool {
    let row = Square::row_of(square) as i32;
    let distance = (color.promotion_row() as i32 - row).unsigned_abs() as usize;
    if distance == 0 || distance > 4 {
        return false;
    }

    Direction::forward_for(color).iter().all(|&dir| {
        ray(square, dir).iter().take(distance).all(|&sq| {
            board.piece_on(sq).map_or(true, |p| p.color == color)
        })
    })
}

fn has_same_color_neighbor(board: &Board, square: u8, piece: Piece) -> bool {
    Direction::ALL.iter().any(|&dir| {
        adjacent(square, dir).is_some_and(|sq| {
            board.piece_on(sq).is_some_and(|p| p.color == piece.color)
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use draughts_core::{initial_board, Board};

    fn mirror_square(square: u8) -> u8 {
        let (row, col) = Square::row_col(square);
        Square::from_row_col(9 - row as i8, 9 - col as i8).unwrap()
    }

    fn color_swapped_mirror(board: &Board) -> Board {
        let mut mirrored = Board::empty();
        for (square, piece) in board.all_pieces() {
            let flipped = Piece::new(piece.kind, !piece.color);
            mirrored.set(mirror_square(square), Some(flipped));
        }
        mirrored
    }

    #[test]
    fn evaluator_is_antisymmetric_under_color_and_board_mirroring() {
        let board = initial_board();
        let mirrored = color_swapped_mirror(&board);
        let white_view = evaluate(&board, Color::White, 1.0);
        let black_view = evaluate(&mirrored, Color::Black, 1.0);
        assert_eq!(white_view, -black_view);
    }

    #[test]
    fn terminal_shortcut_fires_when_opponent_has_no_pieces() {
        let mut board = Board::empty();
        board.set(1, Some(Piece::man(Color::White)));
        assert_eq!(evaluate(&board, Color::White, 1.0), 10_000);
        assert_eq!(evaluate(&board, Color::Black, 1.0), -10_000);
    }

    #[test]
    fn quick_evaluate_reflects_material_only() {
        let mut board = Board::empty();
        board.set(1, Some(Piece::man(Color::White)));
        board.set(50, Some(Piece::king(Color::Black)));
        // 100 - (300 + 50 first-king bonus) = -250, from white's perspective
        assert_eq!(quick_evaluate(&board, Color::White), -250);
        assert_eq!(quick_evaluate(&board, Color::Black), 250);
    }

    #[test]
    fn feature_scale_of_zero_keeps_only_the_material_term() {
        let board = initial_board();
        assert_eq!(evaluate(&board, Color::White, 0.0), 0);
    }

    #[test]
    fn runaway_corridor_bonus_favors_the_advancing_man() {
        // 26 is four rows short of white's promotion row (9); its only
        // forward diagonal on the board runs through 31. A harmless black
        // man at 1 keeps both boards off the opponent-has-no-pieces
        // terminal shortcut so the positional term actually runs.
        let mut board = Board::empty();
        board.set(26, Some(Piece::man(Color::White)));
        board.set(1, Some(Piece::man(Color::Black)));
        let scored = evaluate(&board, Color::White, 1.0);

        let mut blocked = Board::empty();
        blocked.set(26, Some(Piece::man(Color::White)));
        blocked.set(1, Some(Piece::man(Color::Black)));
        blocked.set(31, Some(Piece::man(Color::Black)));
        let blocked_score = evaluate(&blocked, Color::White, 1.0);

        assert!(scored > blocked_score);
    }
}
