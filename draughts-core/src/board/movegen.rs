use crate::game_elements::{CaptureStep, Color, Move, MoveSkeleton, Piece, PieceType};
use super::board::Board;
use super::topology::{adjacent, ray, Direction};

// Returns the occupant of `square` as seen by a capture search rooted at
// `origin`: the moving piece's own origin square counts as empty (it has
// been vacated), even though pieces captured earlier in the same chain
// remain physically on the board and keep blocking it.
fn occupant_for_capture(board: &Board, square: u8, origin: u8) -> Option<Piece> {
    if square == origin {
        None
    } else {
        board.piece_on(square)
    }
}

fn collect_captures(
    board: &Board,
    color: Color,
    kind: PieceType,
    origin: u8,
    current: u8,
    captured: &mut Vec<u8>,
    steps: &mut Vec<CaptureStep>,
    out: &mut Vec<Vec<CaptureStep>>,
) {
    let mut found_any = false;

    match kind {
        PieceType::Man => {
            for dir in Direction::ALL {
                let Some(enemy_sq) = adjacent(current, dir) else { continue };
                let Some(enemy) = occupant_for_capture(board, enemy_sq, origin) else { continue };
                if enemy.color == color || captured.contains(&enemy_sq) {
                    continue;
                }
                let Some(land_sq) = adjacent(enemy_sq, dir) else { continue };
                if occupant_for_capture(board, land_sq, origin).is_some() {
                    continue;
                }

                found_any = true;
                captured.push(enemy_sq);
                steps.push(CaptureStep { from: current, to: land_sq, captured: enemy_sq });
                collect_captures(board, color, kind, origin, land_sq, captured, steps, out);
                steps.pop();
                captured.pop();
            }
        }
        PieceType::King => {
            for dir in Direction::ALL {
                let path = ray(current, dir);
                let mut enemy_sq = None;
                for &sq in path.iter() {
                    match occupant_for_capture(board, sq, origin) {
                        None => continue,
                        Some(piece) => {
                            if piece.color != color && !captured.contains(&sq) {
                                enemy_sq = Some(sq);
                            }
                            break;
                        }
                    }
                }

                let Some(enemy_sq) = enemy_sq else { continue };
                let beyond = path.iter().skip_while(|&&sq| sq != enemy_sq).skip(1);
                for &land_sq in beyond {
                    if occupant_for_capture(board, land_sq, origin).is_some() {
                        break;
                    }

                    found_any = true;
                    captured.push(enemy_sq);
                    steps.push(CaptureStep { from: current, to: land_sq, captured: enemy_sq });
                    collect_captures(board, color, kind, origin, land_sq, captured, steps, out);
                    steps.pop();
                    captured.pop();
                }
            }
        }
    }

    if !found_any && !steps.is_empty() {
        out.push(steps.clone());
    }
}

fn captures_for_piece(board: &Board, square: u8, piece: Piece) -> Vec<Vec<CaptureStep>> {
    let mut out = Vec::new();
    let mut captured = Vec::new();
    let mut steps = Vec::new();
    collect_captures(board, piece.color, piece.kind, square, square, &mut captured, &mut steps, &mut out);
    out
}

fn all_captures(board: &Board, to_move: Color) -> Vec<Move> {
    let mut sequences: Vec<Vec<CaptureStep>> = board.pieces(to_move)
        .flat_map(|(square, piece)| captures_for_piece(board, square, piece))
        .collect();

    let Some(max_len) = sequences.iter().map(Vec::len).max() else {
        return Vec::new();
    };
    sequences.retain(|steps| steps.len() == max_len);
    sequences.into_iter().map(|steps| Move::Capture { steps }).collect()
}

// Exposed separately from `generate_legal_moves` because the evaluator's
// mobility terms count quiet moves regardless of whether captures are
// currently mandatory for the side in question.
pub fn quiet_moves(board: &Board, to_move: Color) -> Vec<Move> {
    let mut moves = Vec::new();

    for (square, piece) in board.pieces(to_move) {
        match piece.kind {
            PieceType::Man => {
                for dir in Direction::forward_for(to_move) {
                    if let Some(to) = adjacent(square, dir) {
                        if board.is_empty_at(to) {
                            moves.push(Move::Quiet { from: square, to });
                        }
                    }
                }
            }
            PieceType::King => {
                for dir in Direction::ALL {
                    for &to in ray(square, dir).iter() {
                        if !board.is_empty_at(to) {
                            break;
                        }
                        moves.push(Move::Quiet { from: square, to });
                    }
                }
            }
        }
    }

    moves
}

// `generate_legal_moves(board, to_move)`: mandatory capture, maximum-capture
// filter, no duplicates by construction (each capture sequence corresponds
// to exactly one distinct path through the tree).
pub fn generate_legal_moves(board: &Board, to_move: Color) -> Vec<Move> {
    let captures = all_captures(board, to_move);
    if !captures.is_empty() {
        captures
    } else {
        quiet_moves(board, to_move)
    }
}

// Resolves a board-independent `MoveSkeleton` (as produced by `parse_move`)
// against `board`, recovering the one legal move for `to_move` whose
// endpoint structure matches it, piece identity and captured squares
// included. A skeleton carries only landing squares, not what was captured,
// so this is the only way to turn notation back into a move a board can
// actually apply.
pub fn resolve_skeleton(skeleton: &MoveSkeleton, board: &Board, to_move: Color) -> Option<Move> {
    generate_legal_moves(board, to_move)
        .into_iter()
        .find(|mv| skeleton_matches(skeleton, mv))
}

fn skeleton_matches(skeleton: &MoveSkeleton, mv: &Move) -> bool {
    match mv {
        Move::Quiet { from, to } => {
            !skeleton.is_capture
                && skeleton.intermediate.is_empty()
                && skeleton.from == *from
                && skeleton.to == *to
        }
        Move::Capture { steps } => {
            if !skeleton.is_capture || skeleton.from != steps[0].from {
                return false;
            }
            let landings: Vec<u8> = steps.iter().map(|s| s.to).collect();
            let (&last, rest) = landings.split_last().expect("capture steps are non-empty");
            last == skeleton.to && rest == skeleton.intermediate.as_slice()
        }
    }
}

pub fn apply_move_to_board(board: &Board, mv: &Move) -> Board {
    let mut next = *board;

    match mv {
        Move::Quiet { from, to } => {
            let piece = board.piece_on(*from).expect("quiet move origin must hold a piece");
            next.set(*from, None);
            next.set(*to, Some(piece.promote_if_eligible(*to)));
        }
        Move::Capture { steps } => {
            let piece = board.piece_on(steps[0].from).expect("capture origin must hold a piece");
            next.set(steps[0].from, None);
            for step in steps {
                next.set(step.captured, None);
            }
            let destination = steps.last().unwrap().to;
            next.set(destination, Some(piece.promote_if_eligible(destination)));
        }
    }

    next
}
