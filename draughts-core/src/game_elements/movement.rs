use std::fmt::{Display, Formatter};
use serde::{Serialize, Deserialize};
use thiserror::Error;

// Avoid clashes between the core Result and the formatter Result
type FmtResult = std::fmt::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureStep {
    pub from: u8,
    pub to: u8,
    pub captured: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Move {
    Quiet { from: u8, to: u8 },
    // Invariant: non-empty. steps[0].from is the move's origin, steps[i].from
    // == steps[i-1].to for i > 0, and steps[last].to is the move's destination.
    Capture { steps: Vec<CaptureStep> },
}

impl Move {
    pub fn from(&self) -> u8 {
        match self {
            Self::Quiet { from, .. } => *from,
            Self::Capture { steps } => steps[0].from,
        }
    }

    pub fn to(&self) -> u8 {
        match self {
            Self::Quiet { to, .. } => *to,
            Self::Capture { steps } => steps.last().unwrap().to,
        }
    }

    pub fn is_capture(&self) -> bool {
        matches!(self, Self::Capture { .. })
    }

    pub fn captured_count(&self) -> usize {
        match self {
            Self::Quiet { .. } => 0,
            Self::Capture { steps } => steps.len(),
        }
    }

    pub fn captured_squares(&self) -> Vec<u8> {
        match self {
            Self::Quiet { .. } => vec![],
            Self::Capture { steps } => steps.iter().map(|s| s.captured).collect(),
        }
    }

    // Structural equality, as required by the rules engine's legality gate:
    // same variant, same endpoints, and (for captures) the same sequence of
    // captured squares in order.
    pub fn same_move_as(&self, other: &Move) -> bool {
        match (self, other) {
            (Self::Quiet { from: f1, to: t1 }, Self::Quiet { from: f2, to: t2 }) => {
                f1 == f2 && t1 == t2
            }
            (Self::Capture { steps: s1 }, Self::Capture { steps: s2 }) => s1 == s2,
            _ => false,
        }
    }

    // Compact from*100+to signature, used by the killer-move table
    pub fn killer_signature(&self) -> u16 {
        self.from() as u16 * 100 + self.to() as u16
    }
}

impl Display for Move {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            Self::Quiet { from, to } => write!(f, "{from}-{to}"),
            Self::Capture { steps } => {
                write!(f, "{}", steps[0].from)?;
                for step in steps {
                    write!(f, "x{}", step.to)?;
                }
                Ok(())
            }
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("move notation is empty")]
    Empty,
    #[error("'{0}' is not a valid square number")]
    InvalidSquare(String),
    #[error("malformed move notation '{0}'")]
    MalformedNotation(String),
}

// A parsed move, independent of any board: the endpoint structure that
// `parse_move(format_move(m))` must reproduce. Resolving this skeleton
// against a board (to recover piece identity and the exact captured set)
// is the rules engine's job, via `generate_legal_moves` + structural match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveSkeleton {
    pub from: u8,
    pub to: u8,
    pub is_capture: bool,
    // Intermediate landing squares of a capture chain, in order, not
    // counting the final destination (empty for quiet moves and for
    // single-step captures).
    pub intermediate: Vec<u8>,
}

impl MoveSkeleton {
    pub fn is_capture(&self) -> bool {
        self.is_capture
    }
}

pub fn format_move(mv: &Move) -> String {
    mv.to_string()
}

pub fn parse_move(notation: &str) -> Result<MoveSkeleton, ParseError> {
    if notation.is_empty() {
        return Err(ParseError::Empty);
    }

    if notation.contains('x') {
        let mut parts = notation.split('x');
        let from = parse_square(parts.next().unwrap())?;
        let landings: Vec<u8> = parts.map(parse_square).collect::<Result<_, _>>()?;

        if landings.is_empty() {
            return Err(ParseError::MalformedNotation(notation.to_owned()));
        }

        let to = *landings.last().unwrap();
        let intermediate = landings[..landings.len() - 1].to_vec();
        Ok(MoveSkeleton { from, to, is_capture: true, intermediate })
    } else if notation.contains('-') {
        let mut parts = notation.splitn(3, '-');
        let from = parse_square(parts.next().ok_or_else(|| ParseError::MalformedNotation(notation.to_owned()))?)?;
        let to_str = parts.next().ok_or_else(|| ParseError::MalformedNotation(notation.to_owned()))?;
        if parts.next().is_some() {
            return Err(ParseError::MalformedNotation(notation.to_owned()));
        }
        let to = parse_square(to_str)?;
        Ok(MoveSkeleton { from, to, is_capture: false, intermediate: vec![] })
    } else {
        Err(ParseError::MalformedNotation(notation.to_owned()))
    }
}

fn parse_square(s: &str) -> Result<u8, ParseError> {
    let n: u8 = s.parse().map_err(|_| ParseError::InvalidSquare(s.to_owned()))?;
    if (1..=50).contains(&n) {
        Ok(n)
    } else {
        Err(ParseError::InvalidSquare(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_quiet_move() {
        let mv = Move::Quiet { from: 19, to: 23 };
        assert_eq!(format_move(&mv), "19-23");
    }

    #[test]
    fn formats_single_capture() {
        let mv = Move::Capture { steps: vec![CaptureStep { from: 22, to: 31, captured: 27 }] };
        assert_eq!(format_move(&mv), "22x31");
    }

    #[test]
    fn formats_multi_capture() {
        let mv = Move::Capture {
            steps: vec![
                CaptureStep { from: 32, to: 21, captured: 27 },
                CaptureStep { from: 21, to: 12, captured: 17 },
            ],
        };
        assert_eq!(format_move(&mv), "32x21x12");
    }

    #[test]
    fn parses_quiet_move() {
        let parsed = parse_move("19-23").unwrap();
        assert_eq!(parsed, MoveSkeleton { from: 19, to: 23, is_capture: false, intermediate: vec![] });
    }

    #[test]
    fn parses_capture_endpoints() {
        let parsed = parse_move("32x21x12").unwrap();
        assert_eq!(parsed.from, 32);
        assert_eq!(parsed.to, 12);
        assert!(parsed.is_capture());
    }

    #[test]
    fn round_trips_through_format_and_parse() {
        let mv = Move::Capture {
            steps: vec![
                CaptureStep { from: 32, to: 21, captured: 27 },
                CaptureStep { from: 21, to: 12, captured: 17 },
            ],
        };
        let parsed = parse_move(&format_move(&mv)).unwrap();
        assert_eq!(parsed.from, mv.from());
        assert_eq!(parsed.to, mv.to());
        assert_eq!(parsed.intermediate, vec![21]);
    }

    #[test]
    fn rejects_malformed_notation() {
        assert!(parse_move("").is_err());
        assert!(parse_move("abc").is_err());
        assert!(parse_move("19-99").is_err());
    }
}
