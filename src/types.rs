use serde::{Deserialize, Serialize};

use crate::error::EngineError;

pub const BOARD_SIZE: usize = 8;
pub const NUM_SQUARES: usize = BOARD_SIZE * BOARD_SIZE;

/// One of the two players. Black moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Black,
    White,
}

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Side::Black => Side::White,
            Side::White => Side::Black,
        }
    }
}

/// Contents of a single square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Black,
    White,
}

impl Cell {
    /// Wire encoding used by the JS layer: 0=empty, 1=black, 2=white.
    pub fn code(self) -> u8 {
        match self {
            Cell::Empty => 0,
            Cell::Black => 1,
            Cell::White => 2,
        }
    }
}

/// A board coordinate. Ordering is row-major.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Position {
    pub row: u8,
    pub col: u8,
}

impl Position {
    pub fn new(row: u8, col: u8) -> Result<Self, EngineError> {
        if (row as usize) < BOARD_SIZE && (col as usize) < BOARD_SIZE {
            Ok(Self { row, col })
        } else {
            Err(EngineError::OutOfRange { row, col })
        }
    }

    pub(crate) fn from_index(idx: usize) -> Self {
        debug_assert!(idx < NUM_SQUARES);
        Self {
            row: (idx / BOARD_SIZE) as u8,
            col: (idx % BOARD_SIZE) as u8,
        }
    }

    pub fn index(self) -> usize {
        self.row as usize * BOARD_SIZE + self.col as usize
    }
}

/// Disc tally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Score {
    pub black: u8,
    pub white: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Black,
    White,
    Draw,
}

/// Final result after game over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameResult {
    pub outcome: Outcome,
    pub black: u8,
    pub white: u8,
}

impl GameResult {
    pub fn from_score(score: Score) -> Self {
        let outcome = if score.black > score.white {
            Outcome::Black
        } else if score.white > score.black {
            Outcome::White
        } else {
            Outcome::Draw
        };
        Self {
            outcome,
            black: score.black,
            white: score.white,
        }
    }
}

/// Snapshot of the session handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameView {
    /// Row-major cell codes, see [`Cell::code`].
    pub board: Vec<u8>,
    pub side_to_move: Side,
    pub last_move: Option<Position>,
    pub black_count: u8,
    pub white_count: u8,
    pub is_terminal: bool,
    /// `true` while an automated move is pending; input is ignored.
    pub busy: bool,
    /// Side that was forced to pass by the most recent move, if any.
    pub passed: Option<Side>,
    pub legal_moves: Vec<Position>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opponent_is_an_involution() {
        assert_eq!(Side::Black.opponent(), Side::White);
        assert_eq!(Side::White.opponent(), Side::Black);
        assert_eq!(Side::Black.opponent().opponent(), Side::Black);
    }

    #[test]
    fn position_rejects_out_of_range_coordinates() {
        assert_eq!(Position::new(7, 7).unwrap().index(), 63);
        assert_eq!(
            Position::new(8, 0),
            Err(EngineError::OutOfRange { row: 8, col: 0 })
        );
        assert_eq!(
            Position::new(0, 200),
            Err(EngineError::OutOfRange { row: 0, col: 200 })
        );
    }

    #[test]
    fn positions_sort_row_major() {
        let mut cells = vec![
            Position::from_index(12),
            Position::from_index(3),
            Position::from_index(40),
        ];
        cells.sort();
        let indices: Vec<usize> = cells.iter().map(|p| p.index()).collect();
        assert_eq!(indices, vec![3, 12, 40]);
    }

    #[test]
    fn result_compares_disc_counts() {
        let r = GameResult::from_score(Score { black: 40, white: 24 });
        assert_eq!(r.outcome, Outcome::Black);
        let r = GameResult::from_score(Score { black: 10, white: 54 });
        assert_eq!(r.outcome, Outcome::White);
        let r = GameResult::from_score(Score { black: 32, white: 32 });
        assert_eq!(r.outcome, Outcome::Draw);
    }
}
