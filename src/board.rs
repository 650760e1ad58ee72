use std::fmt;

use crate::error::EngineError;
use crate::types::{BOARD_SIZE, Cell, NUM_SQUARES, Position, Score, Side};

/// Othello board state represented by two bitboards.
///
/// Bit `row * 8 + col` is set in `black` or `white` when that side owns the
/// square. The two masks never overlap, so every square is exactly one of
/// empty, black or white.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    black: u64,
    white: u64,
}

impl Board {
    /// Creates the standard opening position:
    /// (3,3)=white, (3,4)=black, (4,3)=black, (4,4)=white.
    pub fn new() -> Self {
        Self {
            black: bit(28) | bit(35),
            white: bit(27) | bit(36),
        }
    }

    /// Builds a board from raw masks. Squares set in both masks are treated
    /// as black.
    pub fn from_bitboards(black: u64, white: u64) -> Self {
        Self {
            black,
            white: white & !black,
        }
    }

    pub fn get(&self, row: u8, col: u8) -> Result<Cell, EngineError> {
        let pos = Position::new(row, col)?;
        Ok(self.cell(pos))
    }

    pub fn cell(&self, pos: Position) -> Cell {
        let square = bit(pos.index());
        if (self.black & square) != 0 {
            Cell::Black
        } else if (self.white & square) != 0 {
            Cell::White
        } else {
            Cell::Empty
        }
    }

    pub fn is_empty_at(&self, pos: Position) -> bool {
        ((self.black | self.white) & bit(pos.index())) == 0
    }

    pub(crate) fn discs(&self, side: Side) -> u64 {
        match side {
            Side::Black => self.black,
            Side::White => self.white,
        }
    }

    /// Returns a copy with `placed` and every square in `flips` owned by `side`.
    pub(crate) fn with_discs(&self, side: Side, placed: u64, flips: u64) -> Self {
        let mine = self.discs(side) | placed | flips;
        let theirs = self.discs(side.opponent()) & !flips & !placed;
        match side {
            Side::Black => Self {
                black: mine,
                white: theirs,
            },
            Side::White => Self {
                black: theirs,
                white: mine,
            },
        }
    }

    pub fn score(&self) -> Score {
        Score {
            black: self.black.count_ones() as u8,
            white: self.white.count_ones() as u8,
        }
    }

    /// Returns the number of empty squares.
    pub fn empty_count(&self) -> u8 {
        let score = self.score();
        NUM_SQUARES as u8 - score.black - score.white
    }

    /// Converts board to `[u8; 64]` where 0=empty, 1=black, 2=white.
    pub fn to_array(&self) -> [u8; NUM_SQUARES] {
        let mut board = [0u8; NUM_SQUARES];
        for (idx, cell) in board.iter_mut().enumerate() {
            *cell = self.cell(Position::from_index(idx)).code();
        }
        board
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                let c = match self.cell(Position::from_index(row * BOARD_SIZE + col)) {
                    Cell::Empty => '.',
                    Cell::Black => 'X',
                    Cell::White => 'O',
                };
                write!(f, "{c}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

pub(crate) fn bit(idx: usize) -> u64 {
    if idx < NUM_SQUARES { 1u64 << idx } else { 0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn idx(row: usize, col: usize) -> usize {
        row * BOARD_SIZE + col
    }

    #[test]
    fn initial_board_has_two_discs_per_side_in_the_centre() {
        let board = Board::new();

        assert_eq!(board.get(3, 3), Ok(Cell::White));
        assert_eq!(board.get(4, 4), Ok(Cell::White));
        assert_eq!(board.get(3, 4), Ok(Cell::Black));
        assert_eq!(board.get(4, 3), Ok(Cell::Black));
        assert_eq!(board.score(), Score { black: 2, white: 2 });
        assert_eq!(board.empty_count(), 60);
    }

    #[test]
    fn get_rejects_out_of_range() {
        let board = Board::new();

        assert_eq!(
            board.get(8, 0),
            Err(EngineError::OutOfRange { row: 8, col: 0 })
        );
        assert_eq!(
            board.get(0, 8),
            Err(EngineError::OutOfRange { row: 0, col: 8 })
        );
        assert_eq!(board.get(0, 0), Ok(Cell::Empty));
    }

    #[test]
    fn with_discs_moves_ownership_without_touching_the_original() {
        let board = Board::new();
        let next = board.with_discs(Side::Black, bit(idx(2, 3)), bit(idx(3, 3)));

        assert_eq!(board, Board::new());
        assert_eq!(next.score(), Score { black: 4, white: 1 });
        assert_eq!(next.get(3, 3), Ok(Cell::Black));
        assert_eq!(next.get(4, 4), Ok(Cell::White));
    }

    #[test]
    fn from_bitboards_never_overlaps() {
        let board = Board::from_bitboards(0b11, 0b110);

        assert_eq!(board.score(), Score { black: 2, white: 1 });
        assert_eq!(board.get(0, 1), Ok(Cell::Black));
        assert_eq!(board.get(0, 2), Ok(Cell::White));
    }

    #[test]
    fn to_array_and_display_agree() {
        let board = Board::new();
        let cells = board.to_array();

        assert_eq!(cells[idx(3, 3)], 2);
        assert_eq!(cells[idx(3, 4)], 1);
        assert_eq!(cells.iter().filter(|&&c| c == 0).count(), 60);

        let text = board.to_string();
        let rows: Vec<&str> = text.lines().collect();
        assert_eq!(rows.len(), 8);
        assert_eq!(rows[3], "...OX...");
        assert_eq!(rows[4], "...XO...");
    }
}
