//! Legal-move discovery and move application.

use crate::board::{Board, bit};
use crate::error::EngineError;
use crate::types::{BOARD_SIZE, NUM_SQUARES, Position, Side};

/// Ray directions, walked in this order when building capture lists.
const DIRECTIONS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// A placement together with the discs it captures.
///
/// Only meaningful for the board and side that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Move {
    pub pos: Position,
    /// Captured discs, grouped by direction and ordered outward.
    pub flips: Vec<Position>,
}

/// Legal moves for one side on one board, in row-major order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MoveSet {
    moves: Vec<Move>,
}

impl MoveSet {
    pub fn get(&self, pos: Position) -> Option<&Move> {
        self.moves
            .binary_search_by(|mv| mv.pos.cmp(&pos))
            .ok()
            .map(|i| &self.moves[i])
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.get(pos).is_some()
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Move> {
        self.moves.iter()
    }

    pub fn positions(&self) -> Vec<Position> {
        self.moves.iter().map(|mv| mv.pos).collect()
    }
}

/// Returns every legal move for `side`. An empty set means `side` must pass.
pub fn legal_moves(board: &Board, side: Side) -> MoveSet {
    let moves = (0..NUM_SQUARES)
        .map(Position::from_index)
        .filter(|&pos| board.is_empty_at(pos))
        .filter_map(|pos| {
            let flips = collect_flips(board, pos, side);
            (!flips.is_empty()).then_some(Move { pos, flips })
        })
        .collect();
    MoveSet { moves }
}

/// Counts legal moves without materialising capture lists.
pub fn mobility(board: &Board, side: Side) -> usize {
    (0..NUM_SQUARES)
        .map(Position::from_index)
        .filter(|&pos| board.is_empty_at(pos) && captures_any(board, pos, side))
        .count()
}

/// Places `mv` for `side` and returns the resulting board.
///
/// The capture list is checked against the board, so a stale or fabricated
/// move fails with [`EngineError::InvalidMove`] instead of corrupting it.
pub fn apply(board: &Board, mv: &Move, side: Side) -> Result<Board, EngineError> {
    let invalid = EngineError::InvalidMove {
        row: mv.pos.row,
        col: mv.pos.col,
    };
    if !board.is_empty_at(mv.pos) || mv.flips.is_empty() {
        return Err(invalid);
    }
    if collect_flips(board, mv.pos, side) != mv.flips {
        return Err(invalid);
    }

    let flips = mv.flips.iter().fold(0u64, |acc, p| acc | bit(p.index()));
    Ok(board.with_discs(side, bit(mv.pos.index()), flips))
}

fn collect_flips(board: &Board, pos: Position, side: Side) -> Vec<Position> {
    let me = board.discs(side);
    let opp = board.discs(side.opponent());
    let mut flips = Vec::new();

    for (dr, dc) in DIRECTIONS {
        let start = flips.len();
        let mut r = pos.row as i32 + dr;
        let mut c = pos.col as i32 + dc;
        let mut closed = false;

        while in_bounds(r, c) {
            let idx = (r as usize) * BOARD_SIZE + c as usize;
            if (opp & bit(idx)) != 0 {
                flips.push(Position::from_index(idx));
            } else {
                closed = (me & bit(idx)) != 0;
                break;
            }
            r += dr;
            c += dc;
        }

        if !closed {
            flips.truncate(start);
        }
    }

    flips
}

fn captures_any(board: &Board, pos: Position, side: Side) -> bool {
    let me = board.discs(side);
    let opp = board.discs(side.opponent());

    DIRECTIONS.iter().any(|&(dr, dc)| {
        let mut r = pos.row as i32 + dr;
        let mut c = pos.col as i32 + dc;
        let mut run = 0;
        while in_bounds(r, c) {
            let square = bit((r as usize) * BOARD_SIZE + c as usize);
            if (opp & square) != 0 {
                run += 1;
            } else {
                return run > 0 && (me & square) != 0;
            }
            r += dr;
            c += dc;
        }
        false
    })
}

fn in_bounds(row: i32, col: i32) -> bool {
    (0..BOARD_SIZE as i32).contains(&row) && (0..BOARD_SIZE as i32).contains(&col)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Cell, Score};

    fn pos(row: u8, col: u8) -> Position {
        Position::new(row, col).unwrap()
    }

    fn mask(cells: &[(u8, u8)]) -> u64 {
        cells.iter().fold(0, |acc, &(r, c)| acc | bit(pos(r, c).index()))
    }

    #[test]
    fn opening_has_four_single_capture_moves_for_black() {
        let moves = legal_moves(&Board::new(), Side::Black);

        assert_eq!(
            moves.positions(),
            vec![pos(2, 3), pos(3, 2), pos(4, 5), pos(5, 4)]
        );
        assert!(moves.iter().all(|mv| mv.flips.len() == 1));
        assert_eq!(moves.get(pos(2, 3)).unwrap().flips, vec![pos(3, 3)]);
        assert_eq!(mobility(&Board::new(), Side::Black), 4);
    }

    #[test]
    fn opening_moves_for_white_mirror_black() {
        let moves = legal_moves(&Board::new(), Side::White);

        assert_eq!(
            moves.positions(),
            vec![pos(2, 4), pos(3, 5), pos(4, 2), pos(5, 3)]
        );
    }

    #[test]
    fn apply_places_and_flips_without_mutating_input() {
        let board = Board::new();
        let moves = legal_moves(&board, Side::Black);
        let mv = moves.get(pos(2, 3)).unwrap();

        let next = apply(&board, mv, Side::Black).unwrap();

        assert_eq!(board, Board::new());
        assert_eq!(next.get(2, 3), Ok(Cell::Black));
        assert_eq!(next.get(3, 3), Ok(Cell::Black));
        assert_eq!(next.get(4, 4), Ok(Cell::White));
        assert_eq!(next.score(), Score { black: 4, white: 1 });
        assert_eq!(apply(&board, mv, Side::Black).unwrap(), next);
    }

    #[test]
    fn capture_lines_in_several_directions_are_concatenated_in_fixed_order() {
        // Black at (0,0), (0,4) and (4,4) surround white runs toward (4,0).
        //   X . . . X
        //   O . . O .
        //   O . O . .
        //   O O . . .
        //   _ O O O X
        let black = mask(&[(0, 0), (0, 4), (4, 4)]);
        let white = mask(&[
            (1, 0),
            (2, 0),
            (3, 0),
            (1, 3),
            (2, 2),
            (3, 1),
            (4, 1),
            (4, 2),
            (4, 3),
        ]);
        let board = Board::from_bitboards(black, white);

        let moves = legal_moves(&board, Side::Black);
        let mv = moves.get(pos(4, 0)).unwrap();

        // N, then NE, then E.
        assert_eq!(
            mv.flips,
            vec![
                pos(3, 0),
                pos(2, 0),
                pos(1, 0),
                pos(3, 1),
                pos(2, 2),
                pos(1, 3),
                pos(4, 1),
                pos(4, 2),
                pos(4, 3),
            ]
        );

        let next = apply(&board, mv, Side::Black).unwrap();
        assert_eq!(next.score(), Score { black: 13, white: 0 });
    }

    #[test]
    fn open_ended_runs_capture_nothing() {
        // White run ends at the board edge with no black disc behind it.
        let black = mask(&[(0, 3)]);
        let white = mask(&[(0, 2), (0, 1), (0, 0)]);
        let board = Board::from_bitboards(black, white);

        let moves = legal_moves(&board, Side::Black);

        assert!(moves.is_empty());
        assert_eq!(mobility(&board, Side::Black), 0);
    }

    #[test]
    fn apply_rejects_moves_from_another_board() {
        let board = Board::new();
        let mv = legal_moves(&board, Side::Black)
            .get(pos(2, 3))
            .cloned()
            .unwrap();
        let next = apply(&board, &mv, Side::Black).unwrap();

        assert_eq!(
            apply(&next, &mv, Side::Black),
            Err(EngineError::InvalidMove { row: 2, col: 3 })
        );
    }

    #[test]
    fn apply_rejects_fabricated_capture_lists() {
        let board = Board::new();
        let padded = Move {
            pos: pos(2, 3),
            flips: vec![pos(3, 3), pos(4, 4)],
        };
        let empty = Move {
            pos: pos(0, 0),
            flips: Vec::new(),
        };

        assert_eq!(
            apply(&board, &padded, Side::Black),
            Err(EngineError::InvalidMove { row: 2, col: 3 })
        );
        assert_eq!(
            apply(&board, &empty, Side::Black),
            Err(EngineError::InvalidMove { row: 0, col: 0 })
        );
        // Legal for black, not for white.
        let black_move = legal_moves(&board, Side::Black).get(pos(2, 3)).cloned().unwrap();
        assert!(apply(&board, &black_move, Side::White).is_err());
    }

    #[test]
    fn full_board_has_no_moves() {
        let board = Board::from_bitboards(u64::MAX, 0);

        assert!(legal_moves(&board, Side::Black).is_empty());
        assert!(legal_moves(&board, Side::White).is_empty());
    }
}
