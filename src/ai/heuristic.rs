use tracing::debug;

use super::MoveSelector;
use crate::board::Board;
use crate::error::EngineError;
use crate::moves::{self, Move, MoveSet};
use crate::types::{BOARD_SIZE, Position, Side};

const CAPTURE_WEIGHT: i32 = 10;
const MOBILITY_WEIGHT: i32 = 2;

/// Positional weights: corners are prized, squares next to corners avoided.
pub const WEIGHTS: [[i32; BOARD_SIZE]; BOARD_SIZE] = [
    [120, -20, 20, 5, 5, 20, -20, 120],
    [-20, -40, -5, -5, -5, -5, -40, -20],
    [20, -5, 15, 3, 3, 15, -5, 20],
    [5, -5, 3, 3, 3, 3, -5, 5],
    [5, -5, 3, 3, 3, 3, -5, 5],
    [20, -5, 15, 3, 3, 15, -5, 20],
    [-20, -40, -5, -5, -5, -5, -40, -20],
    [120, -20, 20, 5, 5, 20, -20, 120],
];

pub fn positional_weight(pos: Position) -> i32 {
    WEIGHTS[pos.row as usize][pos.col as usize]
}

/// One-ply greedy policy: captures, square weight and the opponent's
/// mobility after the move.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeuristicSelector;

impl HeuristicSelector {
    /// Scores `mv` for `side`.
    pub fn score(&self, board: &Board, side: Side, mv: &Move) -> Result<i32, EngineError> {
        let next = moves::apply(board, mv, side)?;
        let reply_count = moves::mobility(&next, side.opponent()) as i32;
        Ok(mv.flips.len() as i32 * CAPTURE_WEIGHT + positional_weight(mv.pos)
            - MOBILITY_WEIGHT * reply_count)
    }
}

impl MoveSelector for HeuristicSelector {
    fn select(&self, board: &Board, side: Side, moves: &MoveSet) -> Result<Position, EngineError> {
        let mut best: Option<(Position, i32)> = None;

        for mv in moves.iter() {
            let score = self.score(board, side, mv)?;
            // Strictly greater keeps the first of equal candidates.
            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((mv.pos, score));
            }
        }

        let (pos, score) = best.ok_or(EngineError::NoLegalMoves(side))?;
        debug!(?side, row = pos.row, col = pos.col, score, "selected move");
        Ok(pos)
    }
}
