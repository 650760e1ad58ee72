//! Move selection for the automated opponent.

mod heuristic;

pub use heuristic::{HeuristicSelector, WEIGHTS, positional_weight};

use crate::board::Board;
use crate::error::EngineError;
use crate::moves::MoveSet;
use crate::types::{Position, Side};

/// Picks one of the legal moves for `side`.
///
/// Caller contract: `moves` is `legal_moves(board, side)` for this exact
/// board. An empty set fails with [`EngineError::NoLegalMoves`].
pub trait MoveSelector {
    fn select(&self, board: &Board, side: Side, moves: &MoveSet) -> Result<Position, EngineError>;
}
