use crate::types::Side;

/// Errors raised by the engine.
///
/// Bad user input (occupied cell, no capture) is not an error: the session
/// reports it as an ignored move. These variants cover coordinates that
/// cannot exist and internal contract violations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("position out of range: ({row}, {col})")]
    OutOfRange { row: u8, col: u8 },

    /// A move was applied that the move finder did not produce for this board.
    #[error("invalid move at ({row}, {col})")]
    InvalidMove { row: u8, col: u8 },

    #[error("{0:?} has no legal moves")]
    NoLegalMoves(Side),
}
