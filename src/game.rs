use tracing::{debug, info};

use crate::board::Board;
use crate::error::EngineError;
use crate::moves::{self, Move, MoveSet};
use crate::types::{GameResult, Position, Score, Side};

/// What happened in response to a placement attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize)]
pub struct MoveOutcome {
    pub applied: bool,
    /// Side that had to pass right after the move.
    pub passed: Option<Side>,
    pub terminal: bool,
}

impl MoveOutcome {
    pub fn ignored(terminal: bool) -> Self {
        Self {
            applied: false,
            passed: None,
            terminal,
        }
    }
}

/// Board, side to move and end-of-game state for one game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    side_to_move: Side,
    last_move: Option<Position>,
    terminal: bool,
}

impl GameState {
    /// Standard opening, black to move.
    pub fn new() -> Self {
        Self::from_position(Board::new(), Side::Black)
    }

    /// Starts from an arbitrary position. If `side` cannot move the turn is
    /// handed over, and the state is terminal when neither side can.
    pub fn from_position(board: Board, side: Side) -> Self {
        let mut state = Self {
            board,
            side_to_move: side,
            last_move: None,
            terminal: false,
        };
        if moves::legal_moves(&board, side).is_empty() {
            if moves::legal_moves(&board, side.opponent()).is_empty() {
                state.terminal = true;
            } else {
                state.side_to_move = side.opponent();
            }
        }
        state
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn side_to_move(&self) -> Side {
        self.side_to_move
    }

    pub fn last_move(&self) -> Option<Position> {
        self.last_move
    }

    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    /// Legal moves for the side to move; empty once the game is over.
    pub fn legal_moves(&self) -> MoveSet {
        if self.terminal {
            MoveSet::default()
        } else {
            moves::legal_moves(&self.board, self.side_to_move)
        }
    }

    pub fn score(&self) -> Score {
        self.board.score()
    }

    /// Winner and final count, counted from the board. `None` until terminal.
    pub fn result(&self) -> Option<GameResult> {
        self.terminal.then(|| GameResult::from_score(self.board.score()))
    }

    /// Applies `mv` for the side to move and advances the turn.
    ///
    /// `mv` must come from [`GameState::legal_moves`] on this state.
    pub fn play(&mut self, mv: &Move) -> Result<MoveOutcome, EngineError> {
        if self.terminal {
            return Err(EngineError::InvalidMove {
                row: mv.pos.row,
                col: mv.pos.col,
            });
        }

        let mover = self.side_to_move;
        self.board = moves::apply(&self.board, mv, mover)?;
        self.last_move = Some(mv.pos);
        self.side_to_move = mover.opponent();
        debug!(
            side = ?mover,
            row = mv.pos.row,
            col = mv.pos.col,
            flipped = mv.flips.len(),
            "applied move"
        );

        let passed = self.advance();
        Ok(MoveOutcome {
            applied: true,
            passed,
            terminal: self.terminal,
        })
    }

    /// Resolves passes and game end for the side now to move.
    fn advance(&mut self) -> Option<Side> {
        let side = self.side_to_move;
        if !moves::legal_moves(&self.board, side).is_empty() {
            return None;
        }

        if moves::legal_moves(&self.board, side.opponent()).is_empty() {
            self.terminal = true;
            debug!("neither side can move");
            return None;
        }

        info!(?side, "no legal moves, passing");
        self.side_to_move = side.opponent();
        Some(side)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
