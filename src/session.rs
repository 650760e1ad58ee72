use tracing::{info, trace, warn};
use web_time::Instant;

use crate::ai::{HeuristicSelector, MoveSelector};
use crate::board::Board;
use crate::config::{OpponentMode, SessionConfig};
use crate::error::EngineError;
use crate::game::{GameState, MoveOutcome};
use crate::history::{HistoryStack, Snapshot};
use crate::moves::Move;
use crate::types::{GameResult, GameView, Position, Score, Side};

/// One game session: the state the presentation layer holds a handle to.
///
/// Every mutation goes through this type. While an automated move is
/// pending the session is busy and ignores human moves and undo; the host
/// waits [`SessionConfig::think_delay`] and then calls
/// [`Session::play_automated_move`] (or [`Session::poll`]).
pub struct Session {
    config: SessionConfig,
    state: GameState,
    history: HistoryStack,
    selector: Box<dyn MoveSelector>,
    /// Earliest time the pending automated move should run.
    pending: Option<Instant>,
    last_pass: Option<Side>,
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        Self::with_selector(config, Box::new(HeuristicSelector))
    }

    pub fn with_selector(config: SessionConfig, selector: Box<dyn MoveSelector>) -> Self {
        let mut session = Self {
            config,
            state: GameState::new(),
            history: HistoryStack::new(),
            selector,
            pending: None,
            last_pass: None,
        };
        session.schedule_automated();
        session
    }

    /// Resets to the standard opening with black to move and no history.
    /// A pending automated move from the previous game is dropped.
    pub fn new_game(&mut self) -> &GameState {
        self.state = GameState::new();
        self.history.clear();
        self.pending = None;
        self.last_pass = None;
        info!(opponent = ?self.config.opponent, "new game");
        self.schedule_automated();
        &self.state
    }

    /// Plays the side to move at `(row, col)` on behalf of the human.
    ///
    /// Out-of-range, occupied or non-capturing squares, a finished game and
    /// a busy session all yield an outcome with `applied == false`.
    pub fn attempt_move(&mut self, row: u8, col: u8) -> Result<MoveOutcome, EngineError> {
        let ignored = MoveOutcome::ignored(self.state.is_terminal());
        if self.is_busy() || self.state.is_terminal() || self.is_automated_turn() {
            return Ok(ignored);
        }
        let Ok(pos) = Position::new(row, col) else {
            return Ok(ignored);
        };
        let Some(mv) = self.state.legal_moves().get(pos).cloned() else {
            trace!(row, col, "ignored illegal move");
            return Ok(ignored);
        };

        self.commit(&mv)
    }

    /// Runs the pending automated move if its delay has elapsed by `now`.
    pub fn poll(&mut self, now: Instant) -> Result<Option<MoveOutcome>, EngineError> {
        match self.pending {
            Some(due) if due <= now => self.play_automated_move(),
            _ => Ok(None),
        }
    }

    /// Runs the pending automated move now, regardless of its deadline.
    /// Returns `None` when nothing is pending.
    pub fn play_automated_move(&mut self) -> Result<Option<MoveOutcome>, EngineError> {
        if self.pending.take().is_none() {
            return Ok(None);
        }
        let side = self.state.side_to_move();
        if self.state.is_terminal() || side != self.config.automated_side {
            warn!(?side, "automated move no longer applicable");
            return Ok(None);
        }

        let moves = self.state.legal_moves();
        let pos = self.selector.select(self.state.board(), side, &moves)?;
        let mv = moves.get(pos).cloned().ok_or(EngineError::InvalidMove {
            row: pos.row,
            col: pos.col,
        })?;

        self.commit(&mv).map(Some)
    }

    /// Steps back to the previous human turn. Returns whether anything changed.
    pub fn undo(&mut self) -> bool {
        if self.is_busy() {
            return false;
        }
        let automated = self.automated_side();
        let Some(snapshot) = self.history.pop_for_undo(automated) else {
            return false;
        };

        trace!(remaining = self.history.len(), "undo");
        self.state = snapshot.state;
        self.last_pass = None;
        self.schedule_automated();
        true
    }

    /// Switches between two humans and human vs automated opponent, keeping
    /// the current game. A pending automated move still completes.
    pub fn set_opponent_mode(&mut self, mode: OpponentMode) {
        if self.config.opponent != mode {
            info!(?mode, "opponent mode changed");
        }
        self.config.opponent = mode;
        self.schedule_automated();
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn board(&self) -> &Board {
        self.state.board()
    }

    pub fn side_to_move(&self) -> Side {
        self.state.side_to_move()
    }

    pub fn last_move(&self) -> Option<Position> {
        self.state.last_move()
    }

    pub fn score(&self) -> Score {
        self.state.score()
    }

    pub fn result(&self) -> Option<GameResult> {
        self.state.result()
    }

    /// Side forced to pass by the most recent move, if any.
    pub fn last_pass(&self) -> Option<Side> {
        self.last_pass
    }

    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    /// When the pending automated move becomes due.
    pub fn automated_move_due(&self) -> Option<Instant> {
        self.pending
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn is_legal(&self, row: u8, col: u8) -> bool {
        Position::new(row, col).is_ok_and(|pos| self.state.legal_moves().contains(pos))
    }

    /// Legal squares for the side to move, for hint display.
    pub fn legal_cells(&self) -> Vec<Position> {
        self.state.legal_moves().positions()
    }

    pub fn view(&self) -> GameView {
        let score = self.state.score();
        GameView {
            board: self.state.board().to_array().to_vec(),
            side_to_move: self.state.side_to_move(),
            last_move: self.state.last_move(),
            black_count: score.black,
            white_count: score.white,
            is_terminal: self.state.is_terminal(),
            busy: self.is_busy(),
            passed: self.last_pass,
            legal_moves: self.legal_cells(),
        }
    }

    fn commit(&mut self, mv: &Move) -> Result<MoveOutcome, EngineError> {
        self.history.push(Snapshot {
            state: self.state.clone(),
            opponent: self.config.opponent,
        });
        let outcome = match self.state.play(mv) {
            Ok(outcome) => outcome,
            Err(err) => {
                self.history.pop();
                return Err(err);
            }
        };

        self.last_pass = outcome.passed;
        if outcome.terminal
            && let Some(result) = self.state.result()
        {
            info!(outcome = ?result.outcome, black = result.black, white = result.white, "result");
        }
        self.schedule_automated();
        Ok(outcome)
    }

    fn automated_side(&self) -> Option<Side> {
        (self.config.opponent == OpponentMode::Automated).then_some(self.config.automated_side)
    }

    fn is_automated_turn(&self) -> bool {
        self.automated_side() == Some(self.state.side_to_move())
    }

    fn schedule_automated(&mut self) {
        if self.pending.is_some() || self.state.is_terminal() || !self.is_automated_turn() {
            return;
        }
        self.pending = Some(Instant::now() + self.config.think_delay());
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}
