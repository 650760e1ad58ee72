use crate::config::OpponentMode;
use crate::game::GameState;
use crate::types::Side;

/// Game state captured right before a move was applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub state: GameState,
    /// Opponent mode in effect when the move was made.
    pub opponent: OpponentMode,
}

/// Undo stack, cleared on every new game.
#[derive(Debug, Clone, Default)]
pub struct HistoryStack {
    snapshots: Vec<Snapshot>,
}

impl HistoryStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, snapshot: Snapshot) {
        self.snapshots.push(snapshot);
    }

    pub fn pop(&mut self) -> Option<Snapshot> {
        self.snapshots.pop()
    }

    pub fn peek(&self) -> Option<&Snapshot> {
        self.snapshots.last()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn clear(&mut self) {
        self.snapshots.clear();
    }

    /// Pops the snapshot an undo should restore.
    ///
    /// Against an automated opponent, a snapshot whose side to move is the
    /// automated side is skipped when an older one exists, so control
    /// returns to the human.
    pub fn pop_for_undo(&mut self, automated: Option<Side>) -> Option<Snapshot> {
        let snapshot = self.pop()?;
        match automated {
            Some(side) if snapshot.state.side_to_move() == side && !self.is_empty() => self.pop(),
            _ => Some(snapshot),
        }
    }
}
