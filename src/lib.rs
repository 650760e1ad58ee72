use wasm_bindgen::prelude::*;

pub mod ai;
pub mod board;
pub mod config;
pub mod error;
pub mod game;
pub mod history;
pub mod moves;
pub mod session;
pub mod types;
pub mod wasm;

pub use board::Board;
pub use config::{OpponentMode, SessionConfig};
pub use error::EngineError;
pub use game::{GameState, MoveOutcome};
pub use session::Session;
pub use types::{Cell, GameResult, GameView, Outcome, Position, Score, Side};

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}
