//! JavaScript bindings. Rendering, input wiring and the thinking-delay timer
//! live on the JS side; this layer only forwards to [`Session`].

use serde::Serialize;
use serde_wasm_bindgen::Serializer;
use wasm_bindgen::prelude::*;
use web_time::Instant;

use crate::config::{OpponentMode, SessionConfig};
use crate::session::Session;

#[wasm_bindgen(js_name = Session)]
pub struct WasmSession {
    inner: Session,
}

#[wasm_bindgen(js_class = Session)]
impl WasmSession {
    /// `options` is a plain object matching [`SessionConfig`], or `undefined`.
    #[wasm_bindgen(constructor)]
    pub fn new(options: JsValue) -> Result<WasmSession, JsError> {
        let config: SessionConfig = if options.is_undefined() || options.is_null() {
            SessionConfig::default()
        } else {
            serde_wasm_bindgen::from_value(options)?
        };
        Ok(Self {
            inner: Session::new(config),
        })
    }

    #[wasm_bindgen(js_name = newGame)]
    pub fn new_game(&mut self) -> Result<JsValue, JsError> {
        self.inner.new_game();
        self.view()
    }

    /// Returns `{ applied, passed, terminal }`.
    #[wasm_bindgen(js_name = attemptMove)]
    pub fn attempt_move(&mut self, row: u8, col: u8) -> Result<JsValue, JsError> {
        let outcome = self.inner.attempt_move(row, col)?;
        to_js(&outcome)
    }

    pub fn undo(&mut self) -> bool {
        self.inner.undo()
    }

    /// `mode` is `"human"` or `"automated"`.
    #[wasm_bindgen(js_name = setOpponentMode)]
    pub fn set_opponent_mode(&mut self, mode: JsValue) -> Result<(), JsError> {
        let mode: OpponentMode = serde_wasm_bindgen::from_value(mode)?;
        self.inner.set_opponent_mode(mode);
        Ok(())
    }

    #[wasm_bindgen(js_name = isBusy)]
    pub fn is_busy(&self) -> bool {
        self.inner.is_busy()
    }

    /// Milliseconds the host should wait before `playAutomatedMove`.
    #[wasm_bindgen(js_name = thinkDelayMs)]
    pub fn think_delay_ms(&self) -> u32 {
        u32::try_from(self.inner.config().think_delay_ms).unwrap_or(u32::MAX)
    }

    /// Runs the pending automated move; `null` when none is pending.
    #[wasm_bindgen(js_name = playAutomatedMove)]
    pub fn play_automated_move(&mut self) -> Result<JsValue, JsError> {
        let outcome = self.inner.play_automated_move()?;
        to_js(&outcome)
    }

    /// Like `playAutomatedMove`, but only once the delay has elapsed.
    pub fn poll(&mut self) -> Result<JsValue, JsError> {
        let outcome = self.inner.poll(Instant::now())?;
        to_js(&outcome)
    }

    pub fn view(&self) -> Result<JsValue, JsError> {
        to_js(&self.inner.view())
    }

    /// Row-major cells: 0=empty, 1=black, 2=white.
    pub fn board(&self) -> Vec<u8> {
        self.inner.board().to_array().to_vec()
    }

    /// `[black, white]` disc counts.
    pub fn score(&self) -> Vec<u8> {
        let score = self.inner.score();
        vec![score.black, score.white]
    }

    #[wasm_bindgen(js_name = isLegal)]
    pub fn is_legal(&self, row: u8, col: u8) -> bool {
        self.inner.is_legal(row, col)
    }

    /// `{ outcome, black, white }` once the game is over, otherwise `null`.
    pub fn result(&self) -> Result<JsValue, JsError> {
        to_js(&self.inner.result())
    }
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsError> {
    Ok(value.serialize(&Serializer::json_compatible())?)
}
