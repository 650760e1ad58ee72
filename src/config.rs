use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::types::Side;

pub const DEFAULT_THINK_DELAY_MS: u64 = 350;

/// Who plays the non-human side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpponentMode {
    #[default]
    Human,
    Automated,
}

/// Session options. Every field has a default, so `{}` is a valid config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub opponent: OpponentMode,
    /// Side played by the automated opponent when it is enabled.
    pub automated_side: Side,
    /// How long the presentation layer waits before running an automated move.
    pub think_delay_ms: u64,
}

impl SessionConfig {
    pub fn think_delay(&self) -> Duration {
        Duration::from_millis(self.think_delay_ms)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            opponent: OpponentMode::Human,
            automated_side: Side::White,
            think_delay_ms: DEFAULT_THINK_DELAY_MS,
        }
    }
}
