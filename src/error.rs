//! Error types for the board renderer, the game controller and configuration.
//!
//! Everything inside the crate returns these typed errors; the `#[wasm_bindgen]`
//! entry points turn them into `JsValue` strings at the boundary.

use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    /// A cell number outside 1..=100 was handed to the mapping or to `draw_chip`.
    #[error("cell {0} is outside the board (expected 1..=100)")]
    InvalidCell(i64),
    #[error("drawing surface failed: {0}")]
    Surface(String),
}

impl BoardError {
    /// Wrap a failure reported by the browser canvas.
    pub fn surface(err: JsValue) -> Self {
        BoardError::Surface(err.as_string().unwrap_or_else(|| format!("{err:?}")))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error(transparent)]
    Board(#[from] BoardError),
    #[error("die roll {0} is outside 1..=6")]
    InvalidRoll(u8),
    #[error("repeating timer failed: {0}")]
    Scheduler(String),
    #[error("random source failed: {0}")]
    Entropy(String),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("board size {0}px is too small (minimum 100px)")]
    BoardTooSmall(f64),
    #[error("chip size {chip}px does not fit a {cell}px cell")]
    ChipTooLarge { chip: f64, cell: f64 },
    #[error("timer interval must be greater than zero")]
    ZeroInterval,
    #[error("element id for {0} is empty")]
    EmptyElementId(&'static str),
    #[error("invalid config: {0}")]
    Parse(String),
}

impl From<BoardError> for JsValue {
    fn from(err: BoardError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

impl From<GameError> for JsValue {
    fn from(err: GameError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

impl From<ConfigError> for JsValue {
    fn from(err: ConfigError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
