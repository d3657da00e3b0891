//! Snakes & Ladders core crate.
//!
//! A 10x10 serpentine board rendered on a 2D canvas and an automated
//! single-player loop: a timer rolls the die, the token advances, snakes (every
//! multiple of 9) and ladders (25 and 55) apply, and the token is redrawn until
//! it lands on 100. Board and game logic run on any target; `web` holds the
//! browser glue exposed through `start_game()`.

use wasm_bindgen::prelude::*;

pub mod board;
pub mod config;
pub mod dice;
pub mod error;
pub mod game;
pub mod surface;
mod web;

pub use board::cell::{CellNumber, Point, Rect, cell_center, cell_to_pixel};
pub use board::{Board, ChipState, Region, TokenRenderer};
pub use config::GameConfig;
pub use dice::EntropyDie;
pub use error::{BoardError, ConfigError, GameError};
pub use game::{Die, Game, GameDisplay, Move, Phase, PlayOutcome, Scheduler, TickReport, resolve_move};
pub use surface::Surface;
pub use web::{DomDisplay, IntervalScheduler};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
}

// -----------------------------------------------------------------------------
// Entrypoints
// -----------------------------------------------------------------------------

/// Draw the board on `#canvas` and bind `#dice`, `#info` and `#play`.
#[wasm_bindgen]
pub fn start_game() -> Result<(), JsValue> {
    web::start(GameConfig::default())
}

/// Same as [`start_game`] with a JSON [`GameConfig`]; omitted fields keep their defaults.
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn start_game_with_config(config_json: &str) -> Result<(), JsValue> {
    web::start(GameConfig::from_json(config_json)?)
}
