// Game configuration: canvas size, token size, roll interval and the ids of the
// page elements the game binds to.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::board::cell::BOARD_DIM;
use crate::error::ConfigError;

pub const DEFAULT_BOARD_SIZE_PX: f64 = 500.0;
pub const DEFAULT_CHIP_SIZE_PX: f64 = 20.0;
pub const DEFAULT_INTERVAL_MS: u32 = 1000;
const MIN_BOARD_SIZE_PX: f64 = 100.0;

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Side of the square canvas.
    pub board_size_px: f64,
    pub chip_size_px: f64,
    /// Delay between rolls.
    pub interval_ms: u32,
    pub canvas_id: String,
    pub dice_id: String,
    pub info_id: String,
    pub play_id: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size_px: DEFAULT_BOARD_SIZE_PX,
            chip_size_px: DEFAULT_CHIP_SIZE_PX,
            interval_ms: DEFAULT_INTERVAL_MS,
            canvas_id: "canvas".to_string(),
            dice_id: "dice".to_string(),
            info_id: "info".to_string(),
            play_id: "play".to_string(),
        }
    }
}

impl GameConfig {
    pub fn cell_size_px(&self) -> f64 {
        self.board_size_px / BOARD_DIM as f64
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.board_size_px.is_finite() && self.board_size_px >= MIN_BOARD_SIZE_PX) {
            return Err(ConfigError::BoardTooSmall(self.board_size_px));
        }
        let cell = self.cell_size_px();
        if !(self.chip_size_px.is_finite() && self.chip_size_px > 0.0 && self.chip_size_px <= cell) {
            return Err(ConfigError::ChipTooLarge {
                chip: self.chip_size_px,
                cell,
            });
        }
        if self.interval_ms == 0 {
            return Err(ConfigError::ZeroInterval);
        }
        for (name, id) in [
            ("canvas", &self.canvas_id),
            ("dice", &self.dice_id),
            ("info", &self.info_id),
            ("play", &self.play_id),
        ] {
            if id.is_empty() {
                return Err(ConfigError::EmptyElementId(name));
            }
        }
        Ok(())
    }

    /// Parse and validate a JSON config. Missing fields take their defaults.
    #[cfg(feature = "serde_json")]
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}
