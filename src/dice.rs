// Six-sided die backed by the platform random source
// (crypto.getRandomValues in the browser).

use crate::error::GameError;
use crate::game::Die;

pub const FACES: u8 = 6;

#[derive(Debug, Default, Clone, Copy)]
pub struct EntropyDie;

impl Die for EntropyDie {
    fn roll(&mut self) -> Result<u8, GameError> {
        // Bytes 0..=251 split evenly over six faces; anything above is rerolled.
        const LIMIT: u8 = u8::MAX - (u8::MAX % FACES) - 1;
        loop {
            let mut buf = [0u8; 1];
            getrandom::getrandom(&mut buf).map_err(|e| GameError::Entropy(e.to_string()))?;
            if buf[0] <= LIMIT {
                return Ok(buf[0] % FACES + 1);
            }
        }
    }
}
