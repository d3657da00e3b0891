// Fixed board features. The renderer draws these and the game rules resolve
// moves against the same data.

use super::cell::{CellNumber, LAST_CELL};

/// Snakes start on every multiple of this stride.
pub const SNAKE_STRIDE: u8 = 9;
/// Cells a snake drops the token back by.
pub const SNAKE_DROP: u8 = 3;
/// Cells a ladder lifts the token by.
pub const LADDER_CLIMB: u8 = 10;
/// Cells with a ladder foot.
pub const LADDER_FEET: [u8; 2] = [25, 55];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FeatureKind {
    Snake,
    Ladder,
}

/// A snake or ladder linking the cell that triggers it to where the token lands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Feature {
    pub kind: FeatureKind,
    pub from: CellNumber,
    pub to: CellNumber,
}

pub fn is_snake_head(n: u8) -> bool {
    n > 0 && n % SNAKE_STRIDE == 0
}

pub fn is_ladder_foot(n: u8) -> bool {
    LADDER_FEET.contains(&n)
}

/// Snake heads 9, 18, .., 99 each linked to the cell three below.
pub fn snakes() -> impl Iterator<Item = Feature> {
    (SNAKE_STRIDE..LAST_CELL)
        .step_by(SNAKE_STRIDE as usize)
        .filter_map(|n| {
            Some(Feature {
                kind: FeatureKind::Snake,
                from: CellNumber::try_from(n).ok()?,
                to: CellNumber::try_from(n - SNAKE_DROP).ok()?,
            })
        })
}

pub fn ladders() -> impl Iterator<Item = Feature> {
    LADDER_FEET.into_iter().filter_map(|n| {
        Some(Feature {
            kind: FeatureKind::Ladder,
            from: CellNumber::try_from(n).ok()?,
            to: CellNumber::try_from(n + LADDER_CLIMB).ok()?,
        })
    })
}
