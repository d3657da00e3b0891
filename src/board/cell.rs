// Cell numbering and the serpentine cell -> grid -> pixel mapping.

use std::fmt;

use crate::error::BoardError;

/// Cells per row (and rows per board).
pub const BOARD_DIM: u8 = 10;
/// Highest cell number; reaching it completes the game.
pub const LAST_CELL: u8 = BOARD_DIM * BOARD_DIM;

/// A validated cell number in `1..=100`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CellNumber(u8);

impl CellNumber {
    pub const FIRST: CellNumber = CellNumber(1);
    pub const LAST: CellNumber = CellNumber(LAST_CELL);

    pub fn new(n: i64) -> Result<Self, BoardError> {
        if (1..=LAST_CELL as i64).contains(&n) {
            Ok(CellNumber(n as u8))
        } else {
            Err(BoardError::InvalidCell(n))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Row counted from the bottom edge, 1..=10.
    pub fn row(self) -> u8 {
        self.0.div_ceil(BOARD_DIM)
    }

    /// Column counted from the left edge, 1..=10. Odd rows run left to right,
    /// even rows right to left.
    pub fn column(self) -> u8 {
        let pos = match self.0 % BOARD_DIM {
            0 => BOARD_DIM,
            p => p,
        };
        if self.row() % 2 == 1 {
            pos
        } else {
            BOARD_DIM + 1 - pos
        }
    }

    /// All cells in play order.
    pub fn all() -> impl Iterator<Item = CellNumber> {
        (1..=LAST_CELL).map(CellNumber)
    }
}

impl fmt::Display for CellNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i64> for CellNumber {
    type Error = BoardError;
    fn try_from(n: i64) -> Result<Self, Self::Error> {
        CellNumber::new(n)
    }
}

impl TryFrom<u8> for CellNumber {
    type Error = BoardError;
    fn try_from(n: u8) -> Result<Self, Self::Error> {
        CellNumber::new(n as i64)
    }
}

/// A point on the canvas in pixels, origin top-left.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Square of side `size` centred on `center`.
    pub fn centered(center: Point, size: f64) -> Self {
        let half = size / 2.0;
        Self::new(center.x - half, center.y - half, size, size)
    }

    /// Smallest whole-pixel rectangle covering this one. Image capture works on
    /// integer coordinates, so anything captured and restored must be snapped.
    pub fn snapped(&self) -> Self {
        let x = self.x.floor();
        let y = self.y.floor();
        Self::new(x, y, (self.x + self.width).ceil() - x, (self.y + self.height).ceil() - y)
    }
}

/// Pixel centre of `cell` on a square board of side `board_size`.
pub fn cell_center(cell: CellNumber, board_size: f64) -> Point {
    let cell_size = board_size / BOARD_DIM as f64;
    let x = cell.column() as f64 * cell_size - cell_size / 2.0;
    let y = board_size - cell.row() as f64 * cell_size + cell_size / 2.0;
    Point::new(x, y)
}

/// Checked variant of [`cell_center`] for raw numbers.
pub fn cell_to_pixel(n: i64, board_size: f64) -> Result<Point, BoardError> {
    Ok(cell_center(CellNumber::new(n)?, board_size))
}

/// The square `cell` occupies on the canvas.
pub fn cell_bounds(cell: CellNumber, board_size: f64) -> Rect {
    let cell_size = board_size / BOARD_DIM as f64;
    Rect::centered(cell_center(cell, board_size), cell_size)
}
