//! Board renderer.
//!
//! Owns the drawing surface and all pixel work: the static board (grid, cell
//! numbers, snakes, ladders) is drawn once, after which only the token moves.
//! Moving the token never redraws the board; the pixels under the token are
//! captured before it is painted and put back once it leaves.

pub mod cell;
pub mod layout;

use log::debug;

use crate::error::BoardError;
use crate::surface::Surface;
use cell::{BOARD_DIM, CellNumber, Point, Rect, cell_bounds, cell_center};
use layout::{Feature, FeatureKind};

// --- Palette -----------------------------------------------------------------

const GRID_COLOR: &str = "#ddd";
const NUMBER_COLOR: &str = "#aaa";
const NUMBER_FONT: &str = "bold 12px Arial";
const NUMBER_FONT_PX: f64 = 12.0;
const NUMBER_INSET: f64 = 4.0;
const SNAKE_COLOR: &str = "#F44336";
const LADDER_COLOR: &str = "#4CAF50";
const CHIP_COLOR: &str = "#03A9F4";
const MARKER_SIZE: f64 = 6.0;

/// Anything that can show the token on a cell. The game drives the board
/// through this and never touches pixels itself.
pub trait TokenRenderer {
    fn draw_chip(&mut self, cell: CellNumber) -> Result<(), BoardError>;
}

/// Captured background under one token position.
#[derive(Debug)]
pub struct Region<I> {
    pub image: Option<I>,
    pub x: f64,
    pub y: f64,
}

impl<I> Region<I> {
    fn empty() -> Self {
        Self { image: None, x: 0.0, y: 0.0 }
    }

    fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Token size plus the background snapshots for where it is and where it was.
#[derive(Debug)]
pub struct ChipState<I> {
    pub size: f64,
    pub previous: Region<I>,
    pub current: Region<I>,
}

impl<I> ChipState<I> {
    fn new(size: f64) -> Self {
        Self { size, previous: Region::empty(), current: Region::empty() }
    }
}

pub struct Board<S: Surface> {
    surface: S,
    board_size: f64,
    cell_size: f64,
    number: CellNumber,
    chip: ChipState<S::Snapshot>,
    // False until the first draw_chip; the first draw always captures.
    drawn: bool,
}

impl<S: Surface> Board<S> {
    /// Take ownership of `surface`, draw the static board and put the token on cell 1.
    pub fn new(surface: S, board_size: f64, chip_size: f64) -> Result<Self, BoardError> {
        let mut board = Self {
            surface,
            board_size,
            cell_size: board_size / BOARD_DIM as f64,
            number: CellNumber::FIRST,
            chip: ChipState::new(chip_size),
            drawn: false,
        };
        board.draw()?;
        Ok(board)
    }

    /// Cell the token was last drawn on.
    pub fn cell(&self) -> CellNumber {
        self.number
    }

    pub fn chip(&self) -> &ChipState<S::Snapshot> {
        &self.chip
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Pixel centre of a cell on this board.
    pub fn position_of(&self, cell: CellNumber) -> Point {
        cell_center(cell, self.board_size)
    }

    /// Full static draw followed by the token on cell 1.
    pub fn draw(&mut self) -> Result<(), BoardError> {
        self.draw_grid()?;
        self.draw_numbers()?;
        for snake in layout::snakes() {
            self.draw_feature(&snake)?;
        }
        for ladder in layout::ladders() {
            self.draw_feature(&ladder)?;
        }
        self.draw_chip(CellNumber::FIRST)
    }

    fn draw_grid(&mut self) -> Result<(), BoardError> {
        for i in 0..=BOARD_DIM {
            let offset = i as f64 * self.cell_size;
            self.surface.stroke_line(
                Point::new(0.0, offset),
                Point::new(self.board_size, offset),
                GRID_COLOR,
            )?;
            self.surface.stroke_line(
                Point::new(offset, 0.0),
                Point::new(offset, self.board_size),
                GRID_COLOR,
            )?;
        }
        Ok(())
    }

    // Numbers sit in the top-left corner of their own cell, so a row's numbers
    // read in the same direction the token travels along it.
    fn draw_numbers(&mut self) -> Result<(), BoardError> {
        for cell in CellNumber::all() {
            let bounds = cell_bounds(cell, self.board_size);
            let at = Point::new(bounds.x + NUMBER_INSET, bounds.y + NUMBER_INSET + NUMBER_FONT_PX);
            self.surface
                .fill_text(&cell.to_string(), at, NUMBER_FONT, NUMBER_COLOR)?;
        }
        Ok(())
    }

    fn draw_feature(&mut self, feature: &Feature) -> Result<(), BoardError> {
        let color = match feature.kind {
            FeatureKind::Snake => SNAKE_COLOR,
            FeatureKind::Ladder => LADDER_COLOR,
        };
        let start = self.position_of(feature.from);
        let end = self.position_of(feature.to);
        self.surface.stroke_line(start, end, color)?;
        self.surface.fill_rect(Rect::centered(start, MARKER_SIZE), color)?;
        self.surface.fill_rect(Rect::centered(end, MARKER_SIZE / 2.0), color)
    }

    /// Paint the token on `cell` and erase it from the cell it was on.
    pub fn draw_chip(&mut self, cell: CellNumber) -> Result<(), BoardError> {
        // Fill, capture and restore share one whole-pixel rect so no edge is left behind.
        let target = Rect::centered(self.position_of(cell), self.chip.size).snapped();
        let moved = cell != self.number;

        if moved || !self.drawn {
            let image = self.surface.capture(target)?;
            self.chip.previous = std::mem::replace(
                &mut self.chip.current,
                Region { image: Some(image), x: target.x, y: target.y },
            );
        }

        self.surface.fill_rect(target, CHIP_COLOR)?;

        if moved {
            if let Some(image) = &self.chip.previous.image {
                self.surface.restore(image, self.chip.previous.origin())?;
            }
            debug!("chip moved {} -> {}", self.number, cell);
        }

        self.number = cell;
        self.drawn = true;
        Ok(())
    }

    /// Raw-number variant of [`Board::draw_chip`]; out-of-range input is rejected
    /// before anything is drawn.
    pub fn draw_chip_at(&mut self, n: i64) -> Result<(), BoardError> {
        self.draw_chip(CellNumber::new(n)?)
    }
}

impl<S: Surface> TokenRenderer for Board<S> {
    fn draw_chip(&mut self, cell: CellNumber) -> Result<(), BoardError> {
        Board::draw_chip(self, cell)
    }
}
