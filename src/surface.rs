//! Drawing surface the board renders onto.
//!
//! The board only needs five primitives: stroke a line, fill a rectangle, draw
//! text, grab a rectangular pixel region and put a grabbed region back. The
//! browser implementation wraps `CanvasRenderingContext2d`; tests use an
//! in-memory recorder.

use web_sys::{CanvasRenderingContext2d, ImageData};

use crate::board::cell::{Point, Rect};
use crate::error::BoardError;

pub trait Surface {
    /// Pixels captured by [`Surface::capture`].
    type Snapshot;

    fn stroke_line(&mut self, from: Point, to: Point, color: &str) -> Result<(), BoardError>;
    fn fill_rect(&mut self, rect: Rect, color: &str) -> Result<(), BoardError>;
    fn fill_text(&mut self, text: &str, at: Point, font: &str, color: &str)
    -> Result<(), BoardError>;
    fn capture(&mut self, rect: Rect) -> Result<Self::Snapshot, BoardError>;
    fn restore(&mut self, snapshot: &Self::Snapshot, at: Point) -> Result<(), BoardError>;
}

impl Surface for CanvasRenderingContext2d {
    type Snapshot = ImageData;

    fn stroke_line(&mut self, from: Point, to: Point, color: &str) -> Result<(), BoardError> {
        self.begin_path();
        self.set_stroke_style_str(color);
        self.move_to(from.x, from.y);
        self.line_to(to.x, to.y);
        self.stroke();
        self.close_path();
        Ok(())
    }

    fn fill_rect(&mut self, rect: Rect, color: &str) -> Result<(), BoardError> {
        self.set_fill_style_str(color);
        CanvasRenderingContext2d::fill_rect(self, rect.x, rect.y, rect.width, rect.height);
        Ok(())
    }

    fn fill_text(
        &mut self,
        text: &str,
        at: Point,
        font: &str,
        color: &str,
    ) -> Result<(), BoardError> {
        self.set_font(font);
        self.set_fill_style_str(color);
        CanvasRenderingContext2d::fill_text(self, text, at.x, at.y).map_err(BoardError::surface)
    }

    fn capture(&mut self, rect: Rect) -> Result<ImageData, BoardError> {
        self.get_image_data(rect.x, rect.y, rect.width, rect.height)
            .map_err(BoardError::surface)
    }

    fn restore(&mut self, snapshot: &ImageData, at: Point) -> Result<(), BoardError> {
        self.put_image_data(snapshot, at.x, at.y)
            .map_err(BoardError::surface)
    }
}
