//! The drawing interface the box tree paints through.

use geom::{Point, Rect};

use crate::{style::Color, text::FontId};

/// Primitive drawing operations supplied by the host renderer.
///
/// Clip rects pushed through [`Canvas::clip_push`] arrive already
/// intersected with the enclosing clip.
pub trait Canvas {
    /// Fill an axis-aligned rectangle.
    fn fill_rect(&mut self, rect: Rect, color: Color);
    /// Fill a rectangle with rounded corners.
    fn fill_rounded_rect(&mut self, rect: Rect, radius: f32, color: Color);
    /// Stroke the outline of a rectangle with rounded corners.
    fn stroke_rounded_rect(&mut self, rect: Rect, radius: f32, width: f32, color: Color);
    /// Draw a run of text with its logical top-left at `origin`.
    fn text(&mut self, origin: Point, font: FontId, size: f32, color: Color, text: &str);
    /// Restrict drawing to `rect` until the matching pop.
    fn clip_push(&mut self, rect: Rect);
    /// Restore the previous clip.
    fn clip_pop(&mut self);
}

/// A recorded drawing operation, one per [`Canvas`] method.
#[derive(Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub enum DrawCmd {
    FillRect {
        rect: Rect,
        color: Color,
    },
    FillRoundedRect {
        rect: Rect,
        radius: f32,
        color: Color,
    },
    StrokeRoundedRect {
        rect: Rect,
        radius: f32,
        width: f32,
        color: Color,
    },
    Text {
        origin: Point,
        font: FontId,
        size: f32,
        color: Color,
        text: String,
    },
    ClipPush(Rect),
    ClipPop,
}

impl DrawCmd {
    /// Replay this command onto a canvas.
    pub fn replay(&self, canvas: &mut dyn Canvas) {
        match self {
            Self::FillRect { rect, color } => canvas.fill_rect(*rect, *color),
            Self::FillRoundedRect {
                rect,
                radius,
                color,
            } => canvas.fill_rounded_rect(*rect, *radius, *color),
            Self::StrokeRoundedRect {
                rect,
                radius,
                width,
                color,
            } => canvas.stroke_rounded_rect(*rect, *radius, *width, *color),
            Self::Text {
                origin,
                font,
                size,
                color,
                text,
            } => canvas.text(*origin, *font, *size, *color, text),
            Self::ClipPush(r) => canvas.clip_push(*r),
            Self::ClipPop => canvas.clip_pop(),
        }
    }
}
