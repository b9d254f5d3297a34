//! Font handles and the text measurement interface.

use geom::{Point, Rect};
use unicode_segmentation::UnicodeSegmentation;

/// An opaque font handle issued by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FontId(u32);

impl FontId {
    /// The nil font. Measurements against it are host-defined, usually
    /// empty.
    pub const NIL: Self = Self(0);

    /// Wrap a host font handle.
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Is this the nil handle?
    pub fn is_nil(&self) -> bool {
        *self == Self::NIL
    }

    /// The raw host handle.
    pub fn raw(&self) -> u32 {
        self.0
    }
}

/// Measured extents of a run of text. Rects are relative to the text
/// origin, which is the top-left of the logical box.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextMetrics {
    /// Tight bounds of the drawn glyphs.
    pub ink: Rect,
    /// Layout bounds: advance width by line height.
    pub logical: Rect,
    /// Pen movement after the run.
    pub advance: Point,
}

/// Font metrics supplied by the host.
pub trait TextMeasure {
    /// Measure `text` set in `font` at `size` pixels.
    fn text_metrics(&self, font: FontId, size: f32, text: &str) -> TextMetrics;
}

/// Byte offsets of grapheme boundaries in `text`, including `0` and
/// `text.len()`.
pub fn grapheme_boundaries(text: &str) -> Vec<usize> {
    let mut out: Vec<usize> = text.grapheme_indices(true).map(|(i, _)| i).collect();
    out.push(text.len());
    out
}

/// Horizontal offset of each grapheme boundary when `text` is set in
/// `font` at `size`.
pub fn boundary_offsets(
    metrics: &dyn TextMeasure,
    font: FontId,
    size: f32,
    text: &str,
) -> Vec<f32> {
    grapheme_boundaries(text)
        .into_iter()
        .map(|b| metrics.text_metrics(font, size, &text[..b]).logical.w)
        .collect()
}
