//! Test doubles for the host collaborators and a frame-driving harness.

/// Frame-driving harness.
mod harness;

use geom::{Point, Rect};
use unicode_segmentation::UnicodeSegmentation;

pub use harness::Harness;

use crate::{
    canvas::{Canvas, DrawCmd},
    style::Color,
    text::{FontId, TextMeasure, TextMetrics},
};

/// Monospace metrics: every grapheme is half the font size wide and a line
/// is one font size tall.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedMetrics;

impl TextMeasure for FixedMetrics {
    fn text_metrics(&self, _font: FontId, size: f32, text: &str) -> TextMetrics {
        let w = text.graphemes(true).count() as f32 * size * 0.5;
        let logical = Rect::new(0.0, 0.0, w, size);
        TextMetrics {
            ink: logical,
            logical,
            advance: Point::new(w, 0.0),
        }
    }
}

/// A canvas that records every call.
#[derive(Debug, Clone, Default)]
pub struct RecordingCanvas {
    /// Commands in call order.
    pub cmds: Vec<DrawCmd>,
}

impl RecordingCanvas {
    /// Text runs drawn, in order.
    pub fn texts(&self) -> Vec<&str> {
        self.cmds
            .iter()
            .filter_map(|c| match c {
                DrawCmd::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Canvas for RecordingCanvas {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.cmds.push(DrawCmd::FillRect { rect, color });
    }

    fn fill_rounded_rect(&mut self, rect: Rect, radius: f32, color: Color) {
        self.cmds.push(DrawCmd::FillRoundedRect {
            rect,
            radius,
            color,
        });
    }

    fn stroke_rounded_rect(&mut self, rect: Rect, radius: f32, width: f32, color: Color) {
        self.cmds.push(DrawCmd::StrokeRoundedRect {
            rect,
            radius,
            width,
            color,
        });
    }

    fn text(&mut self, origin: Point, font: FontId, size: f32, color: Color, text: &str) {
        self.cmds.push(DrawCmd::Text {
            origin,
            font,
            size,
            color,
            text: text.to_string(),
        });
    }

    fn clip_push(&mut self, rect: Rect) {
        self.cmds.push(DrawCmd::ClipPush(rect));
    }

    fn clip_pop(&mut self) {
        self.cmds.push(DrawCmd::ClipPop);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_metrics_count_graphemes() {
        let m = FixedMetrics.text_metrics(FontId::NIL, 10.0, "e\u{301}ab");
        assert_eq!(m.logical, Rect::new(0.0, 0.0, 15.0, 10.0));
    }

    #[test]
    fn recorded_commands_replay() {
        let mut a = RecordingCanvas::default();
        a.clip_push(Rect::new(0.0, 0.0, 5.0, 5.0));
        a.text(Point::zero(), FontId::NIL, 12.0, Color::BLACK, "hi");
        a.clip_pop();
        let mut b = RecordingCanvas::default();
        for c in &a.cmds {
            c.replay(&mut b);
        }
        assert_eq!(a.cmds, b.cmds);
        assert_eq!(b.texts(), vec!["hi"]);
    }
}
