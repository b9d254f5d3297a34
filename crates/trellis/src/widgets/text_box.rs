use geom::{Axis, Point, Rect};

use crate::{
    input::MouseButton,
    style::{PartialStyle, Size},
    text::{FontId, boundary_offsets, grapheme_boundaries},
    ui::{BoxFlags, EditOutcome, EditState, Signal, Ui},
};

/// Width of the caret.
const CARET_WIDTH: f32 = 1.0;

/// What a text box reports for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextBoxResponse {
    /// Pointer interaction with the field.
    pub signal: Signal,
    /// Edits applied this frame. Empty unless the field holds focus.
    pub edit: EditOutcome,
}

/// Resolved geometry of a field from the previous frame.
struct Field {
    /// Font the text is set in.
    font: FontId,
    /// Font size.
    size: f32,
    /// Margins on each axis.
    margin: Point,
    /// Layout rect.
    rect: Rect,
}

impl Field {
    /// Text area width.
    fn inner_width(&self) -> f32 {
        (self.rect.w - 2.0 * self.margin.x).max(0.0)
    }
}

/// Index of the boundary in `offsets` nearest to `x`.
fn nearest_boundary(offsets: &[f32], x: f32) -> usize {
    offsets
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| (*a - x).abs().total_cmp(&(*b - x).abs()))
        .map_or(0, |(i, _)| i)
}

/// A single-line text field `width` pixels wide editing `text`.
///
/// Pressing the field takes focus and places the cursor; pressing anywhere
/// else, Enter or Escape gives it up. A double click selects everything.
/// While focused the field scrolls so the cursor stays visible.
pub fn text_box(ui: &mut Ui, label: &str, width: f32, text: &mut String) -> TextBoxResponse {
    ui.tag_next("text-box");
    ui.style_next(
        PartialStyle::new()
            .width(Size::pixels(width))
            .height(Size::children())
            .axis(Axis::X),
    );
    let id = ui.box_make(
        label,
        BoxFlags::CLICKABLE | BoxFlags::DRAW_BACKGROUND | BoxFlags::DRAW_BORDER | BoxFlags::CLIP,
    );
    let signal = ui.box_sig(id);
    let field = ui.box_view(id).map_or(
        Field {
            font: FontId::NIL,
            size: 0.0,
            margin: Point::zero(),
            rect: Rect::new(0.0, 0.0, width, 0.0),
        },
        |v| Field {
            font: v.style.font,
            size: v.style.font_size,
            margin: Point::new(v.style.margin(Axis::X), v.style.margin(Axis::Y)),
            rect: v.rect,
        },
    );

    if signal.pressed {
        ui.set_focus(Some(id));
    } else if ui.focus() == Some(id)
        && ui.input().mouse_pressed(MouseButton::Left)
        && !signal.hovering
    {
        ui.set_focus(None);
    }

    let mut edit = EditOutcome::default();
    if ui.focus() == Some(id) {
        let offsets = boundary_offsets(ui.metrics(), field.font, field.size, text);
        if signal.pressed {
            let first = ui.edit_state().first_displayed.min(offsets.len() - 1);
            let x = signal.mouse.x - field.margin.x + offsets[first];
            ui.edit_state_mut().set_cursor(nearest_boundary(&offsets, x));
        }
        if signal.double_clicked {
            ui.edit_state_mut().select_all(offsets.len() - 1);
        }
        edit = ui.edit_text(text);
        if edit.accepted || edit.cancelled {
            ui.set_focus(None);
        }
    }

    let focused = ui.focus() == Some(id);
    let offsets = boundary_offsets(ui.metrics(), field.font, field.size, text);
    let state = if focused {
        ui.edit_state_mut()
            .scroll_to_cursor(&offsets, field.inner_width());
        *ui.edit_state()
    } else {
        EditState::default()
    };
    let bounds = grapheme_boundaries(text);
    let last = bounds.len() - 1;
    let first = state.first_displayed.min(last);
    let base = offsets[first];

    ui.box_begin(id);
    if focused {
        let (lo, hi) = state.selection();
        let (lo, hi) = (lo.clamp(first, last), hi.min(last));
        if hi > lo {
            ui.tag_next("text-box-selection");
            ui.style_next(
                PartialStyle::new()
                    .width(Size::pixels(offsets[hi] - offsets[lo]))
                    .height(Size::parent(1.0))
                    .float(Axis::X, field.margin.x + offsets[lo] - base)
                    .float(Axis::Y, field.margin.y),
            );
            ui.box_make("###selection", BoxFlags::DRAW_BACKGROUND);
        }
    }
    ui.tag_next("label");
    ui.style_next(PartialStyle::new().height(Size::pixels(field.size)));
    let shown = ui.box_make("###text", BoxFlags::DRAW_TEXT);
    ui.box_set_text(shown, &text[bounds[first]..]);
    if focused {
        let cursor = state.cursor.clamp(first, last);
        ui.tag_next("text-box-caret");
        ui.style_next(
            PartialStyle::new()
                .width(Size::pixels(CARET_WIDTH))
                .height(Size::parent(1.0))
                .float(Axis::X, field.margin.x + offsets[cursor] - base)
                .float(Axis::Y, field.margin.y),
        );
        ui.box_make("###caret", BoxFlags::DRAW_BACKGROUND);
    }
    ui.box_end();

    TextBoxResponse { signal, edit }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearest_boundary_rounds() {
        let offsets = [0.0, 5.0, 10.0, 15.0];
        assert_eq!(nearest_boundary(&offsets, -3.0), 0);
        assert_eq!(nearest_boundary(&offsets, 6.0), 1);
        assert_eq!(nearest_boundary(&offsets, 8.0), 2);
        assert_eq!(nearest_boundary(&offsets, 99.0), 3);
    }
}
