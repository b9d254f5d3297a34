use geom::{Axis, Expanse};

use crate::{
    style::{PartialStyle, Size},
    ui::{BoxFlags, BoxId, Signal, Ui},
};

/// Start a fixed-size vertical container that clips its children and
/// scrolls them with the wheel. Close with [`panel_end`].
pub fn panel_begin(ui: &mut Ui, label: &str, size: Expanse) -> BoxId {
    ui.tag_next("panel");
    ui.style_next(
        PartialStyle::new()
            .width(Size::pixels(size.w))
            .height(Size::pixels(size.h))
            .axis(Axis::Y),
    );
    let id = ui.box_make(
        label,
        BoxFlags::CLIP
            | BoxFlags::SCROLL_WHEEL_Y
            | BoxFlags::OVERFLOW_ALLOW_Y
            | BoxFlags::DRAW_BACKGROUND
            | BoxFlags::DRAW_BORDER,
    );
    ui.box_begin(id);
    id
}

/// Close the current panel and apply its wheel scrolling.
pub fn panel_end(ui: &mut Ui) -> Signal {
    let id = ui.current();
    ui.box_end();
    ui.box_sig(id)
}
