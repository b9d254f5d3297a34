use geom::Axis;

use crate::{
    style::{Align, PartialStyle, Size},
    ui::{BoxFlags, BoxId, Signal, Ui, split_label},
};

/// Side of the checkbox square.
const CHECK_SIZE: f32 = 16.0;
/// Side of the check mark inside the square.
const MARK_SIZE: f32 = 10.0;
/// Length of a slider track.
const SLIDER_WIDTH: f32 = 160.0;
/// Height of a slider track.
const SLIDER_HEIGHT: f32 = 20.0;
/// Width of a slider thumb.
const THUMB_WIDTH: f32 = 12.0;

/// A line of static text.
pub fn label(ui: &mut Ui, text: &str) -> BoxId {
    ui.tag_next("label");
    ui.box_make(text, BoxFlags::DRAW_TEXT)
}

/// A push button. Check `clicked` on the returned signal.
pub fn button(ui: &mut Ui, label: &str) -> Signal {
    ui.tag_next("button");
    let id = ui.box_make(
        label,
        BoxFlags::CLICKABLE
            | BoxFlags::DRAW_BACKGROUND
            | BoxFlags::DRAW_BORDER
            | BoxFlags::DRAW_TEXT
            | BoxFlags::HOT_ANIMATION
            | BoxFlags::ACTIVE_ANIMATION,
    );
    ui.box_sig(id)
}

/// A square that toggles `value` when it or its caption is clicked.
pub fn checkbox(ui: &mut Ui, label: &str, value: &mut bool) -> Signal {
    ui.tag_next("checkbox-row");
    ui.style_next(
        PartialStyle::new()
            .width(Size::children())
            .height(Size::children())
            .axis(Axis::X)
            .spacing(6.0)
            .align(Axis::Y, Align::Center),
    );
    let row = ui.box_make(label, BoxFlags::CLICKABLE | BoxFlags::HOT_ANIMATION);
    let sig = ui.box_sig(row);
    if sig.clicked {
        *value = !*value;
    }

    ui.box_begin(row);
    ui.tag_next("checkbox");
    ui.style_next(
        PartialStyle::new()
            .width(Size::pixels(CHECK_SIZE))
            .height(Size::pixels(CHECK_SIZE))
            .align(Axis::X, Align::Center)
            .align(Axis::Y, Align::Center),
    );
    let square = ui.box_make("###box", BoxFlags::DRAW_BACKGROUND | BoxFlags::DRAW_BORDER);
    if *value {
        ui.box_begin(square);
        ui.tag_next("checkbox-mark");
        ui.style_next(
            PartialStyle::new()
                .width(Size::pixels(MARK_SIZE))
                .height(Size::pixels(MARK_SIZE)),
        );
        ui.box_make("###mark", BoxFlags::DRAW_BACKGROUND);
        ui.box_end();
    }
    ui.tag_next("label");
    let caption = ui.box_make("###caption", BoxFlags::DRAW_TEXT);
    ui.box_set_text(caption, split_label(label).0);
    ui.box_end();
    sig
}

/// A horizontal slider editing `value` in `0..=1`. Pressing the track jumps
/// the thumb to the pointer; dragging follows it.
pub fn slider(ui: &mut Ui, label: &str, value: &mut f32) -> Signal {
    ui.tag_next("slider");
    ui.style_next(
        PartialStyle::new()
            .width(Size::pixels(SLIDER_WIDTH))
            .height(Size::pixels(SLIDER_HEIGHT)),
    );
    let track = ui.box_make(
        label,
        BoxFlags::CLICKABLE | BoxFlags::DRAW_BACKGROUND | BoxFlags::DRAW_BORDER,
    );
    let sig = ui.box_sig(track);
    let travel = SLIDER_WIDTH - THUMB_WIDTH;
    if sig.pressed || sig.dragging {
        *value = (sig.mouse.x - THUMB_WIDTH / 2.0) / travel;
    }
    *value = value.clamp(0.0, 1.0);

    ui.box_begin(track);
    ui.tag_next("slider-thumb");
    ui.style_next(
        PartialStyle::new()
            .width(Size::pixels(THUMB_WIDTH))
            .height(Size::parent(1.0))
            .float(Axis::X, *value * travel)
            .float(Axis::Y, 0.0),
    );
    ui.box_make("###thumb", BoxFlags::DRAW_BACKGROUND);
    ui.box_end();
    sig
}
