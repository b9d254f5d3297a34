use geom::{Axis, Point};

use super::{BoxFlags, BoxId, Ui};
use crate::input::MouseButton;

/// What the pointer and keyboard did to a box this frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Signal {
    /// Pointer position relative to the box origin.
    pub mouse: Point,
    /// Pointer movement this frame.
    pub delta: Point,
    /// Wheel movement this frame.
    pub wheel: Point,
    /// The pointer is over the visible part of the box and nothing in front
    /// blocks it.
    pub hovering: bool,
    /// The left button went down over the box.
    pub pressed: bool,
    /// The left button came up after a press on the box.
    pub released: bool,
    /// Press and release on the box, within the click thresholds.
    pub clicked: bool,
    /// The click completed a double click.
    pub double_clicked: bool,
    /// The click completed a triple click.
    pub triple_clicked: bool,
    /// The right button went down over the box.
    pub right_pressed: bool,
    /// The box was pressed and the pointer has moved since. Holds until
    /// release, wherever the pointer goes.
    pub dragging: bool,
    /// A paste arrived while the box held focus.
    pub pasted: bool,
}

/// Is `id` covered by last frame's blocker?
fn blocked(ui: &Ui, id: BoxId) -> bool {
    let Some(blocker) = ui.blocker else {
        return false;
    };
    if blocker == id || ui.is_within(blocker, id) {
        return false;
    }
    match (ui.boxes.get(blocker), ui.boxes.get(id)) {
        (Some(bl), Some(b)) => bl.order > b.order,
        _ => false,
    }
}

/// Compute the signal for `id` and update its interaction state.
pub(super) fn signal(ui: &mut Ui, id: BoxId) -> Signal {
    let Some(b) = ui.boxes.get(id) else {
        return Signal::default();
    };
    let input = &ui.input;
    let mouse = input.mouse_position();
    let hovering = input.window().mouse_inside
        && b.visible().contains_point(mouse)
        && !blocked(ui, id);
    let mut sig = Signal {
        mouse: mouse - b.rect.tl,
        delta: input.mouse_delta(),
        wheel: input.mouse_wheel(),
        hovering,
        ..Signal::default()
    };

    if b.flags.contains(BoxFlags::CLICKABLE) {
        let left = MouseButton::Left;
        if hovering && input.mouse_pressed(left) {
            sig.pressed = true;
            ui.active = Some(id);
            ui.drag_origin = mouse;
        }
        sig.right_pressed = hovering && input.mouse_pressed(MouseButton::Right);
    }

    let is_active = ui.active == Some(id);
    let b = &mut ui.boxes[id];
    let input = &ui.input;
    b.hovering = hovering;
    b.active = is_active;
    if is_active {
        let left = MouseButton::Left;
        if input.mouse_down(left) && mouse != ui.drag_origin {
            b.dragging = true;
        }
        sig.dragging = b.dragging;
        if input.mouse_released(left) {
            sig.released = true;
            sig.clicked = hovering && input.mouse_clicked(left);
            sig.double_clicked = sig.clicked && input.mouse_double_clicked(left);
            sig.triple_clicked = sig.clicked && input.mouse_triple_clicked(left);
            if !input.mouse_down(left) {
                b.active = false;
                b.dragging = false;
                ui.active = None;
            }
        }
    }
    b.hot = hovering && ui.active.is_none_or(|a| a == id);

    if hovering {
        scroll(ui, id);
    }
    sig.pasted = ui.focus == Some(id) && ui.input.clipboard_pasted().is_some();
    sig
}

/// Let a hovered scrolling box take the wheel, clamped to its children.
fn scroll(ui: &mut Ui, id: BoxId) {
    let wheel = ui.input.mouse_wheel();
    let b = &mut ui.boxes[id];
    for axis in Axis::ALL {
        let i = axis.index();
        if !b.flags.contains(BoxFlags::scroll(axis))
            || ui.wheel_consumed[i]
            || wheel[axis] == 0.0
        {
            continue;
        }
        let view = (b.rect.size(axis) - 2.0 * b.computed.margin(axis)).max(0.0);
        let max = (b.content[axis] - view).max(0.0);
        b.scroll[axis] = (b.scroll[axis] - wheel[axis]).clamp(0.0, max);
        ui.wheel_consumed[i] = true;
    }
}
