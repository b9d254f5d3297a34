use std::collections::VecDeque;

use geom::{Axis, Expanse, Point, Rect};

use super::{BoxFlags, BoxId, Ui, layout::content_rect};
use crate::{canvas::Canvas, style::Color};

/// Fill `rect`, rounded when `radius` is positive.
fn fill(canvas: &mut dyn Canvas, rect: Rect, radius: f32, color: Color) {
    if radius > 0.0 {
        canvas.fill_rounded_rect(rect, radius, color);
    } else {
        canvas.fill_rect(rect, color);
    }
}

/// Paint the tree. Overlay subtrees are painted after the main tree, in
/// the order they were reached.
pub(super) fn draw(ui: &Ui, canvas: &mut dyn Canvas) {
    let Some(root) = ui.root else {
        return;
    };
    let mut deferred = VecDeque::from([root]);
    while let Some(id) = deferred.pop_front() {
        draw_box(ui, id, canvas, &mut deferred);
    }
}

/// Paint one box and its non-overlay descendants.
fn draw_box(ui: &Ui, id: BoxId, canvas: &mut dyn Canvas, deferred: &mut VecDeque<BoxId>) {
    let Some(b) = ui.boxes.get(id) else {
        return;
    };
    let style = &b.computed;
    let flags = b.flags;

    if flags.contains(BoxFlags::DRAW_BACKGROUND) {
        fill(canvas, b.rect, style.roundness, style.bg_color);
    }
    let clips = flags.contains(BoxFlags::CLIP);
    if clips {
        canvas.clip_push(b.visible());
    }
    if flags.contains(BoxFlags::DRAW_PROC)
        && let Some(proc) = &b.draw_proc
        && let Some(view) = ui.box_view(id)
    {
        proc(&view, &mut *canvas);
    }
    if flags.contains(BoxFlags::DRAW_TEXT) {
        let text = ui.str_of(b.text);
        if !text.is_empty() {
            let area = content_rect(ui, id);
            let m = ui.metrics.text_metrics(style.font, style.font_size, text);
            let size = Expanse::from(m.logical);
            let mut origin = Point::zero();
            for axis in Axis::ALL {
                let offset = style.align(axis).offset(area.size(axis), size[axis]);
                origin[axis] = area.tl[axis] + offset;
            }
            canvas.text(origin, style.font, style.font_size, style.color, text);
        }
    }
    let (overlays, flow): (Vec<BoxId>, Vec<BoxId>) = b
        .children
        .iter(&ui.boxes)
        .partition(|c| ui.boxes[*c].flags.contains(BoxFlags::OVERLAY));
    deferred.extend(overlays);
    for c in flow {
        draw_box(ui, c, canvas, deferred);
    }
    if clips {
        canvas.clip_pop();
    }
    if flags.contains(BoxFlags::DRAW_BORDER) && style.border_size > 0.0 {
        canvas.stroke_rounded_rect(
            b.rect,
            style.roundness,
            style.border_size,
            style.border_color,
        );
    }
    if flags.contains(BoxFlags::DRAW_FOREGROUND) {
        fill(canvas, b.rect, style.roundness, style.fg_color);
    }
}
