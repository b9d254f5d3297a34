//! Layout runs three passes per axis over the tree: sizes that do not
//! depend on the parent are measured bottom-up, parent-relative sizes are
//! resolved top-down, then children that overflow their parent are shrunk
//! by their relax budget. A final walk positions every box, computes clip
//! rects and records paint order.

use std::collections::VecDeque;

use geom::{Axis, Expanse, Point, Rect};
use tracing::trace;

use super::{BoxFlags, BoxId, Ui};
use crate::style::SizeKind;

/// Lay out the whole tree.
pub(super) fn layout(ui: &mut Ui) {
    let Some(root) = ui.root else {
        return;
    };
    for axis in Axis::ALL {
        measure(ui, root, axis);
        resolve_parent_sized(ui, root, axis);
        solve_overflow(ui, root, axis);
    }
    let window = ui.window;
    let b = &mut ui.boxes[root];
    b.rect.tl = window.tl;
    b.clip = window;
    position(ui, root);
    order(ui, root);
    trace!(boxes = ui.draw_order.len(), "layout done");
}

/// Size of `id` along `axis`, or `None` when it depends on the parent.
fn standalone_size(ui: &Ui, id: BoxId, axis: Axis) -> Option<f32> {
    let b = &ui.boxes[id];
    let style = &b.computed;
    let margins = 2.0 * style.margin(axis);
    match style.size(axis).kind {
        SizeKind::Pixels(v) => Some(v),
        SizeKind::Text => {
            let text = b.text.and_then(|t| ui.arena.str(t)).unwrap_or_default();
            let extent = if text.is_empty() {
                0.0
            } else {
                let m = ui.metrics.text_metrics(style.font, style.font_size, text);
                Expanse::from(m.logical)[axis]
            };
            Some(extent + margins)
        }
        SizeKind::Children => Some(flow_extent(ui, &ui.children_of(id), id, axis) + margins),
        SizeKind::Parent(_) | SizeKind::ParentMinusPixels(_) => None,
    }
}

/// Extent of the non-floating children of `parent` along `axis`: summed
/// with spacing on the layout axis, the largest across it.
fn flow_extent(ui: &Ui, children: &[BoxId], parent: BoxId, axis: Axis) -> f32 {
    let layout = ui.boxes[parent].computed.layout;
    let mut sum = 0.0;
    let mut max: f32 = 0.0;
    let mut n: usize = 0;
    for c in children {
        let cb = &ui.boxes[*c];
        if cb.computed.floating(axis) {
            continue;
        }
        n += 1;
        let s = cb.rect.size(axis);
        sum += s;
        max = max.max(s);
    }
    if axis == layout.axis {
        sum + layout.spacing * n.saturating_sub(1) as f32
    } else {
        max
    }
}

/// Bottom-up pass: pixel, text and children sizes.
fn measure(ui: &mut Ui, id: BoxId, axis: Axis) {
    let children = ui.children_of(id);
    for c in &children {
        // Parent-sized children are unknown until the downward pass.
        ui.boxes[*c].rect.set_size(axis, 0.0);
        measure(ui, *c, axis);
    }
    if let Some(v) = standalone_size(ui, id, axis) {
        ui.boxes[id].rect.set_size(axis, v);
    }
}

/// Space inside the margins of `id` along `axis`.
fn content_size(ui: &Ui, id: BoxId, axis: Axis) -> f32 {
    let b = &ui.boxes[id];
    (b.rect.size(axis) - 2.0 * b.computed.margin(axis)).max(0.0)
}

/// Top-down pass: sizes relative to the parent's content.
fn resolve_parent_sized(ui: &mut Ui, id: BoxId, axis: Axis) {
    let avail = content_size(ui, id, axis);
    for c in ui.children_of(id) {
        let size = match ui.boxes[c].computed.size(axis).kind {
            SizeKind::Parent(f) => Some(avail * f),
            SizeKind::ParentMinusPixels(v) => Some((avail - v).max(0.0)),
            _ => None,
        };
        if let Some(v) = size {
            ui.boxes[c].rect.set_size(axis, v);
        }
        resolve_parent_sized(ui, c, axis);
    }
}

/// How far a box may shrink along `axis`.
fn relax_budget(ui: &Ui, id: BoxId, axis: Axis) -> f32 {
    let b = &ui.boxes[id];
    let size = b.computed.size(axis);
    let s = b.rect.size(axis);
    (s * size.relax).min(s - size.min_size).max(0.0)
}

/// Shrink children that overflow `id` and record its content extent.
fn solve_overflow(ui: &mut Ui, id: BoxId, axis: Axis) {
    let children = ui.children_of(id);
    let flow: Vec<BoxId> = children
        .iter()
        .copied()
        .filter(|c| !ui.boxes[*c].computed.floating(axis))
        .collect();
    let avail = content_size(ui, id, axis);
    let allow = ui.boxes[id].flags.contains(BoxFlags::overflow(axis));
    let on_layout_axis = ui.boxes[id].computed.layout.axis == axis;

    if !allow {
        let total = flow_extent(ui, &children, id, axis);
        if on_layout_axis && total > avail {
            let budgets: Vec<f32> = flow.iter().map(|c| relax_budget(ui, *c, axis)).collect();
            let budget: f32 = budgets.iter().sum();
            if budget > 0.0 {
                let fraction = ((total - avail) / budget).min(1.0);
                for (c, b) in flow.iter().zip(&budgets) {
                    let r = &mut ui.boxes[*c].rect;
                    let s = r.size(axis);
                    r.set_size(axis, s - b * fraction);
                    resolve_parent_sized(ui, *c, axis);
                }
            }
        } else if !on_layout_axis {
            for c in &flow {
                let s = ui.boxes[*c].rect.size(axis);
                if s > avail {
                    let shrink = (s - avail).min(relax_budget(ui, *c, axis));
                    ui.boxes[*c].rect.set_size(axis, s - shrink);
                    resolve_parent_sized(ui, *c, axis);
                }
            }
        }
    }
    let extent = flow_extent(ui, &children, id, axis);
    ui.boxes[id].content[axis] = extent;
    for c in children {
        solve_overflow(ui, c, axis);
    }
}

/// Place the children of `id` and set their clips, then recurse.
fn position(ui: &mut Ui, id: BoxId) {
    let window = ui.window;
    let b = &ui.boxes[id];
    let rect = b.rect;
    let style = b.computed;
    let scroll = b.scroll;
    let content = b.content;
    let inner_clip = if b.flags.contains(BoxFlags::CLIP) {
        b.clip.clip(&rect)
    } else {
        b.clip
    };
    let origin = Point::new(
        rect.tl.x + style.margin(Axis::X),
        rect.tl.y + style.margin(Axis::Y),
    );
    let space = Expanse::new(content_size(ui, id, Axis::X), content_size(ui, id, Axis::Y));
    let main = style.layout.axis;
    let mut cursor =
        origin[main] + style.align(main).offset(space[main], content[main]) - scroll[main];

    let children = ui.children_of(id);
    for c in &children {
        let cb = &mut ui.boxes[*c];
        let cs = cb.computed;
        let mut tl = Point::zero();
        for axis in Axis::ALL {
            tl[axis] = if cs.floating(axis) {
                rect.tl[axis] + cs.float_target[axis]
            } else if axis == main {
                cursor
            } else {
                origin[axis] + style.align(axis).offset(space[axis], cb.rect.size(axis))
                    - scroll[axis]
            };
        }
        if !cs.floating(main) {
            cursor += cb.rect.size(main) + style.layout.spacing;
        }
        cb.rect.tl = tl;
        cb.clip = if cb.flags.contains(BoxFlags::OVERLAY) {
            window
        } else {
            inner_clip
        };
    }
    for c in children {
        position(ui, c);
    }
}

/// Record paint order: pre-order, with overlay subtrees after everything
/// else in the order they were reached.
fn order(ui: &mut Ui, root: BoxId) {
    let mut out = Vec::with_capacity(ui.boxes.len());
    let mut deferred = VecDeque::from([root]);
    while let Some(start) = deferred.pop_front() {
        let mut stack = vec![start];
        while let Some(id) = stack.pop() {
            ui.boxes[id].order = out.len();
            out.push(id);
            let (overlays, flow): (Vec<BoxId>, Vec<BoxId>) = ui
                .children_of(id)
                .into_iter()
                .partition(|c| ui.boxes[*c].flags.contains(BoxFlags::OVERLAY));
            deferred.extend(overlays);
            stack.extend(flow.into_iter().rev());
        }
    }
    ui.draw_order = out;
}

/// Rect of `id` with its margins removed.
pub(super) fn content_rect(ui: &Ui, id: BoxId) -> Rect {
    let b = &ui.boxes[id];
    Rect::new(
        b.rect.tl.x + b.computed.margin(Axis::X),
        b.rect.tl.y + b.computed.margin(Axis::Y),
        content_size(ui, id, Axis::X),
        content_size(ui, id, Axis::Y),
    )
}
