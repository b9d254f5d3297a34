use geom::Axis;

use crate::{
    input::MouseButton,
    style::{PartialStyle, Size},
    ui::{BoxFlags, BoxKey, Signal, Ui},
};

/// Hashed label of a menu's drop-down panel.
const PANEL: &str = "panel";

/// Start a horizontal menu bar spanning its parent. Close with
/// [`menu_bar_end`].
pub fn menu_bar_begin(ui: &mut Ui) {
    ui.tag_next("menu-bar");
    ui.style_next(
        PartialStyle::new()
            .width(Size::parent(1.0))
            .height(Size::children())
            .axis(Axis::X),
    );
    let bar = ui.box_make("###menu-bar", BoxFlags::DRAW_BACKGROUND);
    ui.box_begin(bar);
}

/// Close a menu bar.
pub fn menu_bar_end(ui: &mut Ui) {
    ui.box_end();
}

/// A menu title that toggles a drop-down panel. Returns true while the
/// panel is open, in which case the caller adds items and then calls
/// [`menu_end`].
///
/// The panel floats below the title above the rest of the tree and blocks
/// the pointer from reaching what lies beneath it. Pressing outside both
/// closes it.
pub fn menu_begin(ui: &mut Ui, label: &str) -> bool {
    ui.tag_next("menu");
    let id = ui.box_make(
        label,
        BoxFlags::CLICKABLE | BoxFlags::DRAW_BACKGROUND | BoxFlags::DRAW_TEXT | BoxFlags::HOT_ANIMATION,
    );
    let sig = ui.box_sig(id);
    let mut open = ui.box_open(id);
    if sig.clicked {
        open = !open;
    } else if open && ui.input().mouse_pressed(MouseButton::Left) && !sig.hovering {
        let mouse = ui.input().mouse_position();
        let over_panel = ui
            .box_view(id)
            .and_then(|v| ui.box_lookup_key(BoxKey::derive(PANEL, v.key)))
            .and_then(|p| ui.box_view(p))
            .is_some_and(|p| p.rect.clip(&p.clip).contains_point(mouse));
        open = over_panel;
    }
    ui.box_set_open(id, open);
    if !open {
        return false;
    }

    let below = ui.box_rect(id).map_or(0.0, |r| r.h);
    ui.box_begin(id);
    ui.tag_next("menu-panel");
    ui.style_next(
        PartialStyle::new()
            .width(Size::children())
            .height(Size::children())
            .axis(Axis::Y)
            .float(Axis::X, 0.0)
            .float(Axis::Y, below),
    );
    let panel = ui.box_make(
        &format!("###{PANEL}"),
        BoxFlags::OVERLAY | BoxFlags::BLOCK_MOUSE | BoxFlags::DRAW_BACKGROUND | BoxFlags::DRAW_BORDER,
    );
    ui.box_begin(panel);
    true
}

/// Close a menu opened by [`menu_begin`].
pub fn menu_end(ui: &mut Ui) {
    ui.box_end();
    ui.box_end();
}

/// An entry in an open menu. Clicking it closes the menu.
pub fn menu_item(ui: &mut Ui, label: &str) -> Signal {
    ui.tag_next("menu-item");
    let id = ui.box_make(
        label,
        BoxFlags::CLICKABLE | BoxFlags::DRAW_BACKGROUND | BoxFlags::DRAW_TEXT | BoxFlags::HOT_ANIMATION,
    );
    let sig = ui.box_sig(id);
    if sig.clicked
        && let Some(menu) = ui.box_parent(ui.current())
    {
        ui.box_set_open(menu, false);
    }
    sig
}
