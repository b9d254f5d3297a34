//! Immediate-mode widgets composed from boxes.
//!
//! Each widget is a free function over a [`Ui`](crate::ui::Ui) that makes
//! its boxes, tags them for the theme rules and reports interaction. Labels
//! follow the box label conventions, so `"Save##file"` and `"Save##edit"`
//! are distinct widgets that both display `Save`.

/// Labels, buttons, checkboxes and sliders.
mod basic;
/// Menu bars and drop-down menus.
mod menu;
/// Scrolling containers.
mod panel;
/// Single-line text entry.
mod text_box;

pub use basic::{button, checkbox, label, slider};
pub use menu::{menu_bar_begin, menu_bar_end, menu_begin, menu_end, menu_item};
pub use panel::{panel_begin, panel_end};
pub use text_box::{TextBoxResponse, text_box};
