use std::hash::{Hash, Hasher};

use bitflags::bitflags;
use geom::{Axis, Expanse, Point, Rect};
use rustc_hash::FxHasher;
use slotmap::new_key_type;

use crate::{
    arena::{Arena, ArenaStr},
    canvas::Canvas,
    list::{Linked, Links, List},
    style::{PartialStyle, Status, Style, StyleRule, pattern::SelectorTarget},
};

new_key_type! {
    /// Slot handle for a box in the UI's box map.
    pub struct BoxId;
}

/// Stable identity of a box, hashed from its label and its parent's key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct BoxKey(u64);

impl BoxKey {
    /// Wrap a raw key value.
    pub const fn from_raw(v: u64) -> Self {
        Self(v)
    }

    /// The raw key value.
    pub fn raw(&self) -> u64 {
        self.0
    }

    /// Key for a box whose hashed label part is `label` under `parent`.
    pub fn derive(label: &str, parent: Self) -> Self {
        let mut h = FxHasher::default();
        label.hash(&mut h);
        parent.0.hash(&mut h);
        Self(h.finish())
    }
}

/// Split a label into its display text and the part that is hashed.
///
/// `"text##id"` displays `text` and hashes the whole label; `"text###id"`
/// displays `text` and hashes only `id`.
pub fn split_label(label: &str) -> (&str, &str) {
    if let Some(i) = label.find("###") {
        (&label[..i], &label[i + 3..])
    } else if let Some(i) = label.find("##") {
        (&label[..i], label)
    } else {
        (label, label)
    }
}

bitflags! {
    /// Capabilities of a box.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct BoxFlags: u32 {
        /// Responds to mouse presses.
        const CLICKABLE = 1 << 0;
        /// Scrolls horizontally with the wheel.
        const SCROLL_WHEEL_X = 1 << 1;
        /// Scrolls vertically with the wheel.
        const SCROLL_WHEEL_Y = 1 << 2;
        /// Stops boxes drawn before it from being hovered.
        const BLOCK_MOUSE = 1 << 3;
        /// Ramps the hot transition.
        const HOT_ANIMATION = 1 << 4;
        /// Ramps the active transition.
        const ACTIVE_ANIMATION = 1 << 5;
        /// Children may overflow horizontally.
        const OVERFLOW_ALLOW_X = 1 << 6;
        /// Children may overflow vertically.
        const OVERFLOW_ALLOW_Y = 1 << 7;
        /// Clip children to the box.
        const CLIP = 1 << 8;
        /// Fill the background.
        const DRAW_BACKGROUND = 1 << 9;
        /// Fill the foreground tint over the box.
        const DRAW_FOREGROUND = 1 << 10;
        /// Stroke the border.
        const DRAW_BORDER = 1 << 11;
        /// Draw the display text.
        const DRAW_TEXT = 1 << 12;
        /// Run the custom draw procedure.
        const DRAW_PROC = 1 << 13;
        /// Draw and hit-test after the main tree, clipped to the window.
        const OVERLAY = 1 << 14;

        /// Scroll on both axes.
        const SCROLL = Self::SCROLL_WHEEL_X.bits() | Self::SCROLL_WHEEL_Y.bits();
        /// Overflow on both axes.
        const OVERFLOW_ALLOW = Self::OVERFLOW_ALLOW_X.bits() | Self::OVERFLOW_ALLOW_Y.bits();
    }
}

impl BoxFlags {
    /// Wheel scrolling bit for an axis.
    pub fn scroll(axis: Axis) -> Self {
        match axis {
            Axis::X => Self::SCROLL_WHEEL_X,
            Axis::Y => Self::SCROLL_WHEEL_Y,
        }
    }

    /// Overflow bit for an axis.
    pub fn overflow(axis: Axis) -> Self {
        match axis {
            Axis::X => Self::OVERFLOW_ALLOW_X,
            Axis::Y => Self::OVERFLOW_ALLOW_Y,
        }
    }
}

/// Custom paint hook, run between the background and the text.
pub type DrawProc = Box<dyn Fn(&BoxView<'_>, &mut dyn Canvas)>;

/// A read-only view of a box after layout.
#[derive(Debug, Clone, Copy)]
pub struct BoxView<'a> {
    /// Slot handle.
    pub id: BoxId,
    /// Stable key.
    pub key: BoxKey,
    /// Layout rect in window coordinates.
    pub rect: Rect,
    /// Visible region: the rect clipped by its ancestors.
    pub clip: Rect,
    /// Resolved, animated style.
    pub style: &'a Style,
    /// Display text.
    pub text: &'a str,
    /// Capabilities.
    pub flags: BoxFlags,
    /// Pointer is over the box.
    pub hovering: bool,
    /// Hot flag.
    pub hot: bool,
    /// Active flag.
    pub active: bool,
    /// Being dragged.
    pub dragging: bool,
    /// Hover ramp in `0..=1`.
    pub hot_transition: f32,
    /// Press ramp in `0..=1`.
    pub active_transition: f32,
    /// Extent of the children.
    pub content: Expanse,
    /// Scroll offset.
    pub scroll: Point,
}

/// A node of the retained box tree.
pub(super) struct UiBox {
    /// Sibling links in the parent's child list.
    pub links: Links<BoxId>,
    /// Children in build order.
    pub children: List<BoxId>,
    /// Parent. Set exactly when the box is linked into that parent's list.
    pub parent: Option<BoxId>,
    /// Stable identity.
    pub key: BoxKey,
    /// Capabilities for this frame.
    pub flags: BoxFlags,
    /// Display text, in the frame arena.
    pub text: Option<ArenaStr>,
    /// Tags, in the frame arena.
    pub tags: Vec<ArenaStr>,
    /// Rules applied before the explicit style, to this box and below.
    pub before_rules: Vec<StyleRule>,
    /// Rules applied after the explicit style, to this box and below.
    pub after_rules: Vec<StyleRule>,
    /// Explicit style and mask.
    pub style: PartialStyle,
    /// Cascade result.
    pub target_style: Style,
    /// Animated style used for layout and drawing.
    pub computed: Style,
    /// Layout rect.
    pub rect: Rect,
    /// Clip inherited from ancestors.
    pub clip: Rect,
    /// Extent of the children, from the last layout.
    pub content: Expanse,
    /// Scroll offset.
    pub scroll: Point,
    /// Pointer over the box this frame.
    pub hovering: bool,
    /// Hot flag.
    pub hot: bool,
    /// Active flag.
    pub active: bool,
    /// Being dragged.
    pub dragging: bool,
    /// Hover ramp.
    pub hot_transition: f32,
    /// Press ramp.
    pub active_transition: f32,
    /// Frame number of the last touch.
    pub frame: u64,
    /// Created in the current frame; skips animation.
    pub fresh: bool,
    /// Persistent open/closed state for disclosure widgets.
    pub open: bool,
    /// Custom paint hook.
    pub draw_proc: Option<DrawProc>,
    /// Position in draw order, from the last layout.
    pub order: usize,
}

impl UiBox {
    /// A fresh box with the given key, stamped with `frame`.
    pub fn new(key: BoxKey, frame: u64) -> Self {
        Self {
            links: Links::default(),
            children: List::new(),
            parent: None,
            key,
            flags: BoxFlags::empty(),
            text: None,
            tags: Vec::new(),
            before_rules: Vec::new(),
            after_rules: Vec::new(),
            style: PartialStyle::default(),
            target_style: Style::default(),
            computed: Style::default(),
            rect: Rect::zero(),
            clip: Rect::zero(),
            content: Expanse::default(),
            scroll: Point::zero(),
            hovering: false,
            hot: false,
            active: false,
            dragging: false,
            hot_transition: 0.0,
            active_transition: 0.0,
            frame,
            fresh: true,
            open: false,
            draw_proc: None,
            order: 0,
        }
    }

    /// The rect as seen through the ancestors' clips.
    pub fn visible(&self) -> Rect {
        self.rect.clip(&self.clip)
    }

    /// Status bits for selector matching.
    pub fn status(&self, focused: bool) -> Status {
        let mut s = Status::empty();
        s.set(Status::HOVER, self.hovering);
        s.set(Status::HOT, self.hot);
        s.set(Status::ACTIVE, self.active);
        s.set(Status::DRAGGING, self.dragging);
        s.set(Status::FOCUSED, focused);
        s
    }
}

impl Linked<BoxId> for UiBox {
    fn links(&self) -> &Links<BoxId> {
        &self.links
    }

    fn links_mut(&mut self) -> &mut Links<BoxId> {
        &mut self.links
    }
}

/// A box as seen by selector matching.
pub(super) struct MatchView<'a> {
    /// The box.
    pub b: &'a UiBox,
    /// Frame arena holding text and tags.
    pub arena: &'a Arena,
    /// The box has focus.
    pub focused: bool,
}

impl SelectorTarget for MatchView<'_> {
    fn key(&self) -> BoxKey {
        self.b.key
    }

    fn text(&self) -> &str {
        self.b
            .text
            .and_then(|t| self.arena.str(t))
            .unwrap_or_default()
    }

    fn has_tag(&self, tag: &str) -> bool {
        self.b
            .tags
            .iter()
            .any(|t| self.arena.str(*t) == Some(tag))
    }

    fn status(&self) -> Status {
        self.b.status(self.focused)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_conventions() {
        assert_eq!(split_label("plain"), ("plain", "plain"));
        assert_eq!(split_label("Save##file"), ("Save", "Save##file"));
        assert_eq!(split_label("Save###file"), ("Save", "file"));
        assert_eq!(split_label("###id"), ("", "id"));
    }

    #[test]
    fn keys_depend_on_parent() {
        let root = BoxKey::derive("root", BoxKey::default());
        let a = BoxKey::derive("x", root);
        let b = BoxKey::derive("x", BoxKey::derive("other", BoxKey::default()));
        assert_ne!(a, b);
        assert_eq!(a, BoxKey::derive("x", root));
    }
}
