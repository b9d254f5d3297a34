//! The retained box tree: per-frame building, identity, pruning and the
//! passes that style, lay out and draw it.

/// Style resolution and animation.
mod cascade;
/// Painting through a [`Canvas`].
mod draw;
/// Text editing state.
pub mod edit;
/// Sizing and positioning.
mod layout;
/// Box nodes, keys and flags.
mod node;
/// Interaction signals.
mod signal;

use std::mem;

use geom::{Expanse, Point, Rect};
use rustc_hash::FxHashMap;
use slotmap::SlotMap;
use tracing::{debug, trace, warn};

pub use edit::{EditOutcome, EditState, SelectionMode};
pub use node::{BoxFlags, BoxId, BoxKey, BoxView, DrawProc, split_label};
pub use signal::Signal;

use self::node::UiBox;
use crate::{
    arena::{Arena, ArenaStr},
    canvas::Canvas,
    config::Config,
    error::{Error, Result, fatal},
    input::{Event, InputState, MouseButton},
    style::{Pattern, PartialStyle, RuleSet, Size, Style, StyleMask, StyleRule},
    text::TextMeasure,
    theme::Theme,
};

/// Label of the box every frame hangs from.
const ROOT_LABEL: &str = "_root_";

/// State queued for the next box made.
#[derive(Default)]
struct NextBox {
    /// Tags.
    tags: Vec<String>,
    /// Explicit style.
    style: Option<PartialStyle>,
    /// Rules applied before the explicit style.
    before: Vec<StyleRule>,
    /// Rules applied after the explicit style.
    after: Vec<StyleRule>,
}

/// The UI context: the box tree, its input and its per-frame storage.
///
/// A frame runs `begin_frame`, a sequence of build calls, `end_frame` and
/// then `draw`. Hit testing during the build uses the layout from the
/// previous frame.
///
/// A `Ui` has a single writer: one thread drives every frame.
pub struct Ui {
    /// Settings.
    config: Config,
    /// Host font metrics.
    metrics: Box<dyn TextMeasure>,
    /// Every live box.
    boxes: SlotMap<BoxId, UiBox>,
    /// Stable key to slot.
    keys: FxHashMap<BoxKey, BoxId>,
    /// Open boxes, root first.
    stack: Vec<BoxId>,
    /// Root of the tree.
    root: Option<BoxId>,
    /// Storage for text and tags, cleared every frame.
    arena: Arena,
    /// Input for the current frame.
    input: InputState,
    /// Frame counter.
    frame: u64,
    /// Between `begin_frame` and `end_frame`.
    in_frame: bool,
    /// Window rect.
    window: Rect,
    /// Frame default style.
    default_style: Style,
    /// Fields of the frame default that apply.
    default_mask: StyleMask,
    /// Queued state for the next box.
    next: NextBox,
    /// Rules installed on the root every frame.
    theme: RuleSet,
    /// Topmost mouse-blocking box under the pointer, from last frame.
    blocker: Option<BoxId>,
    /// Box holding the mouse press.
    active: Option<BoxId>,
    /// Box holding text focus.
    focus: Option<BoxId>,
    /// Pointer position when the active box was pressed.
    drag_origin: Point,
    /// Wheel axes already used by a scrolling box this frame.
    wheel_consumed: [bool; 2],
    /// Cursor and selection of the focused box.
    edit: EditState,
    /// Boxes in paint order, from the last layout.
    draw_order: Vec<BoxId>,
}

impl Ui {
    /// Construct a UI measuring text with `metrics`.
    pub fn new(metrics: Box<dyn TextMeasure>, config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            metrics,
            boxes: SlotMap::with_key(),
            keys: FxHashMap::default(),
            stack: Vec::new(),
            root: None,
            arena: Arena::new(config.arena),
            input: InputState::new(config.input),
            frame: 0,
            in_frame: false,
            window: Rect::zero(),
            default_style: Style::default(),
            default_mask: StyleMask::empty(),
            next: NextBox::default(),
            theme: RuleSet::new(),
            blocker: None,
            active: None,
            focus: None,
            drag_origin: Point::zero(),
            wheel_consumed: [false; 2],
            edit: EditState::default(),
            draw_order: Vec::new(),
        })
    }

    /// The configuration in use.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Feed one platform event into the input state.
    pub fn process_event(&mut self, event: &Event) {
        self.input.process_event(event);
    }

    /// Input for the current frame.
    pub fn input(&self) -> &InputState {
        &self.input
    }

    /// Mutable input, for hosts that synthesize state directly.
    pub fn input_mut(&mut self) -> &mut InputState {
        &mut self.input
    }

    /// Host font metrics.
    pub fn metrics(&self) -> &dyn TextMeasure {
        self.metrics.as_ref()
    }

    /// Replace the root rules with a theme's.
    pub fn set_theme(&mut self, theme: &Theme) -> Result<()> {
        self.theme = theme.rules()?;
        Ok(())
    }

    /// Rules installed on the root every frame.
    pub fn rules_mut(&mut self) -> &mut RuleSet {
        &mut self.theme
    }

    /// Start a frame covering a window of `size`. Boxes inherit the fields
    /// of `default_style` selected by `mask`.
    #[track_caller]
    pub fn begin_frame(&mut self, size: Expanse, default_style: &Style, mask: StyleMask) {
        if self.in_frame {
            fatal(Error::Frame("begin_frame inside an open frame".into()));
        }
        self.in_frame = true;
        self.frame += 1;
        self.arena.clear();
        self.window = size.rect();
        self.default_style = *default_style;
        self.default_mask = mask;
        self.wheel_consumed = [false; 2];
        self.blocker = self.find_blocker();
        trace!(frame = self.frame, w = size.w, h = size.h, "begin frame");

        self.next.style = Some(
            PartialStyle::new()
                .width(Size::pixels(size.w))
                .height(Size::pixels(size.h)),
        );
        self.next.before = self.theme.iter().cloned().collect();
        let key = BoxKey::derive(ROOT_LABEL, BoxKey::default());
        let root = self.make_box(key, "", BoxFlags::empty(), None);
        self.root = Some(root);
        self.stack.clear();
        self.stack.push(root);
    }

    /// Finish building: prune untouched boxes, resolve styles, animate and
    /// lay out. The input state then moves to the next frame.
    #[track_caller]
    pub fn end_frame(&mut self) {
        if !self.in_frame {
            fatal(Error::Frame("end_frame without begin_frame".into()));
        }
        if self.stack.len() != 1 {
            fatal(Error::Stack(format!(
                "end_frame with {} unclosed box(es)",
                self.stack.len().saturating_sub(1)
            )));
        }
        self.prune();
        cascade::style_pass(self);
        cascade::animate(self);
        layout::layout(self);

        if !self.input.mouse_down(MouseButton::Left)
            && let Some(b) = self.active.take().and_then(|a| self.boxes.get_mut(a))
        {
            b.active = false;
            b.dragging = false;
        }
        self.stack.clear();
        self.next = NextBox::default();
        self.in_frame = false;
        self.input.next_frame();
        trace!(frame = self.frame, boxes = self.boxes.len(), "end frame");
    }

    /// Paint the tree laid out by the last `end_frame`.
    #[track_caller]
    pub fn draw(&self, canvas: &mut dyn Canvas) {
        if self.in_frame {
            fatal(Error::Frame("draw inside an open frame".into()));
        }
        draw::draw(self, canvas);
    }

    /// Make or reuse the box labelled `label` under the current parent.
    /// Queued tags, style and rules are consumed by this call.
    #[track_caller]
    pub fn box_make(&mut self, label: &str, flags: BoxFlags) -> BoxId {
        let parent = self.current();
        let (display, hashed) = split_label(label);
        let key = BoxKey::derive(hashed, self.boxes[parent].key);
        self.make_box(key, display, flags, Some(parent))
    }

    /// Make `id` the parent of subsequent boxes. Opening a box kept from
    /// last frame touches it: it survives this frame and moves under the
    /// current parent, with its children cleared until they are made again.
    #[track_caller]
    pub fn box_begin(&mut self, id: BoxId) {
        let parent = self.current();
        let Some(b) = self.boxes.get_mut(id) else {
            fatal(Error::Stack("box_begin on a box that does not exist".into()));
        };
        if b.frame != self.frame {
            b.frame = self.frame;
            b.text = None;
            b.tags.clear();
            self.relink(id, Some(parent));
        }
        self.stack.push(id);
    }

    /// Close the box opened by the matching `box_begin`.
    #[track_caller]
    pub fn box_end(&mut self) {
        if self.stack.len() <= 1 {
            fatal(Error::Stack("box_end without matching box_begin".into()));
        }
        self.stack.pop();
    }

    /// Interaction signals for `id` against this frame's input.
    pub fn box_sig(&mut self, id: BoxId) -> Signal {
        signal::signal(self, id)
    }

    /// Queue a tag for the next box.
    pub fn tag_next(&mut self, tag: &str) {
        self.next.tags.push(tag.to_string());
    }

    /// Queue an explicit style for the next box. Repeated calls layer.
    pub fn style_next(&mut self, style: impl Into<PartialStyle>) {
        let style = style.into();
        self.next.style = Some(match self.next.style {
            Some(s) => s.join(&style),
            None => style,
        });
    }

    /// Queue a rule the next box applies, before its explicit style, to
    /// itself and its descendants.
    pub fn style_match_before(&mut self, pattern: Pattern, style: PartialStyle) {
        self.next.before.push(StyleRule::new(pattern, style));
    }

    /// Queue a rule the next box applies, after its explicit style, to
    /// itself and its descendants.
    pub fn style_match_after(&mut self, pattern: Pattern, style: PartialStyle) {
        self.next.after.push(StyleRule::new(pattern, style));
    }

    /// Add a tag to a box made this frame.
    pub fn box_tag(&mut self, id: BoxId, tag: &str) {
        let max = self.config.ui.max_tags;
        let Some(b) = self.boxes.get_mut(id) else {
            return;
        };
        if b.tags.len() >= max {
            warn!(tag, max, "tag limit reached; tag dropped");
            return;
        }
        b.tags.push(self.arena.push_str(tag));
    }

    /// Layer `style` over the explicit style of a box.
    pub fn box_set_style(&mut self, id: BoxId, style: impl Into<PartialStyle>) {
        if let Some(b) = self.boxes.get_mut(id) {
            b.style = b.style.join(&style.into());
        }
    }

    /// Replace the display text of a box.
    pub fn box_set_text(&mut self, id: BoxId, text: &str) {
        if self.boxes.contains_key(id) {
            let s = self.push_text(text);
            self.boxes[id].text = s;
        }
    }

    /// Install a custom paint hook. The hook lasts until the box is next
    /// made.
    pub fn box_set_draw_proc(&mut self, id: BoxId, proc: DrawProc) {
        if let Some(b) = self.boxes.get_mut(id) {
            b.flags |= BoxFlags::DRAW_PROC;
            b.draw_proc = Some(proc);
        }
    }

    /// Box with a given key.
    pub fn box_lookup_key(&self, key: BoxKey) -> Option<BoxId> {
        self.keys.get(&key).copied()
    }

    /// Box that `label` names under the current parent, or under the root
    /// outside a frame.
    pub fn box_lookup_label(&self, label: &str) -> Option<BoxId> {
        let parent = self.stack.last().copied().or(self.root)?;
        let (_, hashed) = split_label(label);
        self.box_lookup_key(BoxKey::derive(hashed, self.boxes.get(parent)?.key))
    }

    /// A read-only view of a box.
    pub fn box_view(&self, id: BoxId) -> Option<BoxView<'_>> {
        let b = self.boxes.get(id)?;
        Some(BoxView {
            id,
            key: b.key,
            rect: b.rect,
            clip: b.clip,
            style: &b.computed,
            text: self.str_of(b.text),
            flags: b.flags,
            hovering: b.hovering,
            hot: b.hot,
            active: b.active,
            dragging: b.dragging,
            hot_transition: b.hot_transition,
            active_transition: b.active_transition,
            content: b.content,
            scroll: b.scroll,
        })
    }

    /// Layout rect of a box.
    pub fn box_rect(&self, id: BoxId) -> Option<Rect> {
        self.boxes.get(id).map(|b| b.rect)
    }

    /// Display text of a box.
    pub fn box_text(&self, id: BoxId) -> Option<&str> {
        self.boxes.get(id).map(|b| self.str_of(b.text))
    }

    /// Parent of a box.
    pub fn box_parent(&self, id: BoxId) -> Option<BoxId> {
        self.boxes.get(id)?.parent
    }

    /// Children of a box in build order.
    pub fn box_children(&self, id: BoxId) -> Vec<BoxId> {
        self.boxes
            .get(id)
            .map(|b| b.children.iter(&self.boxes).collect())
            .unwrap_or_default()
    }

    /// Persistent open flag of a box, for disclosure widgets.
    pub fn box_open(&self, id: BoxId) -> bool {
        self.boxes.get(id).is_some_and(|b| b.open)
    }

    /// Set the persistent open flag.
    pub fn box_set_open(&mut self, id: BoxId, open: bool) {
        if let Some(b) = self.boxes.get_mut(id) {
            b.open = open;
        }
    }

    /// Scroll offset of a box.
    pub fn box_scroll(&self, id: BoxId) -> Option<Point> {
        self.boxes.get(id).map(|b| b.scroll)
    }

    /// Number of live boxes.
    pub fn box_count(&self) -> usize {
        self.boxes.len()
    }

    /// Is `id` a live box?
    pub fn contains(&self, id: BoxId) -> bool {
        self.boxes.contains_key(id)
    }

    /// Root of the tree.
    pub fn root(&self) -> Option<BoxId> {
        self.root
    }

    /// The innermost open box.
    #[track_caller]
    pub fn current(&self) -> BoxId {
        match self.stack.last() {
            Some(id) if self.in_frame => *id,
            _ => fatal(Error::Frame("box built outside begin_frame/end_frame".into())),
        }
    }

    /// Give `id` text focus. Moving focus resets the edit state.
    pub fn set_focus(&mut self, id: Option<BoxId>) {
        if self.focus != id {
            debug!(from = ?self.focus, to = ?id, "focus changed");
            self.focus = id;
            self.edit = EditState::default();
        }
    }

    /// Box holding text focus.
    pub fn focus(&self) -> Option<BoxId> {
        self.focus
    }

    /// Box holding the mouse press.
    pub fn active(&self) -> Option<BoxId> {
        self.active
    }

    /// Edit state of the focused box.
    pub fn edit_state(&self) -> &EditState {
        &self.edit
    }

    /// Mutable edit state of the focused box.
    pub fn edit_state_mut(&mut self) -> &mut EditState {
        &mut self.edit
    }

    /// Apply this frame's editing input to `text` on behalf of the focused
    /// box.
    pub fn edit_text(&mut self, text: &mut String) -> EditOutcome {
        self.edit.apply(&self.input, text)
    }

    /// Frame counter.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Window rect of the current frame.
    pub fn window(&self) -> Rect {
        self.window
    }

    /// Storage cleared at every `begin_frame`.
    pub fn frame_arena(&mut self) -> &mut Arena {
        &mut self.arena
    }

    /// Text held in the frame arena.
    fn str_of(&self, s: Option<ArenaStr>) -> &str {
        s.and_then(|s| self.arena.str(s)).unwrap_or_default()
    }

    /// Copy display text into the frame arena.
    fn push_text(&mut self, text: &str) -> Option<ArenaStr> {
        (!text.is_empty()).then(|| self.arena.push_str(text))
    }

    /// Make or reuse the box with `key` and link it under `parent`.
    fn make_box(
        &mut self,
        key: BoxKey,
        shown: &str,
        flags: BoxFlags,
        parent: Option<BoxId>,
    ) -> BoxId {
        let frame = self.frame;
        let id = match self.keys.get(&key).copied() {
            Some(id) if self.boxes[id].frame == frame => {
                warn!(
                    key = key.raw(),
                    text = shown,
                    "duplicate box key; box is transient"
                );
                self.boxes.insert(UiBox::new(key, frame))
            }
            Some(id) => id,
            None => {
                let id = self.boxes.insert(UiBox::new(key, frame));
                self.keys.insert(key, id);
                id
            }
        };

        let text = self.push_text(shown);
        let max = self.config.ui.max_tags;
        let mut queued = mem::take(&mut self.next.tags);
        if queued.len() > max {
            warn!(count = queued.len(), max, "tag limit reached; extra tags dropped");
            queued.truncate(max);
        }
        let tags: Vec<ArenaStr> = queued.iter().map(|t| self.arena.push_str(t)).collect();

        let b = &mut self.boxes[id];
        b.frame = frame;
        b.flags = flags;
        b.text = text;
        b.tags = tags;
        b.before_rules = mem::take(&mut self.next.before);
        b.after_rules = mem::take(&mut self.next.after);
        b.style = self.next.style.take().unwrap_or_default();
        b.draw_proc = None;
        b.hovering = false;
        b.hot = false;
        self.relink(id, parent);
        id
    }

    /// Detach `id`'s children and move `id` to the end of `parent`'s child
    /// list. Children relink as they are made again.
    fn relink(&mut self, id: BoxId, parent: Option<BoxId>) {
        let b = &mut self.boxes[id];
        let mut children = mem::take(&mut b.children);
        let old_parent = b.parent.take();
        while let Some(c) = children.pop_front(&mut self.boxes) {
            self.boxes[c].parent = None;
        }
        if let Some(p) = old_parent.filter(|p| self.boxes.contains_key(*p)) {
            let mut list = self.boxes[p].children;
            list.remove(&mut self.boxes, id);
            self.boxes[p].children = list;
        }
        if let Some(p) = parent {
            let mut list = self.boxes[p].children;
            list.push_back(&mut self.boxes, id);
            self.boxes[p].children = list;
            self.boxes[id].parent = Some(p);
        }
    }

    /// Remove every box not touched this frame.
    fn prune(&mut self) {
        let frame = self.frame;
        let stale: Vec<BoxId> = self
            .boxes
            .iter()
            .filter(|(_, b)| b.frame != frame)
            .map(|(id, _)| id)
            .collect();
        for id in &stale {
            if let Some(b) = self.boxes.remove(*id)
                && self.keys.get(&b.key) == Some(id)
            {
                self.keys.remove(&b.key);
            }
        }
        if self.active.is_some_and(|a| !self.boxes.contains_key(a)) {
            self.active = None;
        }
        if self.focus.is_some_and(|f| !self.boxes.contains_key(f)) {
            self.set_focus(None);
        }
        if self.blocker.is_some_and(|b| !self.boxes.contains_key(b)) {
            self.blocker = None;
        }
        if !stale.is_empty() {
            debug!(pruned = stale.len(), live = self.boxes.len(), "pruned boxes");
        }
    }

    /// Topmost mouse-blocking box under the pointer in last frame's paint
    /// order.
    fn find_blocker(&self) -> Option<BoxId> {
        if !self.input.window().mouse_inside {
            return None;
        }
        let mouse = self.input.mouse_position();
        self.draw_order.iter().rev().copied().find(|id| {
            self.boxes.get(*id).is_some_and(|b| {
                b.flags.contains(BoxFlags::BLOCK_MOUSE) && b.visible().contains_point(mouse)
            })
        })
    }

    /// Is `id` equal to or below `ancestor`?
    fn is_within(&self, id: BoxId, ancestor: BoxId) -> bool {
        let mut cur = Some(id);
        while let Some(c) = cur {
            if c == ancestor {
                return true;
            }
            cur = self.boxes.get(c).and_then(|b| b.parent);
        }
        false
    }

    /// Children of a box as a vector, for passes that mutate while walking.
    fn children_of(&self, id: BoxId) -> Vec<BoxId> {
        self.boxes[id].children.iter(&self.boxes).collect()
    }
}
