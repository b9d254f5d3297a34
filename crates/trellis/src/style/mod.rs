//! Box styles, field masks and the selector rules that cascade them.

/// Color values.
mod color;
/// Selector patterns.
pub mod pattern;
/// Style rules and rule sets.
pub mod rules;

use bitflags::bitflags;
use geom::{Axis, Point};

pub use color::Color;
pub use pattern::{Pattern, Selector, Status};
pub use rules::{RuleSet, StyleRule};

use crate::text::FontId;

bitflags! {
    /// One bit per style field, plus named unions.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct StyleMask: u32 {
        /// Width size rule.
        const SIZE_WIDTH = 1 << 0;
        /// Height size rule.
        const SIZE_HEIGHT = 1 << 1;
        /// Layout axis.
        const LAYOUT_AXIS = 1 << 2;
        /// Horizontal alignment.
        const LAYOUT_ALIGN_X = 1 << 3;
        /// Vertical alignment.
        const LAYOUT_ALIGN_Y = 1 << 4;
        /// Child spacing.
        const LAYOUT_SPACING = 1 << 5;
        /// Horizontal margin.
        const LAYOUT_MARGIN_X = 1 << 6;
        /// Vertical margin.
        const LAYOUT_MARGIN_Y = 1 << 7;
        /// Horizontal floating flag and target.
        const FLOAT_X = 1 << 8;
        /// Vertical floating flag and target.
        const FLOAT_Y = 1 << 9;
        /// Text color.
        const COLOR = 1 << 10;
        /// Background color.
        const BG_COLOR = 1 << 11;
        /// Foreground tint.
        const FG_COLOR = 1 << 12;
        /// Border color.
        const BORDER_COLOR = 1 << 13;
        /// Font handle.
        const FONT = 1 << 14;
        /// Font size.
        const FONT_SIZE = 1 << 15;
        /// Border width.
        const BORDER_SIZE = 1 << 16;
        /// Corner roundness.
        const ROUNDNESS = 1 << 17;
        /// Animation duration.
        const ANIMATION_TIME = 1 << 18;
        /// Animated field set.
        const ANIMATION_MASK = 1 << 19;

        /// Both size rules.
        const SIZE = Self::SIZE_WIDTH.bits() | Self::SIZE_HEIGHT.bits();
        /// Both alignments.
        const LAYOUT_ALIGN = Self::LAYOUT_ALIGN_X.bits() | Self::LAYOUT_ALIGN_Y.bits();
        /// Both margins.
        const LAYOUT_MARGINS = Self::LAYOUT_MARGIN_X.bits() | Self::LAYOUT_MARGIN_Y.bits();
        /// Every layout field.
        const LAYOUT = Self::LAYOUT_AXIS.bits()
            | Self::LAYOUT_ALIGN.bits()
            | Self::LAYOUT_SPACING.bits()
            | Self::LAYOUT_MARGINS.bits();
        /// Both floating axes.
        const FLOAT = Self::FLOAT_X.bits() | Self::FLOAT_Y.bits();
        /// Every color.
        const COLORS = Self::COLOR.bits()
            | Self::BG_COLOR.bits()
            | Self::FG_COLOR.bits()
            | Self::BORDER_COLOR.bits();
        /// Fields a box takes from its parent before rules apply.
        const INHERITED = Self::COLOR.bits()
            | Self::FONT.bits()
            | Self::FONT_SIZE.bits()
            | Self::ANIMATION_TIME.bits()
            | Self::ANIMATION_MASK.bits();
    }
}

impl StyleMask {
    /// Mask bit for the size rule on an axis.
    pub fn size(axis: Axis) -> Self {
        match axis {
            Axis::X => Self::SIZE_WIDTH,
            Axis::Y => Self::SIZE_HEIGHT,
        }
    }

    /// Mask bit for alignment on an axis.
    pub fn align(axis: Axis) -> Self {
        match axis {
            Axis::X => Self::LAYOUT_ALIGN_X,
            Axis::Y => Self::LAYOUT_ALIGN_Y,
        }
    }

    /// Mask bit for the margin on an axis.
    pub fn margin(axis: Axis) -> Self {
        match axis {
            Axis::X => Self::LAYOUT_MARGIN_X,
            Axis::Y => Self::LAYOUT_MARGIN_Y,
        }
    }

    /// Mask bit for floating on an axis.
    pub fn float(axis: Axis) -> Self {
        match axis {
            Axis::X => Self::FLOAT_X,
            Axis::Y => Self::FLOAT_Y,
        }
    }
}

/// How a box's extent along one axis is determined.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum SizeKind {
    /// Measured extent of the box's text, plus margins.
    #[default]
    Text,
    /// A fixed number of pixels.
    Pixels(f32),
    /// Sum of children along the layout axis, maximum across it, plus
    /// margins.
    Children,
    /// A fraction of the parent's content size.
    Parent(f32),
    /// The parent's content size minus a fixed number of pixels.
    ParentMinusPixels(f32),
}

impl SizeKind {
    /// True for kinds resolved from the parent.
    pub fn depends_on_parent(&self) -> bool {
        matches!(self, Self::Parent(_) | Self::ParentMinusPixels(_))
    }
}

/// A size rule for one axis.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    /// Sizing rule.
    pub kind: SizeKind,
    /// Fraction of the size that may be given up when the parent overflows.
    pub relax: f32,
    /// Floor for overflow shrinking.
    pub min_size: f32,
}

impl Size {
    /// A fixed size.
    pub const fn pixels(v: f32) -> Self {
        Self::of(SizeKind::Pixels(v))
    }

    /// Sized to the box's text.
    pub const fn text() -> Self {
        Self::of(SizeKind::Text)
    }

    /// Sized to the box's children.
    pub const fn children() -> Self {
        Self::of(SizeKind::Children)
    }

    /// A fraction of the parent's content size.
    pub const fn parent(fraction: f32) -> Self {
        Self::of(SizeKind::Parent(fraction))
    }

    /// The parent's content size minus `v` pixels.
    pub const fn parent_minus(v: f32) -> Self {
        Self::of(SizeKind::ParentMinusPixels(v))
    }

    /// A size of the given kind that never relaxes.
    const fn of(kind: SizeKind) -> Self {
        Self {
            kind,
            relax: 0.0,
            min_size: 0.0,
        }
    }

    /// Allow the size to shrink by up to `relax` of itself, never below
    /// `min_size`.
    pub const fn relaxed(self, relax: f32, min_size: f32) -> Self {
        Self {
            relax,
            min_size,
            ..self
        }
    }

    /// Interpolate towards `target`. Kinds with a value lerp that value when
    /// both sides share the kind; otherwise the target kind is taken as is.
    fn lerp(self, target: Self, t: f32) -> Self {
        let kind = match (self.kind, target.kind) {
            (SizeKind::Pixels(a), SizeKind::Pixels(b)) => SizeKind::Pixels(lerp(a, b, t)),
            (SizeKind::Parent(a), SizeKind::Parent(b)) => SizeKind::Parent(lerp(a, b, t)),
            (SizeKind::ParentMinusPixels(a), SizeKind::ParentMinusPixels(b)) => {
                SizeKind::ParentMinusPixels(lerp(a, b, t))
            }
            (_, k) => k,
        };
        Self {
            kind,
            relax: lerp(self.relax, target.relax, t),
            min_size: lerp(self.min_size, target.min_size, t),
        }
    }
}

/// Placement of children within free space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    /// Towards the origin.
    #[default]
    Start,
    /// Away from the origin.
    End,
    /// Centered.
    Center,
}

impl Align {
    /// Offset that places `size` within `space` with this alignment.
    pub fn offset(self, space: f32, size: f32) -> f32 {
        match self {
            Self::Start => 0.0,
            Self::End => space - size,
            Self::Center => (space - size) / 2.0,
        }
    }
}

/// How a box arranges its children.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Layout {
    /// Axis children are stacked along.
    pub axis: Axis,
    /// Gap between consecutive children on the layout axis.
    pub spacing: f32,
    /// Inner margin per axis, applied on both sides.
    pub margin: [f32; 2],
    /// Child alignment per axis.
    pub align: [Align; 2],
}

/// A fully resolved style.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Style {
    /// Size rule per axis, indexed by [`Axis::index`].
    pub size: [Size; 2],
    /// Child layout.
    pub layout: Layout,
    /// Whether the box floats on each axis.
    pub floating: [bool; 2],
    /// Position of a floating box relative to its parent's origin.
    pub float_target: Point,
    /// Text color.
    pub color: Color,
    /// Background color.
    pub bg_color: Color,
    /// Foreground tint drawn over the box.
    pub fg_color: Color,
    /// Border color.
    pub border_color: Color,
    /// Font handle.
    pub font: FontId,
    /// Font size in pixels.
    pub font_size: f32,
    /// Border width.
    pub border_size: f32,
    /// Corner radius.
    pub roundness: f32,
    /// Animation duration in seconds.
    pub animation_time: f32,
    /// Fields that animate towards their target.
    pub animation_mask: StyleMask,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            size: [Size::text(), Size::text()],
            layout: Layout::default(),
            floating: [false, false],
            float_target: Point::zero(),
            color: Color::BLACK,
            bg_color: Color::TRANSPARENT,
            fg_color: Color::TRANSPARENT,
            border_color: Color::BLACK,
            font: FontId::NIL,
            font_size: 16.0,
            border_size: 0.0,
            roundness: 0.0,
            animation_time: 0.0,
            animation_mask: StyleMask::empty(),
        }
    }
}

/// Linear interpolation between two floats.
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

impl Style {
    /// Size rule along an axis.
    pub fn size(&self, axis: Axis) -> Size {
        self.size[axis.index()]
    }

    /// Margin along an axis.
    pub fn margin(&self, axis: Axis) -> f32 {
        self.layout.margin[axis.index()]
    }

    /// Alignment along an axis.
    pub fn align(&self, axis: Axis) -> Align {
        self.layout.align[axis.index()]
    }

    /// Does the box float on this axis?
    pub fn floating(&self, axis: Axis) -> bool {
        self.floating[axis.index()]
    }

    /// Copy every field selected by `mask` from `src`; all other fields keep
    /// their current values.
    pub fn apply_with_mask(&mut self, src: &Self, mask: StyleMask) {
        for axis in Axis::ALL {
            let i = axis.index();
            if mask.contains(StyleMask::size(axis)) {
                self.size[i] = src.size[i];
            }
            if mask.contains(StyleMask::align(axis)) {
                self.layout.align[i] = src.layout.align[i];
            }
            if mask.contains(StyleMask::margin(axis)) {
                self.layout.margin[i] = src.layout.margin[i];
            }
            if mask.contains(StyleMask::float(axis)) {
                self.floating[i] = src.floating[i];
                self.float_target[axis] = src.float_target[axis];
            }
        }
        if mask.contains(StyleMask::LAYOUT_AXIS) {
            self.layout.axis = src.layout.axis;
        }
        if mask.contains(StyleMask::LAYOUT_SPACING) {
            self.layout.spacing = src.layout.spacing;
        }
        if mask.contains(StyleMask::COLOR) {
            self.color = src.color;
        }
        if mask.contains(StyleMask::BG_COLOR) {
            self.bg_color = src.bg_color;
        }
        if mask.contains(StyleMask::FG_COLOR) {
            self.fg_color = src.fg_color;
        }
        if mask.contains(StyleMask::BORDER_COLOR) {
            self.border_color = src.border_color;
        }
        if mask.contains(StyleMask::FONT) {
            self.font = src.font;
        }
        if mask.contains(StyleMask::FONT_SIZE) {
            self.font_size = src.font_size;
        }
        if mask.contains(StyleMask::BORDER_SIZE) {
            self.border_size = src.border_size;
        }
        if mask.contains(StyleMask::ROUNDNESS) {
            self.roundness = src.roundness;
        }
        if mask.contains(StyleMask::ANIMATION_TIME) {
            self.animation_time = src.animation_time;
        }
        if mask.contains(StyleMask::ANIMATION_MASK) {
            self.animation_mask = src.animation_mask;
        }
    }

    /// The set of fields whose values differ between two styles.
    pub fn diff(&self, other: &Self) -> StyleMask {
        let mut m = StyleMask::empty();
        for axis in Axis::ALL {
            let i = axis.index();
            m.set(StyleMask::size(axis), self.size[i] != other.size[i]);
            m.set(
                StyleMask::align(axis),
                self.layout.align[i] != other.layout.align[i],
            );
            m.set(
                StyleMask::margin(axis),
                self.layout.margin[i] != other.layout.margin[i],
            );
            m.set(
                StyleMask::float(axis),
                self.floating[i] != other.floating[i]
                    || self.float_target[axis] != other.float_target[axis],
            );
        }
        m.set(StyleMask::LAYOUT_AXIS, self.layout.axis != other.layout.axis);
        m.set(
            StyleMask::LAYOUT_SPACING,
            self.layout.spacing != other.layout.spacing,
        );
        m.set(StyleMask::COLOR, self.color != other.color);
        m.set(StyleMask::BG_COLOR, self.bg_color != other.bg_color);
        m.set(StyleMask::FG_COLOR, self.fg_color != other.fg_color);
        m.set(StyleMask::BORDER_COLOR, self.border_color != other.border_color);
        m.set(StyleMask::FONT, self.font != other.font);
        m.set(StyleMask::FONT_SIZE, self.font_size != other.font_size);
        m.set(StyleMask::BORDER_SIZE, self.border_size != other.border_size);
        m.set(StyleMask::ROUNDNESS, self.roundness != other.roundness);
        m.set(
            StyleMask::ANIMATION_TIME,
            self.animation_time != other.animation_time,
        );
        m.set(
            StyleMask::ANIMATION_MASK,
            self.animation_mask != other.animation_mask,
        );
        m
    }

    /// Move the fields in `mask` a fraction `t` of the way towards `target`.
    /// Continuous values interpolate; discrete ones switch immediately.
    pub fn animate_towards(&mut self, target: &Self, mask: StyleMask, t: f32) {
        let t = t.clamp(0.0, 1.0);
        for axis in Axis::ALL {
            let i = axis.index();
            if mask.contains(StyleMask::size(axis)) {
                self.size[i] = self.size[i].lerp(target.size[i], t);
            }
            if mask.contains(StyleMask::margin(axis)) {
                self.layout.margin[i] = lerp(self.layout.margin[i], target.layout.margin[i], t);
            }
            if mask.contains(StyleMask::float(axis)) {
                self.floating[i] = target.floating[i];
                self.float_target[axis] = lerp(self.float_target[axis], target.float_target[axis], t);
            }
        }
        if mask.contains(StyleMask::LAYOUT_SPACING) {
            self.layout.spacing = lerp(self.layout.spacing, target.layout.spacing, t);
        }
        if mask.contains(StyleMask::COLOR) {
            self.color = self.color.lerp(target.color, t);
        }
        if mask.contains(StyleMask::BG_COLOR) {
            self.bg_color = self.bg_color.lerp(target.bg_color, t);
        }
        if mask.contains(StyleMask::FG_COLOR) {
            self.fg_color = self.fg_color.lerp(target.fg_color, t);
        }
        if mask.contains(StyleMask::BORDER_COLOR) {
            self.border_color = self.border_color.lerp(target.border_color, t);
        }
        if mask.contains(StyleMask::FONT_SIZE) {
            self.font_size = lerp(self.font_size, target.font_size, t);
        }
        if mask.contains(StyleMask::BORDER_SIZE) {
            self.border_size = lerp(self.border_size, target.border_size, t);
        }
        if mask.contains(StyleMask::ROUNDNESS) {
            self.roundness = lerp(self.roundness, target.roundness, t);
        }
        let discrete = StyleMask::LAYOUT_AXIS
            | StyleMask::LAYOUT_ALIGN
            | StyleMask::FONT
            | StyleMask::ANIMATION_TIME
            | StyleMask::ANIMATION_MASK;
        self.apply_with_mask(target, mask & discrete);
    }
}

/// A style together with the set of fields it defines.
///
/// Built fluently; each setter records its field in the mask.
///
/// ```
/// use trellis::style::{PartialStyle, Size, StyleMask};
///
/// let p = PartialStyle::new().width(Size::pixels(50.0)).height(Size::pixels(20.0));
/// assert_eq!(p.mask, StyleMask::SIZE);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PartialStyle {
    /// Field values. Only fields in `mask` are meaningful.
    pub style: Style,
    /// Defined fields.
    pub mask: StyleMask,
}

impl PartialStyle {
    /// An empty partial style.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the size rule on an axis.
    pub fn size(mut self, axis: Axis, size: Size) -> Self {
        self.style.size[axis.index()] = size;
        self.mask |= StyleMask::size(axis);
        self
    }

    /// Set the width rule.
    pub fn width(self, size: Size) -> Self {
        self.size(Axis::X, size)
    }

    /// Set the height rule.
    pub fn height(self, size: Size) -> Self {
        self.size(Axis::Y, size)
    }

    /// Set the layout axis.
    pub fn axis(mut self, axis: Axis) -> Self {
        self.style.layout.axis = axis;
        self.mask |= StyleMask::LAYOUT_AXIS;
        self
    }

    /// Set child alignment on an axis.
    pub fn align(mut self, axis: Axis, align: Align) -> Self {
        self.style.layout.align[axis.index()] = align;
        self.mask |= StyleMask::align(axis);
        self
    }

    /// Set child spacing.
    pub fn spacing(mut self, spacing: f32) -> Self {
        self.style.layout.spacing = spacing;
        self.mask |= StyleMask::LAYOUT_SPACING;
        self
    }

    /// Set the margin on an axis.
    pub fn margin(mut self, axis: Axis, margin: f32) -> Self {
        self.style.layout.margin[axis.index()] = margin;
        self.mask |= StyleMask::margin(axis);
        self
    }

    /// Set the margin on both axes.
    pub fn margins(self, margin: f32) -> Self {
        self.margin(Axis::X, margin).margin(Axis::Y, margin)
    }

    /// Float on an axis at `target` relative to the parent's origin.
    pub fn float(mut self, axis: Axis, target: f32) -> Self {
        self.style.floating[axis.index()] = true;
        self.style.float_target[axis] = target;
        self.mask |= StyleMask::float(axis);
        self
    }

    /// Set the text color.
    pub fn color(mut self, color: Color) -> Self {
        self.style.color = color;
        self.mask |= StyleMask::COLOR;
        self
    }

    /// Set the background color.
    pub fn bg(mut self, color: Color) -> Self {
        self.style.bg_color = color;
        self.mask |= StyleMask::BG_COLOR;
        self
    }

    /// Set the foreground tint.
    pub fn fg(mut self, color: Color) -> Self {
        self.style.fg_color = color;
        self.mask |= StyleMask::FG_COLOR;
        self
    }

    /// Set the border color.
    pub fn border_color(mut self, color: Color) -> Self {
        self.style.border_color = color;
        self.mask |= StyleMask::BORDER_COLOR;
        self
    }

    /// Set the font.
    pub fn font(mut self, font: FontId) -> Self {
        self.style.font = font;
        self.mask |= StyleMask::FONT;
        self
    }

    /// Set the font size.
    pub fn font_size(mut self, size: f32) -> Self {
        self.style.font_size = size;
        self.mask |= StyleMask::FONT_SIZE;
        self
    }

    /// Set the border width.
    pub fn border_size(mut self, size: f32) -> Self {
        self.style.border_size = size;
        self.mask |= StyleMask::BORDER_SIZE;
        self
    }

    /// Set the corner radius.
    pub fn roundness(mut self, r: f32) -> Self {
        self.style.roundness = r;
        self.mask |= StyleMask::ROUNDNESS;
        self
    }

    /// Animate the fields in `fields` over `time` seconds.
    pub fn animate(mut self, time: f32, fields: StyleMask) -> Self {
        self.style.animation_time = time;
        self.style.animation_mask = fields;
        self.mask |= StyleMask::ANIMATION_TIME | StyleMask::ANIMATION_MASK;
        self
    }

    /// Layer `other` over this style; fields defined in `other` win.
    pub fn join(&self, other: &Self) -> Self {
        let mut style = self.style;
        style.apply_with_mask(&other.style, other.mask);
        Self {
            style,
            mask: self.mask | other.mask,
        }
    }
}

impl From<(Style, StyleMask)> for PartialStyle {
    fn from((style, mask): (Style, StyleMask)) -> Self {
        Self { style, mask }
    }
}
