use super::{Axis, Expanse, Point};

/// An axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Top-left corner.
    pub tl: Point,
    /// Width.
    pub w: f32,
    /// Height.
    pub h: f32,
}

impl Rect {
    /// Construct a rectangle from its origin and size.
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            tl: Point { x, y },
            w,
            h,
        }
    }

    /// A zero-sized rectangle at the origin.
    pub const fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    /// Rectangle at `tl` with the given size.
    pub fn at(tl: Point, size: Expanse) -> Self {
        Self {
            tl,
            w: size.w,
            h: size.h,
        }
    }

    /// Bottom-right corner (exclusive).
    pub fn br(&self) -> Point {
        Point::new(self.tl.x + self.w, self.tl.y + self.h)
    }

    /// The size of this rectangle.
    pub fn expanse(&self) -> Expanse {
        Expanse::new(self.w, self.h)
    }

    /// Origin coordinate along an axis.
    pub fn pos(&self, axis: Axis) -> f32 {
        self.tl[axis]
    }

    /// Extent along an axis.
    pub fn size(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.w,
            Axis::Y => self.h,
        }
    }

    /// Set the extent along an axis.
    pub fn set_size(&mut self, axis: Axis, v: f32) {
        match axis {
            Axis::X => self.w = v,
            Axis::Y => self.h = v,
        }
    }

    /// True if the rectangle has no area.
    pub fn is_empty(&self) -> bool {
        self.w <= 0.0 || self.h <= 0.0
    }

    /// Does this rectangle contain the point? Edges are half-open: the left
    /// and top edges are inside, the right and bottom edges are not.
    pub fn contains_point(&self, p: Point) -> bool {
        p.x >= self.tl.x && p.y >= self.tl.y && p.x < self.tl.x + self.w && p.y < self.tl.y + self.h
    }

    /// Does this rectangle completely enclose the other?
    pub fn contains_rect(&self, other: &Self) -> bool {
        other.tl.x >= self.tl.x
            && other.tl.y >= self.tl.y
            && other.tl.x + other.w <= self.tl.x + self.w
            && other.tl.y + other.h <= self.tl.y + self.h
    }

    /// The overlapping region of two rectangles, or `None` if they don't
    /// overlap.
    pub fn intersect(&self, other: &Self) -> Option<Self> {
        let r = self.clip(other);
        if r.is_empty() { None } else { Some(r) }
    }

    /// Clip this rectangle to `other`. The result may be empty, in which
    /// case it has zero width and/or height and sits inside `other`'s span.
    pub fn clip(&self, other: &Self) -> Self {
        let x0 = self.tl.x.max(other.tl.x);
        let y0 = self.tl.y.max(other.tl.y);
        let x1 = (self.tl.x + self.w).min(other.tl.x + other.w);
        let y1 = (self.tl.y + self.h).min(other.tl.y + other.h);
        Self::new(x0, y0, (x1 - x0).max(0.0), (y1 - y0).max(0.0))
    }

    /// Shift the rectangle by an offset.
    pub fn shift(&self, offset: Point) -> Self {
        Self {
            tl: self.tl + offset,
            w: self.w,
            h: self.h,
        }
    }

    /// Shrink the rectangle by `inset` on every side, never below zero size.
    pub fn inset(&self, inset: f32) -> Self {
        Self::new(
            self.tl.x + inset,
            self.tl.y + inset,
            (self.w - 2.0 * inset).max(0.0),
            (self.h - 2.0 * inset).max(0.0),
        )
    }
}
