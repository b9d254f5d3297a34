use std::ops::{Index, IndexMut};

use super::{Axis, Point, Rect};

/// An `Expanse` is a rectangle that has a width and height but no location.
/// This is useful when we want to deal with `Rect`s abstractly, or when we want
/// to mandate that the location of a `Rect` is (0, 0).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Expanse {
    /// Width.
    pub w: f32,
    /// Height.
    pub h: f32,
}

impl Expanse {
    /// Construct a size.
    pub const fn new(w: f32, h: f32) -> Self {
        Self { w, h }
    }

    /// The area of this expanse.
    pub fn area(&self) -> f32 {
        self.w * self.h
    }

    /// Return a `Rect` with the same dimensions as the `Expanse`, but a location at (0, 0).
    pub fn rect(&self) -> Rect {
        Rect {
            tl: Point::zero(),
            w: self.w,
            h: self.h,
        }
    }

    /// True if this size can completely enclose the target size in both dimensions.
    pub fn contains(&self, other: &Self) -> bool {
        self.w >= other.w && self.h >= other.h
    }
}

impl Index<Axis> for Expanse {
    type Output = f32;

    fn index(&self, axis: Axis) -> &f32 {
        match axis {
            Axis::X => &self.w,
            Axis::Y => &self.h,
        }
    }
}

impl IndexMut<Axis> for Expanse {
    fn index_mut(&mut self, axis: Axis) -> &mut f32 {
        match axis {
            Axis::X => &mut self.w,
            Axis::Y => &mut self.h,
        }
    }
}

impl From<Rect> for Expanse {
    fn from(r: Rect) -> Self {
        Self { w: r.w, h: r.h }
    }
}

impl From<(f32, f32)> for Expanse {
    fn from(v: (f32, f32)) -> Self {
        Self { w: v.0, h: v.1 }
    }
}
