//! Geometric primitives: `Size`, `Margin`, `BBox`.

use crate::length::Length;
use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign};

/// A width and height, each possibly relative to a parent extent.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    /// Width
    pub width: Length,
    /// Height
    pub height: Length,
}

impl Size {
    /// Zero size
    pub const ZERO: Self = Self {
        width: Length::ZERO,
        height: Length::ZERO,
    };

    /// Create a new size.
    #[must_use]
    pub const fn new(width: Length, height: Length) -> Self {
        Self { width, height }
    }

    /// Create a size in pixels.
    #[must_use]
    pub const fn absolute(width: i32, height: i32) -> Self {
        Self::new(Length::absolute(width), Length::absolute(height))
    }

    /// Create a size as fractions of the parent extent.
    #[must_use]
    pub const fn relative(width: f32, height: f32) -> Self {
        Self::new(Length::relative(width), Length::relative(height))
    }

    /// Check if either dimension is relative.
    #[must_use]
    pub const fn is_relative(&self) -> bool {
        self.width.is_relative() || self.height.is_relative()
    }

    /// Resolve both dimensions, returning `(width, height)` in pixels.
    #[must_use]
    pub fn resolve(&self, base_width: i32, base_height: i32) -> (i32, i32) {
        (self.width.resolve(base_width), self.height.resolve(base_height))
    }
}

/// Spacing on the four sides of an element.
///
/// Horizontal sides resolve against a width, vertical sides against a height.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Margin {
    /// Left side
    pub left: Length,
    /// Top side
    pub top: Length,
    /// Right side
    pub right: Length,
    /// Bottom side
    pub bottom: Length,
}

impl Margin {
    /// No spacing
    pub const ZERO: Self = Self::uniform(Length::ZERO);

    /// Create a margin from four lengths.
    #[must_use]
    pub const fn new(left: Length, top: Length, right: Length, bottom: Length) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Create a margin in pixels.
    #[must_use]
    pub const fn absolute(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self::new(
            Length::absolute(left),
            Length::absolute(top),
            Length::absolute(right),
            Length::absolute(bottom),
        )
    }

    /// Same length on every side.
    #[must_use]
    pub const fn uniform(length: Length) -> Self {
        Self::new(length, length, length, length)
    }
}

/// Axis-aligned integer rectangle from `(x0, y0)` to `(x1, y1)`.
///
/// The default value is [`BBox::EMPTY`], whose inverted extrema make it the
/// identity of [`BBox::union`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BBox {
    /// Left edge
    pub x0: i32,
    /// Top edge
    pub y0: i32,
    /// Right edge
    pub x1: i32,
    /// Bottom edge
    pub y1: i32,
}

impl BBox {
    /// Box that contains nothing; union with it is a no-op.
    pub const EMPTY: Self = Self {
        x0: i32::MAX,
        y0: i32::MAX,
        x1: i32::MIN,
        y1: i32::MIN,
    };

    /// Create a box from its edges.
    #[must_use]
    pub const fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Create a box from its top-left corner and extent. The far edges
    /// saturate at the `i32` range.
    #[must_use]
    pub const fn from_origin_size(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self::new(x, y, x.saturating_add(width), y.saturating_add(height))
    }

    /// Horizontal extent, zero for empty boxes.
    #[must_use]
    pub const fn width(&self) -> i32 {
        let width = self.x1.saturating_sub(self.x0);
        if width < 0 {
            0
        } else {
            width
        }
    }

    /// Vertical extent, zero for empty boxes.
    #[must_use]
    pub const fn height(&self) -> i32 {
        let height = self.y1.saturating_sub(self.y0);
        if height < 0 {
            0
        } else {
            height
        }
    }

    /// Check if the edges are inverted on either axis.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.x1 < self.x0 || self.y1 < self.y0
    }

    /// Check if a point lies inside (left/top inclusive, right/bottom exclusive).
    #[must_use]
    pub const fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x0 && x < self.x1 && y >= self.y0 && y < self.y1
    }

    /// Smallest box covering both boxes.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self::new(
            self.x0.min(other.x0),
            self.y0.min(other.y0),
            self.x1.max(other.x1),
            self.y1.max(other.y1),
        )
    }
}

impl Default for BBox {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Add for BBox {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        self.union(&rhs)
    }
}

impl AddAssign for BBox {
    fn add_assign(&mut self, rhs: Self) {
        *self = self.union(&rhs);
    }
}
