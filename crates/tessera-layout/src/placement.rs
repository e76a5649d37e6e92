//! Pixel placement shared by the grid and the flows.

use tessera_core::{center_span, BBox, Margin};

/// Area left inside a block once an element's inner margin is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ContentBox {
    pub(crate) x0: i32,
    pub(crate) y0: i32,
    pub(crate) x1: i32,
    pub(crate) y1: i32,
    pub(crate) width: i32,
    pub(crate) height: i32,
}

impl ContentBox {
    /// Horizontal margins resolve against the bounds width, vertical ones
    /// against the bounds height.
    pub(crate) fn new(bounds: &BBox, inner_margin: &Margin) -> Self {
        let bounds_width = bounds.width();
        let bounds_height = bounds.height();
        let left = inner_margin.left.resolve(bounds_width);
        let right = inner_margin.right.resolve(bounds_width);
        let top = inner_margin.top.resolve(bounds_height);
        let bottom = inner_margin.bottom.resolve(bounds_height);

        Self {
            x0: bounds.x0.saturating_add(left),
            y0: bounds.y0.saturating_add(top),
            x1: bounds.x1.saturating_sub(right),
            y1: bounds.y1.saturating_sub(bottom),
            width: bounds_width.saturating_sub(left).saturating_sub(right),
            height: bounds_height.saturating_sub(top).saturating_sub(bottom),
        }
    }

    pub(crate) const fn horizontal_middle(&self) -> i32 {
        midpoint(self.x0, self.x1)
    }

    pub(crate) const fn vertical_middle(&self) -> i32 {
        midpoint(self.y0, self.y1)
    }
}

/// `(a + b) / 2` without intermediate overflow.
const fn midpoint(a: i32, b: i32) -> i32 {
    ((a as i64 + b as i64) / 2) as i32
}

/// Where a child is pinned along one axis.
///
/// All edge arithmetic saturates at the `i32` range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Anchor {
    /// Leading edge at this coordinate, pushed in by the leading margin
    Start(i32),
    /// Centered on this coordinate; margins are ignored
    Middle(i32),
    /// Trailing edge at this coordinate, pulled in by the trailing margin
    End(i32),
}

impl Anchor {
    /// Return the `(start, end)` edges of an extent placed at this anchor.
    pub(crate) const fn place(self, extent: i32, leading: i32, trailing: i32) -> (i32, i32) {
        match self {
            Self::Start(edge) => {
                let start = edge.saturating_add(leading);
                (start, start.saturating_add(extent))
            }
            Self::Middle(midpoint) => center_span(midpoint, extent),
            Self::End(edge) => {
                let end = edge.saturating_sub(trailing);
                (end.saturating_sub(extent), end)
            }
        }
    }
}

/// Which way a flow's cursor moves along its axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Direction {
    /// Left to right, or top to bottom
    Forward,
    /// Right to left, or bottom to top
    Backward,
}

impl Direction {
    /// Place an extent at the cursor and move the cursor past it and both
    /// of its margins. Returns the `(start, end)` edges.
    pub(crate) fn advance(
        self,
        cursor: &mut i32,
        extent: i32,
        leading: i32,
        trailing: i32,
    ) -> (i32, i32) {
        match self {
            Self::Forward => {
                let (start, end) = Anchor::Start(*cursor).place(extent, leading, trailing);
                *cursor = end.saturating_add(trailing);
                (start, end)
            }
            Self::Backward => {
                let (start, end) = Anchor::End(*cursor).place(extent, leading, trailing);
                *cursor = start.saturating_sub(leading);
                (start, end)
            }
        }
    }
}
