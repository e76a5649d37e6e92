//! Alignment of an element inside the area its container gives it.

use serde::{Deserialize, Serialize};

/// Horizontal alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HorizontalAlignment {
    /// Anchor to the left edge
    #[default]
    Left,
    /// Center around the midpoint
    Center,
    /// Anchor to the right edge
    Right,
}

impl HorizontalAlignment {
    /// Lowercase name, used in error messages.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
        }
    }
}

/// Vertical alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum VerticalAlignment {
    /// Anchor to the top edge
    #[default]
    Top,
    /// Center around the midpoint
    Middle,
    /// Anchor to the bottom edge
    Bottom,
}

impl VerticalAlignment {
    /// Lowercase name, used in error messages.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Middle => "middle",
            Self::Bottom => "bottom",
        }
    }
}

/// Place an extent around a midpoint, returning its `(start, end)` edges.
///
/// An odd extent puts the extra pixel before the midpoint. Edges saturate
/// at the `i32` range.
#[must_use]
pub const fn center_span(midpoint: i32, extent: i32) -> (i32, i32) {
    let leading = ((extent as i64 + 1) / 2) as i32;
    (midpoint.saturating_sub(leading), midpoint.saturating_add(extent / 2))
}
