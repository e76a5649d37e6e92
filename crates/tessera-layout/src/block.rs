//! Flat layout output.

use serde::{Deserialize, Serialize};
use std::ops::Range;
use tessera_core::{BBox, ElementId};

/// One resolved element in the flat output of [`Layout::generate`].
///
/// Children of a block are stored contiguously in the same sequence, at
/// `first_child..first_child + child_count`, so a renderer can walk the tree
/// by index without the original elements.
///
/// [`Layout::generate`]: crate::Layout::generate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// Element this block was generated from
    pub id: ElementId,
    /// Resolved bounds of the element
    pub bounds: BBox,
    /// Union of `bounds` and the bounds of every descendant
    pub child_bounds: BBox,
    /// Index of the first child block
    pub first_child: usize,
    /// Number of child blocks
    pub child_count: usize,
}

impl Block {
    /// Create a block with no children.
    #[must_use]
    pub const fn new(id: ElementId, bounds: BBox) -> Self {
        Self {
            id,
            bounds,
            child_bounds: BBox::EMPTY,
            first_child: 0,
            child_count: 0,
        }
    }

    /// Check if this block has no children.
    #[must_use]
    pub const fn is_leaf(&self) -> bool {
        self.child_count == 0
    }

    /// Indices of the child blocks.
    #[must_use]
    pub const fn children(&self) -> Range<usize> {
        self.first_child..self.first_child + self.child_count
    }

    /// Child blocks, looked up in the sequence this block came from.
    ///
    /// Returns an empty slice if the range does not fit `blocks`.
    #[must_use]
    pub fn child_blocks<'a>(&self, blocks: &'a [Self]) -> &'a [Self] {
        blocks.get(self.children()).unwrap_or_default()
    }
}
