//! Mutable access to elements that live inside a tree.
//!
//! Containers and the layout hand out [`NodeMut`] instead of `&mut Element`.
//! A handle reads like the element through `Deref` and edits its size,
//! margins and children in place, but never exposes the element as a
//! whole value. Swapping or overwriting an attached element would leave its
//! `parent` and `layout` back-references pointing at the wrong owner, so
//! moving an element always goes through `extract` and `insert`.
//!
//! ```compile_fail
//! use tessera_layout::{Layout, Leaf};
//!
//! let mut layout = Layout::new();
//! let mut root = layout.set_root(Leaf::new());
//! *root = Leaf::new().into();
//! ```

use std::ops::Deref;

use tessera_core::{Margin, Size};

use crate::element::{Element, LayoutNode};
use crate::grid::Grid;
use crate::horizontal_flow::HorizontalFlow;
use crate::vertical_flow::VerticalFlow;

/// Borrowed, in-place access to an element owned by a container or layout.
#[derive(Debug)]
pub struct NodeMut<'a, T> {
    node: &'a mut T,
}

/// Handle to an element of any variant.
pub type ElementMut<'a> = NodeMut<'a, Element>;
/// Handle to a grid.
pub type GridMut<'a> = NodeMut<'a, Grid>;
/// Handle to a horizontal flow.
pub type HorizontalFlowMut<'a> = NodeMut<'a, HorizontalFlow>;
/// Handle to a vertical flow.
pub type VerticalFlowMut<'a> = NodeMut<'a, VerticalFlow>;

impl<'a, T> NodeMut<'a, T> {
    pub(crate) fn new(node: &'a mut T) -> Self {
        Self { node }
    }

    pub(crate) fn node_mut(&mut self) -> &mut T {
        &mut *self.node
    }

    /// Shorter-lived handle to the same element, leaving this one usable
    /// afterwards.
    #[must_use]
    pub fn reborrow(&mut self) -> NodeMut<'_, T> {
        NodeMut::new(&mut *self.node)
    }
}

impl<T> Deref for NodeMut<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        &*self.node
    }
}

impl<T: LayoutNode> NodeMut<'_, T> {
    /// Mutable declared size.
    pub fn size_mut(&mut self) -> &mut Size {
        self.node.size_mut()
    }

    /// Mutable inner margin.
    pub fn inner_margin_mut(&mut self) -> &mut Margin {
        self.node.inner_margin_mut()
    }

    /// Mutable outer margin.
    pub fn outer_margin_mut(&mut self) -> &mut Margin {
        self.node.outer_margin_mut()
    }
}

impl<'a> NodeMut<'a, Element> {
    /// Narrow to a grid handle.
    #[must_use]
    pub fn into_grid(self) -> Option<GridMut<'a>> {
        match self.node {
            Element::Grid(grid) => Some(NodeMut::new(grid)),
            _ => None,
        }
    }

    /// Narrow to a horizontal flow handle.
    #[must_use]
    pub fn into_horizontal_flow(self) -> Option<HorizontalFlowMut<'a>> {
        match self.node {
            Element::HorizontalFlow(flow) => Some(NodeMut::new(flow)),
            _ => None,
        }
    }

    /// Narrow to a vertical flow handle.
    #[must_use]
    pub fn into_vertical_flow(self) -> Option<VerticalFlowMut<'a>> {
        match self.node {
            Element::VerticalFlow(flow) => Some(NodeMut::new(flow)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::Leaf;

    #[test]
    fn test_handle_reads_through_deref() {
        let mut element = Element::from(Leaf::new().with_size(Size::absolute(3, 4)));
        let id = element.id();
        let handle = NodeMut::new(&mut element);
        assert_eq!(handle.id(), id);
        assert_eq!(handle.size().resolve(0, 0), (3, 4));
        assert!(handle.as_leaf().is_some());
    }

    #[test]
    fn test_handle_edits_box_model() {
        let mut element = Element::from(Leaf::new());
        let mut handle = NodeMut::new(&mut element);
        *handle.size_mut() = Size::absolute(8, 9);
        *handle.inner_margin_mut() = Margin::absolute(1, 1, 1, 1);
        *handle.outer_margin_mut() = Margin::absolute(2, 2, 2, 2);
        assert_eq!(element.size().resolve(0, 0), (8, 9));
        assert_eq!(element.inner_margin().left.resolve(0), 1);
        assert_eq!(element.outer_margin().bottom.resolve(0), 2);
    }

    #[test]
    fn test_narrowing_matches_variant() {
        let mut element = Element::from(Grid::with_dimensions(1, 1));
        assert!(NodeMut::new(&mut element).into_horizontal_flow().is_none());
        assert!(NodeMut::new(&mut element).into_vertical_flow().is_none());
        let grid = NodeMut::new(&mut element).into_grid().unwrap();
        assert_eq!(grid.column_count(), 1);
    }

    #[test]
    fn test_reborrow_keeps_handle_usable() {
        let mut element = Element::from(Leaf::new());
        let mut handle = NodeMut::new(&mut element);
        *handle.reborrow().size_mut() = Size::absolute(1, 1);
        *handle.size_mut() = Size::absolute(2, 2);
        assert_eq!(element.size().resolve(0, 0), (2, 2));
    }
}
