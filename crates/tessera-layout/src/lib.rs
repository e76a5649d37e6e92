#![allow(clippy::missing_const_for_fn)]
#![cfg_attr(test, allow(clippy::unwrap_used))]
//! Element tree and block generation for the Tessera layout engine.
//!
//! A [`Layout`] owns a tree of [`Element`]s and resolves it into a flat
//! list of [`Block`]s:
//!
//! - **Leaf**: element without children
//! - **Grid**: `rows × columns` cells, children divided down to fit a cell
//! - **HorizontalFlow** / **VerticalFlow**: children placed one after
//!   another along an axis, aligned freely on the other
//!
//! Elements inside a tree are edited through [`NodeMut`] handles, which
//! keep each element's parent and layout back-references intact.
//!
//! # Example
//!
//! ```
//! use tessera_layout::{HorizontalFlow, Layout, LayoutNode, Leaf, Size};
//!
//! let mut flow = HorizontalFlow::new().with_size(Size::relative(1.0, 1.0));
//! flow.append(Leaf::new().with_size(Size::absolute(20, 10)));
//! flow.append(Leaf::new().with_size(Size::absolute(30, 10)));
//!
//! let mut layout = Layout::new().with_size(Size::absolute(100, 100));
//! layout.set_root(flow);
//!
//! let blocks = layout.generate().unwrap();
//! assert_eq!(blocks.len(), 3);
//! assert_eq!(blocks[2].bounds.x0, 20);
//! ```

mod block;
mod element;
mod engine;
mod flow;
mod grid;
mod handle;
mod horizontal_flow;
mod placement;
mod vertical_flow;

pub use block::Block;
pub use element::{Element, ElementBase, LayoutNode, Leaf};
pub use engine::Layout;
pub use grid::Grid;
pub use handle::{ElementMut, GridMut, HorizontalFlowMut, NodeMut, VerticalFlowMut};
pub use horizontal_flow::HorizontalFlow;
pub use vertical_flow::VerticalFlow;

pub use tessera_core::{
    BBox, ElementId, HorizontalAlignment, LayoutError, LayoutId, Length, LengthMode, Margin,
    Result, Size, VerticalAlignment,
};
