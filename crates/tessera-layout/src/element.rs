//! Element tree: shared element state, the node capability trait, and the
//! closed set of element variants.

use tessera_core::{ElementId, LayoutError, LayoutId, Margin, Result, Size};
use tracing::debug;

use crate::block::Block;
use crate::grid::Grid;
use crate::horizontal_flow::HorizontalFlow;
use crate::vertical_flow::VerticalFlow;

/// State every element carries regardless of its variant.
///
/// `parent` and `layout` are back-references by id. They are maintained by
/// the owning container: set when an element is attached, cleared when it
/// is extracted.
#[derive(Debug)]
pub struct ElementBase {
    id: ElementId,
    size: Size,
    inner_margin: Margin,
    outer_margin: Margin,
    parent: Option<ElementId>,
    layout: Option<LayoutId>,
}

impl ElementBase {
    pub(crate) fn new() -> Self {
        Self {
            id: ElementId::next(),
            size: Size::ZERO,
            inner_margin: Margin::ZERO,
            outer_margin: Margin::ZERO,
            parent: None,
            layout: None,
        }
    }

    /// Copy size and margins under a fresh id.
    pub(crate) fn duplicate(&self, layout: Option<LayoutId>, parent: Option<ElementId>) -> Self {
        Self {
            id: ElementId::next(),
            size: self.size,
            inner_margin: self.inner_margin,
            outer_margin: self.outer_margin,
            parent,
            layout,
        }
    }

    /// Identity of the element.
    #[must_use]
    pub const fn id(&self) -> ElementId {
        self.id
    }

    /// Declared size, resolved against the area the parent provides.
    #[must_use]
    pub const fn size(&self) -> &Size {
        &self.size
    }

    /// Mutable declared size.
    pub fn size_mut(&mut self) -> &mut Size {
        &mut self.size
    }

    /// Margin applied to this element's own children.
    #[must_use]
    pub const fn inner_margin(&self) -> &Margin {
        &self.inner_margin
    }

    /// Mutable inner margin.
    pub fn inner_margin_mut(&mut self) -> &mut Margin {
        &mut self.inner_margin
    }

    /// Margin applied when placing this element inside its parent.
    #[must_use]
    pub const fn outer_margin(&self) -> &Margin {
        &self.outer_margin
    }

    /// Mutable outer margin.
    pub fn outer_margin_mut(&mut self) -> &mut Margin {
        &mut self.outer_margin
    }

    /// Owning container, if attached to one.
    #[must_use]
    pub const fn parent(&self) -> Option<ElementId> {
        self.parent
    }

    /// Layout this element belongs to, if any.
    #[must_use]
    pub const fn layout(&self) -> Option<LayoutId> {
        self.layout
    }

    pub(crate) fn set_parent(&mut self, parent: Option<ElementId>) {
        self.parent = parent;
    }

    pub(crate) fn set_layout(&mut self, layout: Option<LayoutId>) {
        self.layout = layout;
    }
}

pub(crate) mod sealed {
    use super::ElementBase;

    /// Only constructible inside this crate, so generic code bounded on
    /// `LayoutNode` cannot call `base_mut`.
    #[derive(Debug, Clone, Copy)]
    pub struct Token(pub(crate) ());

    /// Write access to the back-references, kept inside the crate.
    pub trait BaseMut {
        fn base_mut(&mut self, token: Token) -> &mut ElementBase;
    }
}

use sealed::{BaseMut, Token};

/// Capability interface shared by every element variant.
///
/// Sealed: the set of variants is closed, and only this crate may rewrite
/// an element's `parent` or `layout`.
pub trait LayoutNode: BaseMut {
    /// Shared element state.
    fn base(&self) -> &ElementBase;

    /// Add the number of blocks this subtree generates to `count`.
    fn count_blocks(&self, count: &mut usize);

    /// Append one block per child to `blocks`, link them from the block at
    /// `own`, then recurse into each child.
    ///
    /// `blocks[own].bounds` must already hold this element's bounds.
    fn generate(&self, blocks: &mut Vec<Block>, own: usize) -> Result<()>;

    /// Deep copy under fresh ids, attached to `layout` and `parent`.
    #[must_use]
    fn clone_to(&self, layout: Option<LayoutId>, parent: Option<ElementId>) -> Self
    where
        Self: Sized;

    /// Identity of the element.
    fn id(&self) -> ElementId {
        self.base().id()
    }

    /// Declared size.
    fn size(&self) -> &Size {
        self.base().size()
    }

    /// Mutable declared size.
    fn size_mut(&mut self) -> &mut Size {
        self.base_mut(Token(())).size_mut()
    }

    /// Margin applied to children.
    fn inner_margin(&self) -> &Margin {
        self.base().inner_margin()
    }

    /// Mutable inner margin.
    fn inner_margin_mut(&mut self) -> &mut Margin {
        self.base_mut(Token(())).inner_margin_mut()
    }

    /// Margin applied inside the parent.
    fn outer_margin(&self) -> &Margin {
        self.base().outer_margin()
    }

    /// Mutable outer margin.
    fn outer_margin_mut(&mut self) -> &mut Margin {
        self.base_mut(Token(())).outer_margin_mut()
    }

    /// Owning container, if attached.
    fn parent(&self) -> Option<ElementId> {
        self.base().parent()
    }

    /// Owning layout, if attached.
    fn layout(&self) -> Option<LayoutId> {
        self.base().layout()
    }

    /// Set the declared size.
    #[must_use]
    fn with_size(mut self, size: Size) -> Self
    where
        Self: Sized,
    {
        *self.size_mut() = size;
        self
    }

    /// Set the inner margin.
    #[must_use]
    fn with_inner_margin(mut self, margin: Margin) -> Self
    where
        Self: Sized,
    {
        *self.inner_margin_mut() = margin;
        self
    }

    /// Set the outer margin.
    #[must_use]
    fn with_outer_margin(mut self, margin: Margin) -> Self
    where
        Self: Sized,
    {
        *self.outer_margin_mut() = margin;
        self
    }
}

/// Element without children.
#[derive(Debug)]
pub struct Leaf {
    base: ElementBase,
}

impl Default for Leaf {
    fn default() -> Self {
        Self::new()
    }
}

impl Leaf {
    /// Create a detached leaf with zero size.
    #[must_use]
    pub fn new() -> Self {
        Self {
            base: ElementBase::new(),
        }
    }

    pub(crate) fn set_layout(&mut self, layout: Option<LayoutId>) {
        self.base.set_layout(layout);
    }
}

impl BaseMut for Leaf {
    fn base_mut(&mut self, _: Token) -> &mut ElementBase {
        &mut self.base
    }
}

impl LayoutNode for Leaf {
    fn base(&self) -> &ElementBase {
        &self.base
    }

    fn count_blocks(&self, count: &mut usize) {
        *count += 1;
    }

    fn generate(&self, _blocks: &mut Vec<Block>, _own: usize) -> Result<()> {
        Ok(())
    }

    fn clone_to(&self, layout: Option<LayoutId>, parent: Option<ElementId>) -> Self {
        Self {
            base: self.base.duplicate(layout, parent),
        }
    }
}

/// Any element that can be placed in a container or at the layout root.
#[derive(Debug)]
pub enum Element {
    /// Element without children
    Leaf(Leaf),
    /// Row-major grid of optional children
    Grid(Grid),
    /// Children placed left to right, or right to left
    HorizontalFlow(HorizontalFlow),
    /// Children placed top to bottom, or bottom to top
    VerticalFlow(VerticalFlow),
}

impl Element {
    /// Borrow as a leaf.
    #[must_use]
    pub const fn as_leaf(&self) -> Option<&Leaf> {
        match self {
            Self::Leaf(leaf) => Some(leaf),
            _ => None,
        }
    }

    /// Borrow as a grid.
    #[must_use]
    pub const fn as_grid(&self) -> Option<&Grid> {
        match self {
            Self::Grid(grid) => Some(grid),
            _ => None,
        }
    }

    /// Mutably borrow as a grid. Only owned, detached elements give out
    /// `&mut`; elements inside a tree are edited through [`NodeMut`](crate::NodeMut).
    pub fn as_grid_mut(&mut self) -> Option<&mut Grid> {
        match self {
            Self::Grid(grid) => Some(grid),
            _ => None,
        }
    }

    /// Borrow as a horizontal flow.
    #[must_use]
    pub const fn as_horizontal_flow(&self) -> Option<&HorizontalFlow> {
        match self {
            Self::HorizontalFlow(flow) => Some(flow),
            _ => None,
        }
    }

    /// Mutably borrow as a horizontal flow.
    pub fn as_horizontal_flow_mut(&mut self) -> Option<&mut HorizontalFlow> {
        match self {
            Self::HorizontalFlow(flow) => Some(flow),
            _ => None,
        }
    }

    /// Borrow as a vertical flow.
    #[must_use]
    pub const fn as_vertical_flow(&self) -> Option<&VerticalFlow> {
        match self {
            Self::VerticalFlow(flow) => Some(flow),
            _ => None,
        }
    }

    /// Mutably borrow as a vertical flow.
    pub fn as_vertical_flow_mut(&mut self) -> Option<&mut VerticalFlow> {
        match self {
            Self::VerticalFlow(flow) => Some(flow),
            _ => None,
        }
    }

    /// Set the layout back-reference on this element and its whole subtree.
    pub(crate) fn set_layout(&mut self, layout: Option<LayoutId>) {
        match self {
            Self::Leaf(leaf) => leaf.set_layout(layout),
            Self::Grid(grid) => grid.set_layout(layout),
            Self::HorizontalFlow(flow) => flow.set_layout(layout),
            Self::VerticalFlow(flow) => flow.set_layout(layout),
        }
    }

    /// Make this element a child of `parent`, inheriting its layout.
    pub(crate) fn attach(&mut self, parent: &ElementBase) {
        if self.layout() != parent.layout() {
            self.set_layout(parent.layout());
        }
        self.base_mut(Token(())).set_parent(Some(parent.id()));
    }

    /// Clear both back-references; the subtree no longer has a layout.
    pub(crate) fn detach(&mut self) {
        if self.layout().is_some() {
            self.set_layout(None);
        }
        self.base_mut(Token(())).set_parent(None);
    }
}

impl BaseMut for Element {
    fn base_mut(&mut self, token: Token) -> &mut ElementBase {
        match self {
            Self::Leaf(leaf) => leaf.base_mut(token),
            Self::Grid(grid) => grid.base_mut(token),
            Self::HorizontalFlow(flow) => flow.base_mut(token),
            Self::VerticalFlow(flow) => flow.base_mut(token),
        }
    }
}

impl LayoutNode for Element {
    fn base(&self) -> &ElementBase {
        match self {
            Self::Leaf(leaf) => leaf.base(),
            Self::Grid(grid) => grid.base(),
            Self::HorizontalFlow(flow) => flow.base(),
            Self::VerticalFlow(flow) => flow.base(),
        }
    }

    fn count_blocks(&self, count: &mut usize) {
        match self {
            Self::Leaf(leaf) => leaf.count_blocks(count),
            Self::Grid(grid) => grid.count_blocks(count),
            Self::HorizontalFlow(flow) => flow.count_blocks(count),
            Self::VerticalFlow(flow) => flow.count_blocks(count),
        }
    }

    fn generate(&self, blocks: &mut Vec<Block>, own: usize) -> Result<()> {
        match self {
            Self::Leaf(leaf) => leaf.generate(blocks, own),
            Self::Grid(grid) => grid.generate(blocks, own),
            Self::HorizontalFlow(flow) => flow.generate(blocks, own),
            Self::VerticalFlow(flow) => flow.generate(blocks, own),
        }
    }

    fn clone_to(&self, layout: Option<LayoutId>, parent: Option<ElementId>) -> Self {
        match self {
            Self::Leaf(leaf) => Self::Leaf(leaf.clone_to(layout, parent)),
            Self::Grid(grid) => Self::Grid(grid.clone_to(layout, parent)),
            Self::HorizontalFlow(flow) => Self::HorizontalFlow(flow.clone_to(layout, parent)),
            Self::VerticalFlow(flow) => Self::VerticalFlow(flow.clone_to(layout, parent)),
        }
    }
}

/// Cloning never aliases: the copy and every element below it get fresh
/// ids, and the copy is detached from any parent or layout.
impl Clone for Element {
    fn clone(&self) -> Self {
        self.clone_to(None, None)
    }
}

impl From<Leaf> for Element {
    fn from(leaf: Leaf) -> Self {
        Self::Leaf(leaf)
    }
}

impl From<Grid> for Element {
    fn from(grid: Grid) -> Self {
        Self::Grid(grid)
    }
}

impl From<HorizontalFlow> for Element {
    fn from(flow: HorizontalFlow) -> Self {
        Self::HorizontalFlow(flow)
    }
}

impl From<VerticalFlow> for Element {
    fn from(flow: VerticalFlow) -> Self {
        Self::VerticalFlow(flow)
    }
}

/// Log a rejected operation and hand the error back.
pub(crate) fn rejected(err: LayoutError) -> LayoutError {
    debug!(error = %err, "layout operation rejected");
    err
}
