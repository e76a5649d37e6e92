//! Horizontal flow container.

use tessera_core::{BBox, ElementId, HorizontalAlignment, LayoutId, Result, VerticalAlignment};

use crate::block::Block;
use crate::element::{sealed::{BaseMut, Token}, Element, ElementBase, LayoutNode};
use crate::flow::{unsupported_alignment, FlowChildren};
use crate::handle::{ElementMut, HorizontalFlowMut};
use crate::placement::{Anchor, ContentBox, Direction};

const CONTAINER: &str = "horizontal flow";

/// Container placing children one after another along the x axis.
///
/// The horizontal alignment picks the side the children start from and
/// must be `Left` or `Right`. The vertical alignment places each child
/// independently and may be any option.
#[derive(Debug)]
pub struct HorizontalFlow {
    base: ElementBase,
    horizontal_alignment: HorizontalAlignment,
    vertical_alignment: VerticalAlignment,
    children: FlowChildren,
}

impl Default for HorizontalFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl HorizontalFlow {
    /// Create an empty flow aligned left and top.
    #[must_use]
    pub fn new() -> Self {
        Self {
            base: ElementBase::new(),
            horizontal_alignment: HorizontalAlignment::Left,
            vertical_alignment: VerticalAlignment::Top,
            children: FlowChildren::default(),
        }
    }

    /// Set the flow direction, rejecting `Center`.
    pub fn try_with_horizontal_alignment(mut self, alignment: HorizontalAlignment) -> Result<Self> {
        self.set_horizontal_alignment(alignment)?;
        Ok(self)
    }

    /// Set the cross-axis alignment.
    #[must_use]
    pub const fn with_vertical_alignment(mut self, alignment: VerticalAlignment) -> Self {
        self.vertical_alignment = alignment;
        self
    }

    /// Get horizontal alignment.
    #[must_use]
    pub const fn horizontal_alignment(&self) -> HorizontalAlignment {
        self.horizontal_alignment
    }

    /// Get vertical alignment.
    #[must_use]
    pub const fn vertical_alignment(&self) -> VerticalAlignment {
        self.vertical_alignment
    }

    /// Set the flow direction.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidAlignment`] for `Center`; the flow is
    /// left unchanged.
    ///
    /// [`LayoutError::InvalidAlignment`]: tessera_core::LayoutError::InvalidAlignment
    pub fn set_horizontal_alignment(&mut self, alignment: HorizontalAlignment) -> Result<()> {
        if alignment == HorizontalAlignment::Center {
            return Err(unsupported_alignment(
                "set horizontal alignment",
                CONTAINER,
                alignment.as_str(),
            ));
        }
        self.horizontal_alignment = alignment;
        Ok(())
    }

    /// Set the cross-axis alignment.
    pub fn set_vertical_alignment(&mut self, alignment: VerticalAlignment) {
        self.vertical_alignment = alignment;
    }

    /// Add `element` after the last child. Returns a handle to it in its
    /// new place.
    pub fn append(&mut self, element: impl Into<Element>) -> ElementMut<'_> {
        let end = self.children.len();
        self.children.insert(&self.base, element.into(), end)
    }

    /// Add `element` before the first child.
    pub fn prepend(&mut self, element: impl Into<Element>) -> ElementMut<'_> {
        self.children.insert(&self.base, element.into(), 0)
    }

    /// Add `element` at `index`, clamped to the number of children.
    pub fn insert(&mut self, element: impl Into<Element>, index: usize) -> ElementMut<'_> {
        self.children.insert(&self.base, element.into(), index)
    }

    /// Child at `index`.
    pub fn get(&self, index: usize) -> Result<&Element> {
        self.children.get(index)
    }

    /// Handle to the child at `index`, for editing it in place.
    pub fn get_mut(&mut self, index: usize) -> Result<ElementMut<'_>> {
        self.children.get_mut(index)
    }

    /// Drop the child at `index`.
    pub fn remove(&mut self, index: usize) -> Result<()> {
        self.children.remove(index)
    }

    /// Take the child at `index` out of the flow, detached.
    pub fn extract(&mut self, index: usize) -> Result<Element> {
        self.children.extract(index)
    }

    /// Number of children.
    #[must_use]
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Check if the flow has no children.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Children in flow order.
    pub fn iter(&self) -> impl Iterator<Item = &Element> {
        self.children.iter()
    }

    pub(crate) fn set_layout(&mut self, layout: Option<LayoutId>) {
        self.base.set_layout(layout);
        self.children.set_layout(layout);
    }
}

/// In-tree editing; each method behaves like its [`HorizontalFlow`] counterpart.
impl HorizontalFlowMut<'_> {
    /// See [`HorizontalFlow::set_horizontal_alignment`].
    pub fn set_horizontal_alignment(&mut self, alignment: HorizontalAlignment) -> Result<()> {
        self.node_mut().set_horizontal_alignment(alignment)
    }

    /// See [`HorizontalFlow::set_vertical_alignment`].
    pub fn set_vertical_alignment(&mut self, alignment: VerticalAlignment) {
        self.node_mut().set_vertical_alignment(alignment);
    }

    /// See [`HorizontalFlow::append`].
    pub fn append(&mut self, element: impl Into<Element>) -> ElementMut<'_> {
        self.node_mut().append(element)
    }

    /// See [`HorizontalFlow::prepend`].
    pub fn prepend(&mut self, element: impl Into<Element>) -> ElementMut<'_> {
        self.node_mut().prepend(element)
    }

    /// See [`HorizontalFlow::insert`].
    pub fn insert(&mut self, element: impl Into<Element>, index: usize) -> ElementMut<'_> {
        self.node_mut().insert(element, index)
    }

    /// See [`HorizontalFlow::get_mut`].
    pub fn get_mut(&mut self, index: usize) -> Result<ElementMut<'_>> {
        self.node_mut().get_mut(index)
    }

    /// See [`HorizontalFlow::remove`].
    pub fn remove(&mut self, index: usize) -> Result<()> {
        self.node_mut().remove(index)
    }

    /// See [`HorizontalFlow::extract`].
    pub fn extract(&mut self, index: usize) -> Result<Element> {
        self.node_mut().extract(index)
    }
}

impl BaseMut for HorizontalFlow {
    fn base_mut(&mut self, _: Token) -> &mut ElementBase {
        &mut self.base
    }
}

impl LayoutNode for HorizontalFlow {
    fn base(&self) -> &ElementBase {
        &self.base
    }

    fn count_blocks(&self, count: &mut usize) {
        *count += 1;
        self.children.count_blocks(count);
    }

    fn generate(&self, blocks: &mut Vec<Block>, own: usize) -> Result<()> {
        let content = ContentBox::new(&blocks[own].bounds, self.inner_margin());
        let (direction, mut cursor) = match self.horizontal_alignment {
            HorizontalAlignment::Left => (Direction::Forward, content.x0),
            HorizontalAlignment::Right => (Direction::Backward, content.x1),
            HorizontalAlignment::Center => {
                return Err(unsupported_alignment(
                    "generate",
                    CONTAINER,
                    HorizontalAlignment::Center.as_str(),
                ));
            }
        };
        let cross = match self.vertical_alignment {
            VerticalAlignment::Top => Anchor::Start(content.y0),
            VerticalAlignment::Middle => Anchor::Middle(content.vertical_middle()),
            VerticalAlignment::Bottom => Anchor::End(content.y1),
        };

        self.children.generate(blocks, own, |child| {
            let (width, height) = child.size().resolve(content.width, content.height);
            let margin = child.outer_margin();
            let (x0, x1) = direction.advance(
                &mut cursor,
                width,
                margin.left.resolve(content.width),
                margin.right.resolve(content.width),
            );
            let (y0, y1) = cross.place(
                height,
                margin.top.resolve(content.height),
                margin.bottom.resolve(content.height),
            );
            BBox::new(x0, y0, x1, y1)
        })
    }

    fn clone_to(&self, layout: Option<LayoutId>, parent: Option<ElementId>) -> Self {
        let base = self.base.duplicate(layout, parent);
        let children = self.children.clone_to(layout, base.id());
        Self {
            base,
            horizontal_alignment: self.horizontal_alignment,
            vertical_alignment: self.vertical_alignment,
            children,
        }
    }
}
