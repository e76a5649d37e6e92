//! Vertical flow container.

use tessera_core::{BBox, ElementId, HorizontalAlignment, LayoutId, Result, VerticalAlignment};

use crate::block::Block;
use crate::element::{sealed::{BaseMut, Token}, Element, ElementBase, LayoutNode};
use crate::flow::{unsupported_alignment, FlowChildren};
use crate::handle::{ElementMut, VerticalFlowMut};
use crate::placement::{Anchor, ContentBox, Direction};

const CONTAINER: &str = "vertical flow";

/// Container stacking children along the y axis.
///
/// The vertical alignment must be `Top` or `Bottom`; the horizontal one
/// may be any option.
#[derive(Debug)]
pub struct VerticalFlow {
    base: ElementBase,
    horizontal_alignment: HorizontalAlignment,
    vertical_alignment: VerticalAlignment,
    children: FlowChildren,
}

impl Default for VerticalFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl VerticalFlow {
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

    /// Set the cross-axis alignment.
    #[must_use]
    pub const fn with_horizontal_alignment(mut self, alignment: HorizontalAlignment) -> Self {
        self.horizontal_alignment = alignment;
        self
    }

    /// Set the flow direction, rejecting `Middle`.
    pub fn try_with_vertical_alignment(mut self, alignment: VerticalAlignment) -> Result<Self> {
        self.set_vertical_alignment(alignment)?;
        Ok(self)
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

    /// Set the cross-axis alignment.
    pub fn set_horizontal_alignment(&mut self, alignment: HorizontalAlignment) {
        self.horizontal_alignment = alignment;
    }

    /// Set the flow direction.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidAlignment`] for `Middle`; the flow is
    /// left unchanged.
    ///
    /// [`LayoutError::InvalidAlignment`]: tessera_core::LayoutError::InvalidAlignment
    pub fn set_vertical_alignment(&mut self, alignment: VerticalAlignment) -> Result<()> {
        if alignment == VerticalAlignment::Middle {
            return Err(unsupported_alignment(
                "set vertical alignment",
                CONTAINER,
                alignment.as_str(),
            ));
        }
        self.vertical_alignment = alignment;
        Ok(())
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

/// In-tree editing; each method behaves like its [`VerticalFlow`] counterpart.
impl VerticalFlowMut<'_> {
    /// See [`VerticalFlow::set_vertical_alignment`].
    pub fn set_vertical_alignment(&mut self, alignment: VerticalAlignment) -> Result<()> {
        self.node_mut().set_vertical_alignment(alignment)
    }

    /// See [`VerticalFlow::set_horizontal_alignment`].
    pub fn set_horizontal_alignment(&mut self, alignment: HorizontalAlignment) {
        self.node_mut().set_horizontal_alignment(alignment);
    }

    /// See [`VerticalFlow::append`].
    pub fn append(&mut self, element: impl Into<Element>) -> ElementMut<'_> {
        self.node_mut().append(element)
    }

    /// See [`VerticalFlow::prepend`].
    pub fn prepend(&mut self, element: impl Into<Element>) -> ElementMut<'_> {
        self.node_mut().prepend(element)
    }

    /// See [`VerticalFlow::insert`].
    pub fn insert(&mut self, element: impl Into<Element>, index: usize) -> ElementMut<'_> {
        self.node_mut().insert(element, index)
    }

    /// See [`VerticalFlow::get_mut`].
    pub fn get_mut(&mut self, index: usize) -> Result<ElementMut<'_>> {
        self.node_mut().get_mut(index)
    }

    /// See [`VerticalFlow::remove`].
    pub fn remove(&mut self, index: usize) -> Result<()> {
        self.node_mut().remove(index)
    }

    /// See [`VerticalFlow::extract`].
    pub fn extract(&mut self, index: usize) -> Result<Element> {
        self.node_mut().extract(index)
    }
}

impl BaseMut for VerticalFlow {
    fn base_mut(&mut self, _: Token) -> &mut ElementBase {
        &mut self.base
    }
}

impl LayoutNode for VerticalFlow {
    fn base(&self) -> &ElementBase {
        &self.base
    }

    fn count_blocks(&self, count: &mut usize) {
        *count += 1;
        self.children.count_blocks(count);
    }

    fn generate(&self, blocks: &mut Vec<Block>, own: usize) -> Result<()> {
        let content = ContentBox::new(&blocks[own].bounds, self.inner_margin());
        let (direction, mut cursor) = match self.vertical_alignment {
            VerticalAlignment::Top => (Direction::Forward, content.y0),
            VerticalAlignment::Bottom => (Direction::Backward, content.y1),
            VerticalAlignment::Middle => {
                return Err(unsupported_alignment(
                    "generate",
                    CONTAINER,
                    VerticalAlignment::Middle.as_str(),
                ));
            }
        };
        let cross = match self.horizontal_alignment {
            HorizontalAlignment::Left => Anchor::Start(content.x0),
            HorizontalAlignment::Center => Anchor::Middle(content.horizontal_middle()),
            HorizontalAlignment::Right => Anchor::End(content.x1),
        };

        self.children.generate(blocks, own, |child| {
            let (width, height) = child.size().resolve(content.width, content.height);
            let margin = child.outer_margin();
            let (x0, x1) = cross.place(
                width,
                margin.left.resolve(content.width),
                margin.right.resolve(content.width),
            );
            let (y0, y1) = direction.advance(
                &mut cursor,
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
