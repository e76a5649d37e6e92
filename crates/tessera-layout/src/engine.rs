//! Layout root and block generation.

use tessera_core::{BBox, LayoutError, LayoutId, Result, Size};
use tracing::debug;

use crate::block::Block;
use crate::element::{rejected, sealed::{BaseMut, Token}, Element, LayoutNode};
use crate::handle::{ElementMut, NodeMut};

/// Root owner of an element tree.
///
/// Holds the absolute viewport size and offset and at most one root
/// element. [`Layout::generate`] resolves the whole tree into a flat list
/// of [`Block`]s.
#[derive(Debug)]
pub struct Layout {
    id: LayoutId,
    size: Size,
    offset: Size,
    root: Option<Element>,
}

impl Default for Layout {
    fn default() -> Self {
        Self::new()
    }
}

impl Layout {
    /// Create an empty layout with zero size and offset.
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: LayoutId::next(),
            size: Size::ZERO,
            offset: Size::ZERO,
            root: None,
        }
    }

    /// Set the viewport size. Both dimensions must be absolute.
    #[must_use]
    pub fn with_size(mut self, size: Size) -> Self {
        self.size = size;
        self
    }

    /// Set the viewport offset. Both dimensions must be absolute.
    #[must_use]
    pub fn with_offset(mut self, offset: Size) -> Self {
        self.offset = offset;
        self
    }

    /// Identity every element in the tree refers back to.
    #[must_use]
    pub const fn id(&self) -> LayoutId {
        self.id
    }

    /// Viewport size.
    #[must_use]
    pub const fn size(&self) -> &Size {
        &self.size
    }

    /// Mutable viewport size. Checked for relative lengths at generation.
    pub fn size_mut(&mut self) -> &mut Size {
        &mut self.size
    }

    /// Position of the viewport's top-left corner.
    #[must_use]
    pub const fn offset(&self) -> &Size {
        &self.offset
    }

    /// Mutable viewport offset. Checked for relative lengths at generation.
    pub fn offset_mut(&mut self) -> &mut Size {
        &mut self.offset
    }

    /// Root element, if one is set.
    #[must_use]
    pub const fn root(&self) -> Option<&Element> {
        self.root.as_ref()
    }

    /// Handle to the root element, for editing it in place.
    pub fn root_mut(&mut self) -> Option<ElementMut<'_>> {
        self.root.as_mut().map(NodeMut::new)
    }

    /// Make `root` the root element, dropping any previous root. The whole
    /// subtree is bound to this layout. Returns a handle to the new root.
    pub fn set_root(&mut self, root: impl Into<Element>) -> ElementMut<'_> {
        let mut root = root.into();
        root.base_mut(Token(())).set_parent(None);
        root.set_layout(Some(self.id));
        debug!(layout = %self.id, root = %root.id(), "layout root set");
        NodeMut::new(self.root.insert(root))
    }

    /// Remove the root element and return it, detached from this layout.
    pub fn take_root(&mut self) -> Option<Element> {
        let mut root = self.root.take()?;
        root.detach();
        Some(root)
    }

    /// Resolve the element tree into blocks.
    ///
    /// The root block is at index 0. Every block's children are stored
    /// contiguously at `first_child..first_child + child_count`, after the
    /// block itself. Each `child_bounds` is the union of the block's own
    /// bounds with those of all its descendants.
    ///
    /// Returns an empty list when there is no root.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidLayoutConfiguration`] if the layout's
    /// size or offset is relative, and [`LayoutError::InvalidAlignment`] if
    /// a flow in the tree is centered along its own axis.
    pub fn generate(&self) -> Result<Vec<Block>> {
        let Some(root) = &self.root else {
            debug!(layout = %self.id, "layout has no root");
            return Ok(Vec::new());
        };
        if self.size.is_relative() {
            return Err(rejected(LayoutError::InvalidLayoutConfiguration { field: "size" }));
        }
        if self.offset.is_relative() {
            return Err(rejected(LayoutError::InvalidLayoutConfiguration { field: "offset" }));
        }

        let mut count = 0;
        root.count_blocks(&mut count);
        let mut blocks = Vec::with_capacity(count);

        let (width, height) = self.size.resolve(0, 0);
        let (offset_x, offset_y) = self.offset.resolve(0, 0);
        let margin = root.outer_margin();
        let (root_width, root_height) = root.size().resolve(width, height);
        let bounds = BBox::from_origin_size(
            offset_x.saturating_add(margin.left.resolve(width)),
            offset_y.saturating_add(margin.top.resolve(height)),
            root_width,
            root_height,
        );
        blocks.push(Block::new(root.id(), bounds));
        root.generate(&mut blocks, 0)?;
        debug_assert_eq!(blocks.len(), count);

        accumulate_child_bounds(&mut blocks);
        debug!(layout = %self.id, blocks = blocks.len(), "layout generated");
        Ok(blocks)
    }
}

/// Children always sit after their parent, so walking backwards sees every
/// child's final `child_bounds` before its parent needs it.
fn accumulate_child_bounds(blocks: &mut [Block]) {
    for index in (0..blocks.len()).rev() {
        let block = blocks[index];
        let total = block
            .child_blocks(blocks)
            .iter()
            .fold(block.bounds, |acc, child| acc + child.child_bounds);
        blocks[index].child_bounds = total;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::Leaf;
    use crate::grid::Grid;
    use crate::horizontal_flow::HorizontalFlow;
    use crate::vertical_flow::VerticalFlow;
    use proptest::prelude::*;
    use tessera_core::{HorizontalAlignment, Length, Margin, VerticalAlignment};

    fn leaf(width: i32, height: i32) -> Leaf {
        Leaf::new().with_size(Size::absolute(width, height))
    }

    fn viewport(width: i32, height: i32) -> Layout {
        Layout::new().with_size(Size::absolute(width, height))
    }

    // =========================================================================
    // Root Tests
    // =========================================================================

    #[test]
    fn test_generate_without_root_is_empty() {
        assert!(viewport(10, 10).generate().unwrap().is_empty());
    }

    #[test]
    fn test_relative_size_rejected() {
        let mut layout = Layout::new().with_size(Size::relative(1.0, 1.0));
        layout.set_root(leaf(1, 1));
        assert_eq!(
            layout.generate(),
            Err(LayoutError::InvalidLayoutConfiguration { field: "size" })
        );
    }

    #[test]
    fn test_relative_offset_rejected() {
        let mut layout = viewport(10, 10).with_offset(Size::new(Length::ZERO, Length::relative(0.5)));
        layout.set_root(leaf(1, 1));
        assert_eq!(
            layout.generate(),
            Err(LayoutError::InvalidLayoutConfiguration { field: "offset" })
        );
    }

    #[test]
    fn test_empty_layout_skips_validation() {
        let layout = Layout::new().with_size(Size::relative(1.0, 1.0));
        assert!(layout.generate().unwrap().is_empty());
    }

    #[test]
    fn test_root_bounds_use_offset_margin_and_size() {
        let mut layout = viewport(200, 100).with_offset(Size::absolute(10, 20));
        layout.set_root(
            Leaf::new()
                .with_size(Size::relative(0.5, 0.5))
                .with_outer_margin(Margin::new(
                    Length::relative(0.1),
                    Length::relative(0.1),
                    Length::ZERO,
                    Length::ZERO,
                )),
        );
        let blocks = layout.generate().unwrap();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].bounds, BBox::new(30, 30, 130, 80));
        assert_eq!(blocks[0].child_bounds, blocks[0].bounds);
    }

    #[test]
    fn test_set_root_binds_subtree() {
        let mut layout = viewport(10, 10);
        let id = layout.id();
        let mut flow = HorizontalFlow::new();
        flow.append(leaf(1, 1));
        let root = layout.set_root(flow);
        assert_eq!(root.parent(), None);
        assert_eq!(root.layout(), Some(id));
        let child_layout = root.as_horizontal_flow().unwrap().get(0).unwrap().layout();
        assert_eq!(child_layout, Some(id));
    }

    #[test]
    fn test_take_root_detaches_subtree() {
        let mut layout = viewport(10, 10);
        let mut flow = VerticalFlow::new();
        flow.append(leaf(1, 1));
        layout.set_root(flow);
        let root = layout.take_root().unwrap();
        assert!(layout.root().is_none());
        assert!(root.layout().is_none());
        assert!(root.as_vertical_flow().unwrap().get(0).unwrap().layout().is_none());
    }

    #[test]
    fn test_root_mut_edits_in_place() {
        let mut layout = viewport(50, 50);
        layout.set_root(leaf(1, 1));
        *layout.root_mut().unwrap().size_mut() = Size::absolute(5, 6);
        *layout.size_mut() = Size::absolute(60, 60);
        *layout.offset_mut() = Size::absolute(1, 1);
        let blocks = layout.generate().unwrap();
        assert_eq!(blocks[0].bounds, BBox::new(1, 1, 6, 7));
        assert_eq!(layout.size().resolve(0, 0), (60, 60));
        assert_eq!(layout.offset().resolve(0, 0), (1, 1));
    }

    #[test]
    fn test_swapped_root_handles_keep_back_references() {
        let mut a = viewport(10, 10);
        let mut b = viewport(10, 10);
        let mut flow = HorizontalFlow::new();
        flow.append(leaf(1, 1));
        a.set_root(flow);
        b.set_root(leaf(2, 2));

        let mut first = a.root_mut().unwrap();
        let mut second = b.root_mut().unwrap();
        std::mem::swap(&mut first, &mut second);
        *first.size_mut() = Size::absolute(7, 7);
        *second.size_mut() = Size::absolute(3, 3);

        let (a_root, b_root) = (a.root().unwrap(), b.root().unwrap());
        assert_eq!(a_root.layout(), Some(a.id()));
        assert_eq!(b_root.layout(), Some(b.id()));
        assert_eq!(a_root.size().resolve(0, 0), (3, 3));
        assert_eq!(b_root.size().resolve(0, 0), (7, 7));
        let child = a_root.as_horizontal_flow().unwrap().get(0).unwrap();
        assert_eq!(child.parent(), Some(a_root.id()));
        assert_eq!(child.layout(), Some(a.id()));
    }

    #[test]
    fn test_nested_handles_edit_in_place() {
        let mut layout = viewport(100, 100);
        let mut grid = Grid::with_dimensions(1, 1).with_size(Size::relative(1.0, 1.0));
        grid.insert(VerticalFlow::new().with_size(Size::relative(1.0, 1.0)), 0, 0)
            .unwrap();
        layout.set_root(grid);

        let mut grid = layout.root_mut().unwrap().into_grid().unwrap();
        let mut flow = grid.get_mut(0, 0).unwrap().unwrap().into_vertical_flow().unwrap();
        flow.set_horizontal_alignment(HorizontalAlignment::Right);
        let leaf_id = flow.append(leaf(10, 10)).id();
        let flow_id = flow.id();
        grid.insert_column(0);

        let root = layout.root().unwrap().as_grid().unwrap();
        let child = root.get(1, 0).unwrap().unwrap().as_vertical_flow().unwrap().get(0).unwrap();
        assert_eq!(child.id(), leaf_id);
        assert_eq!(child.parent(), Some(flow_id));
        assert_eq!(child.layout(), Some(layout.id()));

        let blocks = layout.generate().unwrap();
        // cells are 50 wide and the flow is divided down to 25
        assert_eq!(blocks[2].bounds, BBox::new(65, 0, 75, 10));
    }

    #[test]
    fn test_generate_saturates_extreme_sizes() {
        let mut layout = viewport(i32::MAX, 10).with_offset(Size::absolute(1, 0));
        let mut flow = HorizontalFlow::new().with_size(Size::relative(1.0, 1.0));
        flow.append(leaf(i32::MAX, 10));
        flow.append(
            leaf(i32::MAX, 10).with_outer_margin(Margin::absolute(i32::MAX, 0, i32::MAX, 0)),
        );
        layout.set_root(flow);

        let blocks = layout.generate().unwrap();
        assert_eq!(blocks[0].bounds, BBox::new(1, 0, i32::MAX, 10));
        assert_eq!(blocks[1].bounds, BBox::new(1, 0, i32::MAX, 10));
        assert_eq!(blocks[2].bounds, BBox::new(i32::MAX, 0, i32::MAX, 10));
        assert_eq!(blocks[0].child_bounds, BBox::new(1, 0, i32::MAX, 10));
    }

    #[test]
    fn test_generate_saturates_extreme_offsets() {
        let mut layout = viewport(100, 100).with_offset(Size::absolute(i32::MIN, i32::MAX));
        let mut grid = Grid::with_dimensions(2, 2)
            .with_size(Size::relative(1.0, 1.0))
            .with_outer_margin(Margin::absolute(-5, 5, 0, 0))
            .with_horizontal_alignment(HorizontalAlignment::Right);
        grid.insert(leaf(40, 40), 1, 1).unwrap();
        layout.set_root(grid);

        let blocks = layout.generate().unwrap();
        assert_eq!(blocks[0].bounds, BBox::new(i32::MIN, i32::MAX, i32::MIN + 100, i32::MAX));
        assert_eq!(blocks[0].bounds.height(), 0);
        assert_eq!(blocks.len(), 2);
    }

    // =========================================================================
    // Scenario Tests
    // =========================================================================

    #[test]
    fn test_horizontal_flow_scenario() {
        let mut layout = viewport(100, 100);
        let mut flow = HorizontalFlow::new().with_size(Size::relative(1.0, 1.0));
        flow.append(leaf(20, 10));
        flow.append(leaf(30, 10));
        layout.set_root(flow);

        let blocks = layout.generate().unwrap();
        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[0].bounds, BBox::new(0, 0, 100, 100));
        assert_eq!(blocks[1].bounds, BBox::new(0, 0, 20, 10));
        assert_eq!(blocks[2].bounds, BBox::new(20, 0, 50, 10));
        assert_eq!(blocks[0].children(), 1..3);
    }

    #[test]
    fn test_grid_scenario() {
        let mut layout = viewport(100, 100);
        let mut grid = Grid::with_dimensions(2, 2).with_size(Size::relative(1.0, 1.0));
        grid.insert(Leaf::new().with_size(Size::relative(1.0, 1.0)), 0, 0)
            .unwrap();
        layout.set_root(grid);

        let blocks = layout.generate().unwrap();
        assert_eq!(blocks[1].bounds, BBox::new(0, 0, 25, 25));
    }

    #[test]
    fn test_child_bounds_cover_overflowing_descendants() {
        let mut layout = viewport(100, 100);
        let mut outer = VerticalFlow::new().with_size(Size::absolute(50, 50));
        let mut inner = HorizontalFlow::new().with_size(Size::absolute(10, 10));
        inner.append(leaf(80, 5));
        outer.append(inner);
        layout.set_root(outer);

        let blocks = layout.generate().unwrap();
        assert_eq!(blocks[2].child_bounds, BBox::new(0, 0, 80, 5));
        assert_eq!(blocks[1].child_bounds, BBox::new(0, 0, 80, 10));
        assert_eq!(blocks[0].child_bounds, BBox::new(0, 0, 80, 50));
    }

    #[test]
    fn test_mixed_alignments_in_nested_tree() {
        let mut layout = viewport(100, 100);
        let mut grid = Grid::with_dimensions(1, 1)
            .with_size(Size::relative(1.0, 1.0))
            .with_horizontal_alignment(HorizontalAlignment::Right);
        let mut flow = VerticalFlow::new()
            .with_size(Size::absolute(40, 40))
            .with_horizontal_alignment(HorizontalAlignment::Center);
        flow.append(leaf(10, 10));
        grid.insert(flow, 0, 0).unwrap();
        layout.set_root(grid);

        let blocks = layout.generate().unwrap();
        assert_eq!(blocks[1].bounds, BBox::new(60, 0, 100, 40));
        assert_eq!(blocks[2].bounds, BBox::new(75, 0, 85, 10));
    }

    // =========================================================================
    // Property Tests
    // =========================================================================

    #[derive(Debug, Clone)]
    enum Shape {
        Leaf(i32, i32),
        Row(Vec<Shape>),
        Column(Vec<Shape>),
        Cells(usize, usize, Vec<Shape>),
    }

    fn shape() -> impl Strategy<Value = Shape> {
        let leaf = (0i32..40, 0i32..40).prop_map(|(w, h)| Shape::Leaf(w, h));
        leaf.prop_recursive(4, 48, 5, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..5).prop_map(Shape::Row),
                prop::collection::vec(inner.clone(), 0..5).prop_map(Shape::Column),
                (1usize..4, 1usize..4, prop::collection::vec(inner, 0..5))
                    .prop_map(|(c, r, children)| Shape::Cells(c, r, children)),
            ]
        })
    }

    fn build(shape: &Shape) -> Element {
        match shape {
            Shape::Leaf(w, h) => leaf(*w, *h).into(),
            Shape::Row(children) => {
                let mut flow = HorizontalFlow::new().with_size(Size::relative(1.0, 1.0));
                for child in children {
                    flow.append(build(child));
                }
                flow.into()
            }
            Shape::Column(children) => {
                let mut flow = VerticalFlow::new()
                    .try_with_vertical_alignment(VerticalAlignment::Bottom)
                    .unwrap()
                    .with_size(Size::absolute(60, 60));
                for child in children {
                    flow.append(build(child));
                }
                flow.into()
            }
            Shape::Cells(columns, rows, children) => {
                let mut grid = Grid::with_dimensions(*columns, *rows)
                    .with_size(Size::relative(0.5, 0.5))
                    .with_vertical_alignment(VerticalAlignment::Middle);
                for (index, child) in children.iter().enumerate().take(columns * rows) {
                    grid.insert(build(child), index % columns, index / columns).unwrap();
                }
                grid.into()
            }
        }
    }

    fn subtree_union(blocks: &[Block], index: usize) -> BBox {
        let block = blocks[index];
        block
            .children()
            .fold(block.bounds, |acc, child| acc + subtree_union(blocks, child))
    }

    proptest! {
        #[test]
        fn prop_generate_never_overflows(
            size in (any::<i32>(), any::<i32>()),
            offset in (any::<i32>(), any::<i32>()),
            child in (any::<i32>(), any::<i32>()),
            margin in (any::<i32>(), any::<i32>()),
        ) {
            let mut grid = Grid::with_dimensions(2, 2)
                .with_size(Size::relative(1.0, 1.0))
                .with_horizontal_alignment(HorizontalAlignment::Center)
                .with_vertical_alignment(VerticalAlignment::Bottom);
            let mut row = HorizontalFlow::new()
                .try_with_horizontal_alignment(HorizontalAlignment::Right)
                .unwrap()
                .with_size(Size::relative(1.0, 1.0))
                .with_inner_margin(Margin::absolute(margin.0, margin.1, margin.1, margin.0));
            let outer = Margin::absolute(margin.0, margin.1, margin.0, margin.1);
            row.append(leaf(child.0, child.1).with_outer_margin(outer));
            row.append(leaf(child.1, child.0));
            grid.insert(row, 1, 1).unwrap();
            grid.insert(leaf(child.0, child.1), 0, 0).unwrap();

            let mut layout = Layout::new()
                .with_size(Size::absolute(size.0, size.1))
                .with_offset(Size::absolute(offset.0, offset.1));
            layout.set_root(grid);
            let blocks = layout.generate().unwrap();
            prop_assert_eq!(blocks.len(), 5);
            prop_assert_eq!(blocks[0].child_bounds, subtree_union(&blocks, 0));
        }

        #[test]
        fn prop_block_count_matches_count_blocks(tree in shape()) {
            let root = build(&tree);
            let mut count = 0;
            root.count_blocks(&mut count);
            let mut layout = viewport(400, 300);
            layout.set_root(root);
            let blocks = layout.generate().unwrap();
            prop_assert_eq!(blocks.len(), count);
        }

        #[test]
        fn prop_children_follow_parent(tree in shape()) {
            let mut layout = viewport(400, 300);
            layout.set_root(build(&tree));
            let blocks = layout.generate().unwrap();
            for (index, block) in blocks.iter().enumerate() {
                prop_assert!(block.is_leaf() || block.first_child > index);
                prop_assert!(block.children().end <= blocks.len());
            }
        }

        #[test]
        fn prop_child_bounds_is_subtree_union(tree in shape()) {
            let mut layout = viewport(400, 300);
            layout.set_root(build(&tree));
            let blocks = layout.generate().unwrap();
            for index in 0..blocks.len() {
                prop_assert_eq!(blocks[index].child_bounds, subtree_union(&blocks, index));
            }
        }

        #[test]
        fn prop_left_flow_edges_accumulate(
            children in prop::collection::vec((0i32..50, 0i32..5, 0i32..5), 1..8),
            inset in 0i32..10,
        ) {
            let mut flow = HorizontalFlow::new()
                .with_size(Size::relative(1.0, 1.0))
                .with_inner_margin(Margin::absolute(inset, 0, 0, 0));
            for (width, left, right) in &children {
                flow.append(leaf(*width, 1).with_outer_margin(Margin::absolute(*left, 0, *right, 0)));
            }
            let mut layout = viewport(1000, 100);
            layout.set_root(flow);
            let blocks = layout.generate().unwrap();

            let mut expected = inset;
            for (index, (width, left, right)) in children.iter().enumerate() {
                prop_assert_eq!(blocks[index + 1].bounds.x0, expected + left);
                expected += left + width + right;
            }
        }
    }
}
