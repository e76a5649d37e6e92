//! Grid container.
//!
//! A grid holds `rows × columns` optional children in row-major order and
//! splits its content area into equal cells. Cell sizes use integer
//! division, so up to `columns - 1` pixels of width (and `rows - 1` of
//! height) are left unused on the trailing side.

use tessera_core::{
    BBox, ElementId, HorizontalAlignment, LayoutError, LayoutId, Result, VerticalAlignment,
};
use tracing::trace;

use crate::block::Block;
use crate::element::{rejected, sealed::{BaseMut, Token}, Element, ElementBase, LayoutNode};
use crate::handle::{ElementMut, GridMut, NodeMut};
use crate::placement::{Anchor, ContentBox};

/// Container placing children in a fixed matrix of cells.
#[derive(Debug)]
pub struct Grid {
    base: ElementBase,
    horizontal_alignment: HorizontalAlignment,
    vertical_alignment: VerticalAlignment,
    row_count: usize,
    column_count: usize,
    cells: Vec<Option<Element>>,
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl Grid {
    /// Create an empty grid with no rows or columns.
    #[must_use]
    pub fn new() -> Self {
        Self {
            base: ElementBase::new(),
            horizontal_alignment: HorizontalAlignment::default(),
            vertical_alignment: VerticalAlignment::default(),
            row_count: 0,
            column_count: 0,
            cells: Vec::new(),
        }
    }

    /// Create a grid with every cell empty.
    #[must_use]
    pub fn with_dimensions(columns: usize, rows: usize) -> Self {
        let mut grid = Self::new();
        grid.column_count = columns;
        grid.row_count = rows;
        grid.cells.resize_with(columns * rows, || None);
        grid
    }

    /// Set horizontal alignment of children within their cells.
    #[must_use]
    pub const fn with_horizontal_alignment(mut self, alignment: HorizontalAlignment) -> Self {
        self.horizontal_alignment = alignment;
        self
    }

    /// Set vertical alignment of children within their cells.
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

    /// Set horizontal alignment. Every option is valid for a grid.
    pub fn set_horizontal_alignment(&mut self, alignment: HorizontalAlignment) {
        self.horizontal_alignment = alignment;
    }

    /// Set vertical alignment. Every option is valid for a grid.
    pub fn set_vertical_alignment(&mut self, alignment: VerticalAlignment) {
        self.vertical_alignment = alignment;
    }

    /// Number of rows.
    #[must_use]
    pub const fn row_count(&self) -> usize {
        self.row_count
    }

    /// Number of columns.
    #[must_use]
    pub const fn column_count(&self) -> usize {
        self.column_count
    }

    // -------------------------------------------------------------------------
    // Rows and columns
    // -------------------------------------------------------------------------

    /// Insert an empty row before row `y`. `y` is clamped to the row count.
    pub fn insert_row(&mut self, y: usize) {
        let y = y.min(self.row_count);
        let columns = self.column_count;
        self.cells.resize_with(self.cells.len() + columns, || None);
        self.cells[y * columns..].rotate_right(columns);
        self.row_count += 1;
        trace!(row = y, rows = self.row_count, "grid row inserted");
    }

    /// Insert an empty row after the last one.
    pub fn append_row(&mut self) {
        self.insert_row(self.row_count);
    }

    /// Insert an empty row before the first one.
    pub fn prepend_row(&mut self) {
        self.insert_row(0);
    }

    /// Insert an empty column before column `x`. `x` is clamped to the
    /// column count.
    ///
    /// Every row changes stride, so the whole backing store is rebuilt.
    pub fn insert_column(&mut self, x: usize) {
        let x = x.min(self.column_count);
        let columns = self.column_count;
        let mut old = std::mem::take(&mut self.cells).into_iter();
        self.cells = Vec::with_capacity(self.row_count * (columns + 1));
        for _ in 0..self.row_count {
            self.cells.extend(old.by_ref().take(x));
            self.cells.push(None);
            self.cells.extend(old.by_ref().take(columns - x));
        }
        self.column_count += 1;
        trace!(column = x, columns = self.column_count, "grid column inserted");
    }

    /// Insert an empty column after the last one.
    pub fn append_column(&mut self) {
        self.insert_column(self.column_count);
    }

    /// Insert an empty column before the first one.
    pub fn prepend_column(&mut self) {
        self.insert_column(0);
    }

    /// Remove row `y`, dropping its elements.
    pub fn remove_row(&mut self, y: usize) -> Result<()> {
        drop(self.take_row("remove", y)?);
        Ok(())
    }

    /// Remove column `x`, dropping its elements.
    pub fn remove_column(&mut self, x: usize) -> Result<()> {
        drop(self.take_column("remove", x)?);
        Ok(())
    }

    /// Remove row `y` and return its cells in column order, detached.
    pub fn extract_row(&mut self, y: usize) -> Result<Vec<Option<Element>>> {
        let mut row = self.take_row("extract", y)?;
        row.iter_mut().flatten().for_each(Element::detach);
        Ok(row)
    }

    /// Remove column `x` and return its cells in row order, detached.
    pub fn extract_column(&mut self, x: usize) -> Result<Vec<Option<Element>>> {
        let mut column = self.take_column("extract", x)?;
        column.iter_mut().flatten().for_each(Element::detach);
        Ok(column)
    }

    /// Remove every row, column and element.
    pub fn clear(&mut self) {
        self.cells.clear();
        self.row_count = 0;
        self.column_count = 0;
        trace!("grid cleared");
    }

    fn take_row(&mut self, operation: &'static str, y: usize) -> Result<Vec<Option<Element>>> {
        LayoutError::check_index(operation, "row", y, self.row_count).map_err(rejected)?;
        let columns = self.column_count;
        let row = self.cells.drain(y * columns..(y + 1) * columns).collect();
        self.row_count -= 1;
        trace!(row = y, rows = self.row_count, "grid row removed");
        Ok(row)
    }

    fn take_column(&mut self, operation: &'static str, x: usize) -> Result<Vec<Option<Element>>> {
        LayoutError::check_index(operation, "column", x, self.column_count).map_err(rejected)?;
        let columns = self.column_count;
        let old = std::mem::take(&mut self.cells);
        let mut column = Vec::with_capacity(self.row_count);
        self.cells = Vec::with_capacity(self.row_count * (columns - 1));
        for (index, cell) in old.into_iter().enumerate() {
            if index % columns == x {
                column.push(cell);
            } else {
                self.cells.push(cell);
            }
        }
        self.column_count -= 1;
        trace!(column = x, columns = self.column_count, "grid column removed");
        Ok(column)
    }

    // -------------------------------------------------------------------------
    // Cells
    // -------------------------------------------------------------------------

    fn check_cell(&self, operation: &'static str, x: usize, y: usize) -> Result<usize> {
        LayoutError::check_index(operation, "column", x, self.column_count)
            .and_then(|()| LayoutError::check_index(operation, "row", y, self.row_count))
            .map_err(rejected)?;
        Ok(y * self.column_count + x)
    }

    /// Element at column `x`, row `y`, if the cell is occupied.
    pub fn get(&self, x: usize, y: usize) -> Result<Option<&Element>> {
        let index = self.check_cell("get", x, y)?;
        Ok(self.cells[index].as_ref())
    }

    /// Handle to the element at column `x`, row `y`, if the cell is
    /// occupied.
    pub fn get_mut(&mut self, x: usize, y: usize) -> Result<Option<ElementMut<'_>>> {
        let index = self.check_cell("get", x, y)?;
        Ok(self.cells[index].as_mut().map(NodeMut::new))
    }

    /// Put `element` in the cell at column `x`, row `y`, dropping any
    /// previous occupant. Returns a handle to the element in its new place.
    pub fn insert(
        &mut self,
        element: impl Into<Element>,
        x: usize,
        y: usize,
    ) -> Result<ElementMut<'_>> {
        let index = self.check_cell("insert", x, y)?;
        let mut element = element.into();
        element.attach(&self.base);
        trace!(x, y, element = %element.id(), "grid cell filled");
        Ok(NodeMut::new(self.cells[index].insert(element)))
    }

    /// Drop the element at column `x`, row `y`.
    pub fn remove(&mut self, x: usize, y: usize) -> Result<()> {
        let index = self.check_cell("remove", x, y)?;
        drop(self.cells[index].take());
        Ok(())
    }

    /// Take the element at column `x`, row `y` out of the grid, detached.
    pub fn extract(&mut self, x: usize, y: usize) -> Result<Option<Element>> {
        let index = self.check_cell("extract", x, y)?;
        let mut element = self.cells[index].take();
        if let Some(element) = element.as_mut() {
            element.detach();
        }
        Ok(element)
    }

    /// Occupied cells as `(x, y, element)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &Element)> {
        let columns = self.column_count;
        self.cells.iter().enumerate().filter_map(move |(index, cell)| {
            cell.as_ref()
                .map(|element| (index % columns, index / columns, element))
        })
    }

    pub(crate) fn set_layout(&mut self, layout: Option<LayoutId>) {
        self.base.set_layout(layout);
        for child in self.cells.iter_mut().flatten() {
            child.set_layout(layout);
        }
    }

    fn place_child(&self, child: &Element, x: usize, y: usize, content: &ContentBox) -> BBox {
        let columns = count_to_i32(self.column_count);
        let rows = count_to_i32(self.row_count);
        let cell_width = content.width / columns;
        let cell_height = content.height / rows;
        let cell_x = content.x0.saturating_add(count_to_i32(x).saturating_mul(cell_width));
        let cell_y = content.y0.saturating_add(count_to_i32(y).saturating_mul(cell_height));

        let (width, height) = child.size().resolve(cell_width, cell_height);
        let margin = child.outer_margin();

        let horizontal = match self.horizontal_alignment {
            HorizontalAlignment::Left => Anchor::Start(cell_x),
            HorizontalAlignment::Center => Anchor::Middle(cell_x.saturating_add(cell_width / 2)),
            HorizontalAlignment::Right => Anchor::End(cell_x.saturating_add(cell_width)),
        };
        let (x0, x1) = horizontal.place(
            width / columns,
            margin.left.resolve(cell_width),
            margin.right.resolve(cell_width),
        );

        let vertical = match self.vertical_alignment {
            VerticalAlignment::Top => Anchor::Start(cell_y),
            VerticalAlignment::Middle => Anchor::Middle(cell_y.saturating_add(cell_height / 2)),
            VerticalAlignment::Bottom => Anchor::End(cell_y.saturating_add(cell_height)),
        };
        let (y0, y1) = vertical.place(
            height / rows,
            margin.top.resolve(cell_height),
            margin.bottom.resolve(cell_height),
        );

        BBox::new(x0, y0, x1, y1)
    }
}

fn count_to_i32(count: usize) -> i32 {
    i32::try_from(count).unwrap_or(i32::MAX)
}

/// In-tree editing; each method behaves like its [`Grid`] counterpart.
impl GridMut<'_> {
    /// See [`Grid::set_horizontal_alignment`].
    pub fn set_horizontal_alignment(&mut self, alignment: HorizontalAlignment) {
        self.node_mut().set_horizontal_alignment(alignment);
    }

    /// See [`Grid::set_vertical_alignment`].
    pub fn set_vertical_alignment(&mut self, alignment: VerticalAlignment) {
        self.node_mut().set_vertical_alignment(alignment);
    }

    /// See [`Grid::insert_row`].
    pub fn insert_row(&mut self, y: usize) {
        self.node_mut().insert_row(y);
    }

    /// See [`Grid::append_row`].
    pub fn append_row(&mut self) {
        self.node_mut().append_row();
    }

    /// See [`Grid::prepend_row`].
    pub fn prepend_row(&mut self) {
        self.node_mut().prepend_row();
    }

    /// See [`Grid::insert_column`].
    pub fn insert_column(&mut self, x: usize) {
        self.node_mut().insert_column(x);
    }

    /// See [`Grid::append_column`].
    pub fn append_column(&mut self) {
        self.node_mut().append_column();
    }

    /// See [`Grid::prepend_column`].
    pub fn prepend_column(&mut self) {
        self.node_mut().prepend_column();
    }

    /// See [`Grid::remove_row`].
    pub fn remove_row(&mut self, y: usize) -> Result<()> {
        self.node_mut().remove_row(y)
    }

    /// See [`Grid::remove_column`].
    pub fn remove_column(&mut self, x: usize) -> Result<()> {
        self.node_mut().remove_column(x)
    }

    /// See [`Grid::extract_row`].
    pub fn extract_row(&mut self, y: usize) -> Result<Vec<Option<Element>>> {
        self.node_mut().extract_row(y)
    }

    /// See [`Grid::extract_column`].
    pub fn extract_column(&mut self, x: usize) -> Result<Vec<Option<Element>>> {
        self.node_mut().extract_column(x)
    }

    /// See [`Grid::clear`].
    pub fn clear(&mut self) {
        self.node_mut().clear();
    }

    /// See [`Grid::get_mut`].
    pub fn get_mut(&mut self, x: usize, y: usize) -> Result<Option<ElementMut<'_>>> {
        self.node_mut().get_mut(x, y)
    }

    /// See [`Grid::insert`].
    pub fn insert(
        &mut self,
        element: impl Into<Element>,
        x: usize,
        y: usize,
    ) -> Result<ElementMut<'_>> {
        self.node_mut().insert(element, x, y)
    }

    /// See [`Grid::remove`].
    pub fn remove(&mut self, x: usize, y: usize) -> Result<()> {
        self.node_mut().remove(x, y)
    }

    /// See [`Grid::extract`].
    pub fn extract(&mut self, x: usize, y: usize) -> Result<Option<Element>> {
        self.node_mut().extract(x, y)
    }
}

impl BaseMut for Grid {
    fn base_mut(&mut self, _: Token) -> &mut ElementBase {
        &mut self.base
    }
}

impl LayoutNode for Grid {
    fn base(&self) -> &ElementBase {
        &self.base
    }

    fn count_blocks(&self, count: &mut usize) {
        *count += 1;
        for child in self.cells.iter().flatten() {
            child.count_blocks(count);
        }
    }

    fn generate(&self, blocks: &mut Vec<Block>, own: usize) -> Result<()> {
        let content = ContentBox::new(&blocks[own].bounds, self.inner_margin());
        let first_child = blocks.len();
        let mut direct = BBox::EMPTY;

        for (x, y, child) in self.iter() {
            let bounds = self.place_child(child, x, y, &content);
            direct += bounds;
            blocks.push(Block::new(child.id(), bounds));
        }

        let child_count = blocks.len() - first_child;
        let block = &mut blocks[own];
        block.first_child = first_child;
        block.child_count = child_count;
        block.child_bounds = direct;

        for (offset, child) in self.cells.iter().flatten().enumerate() {
            child.generate(blocks, first_child + offset)?;
        }
        Ok(())
    }

    fn clone_to(&self, layout: Option<LayoutId>, parent: Option<ElementId>) -> Self {
        let base = self.base.duplicate(layout, parent);
        let id = base.id();
        Self {
            base,
            horizontal_alignment: self.horizontal_alignment,
            vertical_alignment: self.vertical_alignment,
            row_count: self.row_count,
            column_count: self.column_count,
            cells: self
                .cells
                .iter()
                .map(|cell| cell.as_ref().map(|child| child.clone_to(layout, Some(id))))
                .collect(),
        }
    }
}
