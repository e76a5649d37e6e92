//! Ordered child sequence shared by both flow containers.

use tessera_core::{BBox, ElementId, LayoutError, LayoutId, Result};
use tracing::trace;

use crate::block::Block;
use crate::element::{rejected, Element, ElementBase, LayoutNode};
use crate::handle::{ElementMut, NodeMut};

/// Error for a centered alignment on a flow's own axis.
pub(crate) fn unsupported_alignment(
    operation: &'static str,
    container: &'static str,
    alignment: &'static str,
) -> LayoutError {
    rejected(LayoutError::InvalidAlignment {
        operation,
        container,
        alignment,
    })
}

/// Gap-free sequence of children owned by a flow.
#[derive(Debug, Default)]
pub(crate) struct FlowChildren {
    elements: Vec<Element>,
}

impl FlowChildren {
    /// Attach `element` to `owner` and insert it at `index`, clamped to
    /// the current length.
    pub(crate) fn insert(
        &mut self,
        owner: &ElementBase,
        mut element: Element,
        index: usize,
    ) -> ElementMut<'_> {
        let index = index.min(self.elements.len());
        element.attach(owner);
        trace!(index, element = %element.id(), len = self.elements.len() + 1, "flow child inserted");
        self.elements.insert(index, element);
        NodeMut::new(&mut self.elements[index])
    }

    pub(crate) fn get(&self, index: usize) -> Result<&Element> {
        LayoutError::check_index("get", "element", index, self.elements.len()).map_err(rejected)?;
        Ok(&self.elements[index])
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> Result<ElementMut<'_>> {
        LayoutError::check_index("get", "element", index, self.elements.len()).map_err(rejected)?;
        Ok(NodeMut::new(&mut self.elements[index]))
    }

    fn take(&mut self, operation: &'static str, index: usize) -> Result<Element> {
        LayoutError::check_index(operation, "element", index, self.elements.len())
            .map_err(rejected)?;
        let element = self.elements.remove(index);
        trace!(index, len = self.elements.len(), "flow child removed");
        Ok(element)
    }

    pub(crate) fn remove(&mut self, index: usize) -> Result<()> {
        drop(self.take("remove", index)?);
        Ok(())
    }

    pub(crate) fn extract(&mut self, index: usize) -> Result<Element> {
        let mut element = self.take("extract", index)?;
        element.detach();
        Ok(element)
    }

    pub(crate) fn len(&self) -> usize {
        self.elements.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub(crate) fn iter(&self) -> std::slice::Iter<'_, Element> {
        self.elements.iter()
    }

    pub(crate) fn set_layout(&mut self, layout: Option<LayoutId>) {
        for element in &mut self.elements {
            element.set_layout(layout);
        }
    }

    pub(crate) fn count_blocks(&self, count: &mut usize) {
        for element in &self.elements {
            element.count_blocks(count);
        }
    }

    /// Append one block per child using `place` for its bounds, link them
    /// from the block at `own`, then recurse into each child.
    pub(crate) fn generate(
        &self,
        blocks: &mut Vec<Block>,
        own: usize,
        mut place: impl FnMut(&Element) -> BBox,
    ) -> Result<()> {
        let first_child = blocks.len();
        let mut direct = BBox::EMPTY;
        for element in &self.elements {
            let bounds = place(element);
            direct += bounds;
            blocks.push(Block::new(element.id(), bounds));
        }

        let block = &mut blocks[own];
        block.first_child = first_child;
        block.child_count = self.elements.len();
        block.child_bounds = direct;

        for (offset, element) in self.elements.iter().enumerate() {
            element.generate(blocks, first_child + offset)?;
        }
        Ok(())
    }

    pub(crate) fn clone_to(&self, layout: Option<LayoutId>, parent: ElementId) -> Self {
        Self {
            elements: self
                .elements
                .iter()
                .map(|element| element.clone_to(layout, Some(parent)))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::Leaf;

    fn ids(children: &FlowChildren) -> Vec<ElementId> {
        children.iter().map(<Element as LayoutNode>::id).collect()
    }

    #[test]
    fn test_insert_clamps_and_attaches() {
        let owner = ElementBase::new();
        let mut children = FlowChildren::default();
        let a = children.insert(&owner, Leaf::new().into(), 0).id();
        let b = children.insert(&owner, Leaf::new().into(), 99).id();
        let c = children.insert(&owner, Leaf::new().into(), 1).id();
        assert_eq!(ids(&children), vec![a, c, b]);
        assert!(children.iter().all(|e| e.parent() == Some(owner.id())));
    }

    #[test]
    fn test_out_of_range_is_rejected_without_change() {
        let owner = ElementBase::new();
        let mut children = FlowChildren::default();
        children.insert(&owner, Leaf::new().into(), 0);
        assert!(children.get(1).is_err());
        assert!(children.get_mut(1).is_err());
        assert!(matches!(
            children.remove(3),
            Err(LayoutError::IndexOutOfRange { operation: "remove", index: 3, len: 1, .. })
        ));
        assert!(children.extract(1).is_err());
        assert_eq!(children.len(), 1);
    }

    #[test]
    fn test_extract_detaches() {
        let owner = ElementBase::new();
        let mut children = FlowChildren::default();
        let id = children.insert(&owner, Leaf::new().into(), 0).id();
        let element = children.extract(0).unwrap();
        assert_eq!(element.id(), id);
        assert!(element.parent().is_none());
        assert!(children.is_empty());
    }

    #[test]
    fn test_clone_reparents() {
        let owner = ElementBase::new();
        let mut children = FlowChildren::default();
        children.insert(&owner, Leaf::new().into(), 0);
        let new_parent = ElementId::next();
        let copy = children.clone_to(None, new_parent);
        assert_eq!(copy.len(), 1);
        assert_eq!(copy.get(0).unwrap().parent(), Some(new_parent));
        assert_ne!(copy.get(0).unwrap().id(), children.get(0).unwrap().id());
    }
}
