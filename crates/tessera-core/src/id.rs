//! Process-unique identifiers for elements and layouts.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Shared counter; elements and layouts draw from the same sequence.
static NEXT_ID: AtomicU64 = AtomicU64::new(1);

fn next_raw() -> u64 {
    NEXT_ID.fetch_add(1, Ordering::Relaxed)
}

/// Unique identifier of an element instance.
///
/// Every constructed or cloned element gets a fresh id; ids are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ElementId(u64);

impl ElementId {
    /// Allocate a new id.
    #[must_use]
    pub fn next() -> Self {
        Self(next_raw())
    }

    /// Raw value.
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "element#{}", self.0)
    }
}

/// Unique identifier of a layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LayoutId(u64);

impl LayoutId {
    /// Allocate a new id.
    #[must_use]
    pub fn next() -> Self {
        Self(next_raw())
    }

    /// Raw value.
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for LayoutId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "layout#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_element_ids_are_unique() {
        let ids: HashSet<_> = (0..1000).map(|_| ElementId::next()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn test_ids_increase() {
        let a = ElementId::next();
        let b = ElementId::next();
        assert!(b > a);
    }

    #[test]
    fn test_layout_and_element_ids_never_collide() {
        let layout = LayoutId::next();
        let element = ElementId::next();
        assert_ne!(layout.get(), element.get());
    }

    #[test]
    fn test_id_display() {
        let id = ElementId::next();
        assert_eq!(id.to_string(), format!("element#{}", id.get()));
    }
}
