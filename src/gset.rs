use std::collections::BTreeSet;

use crate::crdt::Crdt;
use crate::error::CrdtError;
use crate::payload::Payload;

/// State of a [`GSet`]: a monotonically growing element set.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GSetContent<T: Ord> {
    elements: BTreeSet<T>,
}

/// A grow-only set (G-Set).
///
/// Elements can be added but never removed; merge is set union. Union is
/// commutative, associative, and idempotent by construction, making this the
/// simplest set CRDT and the building block for the removal-capable sets.
///
/// # Example
///
/// ```
/// use convergent::prelude::*;
///
/// let a = GSet::initial("fruit").add("apple").add("banana");
/// let b = GSet::initial("fruit").add("cherry");
///
/// let merged = a.merge(&b)?;
/// assert_eq!(merged.len(), 3);
/// assert!(merged.contains(&"cherry"));
/// # Ok::<(), convergent::CrdtError>(())
/// ```
pub type GSet<T> = Payload<GSetContent<T>>;

impl<T: Ord + Clone> GSet<T> {
    /// Payload with an empty element set.
    #[must_use]
    pub fn initial(id: impl Into<String>) -> Self {
        Payload::new(
            id,
            GSetContent {
                elements: BTreeSet::new(),
            },
        )
    }

    /// New payload with `element` added.
    #[must_use]
    pub fn add(&self, element: T) -> Self {
        let mut elements = self.content().elements.clone();
        elements.insert(element);
        self.with_content(GSetContent { elements })
    }

    /// Check whether the set contains `element`.
    #[must_use]
    pub fn contains(&self, element: &T) -> bool {
        self.content().elements.contains(element)
    }

    /// Number of elements in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.content().elements.len()
    }

    /// Check whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content().elements.is_empty()
    }

    /// Iterate over the elements in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.content().elements.iter()
    }

    pub(crate) fn elements(&self) -> &BTreeSet<T> {
        &self.content().elements
    }
}

impl<T: Ord + Clone> Crdt for GSet<T> {
    fn compare(&self, other: &Self) -> Result<bool, CrdtError> {
        self.ensure_same_identity(other)?;
        if std::ptr::eq(self, other) {
            return Ok(true);
        }
        Ok(self.content() == other.content())
    }

    fn merge(&self, other: &Self) -> Result<Self, CrdtError> {
        self.ensure_same_identity(other)?;
        let elements = self
            .content()
            .elements
            .union(&other.content().elements)
            .cloned()
            .collect();
        Ok(self.with_content(GSetContent { elements }))
    }
}
