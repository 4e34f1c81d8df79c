use crate::crdt::Crdt;
use crate::error::CrdtError;
use crate::gset::GSet;
use crate::payload::Payload;

/// State of a [`TwoPSet`]: added elements and removal tombstones, each a
/// [`GSet`] payload with a derived identity (`"{id}-added"`,
/// `"{id}-removed"`).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TwoPSetContent<T: Ord> {
    added: GSet<T>,
    removed: GSet<T>,
}

/// A two-phase set (2P-Set).
///
/// Elements can be added and removed, but removal is permanent: membership
/// is `added && !removed`, and because the tombstone set only grows, a
/// removed element can never become visible again, even if re-added later
/// on any replica. `remove` records a tombstone unconditionally, whether or
/// not the element was ever added; see [`USet`](crate::USet) for the guarded
/// variant.
///
/// # Example
///
/// ```
/// use convergent::prelude::*;
///
/// let a = TwoPSet::initial("cart").add("apple").add("banana").remove("banana");
/// assert!(a.contains(&"apple"));
/// assert!(!a.contains(&"banana"));
///
/// // A concurrent re-add on another replica does not resurrect it.
/// let b = TwoPSet::initial("cart").add("banana");
/// let merged = a.merge(&b)?;
/// assert!(!merged.contains(&"banana"));
/// # Ok::<(), convergent::CrdtError>(())
/// ```
pub type TwoPSet<T> = Payload<TwoPSetContent<T>>;

impl<T: Ord + Clone> TwoPSet<T> {
    /// Payload with empty added and removed sets.
    #[must_use]
    pub fn initial(id: impl Into<String>) -> Self {
        let id = id.into();
        let content = TwoPSetContent {
            added: GSet::initial(format!("{id}-added")),
            removed: GSet::initial(format!("{id}-removed")),
        };
        Payload::new(id, content)
    }

    /// New payload with `element` added.
    #[must_use]
    pub fn add(&self, element: T) -> Self {
        self.with_content(TwoPSetContent {
            added: self.content().added.add(element),
            removed: self.content().removed.clone(),
        })
    }

    /// New payload with a removal tombstone for `element`.
    ///
    /// The tombstone is recorded unconditionally, even for elements that
    /// were never added.
    #[must_use]
    pub fn remove(&self, element: T) -> Self {
        self.with_content(TwoPSetContent {
            added: self.content().added.clone(),
            removed: self.content().removed.add(element),
        })
    }

    /// Check membership: added and not removed.
    #[must_use]
    pub fn contains(&self, element: &T) -> bool {
        if self.content().removed.contains(element) {
            return false;
        }
        self.content().added.contains(element)
    }

    /// Number of visible elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Check whether the set has no visible elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate over visible elements (added and not removed) in ascending
    /// order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.content()
            .added
            .elements()
            .difference(self.content().removed.elements())
    }
}

impl<T: Ord + Clone> Crdt for TwoPSet<T> {
    fn compare(&self, other: &Self) -> Result<bool, CrdtError> {
        self.ensure_same_identity(other)?;
        if std::ptr::eq(self, other) {
            return Ok(true);
        }
        Ok(self.content().added.compare(&other.content().added)?
            && self.content().removed.compare(&other.content().removed)?)
    }

    fn merge(&self, other: &Self) -> Result<Self, CrdtError> {
        self.ensure_same_identity(other)?;
        Ok(self.with_content(TwoPSetContent {
            added: self.content().added.merge(&other.content().added)?,
            removed: self.content().removed.merge(&other.content().removed)?,
        }))
    }
}
