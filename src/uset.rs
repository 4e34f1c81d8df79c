use crate::crdt::Crdt;
use crate::error::CrdtError;
use crate::gset::GSet;
use crate::payload::Payload;

/// State of a [`USet`]: identical in shape to the 2P-Set's, with added
/// elements and removal tombstones as [`GSet`] payloads under derived
/// identities.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct USetContent<T: Ord> {
    added: GSet<T>,
    removed: GSet<T>,
}

/// A U-Set: a two-phase set whose `remove` is guarded.
///
/// Removing an element that is not in the local `added` set is a no-op and
/// returns the payload unchanged; no tombstone is recorded for elements
/// that were never observed as added. The guard reads only the local
/// payload, so `merge` remains a plain per-sub-set union; only the choice of
/// *when* `remove` mutates differs from [`TwoPSet`](crate::TwoPSet).
///
/// The guard is deliberately asymmetric: `add` is unguarded, so adding after
/// a removal still leaves the element hidden (the tombstone dominates
/// membership, as in the 2P-Set).
///
/// # Example
///
/// ```
/// use convergent::prelude::*;
///
/// let a = USet::initial("cart");
/// // Removing a never-added element leaves the state untouched.
/// let b = a.remove("ghost");
/// assert!(a.compare(&b)?);
/// # Ok::<(), convergent::CrdtError>(())
/// ```
pub type USet<T> = Payload<USetContent<T>>;

impl<T: Ord + Clone> USet<T> {
    /// Payload with empty added and removed sets.
    #[must_use]
    pub fn initial(id: impl Into<String>) -> Self {
        let id = id.into();
        let content = USetContent {
            added: GSet::initial(format!("{id}-added")),
            removed: GSet::initial(format!("{id}-removed")),
        };
        Payload::new(id, content)
    }

    /// New payload with `element` added.
    #[must_use]
    pub fn add(&self, element: T) -> Self {
        self.with_content(USetContent {
            added: self.content().added.add(element),
            removed: self.content().removed.clone(),
        })
    }

    /// New payload with a removal tombstone for `element`, if the element is
    /// in the local `added` set; otherwise the payload unchanged.
    #[must_use]
    pub fn remove(&self, element: T) -> Self {
        // Add takes precedence over remove.
        if !self.content().added.contains(&element) {
            return self.clone();
        }

        self.with_content(USetContent {
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

impl<T: Ord + Clone> Crdt for USet<T> {
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
        Ok(self.with_content(USetContent {
            added: self.content().added.merge(&other.content().added)?,
            removed: self.content().removed.merge(&other.content().removed)?,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_set_is_empty() {
        let a = USet::<String>::initial("cart");
        assert!(a.is_empty());
    }

    #[test]
    fn add_makes_element_visible() {
        let a = USet::initial("cart").add("meow");
        assert!(a.contains(&"meow"));
    }

    #[test]
    fn remove_hides_added_element() {
        let a = USet::initial("cart").add("meow").remove("meow");
        assert!(!a.contains(&"meow"));
    }

    #[test]
    fn removing_never_added_element_is_a_noop() {
        let a = USet::<&str>::initial("cart");
        let b = a.remove("meow");
        assert!(a.compare(&b).unwrap());
    }

    #[test]
    fn removing_already_removed_element_is_a_noop() {
        let a = USet::initial("cart").add("meow").remove("meow");
        let b = a.remove("meow");
        assert!(a.compare(&b).unwrap());
    }

    #[test]
    fn adding_already_added_element_keeps_state_equivalent() {
        let a = USet::initial("cart").add("meow");
        let b = a.add("meow");
        assert!(a.compare(&b).unwrap());
    }

    #[test]
    fn tombstone_still_dominates_readd() {
        let a = USet::initial("cart")
            .add("meow")
            .remove("meow")
            .add("meow");
        assert!(!a.contains(&"meow"));
    }

    #[test]
    fn merge_rejects_mismatched_identities() {
        let a = USet::<u32>::initial("cart");
        let b = USet::<u32>::initial("wishlist");
        assert!(matches!(
            a.merge(&b),
            Err(CrdtError::IdentityMismatch { .. })
        ));
    }

    #[test]
    fn merge_is_commutative() {
        let a = USet::initial("cart").add("meow");
        let b = USet::initial("cart").add("woof").remove("woof");

        let ab = a.merge(&b).unwrap();
        let ba = b.merge(&a).unwrap();
        assert!(ab.compare(&ba).unwrap());
    }

    #[test]
    fn merge_is_associative() {
        let a = USet::initial("cart").add("meow");
        let b = USet::initial("cart").add("woof").remove("woof");
        let c = USet::initial("cart").add("skrt");

        let left = a.merge(&b).unwrap().merge(&c).unwrap();
        let right = a.merge(&b.merge(&c).unwrap()).unwrap();
        assert!(left.compare(&right).unwrap());
    }

    #[test]
    fn merge_is_idempotent() {
        let a = USet::initial("cart").add("meow");
        let b = USet::initial("cart").add("woof").remove("woof");

        let ab = a.merge(&b).unwrap();
        let again_a = ab.merge(&a).unwrap();
        let again_b = ab.merge(&b).unwrap();
        assert!(ab.compare(&again_a).unwrap());
        assert!(ab.compare(&again_b).unwrap());
    }
}
