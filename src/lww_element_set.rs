use std::collections::BTreeSet;

use crate::clock::{Clock, Timestamp};
use crate::crdt::Crdt;
use crate::error::CrdtError;
use crate::payload::Payload;

/// A timestamped add or remove marker for a single element.
///
/// Ordered by `(timestamp, element)` so markers for the same element at
/// different instants coexist in the history.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
struct Entry<T> {
    timestamp: Timestamp,
    element: T,
}

/// State of an [`LWWElementSet`]: the full add and remove histories.
///
/// Both histories only grow; membership is a read-time projection over
/// them, not part of the lattice itself.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LWWElementSetContent<T: Ord> {
    added: BTreeSet<Entry<T>>,
    removed: BTreeSet<Entry<T>>,
}

/// A last-writer-wins element set (LWW-Element-Set).
///
/// Every `add` and `remove` records a timestamped marker; an element is a
/// member when its latest add is more recent than its latest remove. Because
/// both histories are grow-only, merge is a plain per-sub-set union and the
/// usual G-Set laws carry over. Unlike the 2P-Set, a removed element can be
/// re-added by writing a newer add marker.
///
/// # Example
///
/// ```
/// use convergent::clock::ManualClock;
/// use convergent::prelude::*;
///
/// let clock = ManualClock::starting_at(1);
/// let tags = LWWElementSet::initial("tags").add("rust", &clock);
///
/// clock.advance(1);
/// let tags = tags.remove("rust", &clock);
/// assert!(!tags.contains(&"rust"));
///
/// clock.advance(1);
/// let tags = tags.add("rust", &clock);
/// assert!(tags.contains(&"rust"));
/// ```
pub type LWWElementSet<T> = Payload<LWWElementSetContent<T>>;

impl<T: Ord + Clone> LWWElementSet<T> {
    /// Payload with empty add and remove histories.
    #[must_use]
    pub fn initial(id: impl Into<String>) -> Self {
        Payload::new(
            id,
            LWWElementSetContent {
                added: BTreeSet::new(),
                removed: BTreeSet::new(),
            },
        )
    }

    /// New payload with an add marker for `element` stamped with the
    /// current time.
    #[must_use]
    pub fn add(&self, element: T, clock: &impl Clock) -> Self {
        let mut added = self.content().added.clone();
        added.insert(Entry {
            timestamp: clock.now(),
            element,
        });
        self.with_content(LWWElementSetContent {
            added,
            removed: self.content().removed.clone(),
        })
    }

    /// New payload with a remove marker for `element` stamped with the
    /// current time.
    #[must_use]
    pub fn remove(&self, element: T, clock: &impl Clock) -> Self {
        let mut removed = self.content().removed.clone();
        removed.insert(Entry {
            timestamp: clock.now(),
            element,
        });
        self.with_content(LWWElementSetContent {
            added: self.content().added.clone(),
            removed,
        })
    }

    /// Check membership: the latest add marker for `element` is more recent
    /// than its latest remove marker.
    #[must_use]
    pub fn contains(&self, element: &T) -> bool {
        let latest_add = latest_timestamp(&self.content().added, element);
        let latest_remove = latest_timestamp(&self.content().removed, element);

        match (latest_add, latest_remove) {
            (None, _) => false,
            (Some(_), None) => true,
            (Some(add), Some(remove)) => add > remove,
        }
    }
}

fn latest_timestamp<T: Ord>(entries: &BTreeSet<Entry<T>>, element: &T) -> Option<Timestamp> {
    entries
        .iter()
        .filter(|entry| &entry.element == element)
        .map(|entry| entry.timestamp)
        .max()
}

impl<T: Ord + Clone> Crdt for LWWElementSet<T> {
    fn compare(&self, other: &Self) -> Result<bool, CrdtError> {
        self.ensure_same_identity(other)?;
        if std::ptr::eq(self, other) {
            return Ok(true);
        }
        Ok(self.content() == other.content())
    }

    fn merge(&self, other: &Self) -> Result<Self, CrdtError> {
        self.ensure_same_identity(other)?;
        Ok(self.with_content(LWWElementSetContent {
            added: self
                .content()
                .added
                .union(&other.content().added)
                .cloned()
                .collect(),
            removed: self
                .content()
                .removed
                .union(&other.content().removed)
                .cloned()
                .collect(),
        }))
    }
}
