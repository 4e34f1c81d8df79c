use std::collections::BTreeMap;

use crate::crdt::Crdt;
use crate::error::CrdtError;
use crate::payload::Payload;

/// State of a [`GCounter`]: one monotonically non-decreasing count per
/// process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GCounterContent {
    counts: BTreeMap<String, u64>,
}

/// A grow-only counter (G-Counter).
///
/// Each process increments its own entry; the counter value is the sum of
/// all entries. Merge takes the pointwise maximum per process, which is the
/// canonical join for per-process monotonic counters.
///
/// # Example
///
/// ```
/// use convergent::prelude::*;
///
/// let a = GCounter::initial("hits").increment("p1").increment("p1");
/// let b = GCounter::initial("hits").increment("p2");
///
/// let merged = a.merge(&b)?;
/// assert_eq!(merged.value(), 3);
/// # Ok::<(), convergent::CrdtError>(())
/// ```
pub type GCounter = Payload<GCounterContent>;

impl GCounter {
    /// Payload with an empty count map.
    #[must_use]
    pub fn initial(id: impl Into<String>) -> Self {
        Payload::new(id, GCounterContent::default())
    }

    /// New payload with the count for `process_id` increased by 1.
    ///
    /// All other entries are unchanged.
    #[must_use]
    pub fn increment(&self, process_id: &str) -> Self {
        let mut counts = self.content().counts.clone();
        *counts.entry(process_id.to_owned()).or_insert(0) += 1;
        self.with_content(GCounterContent { counts })
    }

    /// Total count across all processes.
    #[must_use]
    pub fn value(&self) -> u64 {
        self.content().counts.values().sum()
    }

    /// Count recorded for a single process.
    #[must_use]
    pub fn count_for(&self, process_id: &str) -> u64 {
        self.content().counts.get(process_id).copied().unwrap_or(0)
    }
}

impl Crdt for GCounter {
    fn compare(&self, other: &Self) -> Result<bool, CrdtError> {
        self.ensure_same_identity(other)?;
        if std::ptr::eq(self, other) {
            return Ok(true);
        }
        // Equal iff both maps record the same processes with the same counts.
        Ok(self.content() == other.content())
    }

    fn merge(&self, other: &Self) -> Result<Self, CrdtError> {
        self.ensure_same_identity(other)?;
        let mut counts = self.content().counts.clone();
        for (process_id, &count) in &other.content().counts {
            let entry = counts.entry(process_id.clone()).or_insert(0);
            *entry = (*entry).max(count);
        }
        Ok(self.with_content(GCounterContent { counts }))
    }
}
