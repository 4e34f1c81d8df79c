use crate::crdt::Crdt;
use crate::error::CrdtError;
use crate::gcounter::GCounter;
use crate::payload::Payload;

/// State of a [`PNCounter`]: two independent G-Counter payloads.
///
/// The sub-payloads carry derived identities (`"{id}-positive"` and
/// `"{id}-negative"`), so their own identity guards keep holding through
/// component-wise merges.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PNCounterContent {
    positive: GCounter,
    negative: GCounter,
}

/// A positive-negative counter (PN-Counter).
///
/// Supports both increment and decrement by pairing two [`GCounter`]s; the
/// value is `positive - negative`. Each sub-counter is a join-semilattice
/// and the merge is component-wise, so the pair is one as well.
///
/// # Example
///
/// ```
/// use convergent::prelude::*;
///
/// let a = PNCounter::initial("stock")
///     .increment("p1")
///     .increment("p1")
///     .decrement("p1");
/// assert_eq!(a.value(), 1);
///
/// let b = PNCounter::initial("stock").decrement("p2");
///
/// let merged = a.merge(&b)?;
/// assert_eq!(merged.value(), 0);
/// # Ok::<(), convergent::CrdtError>(())
/// ```
pub type PNCounter = Payload<PNCounterContent>;

impl PNCounter {
    /// Payload with two empty sub-counters.
    #[must_use]
    pub fn initial(id: impl Into<String>) -> Self {
        let id = id.into();
        let content = PNCounterContent {
            positive: GCounter::initial(format!("{id}-positive")),
            negative: GCounter::initial(format!("{id}-negative")),
        };
        Payload::new(id, content)
    }

    /// New payload with the positive count for `process_id` increased by 1.
    #[must_use]
    pub fn increment(&self, process_id: &str) -> Self {
        self.with_content(PNCounterContent {
            positive: self.content().positive.increment(process_id),
            negative: self.content().negative.clone(),
        })
    }

    /// New payload with the negative count for `process_id` increased by 1.
    #[must_use]
    pub fn decrement(&self, process_id: &str) -> Self {
        self.with_content(PNCounterContent {
            positive: self.content().positive.clone(),
            negative: self.content().negative.increment(process_id),
        })
    }

    /// Current value: total increments minus total decrements.
    #[must_use]
    pub fn value(&self) -> i64 {
        self.content().positive.value() as i64 - self.content().negative.value() as i64
    }
}

impl Crdt for PNCounter {
    fn compare(&self, other: &Self) -> Result<bool, CrdtError> {
        self.ensure_same_identity(other)?;
        if std::ptr::eq(self, other) {
            return Ok(true);
        }
        Ok(self.content().positive.compare(&other.content().positive)?
            && self.content().negative.compare(&other.content().negative)?)
    }

    fn merge(&self, other: &Self) -> Result<Self, CrdtError> {
        self.ensure_same_identity(other)?;
        Ok(self.with_content(PNCounterContent {
            positive: self.content().positive.merge(&other.content().positive)?,
            negative: self.content().negative.merge(&other.content().negative)?,
        }))
    }
}
