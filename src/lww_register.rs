use std::cmp::Ordering;

use crate::clock::{Clock, Timestamp};
use crate::error::CrdtError;
use crate::payload::Payload;

/// State of an [`LWWRegister`]: the current value, the instant it was
/// written, and the process that wrote it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LWWRegisterContent<V> {
    value: V,
    timestamp: Timestamp,
    writer_id: String,
}

/// A last-writer-wins register (LWW-Register).
///
/// Holds exactly one value. Merging keeps the value with the greater
/// timestamp; a timestamp tie is broken by the lexicographically greater
/// writer id (a deterministic, order-independent tie-break, not a trust
/// mechanism). If both timestamp and writer match, the values must already be
/// equal; anything else is a [`CrdtError::WriteCollision`].
///
/// Unlike the other types, `assign` and `merge` consult the local clock:
/// any operand timestamp from the caller's own future aborts the operation
/// with [`CrdtError::FutureTimestamp`]. That makes the contract methods
/// inherent here (they take a [`Clock`]) rather than an impl of
/// [`Crdt`](crate::Crdt).
///
/// # Example
///
/// ```
/// use convergent::clock::ManualClock;
/// use convergent::prelude::*;
///
/// let clock = ManualClock::starting_at(100);
/// let title = LWWRegister::initial("title", "draft", "p1", &clock);
///
/// clock.advance(1);
/// let title = title.assign("final", "p2", &clock)?;
/// assert_eq!(*title.value(), "final");
/// assert_eq!(title.writer_id(), "p2");
/// # Ok::<(), convergent::CrdtError>(())
/// ```
pub type LWWRegister<V> = Payload<LWWRegisterContent<V>>;

impl<V: Clone + PartialEq> LWWRegister<V> {
    /// Payload holding `value`, stamped with the current time and attributed
    /// to `writer_id`.
    #[must_use]
    pub fn initial(
        id: impl Into<String>,
        value: V,
        writer_id: impl Into<String>,
        clock: &impl Clock,
    ) -> Self {
        Payload::new(
            id,
            LWWRegisterContent {
                value,
                timestamp: clock.now(),
                writer_id: writer_id.into(),
            },
        )
    }

    /// New payload holding `value`, freshly stamped and attributed to
    /// `writer_id`.
    ///
    /// Fails with [`CrdtError::FutureTimestamp`] if the payload's existing
    /// timestamp is not strictly in the past, which guards against a
    /// clock-skewed or misbehaving writer.
    pub fn assign(
        &self,
        value: V,
        writer_id: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<Self, CrdtError> {
        let now = clock.now();
        ensure_in_past(self.content().timestamp, now)?;

        Ok(self.with_content(LWWRegisterContent {
            value,
            timestamp: now,
            writer_id: writer_id.into(),
        }))
    }

    /// Returns the payload holding the last-written value.
    ///
    /// Both operand timestamps must be strictly in the past relative to
    /// `clock`.
    pub fn merge(&self, other: &Self, clock: &impl Clock) -> Result<Self, CrdtError> {
        self.ensure_same_identity(other)?;
        let now = clock.now();
        ensure_in_past(self.content().timestamp, now)?;
        ensure_in_past(other.content().timestamp, now)?;

        let winner = match self.content().timestamp.cmp(&other.content().timestamp) {
            Ordering::Greater => self,
            Ordering::Less => other,
            Ordering::Equal => match self.content().writer_id.cmp(&other.content().writer_id) {
                Ordering::Greater => self,
                Ordering::Less => other,
                Ordering::Equal => {
                    if self.content().value != other.content().value {
                        return Err(CrdtError::WriteCollision {
                            writer_id: self.content().writer_id.clone(),
                            timestamp: self.content().timestamp,
                        });
                    }
                    self
                }
            },
        };

        Ok(winner.clone())
    }

    /// Returns `true` if value, timestamp, and writer all match.
    ///
    /// Registers are equal only when their full provenance matches, not
    /// merely their current value.
    pub fn compare(&self, other: &Self) -> Result<bool, CrdtError> {
        self.ensure_same_identity(other)?;
        if std::ptr::eq(self, other) {
            return Ok(true);
        }
        Ok(self.content() == other.content())
    }

    /// The current value.
    #[must_use]
    pub fn value(&self) -> &V {
        &self.content().value
    }

    /// The instant the current value was written.
    #[must_use]
    pub fn timestamp(&self) -> Timestamp {
        self.content().timestamp
    }

    /// The process that wrote the current value.
    #[must_use]
    pub fn writer_id(&self) -> &str {
        &self.content().writer_id
    }
}

fn ensure_in_past(timestamp: Timestamp, now: Timestamp) -> Result<(), CrdtError> {
    if timestamp >= now {
        return Err(CrdtError::FutureTimestamp { timestamp, now });
    }
    Ok(())
}
