//! Injectable time source for the last-writer-wins types.
//!
//! The LWW register and element set stamp every write with the current time
//! and guard against timestamps from the caller's own future. Taking the
//! clock as a capability instead of reading global process time keeps those
//! operations deterministic under test: production code passes a
//! [`SystemClock`], tests drive a [`ManualClock`] by hand.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Milliseconds since the Unix epoch.
pub type Timestamp = u64;

/// A source of wall-clock timestamps.
///
/// Implementations must be non-decreasing across calls from the same writer.
/// There is no cross-replica synchronization; ties between replicas are
/// resolved deterministically by writer identity.
pub trait Clock {
    /// The current time.
    fn now(&self) -> Timestamp;
}

/// Wall clock backed by [`SystemTime`].
///
/// Readings are strictly increasing per instance: an atomic high-water mark
/// bumps the result by one millisecond whenever the OS clock stalls within a
/// millisecond or steps backward.
#[derive(Debug, Default)]
pub struct SystemClock {
    last: AtomicU64,
}

impl SystemClock {
    /// Create a new system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        let wall = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64;

        let mut last = self.last.load(Ordering::Relaxed);
        loop {
            let next = wall.max(last + 1);
            match self
                .last
                .compare_exchange_weak(last, next, Ordering::Relaxed, Ordering::Relaxed)
            {
                Ok(_) => return next,
                Err(observed) => last = observed,
            }
        }
    }
}

/// Manually driven clock for deterministic tests.
///
/// Does not tick on its own; call [`set`](ManualClock::set) or
/// [`advance`](ManualClock::advance) to move time forward.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: AtomicU64,
}

impl ManualClock {
    /// Create a clock reading zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a clock reading `ms`.
    #[must_use]
    pub fn starting_at(ms: Timestamp) -> Self {
        Self {
            now: AtomicU64::new(ms),
        }
    }

    /// Set the current reading to `ms`.
    pub fn set(&self, ms: Timestamp) {
        self.now.store(ms, Ordering::SeqCst);
    }

    /// Move the reading forward by `ms` milliseconds.
    pub fn advance(&self, ms: u64) {
        self.now.fetch_add(ms, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        self.now.load(Ordering::SeqCst)
    }
}
