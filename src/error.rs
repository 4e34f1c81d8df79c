use crate::clock::Timestamp;

/// Failure raised by a precondition guard.
///
/// Every guard either passes or aborts the offending operation with one of
/// these variants; no failure is swallowed or retried by the library. Retry
/// policy, if any, belongs to the caller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CrdtError {
    /// `compare` or `merge` was invoked on payloads with different identities.
    #[error("payload identity mismatch: `{left}` vs `{right}`")]
    IdentityMismatch {
        /// Identity of the first operand.
        left: String,
        /// Identity of the second operand.
        right: String,
    },

    /// An operation observed a timestamp that is not strictly in the past.
    ///
    /// Indicates clock skew or a misbehaving input; the operation must not
    /// silently proceed.
    #[error("timestamp {timestamp} is not in the past (local clock reads {now})")]
    FutureTimestamp {
        /// The offending timestamp.
        timestamp: Timestamp,
        /// The local clock reading at the time of the check.
        now: Timestamp,
    },

    /// Two register payloads claim different values written by the same
    /// writer at the same instant.
    ///
    /// Signals non-unique writer ids or a defective clock source.
    #[error("conflicting values written by `{writer_id}` at {timestamp}")]
    WriteCollision {
        /// The writer both payloads attribute the value to.
        writer_id: String,
        /// The shared timestamp.
        timestamp: Timestamp,
    },
}
