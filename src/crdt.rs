use crate::error::CrdtError;

/// Contract implemented by every state-based CRDT payload.
///
/// A CvRDT (convergent replicated data type) guarantees that replicas
/// mutated independently converge to the same state once their payloads are
/// exchanged and merged, regardless of merge order, duplication, or delay.
///
/// # Properties
///
/// For all reachable payloads `a`, `b`, `c` of the same identity, `merge`
/// must satisfy:
/// - **Commutativity:** `merge(a, b)` ≡ `merge(b, a)`
/// - **Associativity:** `merge(merge(a, b), c)` ≡ `merge(a, merge(b, c))`
/// - **Idempotency:** `merge(merge(a, b), a)` ≡ `merge(a, b)`
///
/// where ≡ is [`compare`](Crdt::compare) returning `true`.
///
/// Both operations verify that the operands share an identity before doing
/// anything else and fail with [`CrdtError::IdentityMismatch`] otherwise.
///
/// The LWW register is the one type not covered by this trait: its merge
/// consults the local clock to reject future timestamps, so it exposes the
/// same contract as inherent methods taking a [`Clock`](crate::clock::Clock).
pub trait Crdt: Sized {
    /// Returns `true` if both payloads have equivalent abstract state.
    fn compare(&self, other: &Self) -> Result<bool, CrdtError>;

    /// Returns a least upper bound of both payloads under the type's
    /// partial order.
    fn merge(&self, other: &Self) -> Result<Self, CrdtError>;
}
