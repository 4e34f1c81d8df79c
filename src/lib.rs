//! # convergent
//!
//! State-based convergent replicated data types (CvRDTs).
//!
//! A CvRDT is a data structure that can be replicated across processes and
//! updated independently. Replicas exchange full payloads and merge them.
//! Every merge is a join in a semilattice (commutative, associative, and
//! idempotent), so all replicas converge to the same state regardless of
//! merge order, duplication, or arrival delay.
//!
//! Payloads are plain values carrying an opaque identity. Update operations
//! never mutate in place: they return a new payload, so a replica replaces
//! its copy wholesale. `compare` and `merge` refuse payloads whose
//! identities differ.
//!
//! ## Quick Start
//!
//! ```
//! use convergent::prelude::*;
//!
//! // Two replicas of the same counter, incremented by different processes.
//! let a = GCounter::initial("page-hits").increment("p1").increment("p1");
//! let b = GCounter::initial("page-hits").increment("p2");
//!
//! let merged = a.merge(&b)?;
//! assert_eq!(merged.value(), 3);
//! # Ok::<(), convergent::CrdtError>(())
//! ```
//!
//! ## Available CRDTs
//!
//! ### Counters
//! - [`GCounter`] - Grow-only counter (increment only)
//! - [`PNCounter`] - Positive-negative counter (increment and decrement)
//!
//! ### Sets
//! - [`GSet`] - Grow-only set (add only)
//! - [`TwoPSet`] - Two-phase set (remove is permanent)
//! - [`USet`] - Two-phase set with guarded, no-op removal of never-added
//!   elements
//! - [`LWWElementSet`] - Last-writer-wins element set (timestamped add and
//!   remove, re-addable)
//!
//! ### Registers
//! - [`LWWRegister`] - Last-writer-wins register (timestamp resolution,
//!   writer tie-break)
//!
//! ## The `Crdt` Trait
//!
//! The clock-free types implement [`Crdt`], which provides fallible
//! [`compare`](Crdt::compare) and [`merge`](Crdt::merge). The LWW register
//! exposes the same contract as inherent methods taking a
//! [`Clock`](clock::Clock), because its merge rejects timestamps from the
//! caller's own future.
//!
//! ## Out of scope
//!
//! Transport, persistence, and wire formats are external concerns: a
//! transport collaborator serializes payloads (enable the `serde` feature),
//! ships them between processes, and calls `merge` on receipt. There is no
//! causal-context tracking: the LWW types rely on wall-clock timestamps
//! only, with deterministic writer-id tie-breaks.

#![warn(missing_docs)]

mod crdt;
mod error;
mod gcounter;
mod gset;
mod lww_element_set;
mod lww_register;
mod payload;
mod pncounter;
mod twop_set;
mod uset;

pub mod clock;
pub mod prelude;

pub use crdt::Crdt;
pub use error::CrdtError;
pub use gcounter::{GCounter, GCounterContent};
pub use gset::{GSet, GSetContent};
pub use lww_element_set::{LWWElementSet, LWWElementSetContent};
pub use lww_register::{LWWRegister, LWWRegisterContent};
pub use payload::Payload;
pub use pncounter::{PNCounter, PNCounterContent};
pub use twop_set::{TwoPSet, TwoPSetContent};
pub use uset::{USet, USetContent};
