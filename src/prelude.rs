//! Convenient re-exports for common usage.
//!
//! ```
//! use convergent::prelude::*;
//! ```

pub use crate::clock::Clock;
pub use crate::Crdt;
pub use crate::GCounter;
pub use crate::GSet;
pub use crate::LWWElementSet;
pub use crate::LWWRegister;
pub use crate::PNCounter;
pub use crate::TwoPSet;
pub use crate::USet;
