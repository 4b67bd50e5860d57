//! Capabilities consumed from the hosting environment.
//!
//! # Responsibility
//! - Abstract the logical clock and the identifier source behind traits so
//!   repositories can be driven deterministically in tests.

mod clock;
mod ids;

pub use clock::{Clock, ManualClock, SystemClock};
pub use ids::{IdGenerator, SequentialIdGenerator, UuidGenerator};
