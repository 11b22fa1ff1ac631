//! Port traits (interfaces to the environment).
//!
//! The validator never reads the wall clock or a random source directly.
//! Production code plugs in the system implementations; tests plug in
//! fixed and seeded ones.

mod clock;
mod entropy;

pub use clock::{Clock, FixedClock, SystemClock};
pub use entropy::{EntropySource, OsEntropy, SeededEntropy};
