//! Random-source port used for transaction id suffixes.

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

/// Source of random bits.
pub trait EntropySource: Send {
    fn next_u64(&mut self) -> u64;
}

/// Production entropy: a `StdRng` seeded from the operating system.
#[derive(Debug)]
pub struct OsEntropy {
    rng: StdRng,
}

impl OsEntropy {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }
}

impl Default for OsEntropy {
    fn default() -> Self {
        Self::new()
    }
}

impl EntropySource for OsEntropy {
    fn next_u64(&mut self) -> u64 {
        self.rng.next_u64()
    }
}

/// Deterministic entropy for tests.
#[derive(Debug, Clone)]
pub struct SeededEntropy {
    rng: StdRng,
}

impl SeededEntropy {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl EntropySource for SeededEntropy {
    fn next_u64(&mut self) -> u64 {
        self.rng.next_u64()
    }
}
