//! Entry id allocation
//!
//! Ids must stay exactly representable as JSON numbers, so the random range
//! tops out at 2^53 - 1. Every candidate is checked against the ids already
//! in use before it is handed out.

use rand::Rng;

use crate::config::IdStrategy;
use crate::entry::EntryId;

/// Largest id that survives a round trip through a JSON number
pub const MAX_ENTRY_ID: u64 = 9_007_199_254_740_991;

/// Hands out fresh entry ids according to an [`IdStrategy`]
#[derive(Debug, Clone)]
pub struct IdAllocator {
    strategy: IdStrategy,
    last_issued: u64,
}

impl IdAllocator {
    /// Create an allocator
    ///
    /// `floor` is the largest id already present (e.g., the seed set); the
    /// sequential strategy continues after it.
    pub fn new(strategy: IdStrategy, floor: u64) -> Self {
        Self {
            strategy,
            last_issued: floor,
        }
    }

    /// Allocate an id for which `in_use` returns false
    pub fn next(&mut self, in_use: impl Fn(EntryId) -> bool) -> EntryId {
        match self.strategy {
            IdStrategy::Random => {
                let mut rng = rand::rng();
                loop {
                    let candidate = EntryId(rng.random_range(1..=MAX_ENTRY_ID));
                    if !in_use(candidate) {
                        self.last_issued = self.last_issued.max(candidate.0);
                        return candidate;
                    }
                    tracing::debug!("Id {} already in use, drawing again", candidate);
                }
            }
            IdStrategy::Sequential => loop {
                self.last_issued += 1;
                let candidate = EntryId(self.last_issued);
                if !in_use(candidate) {
                    return candidate;
                }
            },
        }
    }
}
