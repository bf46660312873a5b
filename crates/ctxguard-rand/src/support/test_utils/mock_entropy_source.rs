// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use core::cell::Cell;

use crate::SEED_LEN;
use crate::error::EntropyError;
use crate::system::SystemEntropySource;
use crate::traits::EntropySource;

/// What a [`MockEntropySource`] hands out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockEntropyBehaviour {
    /// Real seeds from [`SystemEntropySource`].
    System,
    /// Every seed byte is the given value.
    Constant(u8),
    /// Seed N (1-indexed) is filled with `N as u8`, so consecutive seeds
    /// differ in a predictable way.
    Counting,
    /// Every draw fails.
    FailAlways,
    /// Only the Nth draw (1-indexed) fails.
    FailAtNthSeed(usize),
}

/// Entropy source with scripted output and a draw counter.
pub struct MockEntropySource {
    behaviour: MockEntropyBehaviour,
    seeds_drawn: Cell<usize>,
}

impl MockEntropySource {
    /// Creates a source following `behaviour`.
    pub fn new(behaviour: MockEntropyBehaviour) -> Self {
        Self {
            behaviour,
            seeds_drawn: Cell::new(0),
        }
    }

    /// Switches behaviour; the draw counter keeps running.
    pub fn set_behaviour(&mut self, behaviour: MockEntropyBehaviour) {
        self.behaviour = behaviour;
    }

    /// Number of `fill_seed` calls so far, failed ones included.
    pub fn seeds_drawn(&self) -> usize {
        self.seeds_drawn.get()
    }
}

impl EntropySource for MockEntropySource {
    fn fill_seed(&self, seed: &mut [u8; SEED_LEN]) -> Result<(), EntropyError> {
        let nth = self.seeds_drawn.get() + 1;
        self.seeds_drawn.set(nth);

        match self.behaviour {
            MockEntropyBehaviour::System => SystemEntropySource.fill_seed(seed),
            MockEntropyBehaviour::Constant(byte) => {
                seed.fill(byte);
                Ok(())
            }
            MockEntropyBehaviour::Counting => {
                seed.fill(nth as u8);
                Ok(())
            }
            MockEntropyBehaviour::FailAlways => Err(EntropyError::Exhausted),
            MockEntropyBehaviour::FailAtNthSeed(n) if n == nth => Err(EntropyError::Exhausted),
            MockEntropyBehaviour::FailAtNthSeed(_) => SystemEntropySource.fill_seed(seed),
        }
    }
}
