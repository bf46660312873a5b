// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use ctxguard_util::fast_zeroize_slice;

use crate::SEED_LEN;
use crate::error::EntropyError;
use crate::traits::EntropySource;

/// Seeds drawn from the operating system through `getrandom`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemEntropySource;

impl SystemEntropySource {
    /// Runs `draw` over the seed and wipes whatever it left behind if it
    /// fails part way.
    pub(crate) fn fill_seed_from(
        draw: impl FnOnce(&mut [u8]) -> Result<(), getrandom::Error>,
        seed: &mut [u8; SEED_LEN],
    ) -> Result<(), EntropyError> {
        draw(seed.as_mut_slice()).map_err(|err| {
            fast_zeroize_slice(seed.as_mut_slice());
            EntropyError::System(err)
        })
    }
}

impl EntropySource for SystemEntropySource {
    fn fill_seed(&self, seed: &mut [u8; SEED_LEN]) -> Result<(), EntropyError> {
        Self::fill_seed_from(getrandom::fill, seed)
    }
}
