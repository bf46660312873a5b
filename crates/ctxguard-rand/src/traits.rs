// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use crate::SEED_LEN;
use crate::error::EntropyError;

/// Source of context seeds.
///
/// Each call must produce [`SEED_LEN`] bytes fit for re-randomizing the
/// side-channel blinding of a signing context: unpredictable and never
/// reused. An OS CSPRNG or a hardware TRNG qualifies; a fixed pattern does
/// not.
pub trait EntropySource {
    /// Overwrites `seed` with fresh randomness.
    ///
    /// On error `seed` holds no randomness the caller could mistake for a
    /// usable seed.
    ///
    /// # Errors
    ///
    /// Returns an [`EntropyError`] when no seed can be produced.
    fn fill_seed(&self, seed: &mut [u8; SEED_LEN]) -> Result<(), EntropyError>;
}
