// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Side-channel hardening of a constructed context.

use ctxguard_rand::EntropySource;
use ctxguard_util::ZeroizingMutGuard;

use crate::backend::{ContextBackend, SEED_LEN};

/// Mixes [`SEED_LEN`] fresh bytes from `entropy` into `context`.
///
/// The seed only ever lives in a local buffer that is wiped before this
/// function returns or unwinds, whatever the outcome.
///
/// # Panics
///
/// Panics if `entropy` fails or the backend reports that randomization
/// failed. A context whose blinding could not be refreshed must not be used.
pub fn randomize<B: ContextBackend>(
    backend: &B,
    context: &mut B::Context,
    entropy: &dyn EntropySource,
) {
    let mut seed = [0u8; SEED_LEN];
    randomize_with_seed(backend, context, entropy, &mut seed);
}

pub(crate) fn randomize_with_seed<B: ContextBackend>(
    backend: &B,
    context: &mut B::Context,
    entropy: &dyn EntropySource,
    seed: &mut [u8; SEED_LEN],
) {
    let mut seed = ZeroizingMutGuard::from(seed);

    let filled = entropy.fill_seed(&mut *seed);
    let randomized = filled.is_ok() && backend.randomize(context, &*seed);

    drop(seed);

    if let Err(err) = filled {
        panic!("entropy source failed while seeding the context: {err}");
    }
    assert!(randomized, "backend rejected context randomization");
}
