// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use thiserror::Error;

/// Reasons a context seed could not be drawn.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum EntropyError {
    /// The operating system CSPRNG refused the request.
    #[error("system entropy unavailable: {0}")]
    System(getrandom::Error),
    /// A non-OS source (hardware TRNG, test double) has nothing to give.
    #[error("entropy source exhausted")]
    Exhausted,
}
