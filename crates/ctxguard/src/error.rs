// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use thiserror::Error;

/// Recoverable outcomes of context access.
///
/// Misuse (out-of-sequence calls) is not represented here: it panics.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ContextError {
    /// The writable lock is held by another caller. Retry later or abandon.
    #[error("Unavailable")]
    Unavailable,
}
