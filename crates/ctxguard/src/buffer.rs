// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Static storage for a preallocated context.

use core::cell::UnsafeCell;
use core::fmt;
use core::sync::atomic::{AtomicBool, Ordering};

/// Fixed-size context storage meant to live in a `static`.
///
/// The storage is carved out at link time and handed out exactly once
/// through [`claim`](ContextBuffer::claim), so a given static backs at most
/// one [`ContextGuardian`](crate::ContextGuardian) for the life of the
/// process.
///
/// # Example
///
/// ```rust
/// use ctxguard::ContextBuffer;
///
/// static BUFFER: ContextBuffer<u64, 16> = ContextBuffer::new(0);
///
/// let words = BUFFER.claim().expect("first claim");
/// assert_eq!(words.len(), 16);
/// assert!(BUFFER.claim().is_none());
/// ```
pub struct ContextBuffer<W, const N: usize> {
    words: UnsafeCell<[W; N]>,
    claimed: AtomicBool,
}

// The words are only reachable through the single `&'static mut` that
// `claim` hands out, so sharing the cell itself is sound.
unsafe impl<W: Send, const N: usize> Sync for ContextBuffer<W, N> {}

impl<W: Copy, const N: usize> ContextBuffer<W, N> {
    /// Creates the storage with every word set to `fill`.
    pub const fn new(fill: W) -> Self {
        Self {
            words: UnsafeCell::new([fill; N]),
            claimed: AtomicBool::new(false),
        }
    }
}

impl<W, const N: usize> ContextBuffer<W, N> {
    /// Capacity in words.
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Returns `true` once the storage has been handed out.
    pub fn is_claimed(&self) -> bool {
        self.claimed.load(Ordering::Acquire)
    }

    /// Hands out the storage. Only the first call returns `Some`.
    pub fn claim(&'static self) -> Option<&'static mut [W]> {
        if self
            .claimed
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return None;
        }

        // SAFETY: the compare_exchange above succeeds exactly once, so this
        // is the only reference ever created to the words.
        let words = unsafe { &mut *self.words.get() };
        Some(words.as_mut_slice())
    }
}

impl<W, const N: usize> fmt::Debug for ContextBuffer<W, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContextBuffer")
            .field("capacity", &N)
            .field("claimed", &self.is_claimed())
            .finish_non_exhaustive()
    }
}
