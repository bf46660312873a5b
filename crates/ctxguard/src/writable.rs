// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use core::fmt;
use core::ops::{Deref, DerefMut};

use ctxguard_rand::EntropySource;

use crate::backend::ContextBackend;
use crate::guardian::ContextGuardian;
use crate::randomize::randomize;

/// Exclusive access to the context, held while the writable lock is taken.
///
/// Dereferences mutably to the backend context. Dropping the guard (or
/// calling [`release`](Self::release)) frees the lock.
pub struct WritableContext<'a, B: ContextBackend> {
    guardian: &'a ContextGuardian<B>,
    handle: B::Writable,
}

impl<'a, B: ContextBackend> WritableContext<'a, B> {
    pub(crate) fn new(guardian: &'a ContextGuardian<B>, handle: B::Writable) -> Self {
        Self { guardian, handle }
    }

    /// Re-randomizes the context with fresh entropy.
    ///
    /// # Panics
    ///
    /// Panics if `entropy` fails or the backend rejects the seed.
    pub fn randomize(&mut self, entropy: &dyn EntropySource) {
        randomize(&self.guardian.backend, &mut *self.handle, entropy);
    }

    /// Frees the writable lock.
    pub fn release(self) {
        drop(self);
    }
}

impl<B: ContextBackend> Deref for WritableContext<'_, B> {
    type Target = B::Context;

    fn deref(&self) -> &Self::Target {
        &*self.handle
    }
}

impl<B: ContextBackend> DerefMut for WritableContext<'_, B> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.handle
    }
}

impl<B: ContextBackend> Drop for WritableContext<'_, B> {
    fn drop(&mut self) {
        // SAFETY: this guard is the only live handle and it is going away.
        unsafe { self.guardian.release_writable() };
    }
}

impl<B: ContextBackend> fmt::Debug for WritableContext<'_, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REDACTED WritableContext]")
    }
}
