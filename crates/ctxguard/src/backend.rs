// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Seam between the guardian and the elliptic-curve library it orchestrates.

use core::ops::DerefMut;

pub use ctxguard_rand::SEED_LEN;

/// Elliptic-curve library entry points needed to run one preallocated
/// context.
///
/// The guardian decides *when* and *by whom* the context is touched; the
/// backend performs the actual construction, blinding and teardown.
///
/// # Safety
///
/// Implementors guarantee that:
/// - `Word` has no padding bytes and all-zeros is a valid value, so the
///   guardian may wipe and inspect the buffer byte by byte.
/// - `create` keeps all context state inside `buffer` and allocates nothing.
/// - `writable` returns a handle to the *same* library context that is a
///   distinct Rust value from `context`, so handing it out while shared
///   references to `context` exist does not alias them. Mutations made
///   through the handle must only touch library memory inside the buffer.
/// - The library's read path does not depend on state the writable path
///   mutates in a way that breaks read-only operations running alongside
///   the single writer.
pub unsafe trait ContextBackend {
    /// Storage unit of the context buffer (carries the library's alignment).
    ///
    /// `'static` because the buffer is handed to the library for the life
    /// of the process.
    type Word: Copy + 'static;

    /// The opaque context object living inside the buffer.
    type Context;

    /// Exclusive handle over a live context, handed to the lock holder.
    type Writable: DerefMut<Target = Self::Context>;

    /// Number of `Word`s a sign + verify context needs.
    fn preallocated_size(&self) -> usize;

    /// Constructs a context in place inside `buffer`.
    ///
    /// Returns `None` if the library refuses to construct it.
    fn create(&self, buffer: &'static mut [Self::Word]) -> Option<Self::Context>;

    /// Mixes `seed` into the context. Returns `false` on library failure.
    fn randomize(&self, context: &mut Self::Context, seed: &[u8; SEED_LEN]) -> bool;

    /// Creates an exclusive handle over `context`.
    ///
    /// # Safety
    ///
    /// At most one handle may be alive at a time, and it must be dropped
    /// before `context` is destroyed.
    unsafe fn writable(&self, context: &Self::Context) -> Self::Writable;

    /// Releases the context through the library's destructor.
    fn destroy(&self, context: Self::Context);
}
