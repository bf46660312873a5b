// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Lifecycle manager and access arbiter for one preallocated context.

use core::fmt;
use core::ptr::NonNull;
use core::sync::atomic::{AtomicBool, Ordering};

use ctxguard_rand::EntropySource;
use ctxguard_util::{as_bytes, fast_zeroize_slice, is_slice_zeroized};
use log::{debug, trace};

use crate::backend::ContextBackend;
use crate::error::ContextError;
use crate::randomize::randomize;
use crate::writable::WritableContext;

/// Owner of a preallocated context, its static buffer and its writable lock.
///
/// The guardian is an explicit resource: create it once at startup, call
/// [`initialize`](Self::initialize), and pass `&ContextGuardian` to the code
/// that signs or verifies. Lifecycle calls take `&mut self`, so the borrow
/// checker guarantees no read-only reference or writable guard survives a
/// [`destroy`](Self::destroy).
///
/// # Access model
///
/// - [`get_read_only`](Self::get_read_only) always succeeds and never
///   touches the lock.
/// - [`acquire_writable`](Self::acquire_writable) is a non-blocking
///   test-and-set: at most one caller holds the returned
///   [`WritableContext`] at a time, everybody else gets
///   [`ContextError::Unavailable`] immediately. No queueing, no fairness,
///   no reentrancy.
///
/// # Panics
///
/// Every operation except [`is_initialized`](Self::is_initialized) asserts
/// its lifecycle precondition and panics on violation. Calling out of
/// sequence is a startup-ordering bug, not a runtime condition.
pub struct ContextGuardian<B: ContextBackend> {
    pub(crate) backend: B,
    buffer: NonNull<[B::Word]>,
    context: Option<B::Context>,
    locked: AtomicBool,
}

// The guardian hands out `&B::Context` to any thread and moves the buffer
// words through the backend, so both must be shareable.
unsafe impl<B> Send for ContextGuardian<B>
where
    B: ContextBackend + Send,
    B::Context: Send,
    B::Word: Send,
{
}

unsafe impl<B> Sync for ContextGuardian<B>
where
    B: ContextBackend + Sync,
    B::Context: Sync,
    B::Word: Send,
{
}

impl<B: ContextBackend> ContextGuardian<B> {
    /// Binds `backend` to `buffer`. The context is not constructed yet.
    ///
    /// `buffer` is usually obtained from a static
    /// [`ContextBuffer`](crate::ContextBuffer).
    pub fn new(backend: B, buffer: &'static mut [B::Word]) -> Self {
        Self {
            backend,
            buffer: NonNull::from(buffer),
            context: None,
            locked: AtomicBool::new(false),
        }
    }

    /// Capacity of the buffer in backend words.
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// The backend driving this guardian.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Returns whether a context currently exists.
    pub fn is_initialized(&self) -> bool {
        self.context.is_some()
    }

    /// Returns whether the writable lock is currently held.
    pub fn is_writable_held(&self) -> bool {
        self.locked.load(Ordering::Acquire)
    }

    /// Constructs the context inside the buffer and hardens it with
    /// [`SEED_LEN`](crate::SEED_LEN) bytes from `entropy`.
    ///
    /// Leaves the writable lock free.
    ///
    /// # Panics
    ///
    /// - the context is already initialized;
    /// - the backend reports a zero size, or a size larger than the buffer;
    /// - the backend fails to construct the context;
    /// - `entropy` fails, or the backend rejects the randomization.
    ///
    /// A panic after construction drops the half-built context and wipes the
    /// buffer before unwinding further, leaving the guardian uninitialized.
    pub fn initialize(&mut self, entropy: &dyn EntropySource) {
        assert!(self.context.is_none(), "context already initialized");

        let required = self.backend.preallocated_size();
        let capacity = self.capacity();

        assert!(required != 0, "backend reported a zero-sized context");
        assert!(
            required <= capacity,
            "context needs {required} words but the buffer holds {capacity}"
        );

        // Declared before the context so that on unwind the context is
        // dropped first and the buffer wiped after it.
        let wipe_on_unwind = WipeOnUnwind {
            buffer: self.buffer,
            armed: true,
        };

        // SAFETY: no context lives in the buffer, so this is the only
        // reference to it until the backend takes it over.
        let buffer = unsafe { &mut *self.buffer.as_ptr() };

        let Some(mut context) = self.backend.create(buffer) else {
            panic!("backend failed to construct the context");
        };

        randomize(&self.backend, &mut context, entropy);
        wipe_on_unwind.disarm();

        self.locked.store(false, Ordering::Release);
        self.context = Some(context);

        debug!("context initialized ({required}/{capacity} words)");
    }

    /// Destroys the context and wipes every byte of the buffer.
    ///
    /// Leaves the writable lock free.
    ///
    /// # Panics
    ///
    /// Panics if the context is not initialized.
    pub fn destroy(&mut self) {
        let Some(context) = self.context.take() else {
            panic!("context not initialized");
        };

        self.backend.destroy(context);

        // SAFETY: the context is gone and the borrow of `self` rules out any
        // outstanding reference into the buffer.
        let buffer = unsafe { &mut *self.buffer.as_ptr() };
        fast_zeroize_slice(buffer);

        self.locked.store(false, Ordering::Release);

        debug!("context destroyed, buffer wiped");
    }

    /// Shared access for operations that never mutate the context.
    ///
    /// Not gated by the writable lock; may run alongside the lock holder.
    ///
    /// # Panics
    ///
    /// Panics if the context is not initialized.
    pub fn get_read_only(&self) -> &B::Context {
        self.expect_context()
    }

    /// Attempts to take the writable lock without blocking.
    ///
    /// The lock is released when the returned guard is dropped.
    ///
    /// # Errors
    ///
    /// Returns [`ContextError::Unavailable`] if another caller holds the
    /// lock, including the caller itself.
    ///
    /// # Panics
    ///
    /// Panics if the context is not initialized.
    pub fn acquire_writable(&self) -> Result<WritableContext<'_, B>, ContextError> {
        let context = self.expect_context();

        if self.locked.swap(true, Ordering::Acquire) {
            trace!("writable context contended");
            return Err(ContextError::Unavailable);
        }

        trace!("writable context acquired");

        // SAFETY: the swap above makes this the only live handle, and the
        // guard borrows `self`, so it is dropped before any `destroy`.
        let handle = unsafe { self.backend.writable(context) };
        Ok(WritableContext::new(self, handle))
    }

    /// Unconditionally frees the writable lock.
    ///
    /// [`WritableContext`] calls this on drop; call it directly only to
    /// recover a lock whose guard was leaked with [`core::mem::forget`].
    ///
    /// # Safety
    ///
    /// No [`WritableContext`] of this guardian may be alive. The lock does
    /// not track its owner, so freeing it under a live guard would let a
    /// second writer in.
    ///
    /// # Panics
    ///
    /// Panics if the context is not initialized.
    pub unsafe fn release_writable(&self) {
        assert!(self.context.is_some(), "context not initialized");

        self.locked.store(false, Ordering::Release);

        trace!("writable context released");
    }

    /// Returns `true` if every byte of the buffer is zero.
    ///
    /// Used to verify teardown left no residual context state behind.
    ///
    /// # Panics
    ///
    /// Panics if the context is initialized: the buffer belongs to the
    /// backend until [`destroy`](Self::destroy).
    pub fn buffer_is_wiped(&self) -> bool {
        assert!(self.context.is_none(), "buffer is owned by a live context");

        // SAFETY: no context lives in the buffer, so nothing mutates it
        // while it is shared here.
        let words = unsafe { self.buffer.as_ref() };
        // SAFETY: `ContextBackend` guarantees `Word` carries no padding.
        is_slice_zeroized(unsafe { as_bytes(words) })
    }

    fn expect_context(&self) -> &B::Context {
        match &self.context {
            Some(context) => context,
            None => panic!("context not initialized"),
        }
    }
}

/// Wipes the buffer if `initialize` panics after handing it to the backend.
struct WipeOnUnwind<W: Copy> {
    buffer: NonNull<[W]>,
    armed: bool,
}

impl<W: Copy> WipeOnUnwind<W> {
    fn disarm(mut self) {
        self.armed = false;
    }
}

impl<W: Copy> Drop for WipeOnUnwind<W> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }

        // SAFETY: the half-built context has been dropped already and the
        // guardian never stored it, so nothing else refers to the buffer.
        let buffer = unsafe { &mut *self.buffer.as_ptr() };
        fast_zeroize_slice(buffer);

        debug!("context initialization failed, buffer wiped");
    }
}

impl<B: ContextBackend> Drop for ContextGuardian<B> {
    fn drop(&mut self) {
        if self.context.is_some() {
            self.destroy();
        }
    }
}

impl<B: ContextBackend> fmt::Debug for ContextGuardian<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContextGuardian")
            .field("capacity", &self.capacity())
            .field("initialized", &self.is_initialized())
            .field("writable_held", &self.is_writable_held())
            .finish_non_exhaustive()
    }
}
