// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! libsecp256k1 backend (sign + verify, preallocated).

use core::mem::ManuallyDrop;

use secp256k1::{AllPreallocated, Secp256k1};

use crate::backend::{ContextBackend, SEED_LEN};
use crate::buffer::ContextBuffer;

pub use secp256k1::ffi::types::AlignedType;

/// Static capacity, in [`AlignedType`] words, reserved for the context.
///
/// Covers the sign + verify context of the bundled libsecp256k1 with
/// headroom. `initialize` refuses to run if the library ever asks for more.
pub const SECP256K1_CONTEXT_WORDS: usize = 64;

/// A sign + verify context living in static storage.
pub type Secp256k1Context = Secp256k1<AllPreallocated<'static>>;

/// Static storage sized for [`Secp256k1Backend`].
pub type Secp256k1Buffer = ContextBuffer<AlignedType, SECP256K1_CONTEXT_WORDS>;

/// Backend over the `secp256k1` crate's preallocated context API.
#[derive(Debug, Default, Clone, Copy)]
pub struct Secp256k1Backend;

// Writable handles are `ManuallyDrop` views built from the raw context
// pointer: a separate Rust value over the same library object, never
// destroyed on its own. `seeded_randomize` only writes library memory that
// lives in the buffer.
unsafe impl ContextBackend for Secp256k1Backend {
    type Word = AlignedType;
    type Context = Secp256k1Context;
    type Writable = ManuallyDrop<Secp256k1Context>;

    fn preallocated_size(&self) -> usize {
        Secp256k1Context::preallocate_size()
    }

    fn create(&self, buffer: &'static mut [AlignedType]) -> Option<Secp256k1Context> {
        Secp256k1::preallocated_new(buffer).ok()
    }

    fn randomize(&self, context: &mut Secp256k1Context, seed: &[u8; SEED_LEN]) -> bool {
        // Aborts the thread itself if libsecp256k1 reports failure.
        context.seeded_randomize(seed);
        true
    }

    unsafe fn writable(&self, context: &Secp256k1Context) -> ManuallyDrop<Secp256k1Context> {
        // SAFETY: the pointer comes from a live all-capabilities context
        // built by this same library, and the guardian destroys it only
        // after the handle is gone.
        unsafe { Secp256k1Context::from_raw_all(context.ctx()) }
    }

    fn destroy(&self, context: Secp256k1Context) {
        // Dropping a preallocated context runs
        // `secp256k1_context_preallocated_destroy` and frees nothing.
        drop(context);
    }
}
