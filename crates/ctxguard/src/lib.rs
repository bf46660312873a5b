// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! # ctxguard
//!
//! Lifecycle and single-writer admission control for one preallocated
//! elliptic-curve context, without heap allocation.
//!
//! A [`ContextGuardian`] owns a static buffer and the opaque context the
//! backend library builds inside it. Verification code borrows the context
//! read-only at any time; signing code must win the writable lock first and
//! gets [`ContextError::Unavailable`] instead of blocking when another
//! caller holds it.
//!
//! ## Example
//!
//! ```rust
//! # #[cfg(feature = "secp256k1")] {
//! use ctxguard::{
//!     AlignedType, ContextGuardian, Secp256k1Backend, Secp256k1Buffer, SystemEntropySource,
//! };
//!
//! static CONTEXT_BUFFER: Secp256k1Buffer = Secp256k1Buffer::new(AlignedType::ZERO);
//!
//! let buffer = CONTEXT_BUFFER.claim().expect("buffer already claimed");
//! let mut guardian = ContextGuardian::new(Secp256k1Backend, buffer);
//! guardian.initialize(&SystemEntropySource);
//!
//! {
//!     let signer = guardian.acquire_writable().expect("uncontended");
//!     assert!(guardian.acquire_writable().is_err());
//!     signer.release();
//! }
//!
//! let _verifier = guardian.get_read_only();
//! guardian.destroy();
//! assert!(guardian.buffer_is_wiped());
//! # }
//! ```
//!
//! ## Error tiers
//!
//! - Out-of-sequence calls, undersized buffers, failed construction and
//!   failed randomization are fatal and panic.
//! - Lock contention is ordinary and is reported as
//!   [`ContextError::Unavailable`].

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(unsafe_op_in_unsafe_fn)]

#[cfg(any(test, feature = "test-utils"))]
extern crate alloc;

#[cfg(test)]
mod tests;

mod backend;
mod buffer;
mod error;
mod guardian;
mod randomize;
#[cfg(feature = "secp256k1")]
mod secp;
mod support;
mod writable;

pub use backend::{ContextBackend, SEED_LEN};
pub use buffer::ContextBuffer;
pub use error::ContextError;
pub use guardian::ContextGuardian;
pub use randomize::randomize;
pub use writable::WritableContext;

pub use ctxguard_rand::{EntropyError, EntropySource, SystemEntropySource};

#[cfg(feature = "secp256k1")]
pub use secp::{
    AlignedType, SECP256K1_CONTEXT_WORDS, Secp256k1Backend, Secp256k1Buffer, Secp256k1Context,
};

#[cfg(any(test, feature = "test-utils"))]
pub use support::test_utils;
