// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! # ctxguard_rand
//!
//! Seeds for re-randomizing elliptic-curve contexts.
//!
//! A context's side-channel blinding is refreshed with a [`SEED_LEN`]-byte
//! seed. [`EntropySource`] is the one operation the guardian needs from a
//! random source: overwrite a seed buffer, or say why it could not.
//!
//! ## Example
//!
//! ```rust
//! use ctxguard_rand::{EntropySource, SEED_LEN, SystemEntropySource};
//!
//! let mut seed = [0u8; SEED_LEN];
//! SystemEntropySource
//!     .fill_seed(&mut seed)
//!     .expect("Failed to fill_seed(..)");
//! ```
//!
//! [`SystemEntropySource`] covers every target `getrandom` supports (with
//! the `wasm_js` backend on the web). Firmware without an OS plugs its
//! hardware RNG in by implementing [`EntropySource`] directly.

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(unsafe_op_in_unsafe_fn)]

#[cfg(test)]
mod tests;

mod error;
mod support;
mod system;
mod traits;

/// Length in bytes of a context seed.
pub const SEED_LEN: usize = 32;

pub use error::EntropyError;
pub use system::SystemEntropySource;
pub use traits::EntropySource;

#[cfg(any(test, feature = "test-utils"))]
pub use support::test_utils;
