// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use crate::{fast_zeroize_slice, is_slice_zeroized};

/// Trait for values that can be wiped in place.
///
/// This trait is dyn-compatible, allowing it to be used in trait objects
/// like `&mut dyn FastZeroizable`.
pub trait FastZeroizable {
    /// Overwrites the value with zeros.
    fn fast_zeroize(&mut self);
}

/// Trait for verifying that a value has been zeroized.
///
/// Used in tests and assertions to check that no secret material remains.
pub trait ZeroizationProbe {
    /// Returns `true` if every byte of the value is 0.
    fn is_zeroized(&self) -> bool;
}

impl<T: Copy, const N: usize> FastZeroizable for [T; N] {
    fn fast_zeroize(&mut self) {
        fast_zeroize_slice(self.as_mut_slice());
    }
}

impl<T: Copy> FastZeroizable for [T] {
    fn fast_zeroize(&mut self) {
        fast_zeroize_slice(self);
    }
}

impl<const N: usize> ZeroizationProbe for [u8; N] {
    fn is_zeroized(&self) -> bool {
        is_slice_zeroized(self)
    }
}

impl ZeroizationProbe for [u8] {
    fn is_zeroized(&self) -> bool {
        is_slice_zeroized(self)
    }
}
