// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Secure wipe primitives and zeroization probes.
//!
//! Every wipe in this crate is followed by a volatile read and a compiler
//! fence so the optimizer cannot treat the store as dead, even when the
//! wiped memory is never read again by the program.

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(unsafe_op_in_unsafe_fn)]

mod guard;
mod traits;

pub use guard::ZeroizingMutGuard;
pub use traits::{FastZeroizable, ZeroizationProbe};

use core::sync::atomic::{Ordering, compiler_fence};

/// Fast bulk zeroization that can be vectorized.
///
/// Uses `write_bytes` (memset) + volatile read to prevent the optimizer
/// from removing the zeroization.
///
/// Works with any type `T` by treating the slice as raw bytes, so it must
/// only be used on types for which all-zeros is a valid value.
///
/// # Example
///
/// ```
/// use ctxguard_util::fast_zeroize_slice;
///
/// let mut seed = [0xA5u8; 32];
/// fast_zeroize_slice(&mut seed);
/// assert!(seed.iter().all(|&b| b == 0));
///
/// let mut words = [0xDEAD_BEEF_u64; 4];
/// fast_zeroize_slice(&mut words);
/// assert!(words.iter().all(|&w| w == 0));
/// ```
#[inline(never)]
pub fn fast_zeroize_slice<T: Copy>(slice: &mut [T]) {
    if slice.is_empty() {
        return;
    }

    let byte_len = core::mem::size_of_val(slice);
    unsafe {
        core::ptr::write_bytes(slice.as_mut_ptr() as *mut u8, 0, byte_len);
        // Volatile read prevents the optimizer from removing the write_bytes
        core::ptr::read_volatile(slice.as_ptr() as *const u8);
    }
    compiler_fence(Ordering::SeqCst);
}

/// Verifies that a slice is zeroized.
///
/// # Example
///
/// ```
/// use ctxguard_util::is_slice_zeroized;
///
/// assert!(is_slice_zeroized(&[0u8; 10]));
/// assert!(!is_slice_zeroized(&[0u8, 1, 0, 0]));
/// ```
#[inline(always)]
pub fn is_slice_zeroized(slice: &[u8]) -> bool {
    slice.iter().all(|&b| b == 0)
}

/// Reinterprets a slice of plain words as its underlying bytes.
///
/// # Safety
///
/// `T` must not contain padding bytes. Reading padding is undefined
/// behaviour, so this is only sound for integer words and byte-array
/// wrappers such as aligned storage units.
///
/// # Example
///
/// ```
/// use ctxguard_util::{as_bytes, is_slice_zeroized};
///
/// let words = [0u64, 0, 1];
/// let bytes = unsafe { as_bytes(&words) };
/// assert_eq!(bytes.len(), 24);
/// assert!(!is_slice_zeroized(bytes));
/// ```
#[inline(always)]
pub unsafe fn as_bytes<T: Copy>(slice: &[T]) -> &[u8] {
    let byte_len = core::mem::size_of_val(slice);
    // SAFETY: the pointer and length describe exactly the memory of `slice`,
    // and the caller guarantees every byte of it is initialized.
    unsafe { core::slice::from_raw_parts(slice.as_ptr() as *const u8, byte_len) }
}
