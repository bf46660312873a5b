// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use std::sync::Barrier;
use std::thread;

use crate::buffer::ContextBuffer;

#[test]
fn test_buffer_new_fills_every_word() {
    static BUFFER: ContextBuffer<u64, 8> = ContextBuffer::new(0xAB);

    assert_eq!(BUFFER.capacity(), 8);
    assert!(!BUFFER.is_claimed());

    let words = BUFFER.claim().expect("Failed to claim()");

    assert!(BUFFER.is_claimed());
    assert_eq!(words.len(), 8);
    assert!(words.iter().all(|&w| w == 0xAB));
}

#[test]
fn test_buffer_claim_only_once() {
    static BUFFER: ContextBuffer<u32, 4> = ContextBuffer::new(0);

    assert!(BUFFER.claim().is_some());
    assert!(BUFFER.claim().is_none());
    assert!(BUFFER.claim().is_none());
}

#[test]
fn test_buffer_claim_race_has_single_winner() {
    const THREADS: usize = 8;
    static BUFFER: ContextBuffer<u64, 4> = ContextBuffer::new(0);

    let barrier = Barrier::new(THREADS);

    let winners: usize = thread::scope(|s| {
        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                s.spawn(|| {
                    barrier.wait();
                    usize::from(BUFFER.claim().is_some())
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|h| h.join().expect("Failed to join thread"))
            .sum()
    });

    assert_eq!(winners, 1);
}

#[test]
fn test_buffer_debug_does_not_leak_words() {
    static BUFFER: ContextBuffer<u8, 4> = ContextBuffer::new(0x5A);

    let debug = format!("{:?}", BUFFER);

    assert!(debug.contains("ContextBuffer"));
    assert!(debug.contains("claimed: false"));
    assert!(!debug.contains("90"), "word values must not be printed");
}
