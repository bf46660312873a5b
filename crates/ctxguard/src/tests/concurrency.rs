// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use std::sync::Barrier;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use crate::guardian::ContextGuardian;
use crate::support::test_utils::{
    MockBackend, MockBackendBehaviour, MockEntropyBehaviour, MockEntropySource,
    mock_guardian,
};

const THREADS: usize = 8;

fn initialized_guardian() -> ContextGuardian<MockBackend> {
    let mut guardian = mock_guardian(MockBackendBehaviour::None);
    guardian.initialize(&MockEntropySource::new(MockEntropyBehaviour::System));
    guardian
}

#[test]
fn test_simultaneous_acquire_has_single_winner() {
    let guardian = initialized_guardian();
    let start = Barrier::new(THREADS);
    let attempted = Barrier::new(THREADS);

    let winners: usize = thread::scope(|s| {
        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                s.spawn(|| {
                    start.wait();
                    let writer = guardian.acquire_writable();
                    let won = writer.is_ok();
                    // Hold the lock until every thread has tried.
                    attempted.wait();
                    drop(writer);
                    usize::from(won)
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|h| h.join().expect("Failed to join thread"))
            .sum()
    });

    assert_eq!(winners, 1);
    assert!(!guardian.is_writable_held());
}

#[test]
fn test_writers_are_mutually_exclusive() {
    const ROUNDS: usize = 2_000;

    let guardian = initialized_guardian();
    let inside = AtomicUsize::new(0);
    let successes = AtomicUsize::new(0);
    let start = Barrier::new(THREADS);

    thread::scope(|s| {
        for _ in 0..THREADS {
            s.spawn(|| {
                start.wait();

                for _ in 0..ROUNDS {
                    let Ok(mut writer) = guardian.acquire_writable() else {
                        continue;
                    };

                    assert_eq!(inside.fetch_add(1, Ordering::AcqRel), 0);
                    writer.record_write();
                    successes.fetch_add(1, Ordering::AcqRel);
                    assert_eq!(inside.fetch_sub(1, Ordering::AcqRel), 1);
                }
            });
        }
    });

    let successes = successes.load(Ordering::Acquire) as u64;

    assert!(successes > 0);
    assert_eq!(guardian.get_read_only().writes(), successes);
    assert!(!guardian.is_writable_held());
}

#[test]
fn test_readers_proceed_while_writer_holds_lock() {
    let guardian = initialized_guardian();
    let writer = guardian
        .acquire_writable()
        .expect("Failed to acquire_writable()");
    let start = Barrier::new(THREADS);

    let live_readers: usize = thread::scope(|s| {
        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                s.spawn(|| {
                    start.wait();
                    let context = guardian.get_read_only();
                    usize::from(context.is_live() && context.randomizations() == 1)
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|h| h.join().expect("Failed to join thread"))
            .sum()
    });

    assert_eq!(live_readers, THREADS);
    assert!(guardian.is_writable_held());

    drop(writer);
}

#[test]
fn test_contenders_get_unavailable_immediately() {
    let guardian = initialized_guardian();
    let _writer = guardian
        .acquire_writable()
        .expect("Failed to acquire_writable()");

    let refused: usize = thread::scope(|s| {
        let handles: Vec<_> = (0..THREADS)
            .map(|_| s.spawn(|| usize::from(guardian.acquire_writable().is_err())))
            .collect();

        handles
            .into_iter()
            .map(|h| h.join().expect("Failed to join thread"))
            .sum()
    });

    assert_eq!(refused, THREADS);
}
