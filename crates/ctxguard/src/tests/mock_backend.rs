// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use crate::backend::{ContextBackend, SEED_LEN};
use crate::support::test_utils::{
    MOCK_CONTEXT_WORDS, MockBackend, MockBackendBehaviour, leak_mock_buffer,
};

#[test]
fn test_mock_backend_reported_sizes() {
    let cases = [
        (MockBackendBehaviour::None, MOCK_CONTEXT_WORDS),
        (MockBackendBehaviour::ZeroSize, 0),
        (MockBackendBehaviour::Oversized, usize::MAX),
        (MockBackendBehaviour::FailCreate, MOCK_CONTEXT_WORDS),
    ];

    for (behaviour, expected) in cases {
        let backend = MockBackend::new(behaviour);
        assert_eq!(backend.preallocated_size(), expected, "{behaviour:?}");
    }
}

#[test]
fn test_mock_backend_create_lays_out_context_in_buffer() {
    let backend = MockBackend::new(MockBackendBehaviour::None);
    let buffer = leak_mock_buffer(MOCK_CONTEXT_WORDS);
    let base = buffer.as_ptr();

    let context = backend.create(buffer).expect("Failed to create(..)");

    assert!(context.is_live());
    assert_eq!(context.randomizations(), 0);
    assert_eq!(context.writes(), 0);

    // SAFETY: the leaked buffer outlives the test and is only read here.
    let words = unsafe { core::slice::from_raw_parts(base, MOCK_CONTEXT_WORDS) };
    assert_ne!(words[0], 0);
    assert!(words[4..].iter().all(|&w| w != 0));
}

#[test]
fn test_mock_backend_create_rejects_small_buffer() {
    let backend = MockBackend::new(MockBackendBehaviour::None);

    assert!(
        backend
            .create(leak_mock_buffer(MOCK_CONTEXT_WORDS - 1))
            .is_none()
    );
    assert_eq!(backend.create_count(), 1);
}

#[test]
fn test_mock_backend_fail_create() {
    let backend = MockBackend::new(MockBackendBehaviour::FailCreate);

    assert!(backend.create(leak_mock_buffer(MOCK_CONTEXT_WORDS)).is_none());
}

#[test]
fn test_mock_backend_fail_randomize_at_nth() {
    let backend = MockBackend::new(MockBackendBehaviour::FailRandomizeAtNth(2));
    let mut context = backend
        .create(leak_mock_buffer(MOCK_CONTEXT_WORDS))
        .expect("Failed to create(..)");
    let seed = [0x01u8; SEED_LEN];

    assert!(backend.randomize(&mut context, &seed));
    assert!(!backend.randomize(&mut context, &seed));
    assert!(backend.randomize(&mut context, &seed));

    assert_eq!(backend.randomize_count(), 3);
    assert_eq!(context.randomizations(), 2);
}

#[test]
fn test_mock_backend_writable_shares_state() {
    let backend = MockBackend::new(MockBackendBehaviour::None);
    let context = backend
        .create(leak_mock_buffer(MOCK_CONTEXT_WORDS))
        .expect("Failed to create(..)");

    // SAFETY: single handle, dropped before the context.
    let mut handle = unsafe { backend.writable(&context) };
    handle.record_write();

    assert_eq!(context.writes(), 1);
    assert_eq!(backend.writable_count(), 1);
}

#[test]
fn test_mock_backend_destroy_kills_context() {
    let backend = MockBackend::new(MockBackendBehaviour::None);
    let context = backend
        .create(leak_mock_buffer(MOCK_CONTEXT_WORDS))
        .expect("Failed to create(..)");

    // SAFETY: the handle never writes and only observes liveness.
    let observer = unsafe { backend.writable(&context) };
    backend.destroy(context);

    assert!(!observer.is_live());
    assert_eq!(backend.destroy_count(), 1);
}
