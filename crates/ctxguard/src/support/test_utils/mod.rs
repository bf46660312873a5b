// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Test utilities for exercising the guardian without a real curve library.
//!
//! Provides an instrumented backend with configurable failures and helpers
//! to build guardians over leaked buffers.

mod mock_backend;

pub use ctxguard_rand::test_utils::{MockEntropyBehaviour, MockEntropySource};
pub use mock_backend::{
    MOCK_CONTEXT_WORDS, MockBackend, MockBackendBehaviour, MockContext, leak_mock_buffer,
    mock_guardian, seed_digest,
};
