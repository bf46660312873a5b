// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use alloc::boxed::Box;
use alloc::vec;
use core::fmt;
use core::mem::ManuallyDrop;
use core::ptr::NonNull;
use core::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use crate::backend::{ContextBackend, SEED_LEN};
use crate::guardian::ContextGuardian;

/// Words a [`MockContext`] occupies at the start of the buffer.
pub const MOCK_CONTEXT_WORDS: usize = 8;

const MAGIC: u64 = 0x6374_7867_7561_7264;
const SCRATCH: u64 = 0xA5A5_A5A5_A5A5_A5A5;

const MAGIC_WORD: usize = 0;
const RANDOMIZATIONS_WORD: usize = 1;
const SEED_DIGEST_WORD: usize = 2;
const WRITES_WORD: usize = 3;

/// Configurable behavior for [`MockBackend`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockBackendBehaviour {
    /// Normal operation.
    None,
    /// Reports a zero preallocated size.
    ZeroSize,
    /// Reports a preallocated size no buffer can hold.
    Oversized,
    /// Refuses to construct the context.
    FailCreate,
    /// Reports failure on every randomization.
    FailRandomize,
    /// Reports failure on the Nth randomization (1-indexed).
    FailRandomizeAtNth(usize),
    /// Panics inside the randomization entry point.
    PanicOnRandomize,
}

/// FNV-1a over the seed bytes, as recorded by [`MockContext::seed_digest`].
pub fn seed_digest(seed: &[u8; SEED_LEN]) -> u64 {
    seed.iter().fold(0xcbf2_9ce4_8422_2325, |acc, &byte| {
        (acc ^ u64::from(byte)).wrapping_mul(0x0000_0100_0000_01b3)
    })
}

/// Context produced by [`MockBackend`].
///
/// Like a real library context it is a thin handle: all of its state lives
/// in the caller's buffer, so wiping the buffer wipes the context.
pub struct MockContext {
    base: NonNull<u64>,
    len: usize,
}

// All state is accessed through atomics over the buffer words.
unsafe impl Send for MockContext {}
unsafe impl Sync for MockContext {}

impl MockContext {
    fn word(&self, index: usize) -> &AtomicU64 {
        assert!(index < self.len, "mock context word out of range");
        // SAFETY: `base` points at `len` words of a live `'static` buffer
        // that is only accessed atomically while the context exists.
        unsafe { AtomicU64::from_ptr(self.base.as_ptr().add(index)) }
    }

    /// Returns `true` until the backend destroys the context.
    pub fn is_live(&self) -> bool {
        self.word(MAGIC_WORD).load(Ordering::Acquire) == MAGIC
    }

    /// Number of successful randomizations applied so far.
    pub fn randomizations(&self) -> u64 {
        self.word(RANDOMIZATIONS_WORD).load(Ordering::Acquire)
    }

    /// Digest of the last seed mixed in (0 before the first one).
    pub fn seed_digest(&self) -> u64 {
        self.word(SEED_DIGEST_WORD).load(Ordering::Acquire)
    }

    /// Number of writes recorded through [`record_write`](Self::record_write).
    pub fn writes(&self) -> u64 {
        self.word(WRITES_WORD).load(Ordering::Acquire)
    }

    /// Stands in for a mutating library call such as nonce generation.
    pub fn record_write(&mut self) -> u64 {
        self.word(WRITES_WORD).fetch_add(1, Ordering::AcqRel) + 1
    }
}

impl fmt::Debug for MockContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockContext")
            .field("live", &self.is_live())
            .field("randomizations", &self.randomizations())
            .field("writes", &self.writes())
            .finish()
    }
}

/// Instrumented backend for exercising the guardian.
///
/// Counts every entry point call and fails on demand via
/// [`MockBackendBehaviour`].
pub struct MockBackend {
    behaviour: MockBackendBehaviour,
    create_count: AtomicUsize,
    randomize_count: AtomicUsize,
    writable_count: AtomicUsize,
    destroy_count: AtomicUsize,
}

impl MockBackend {
    /// Creates a new mock backend with the specified behavior.
    pub fn new(behaviour: MockBackendBehaviour) -> Self {
        Self {
            behaviour,
            create_count: AtomicUsize::new(0),
            randomize_count: AtomicUsize::new(0),
            writable_count: AtomicUsize::new(0),
            destroy_count: AtomicUsize::new(0),
        }
    }

    /// Number of `create` calls.
    pub fn create_count(&self) -> usize {
        self.create_count.load(Ordering::Acquire)
    }

    /// Number of `randomize` calls, failed ones included.
    pub fn randomize_count(&self) -> usize {
        self.randomize_count.load(Ordering::Acquire)
    }

    /// Number of writable handles created.
    pub fn writable_count(&self) -> usize {
        self.writable_count.load(Ordering::Acquire)
    }

    /// Number of `destroy` calls.
    pub fn destroy_count(&self) -> usize {
        self.destroy_count.load(Ordering::Acquire)
    }
}

unsafe impl ContextBackend for MockBackend {
    type Word = u64;
    type Context = MockContext;
    type Writable = ManuallyDrop<MockContext>;

    fn preallocated_size(&self) -> usize {
        match self.behaviour {
            MockBackendBehaviour::ZeroSize => 0,
            MockBackendBehaviour::Oversized => usize::MAX,
            _ => MOCK_CONTEXT_WORDS,
        }
    }

    fn create(&self, buffer: &'static mut [u64]) -> Option<MockContext> {
        self.create_count.fetch_add(1, Ordering::AcqRel);

        if self.behaviour == MockBackendBehaviour::FailCreate || buffer.len() < MOCK_CONTEXT_WORDS
        {
            return None;
        }

        let words = &mut buffer[..MOCK_CONTEXT_WORDS];
        words.fill(SCRATCH);
        words[MAGIC_WORD] = MAGIC;
        words[RANDOMIZATIONS_WORD] = 0;
        words[SEED_DIGEST_WORD] = 0;
        words[WRITES_WORD] = 0;

        Some(MockContext {
            base: NonNull::from(words).cast::<u64>(),
            len: MOCK_CONTEXT_WORDS,
        })
    }

    fn randomize(&self, context: &mut MockContext, seed: &[u8; SEED_LEN]) -> bool {
        let nth = self.randomize_count.fetch_add(1, Ordering::AcqRel) + 1;

        match self.behaviour {
            MockBackendBehaviour::FailRandomize => return false,
            MockBackendBehaviour::FailRandomizeAtNth(n) if n == nth => return false,
            MockBackendBehaviour::PanicOnRandomize => panic!("mock backend panicked in randomize"),
            _ => {}
        }

        let digest = seed_digest(seed);

        context
            .word(SEED_DIGEST_WORD)
            .store(digest, Ordering::Release);
        context
            .word(RANDOMIZATIONS_WORD)
            .fetch_add(1, Ordering::AcqRel);

        true
    }

    unsafe fn writable(&self, context: &MockContext) -> ManuallyDrop<MockContext> {
        self.writable_count.fetch_add(1, Ordering::AcqRel);

        ManuallyDrop::new(MockContext {
            base: context.base,
            len: context.len,
        })
    }

    fn destroy(&self, context: MockContext) {
        self.destroy_count.fetch_add(1, Ordering::AcqRel);
        context.word(MAGIC_WORD).store(0, Ordering::Release);
    }
}

/// Leaks a zeroed buffer of `words` words for the life of the test process.
pub fn leak_mock_buffer(words: usize) -> &'static mut [u64] {
    Box::leak(vec![0u64; words].into_boxed_slice())
}

/// Builds an uninitialized guardian over a mock backend and a buffer with
/// room to spare.
pub fn mock_guardian(behaviour: MockBackendBehaviour) -> ContextGuardian<MockBackend> {
    ContextGuardian::new(
        MockBackend::new(behaviour),
        leak_mock_buffer(2 * MOCK_CONTEXT_WORDS),
    )
}
