// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use crate::SEED_LEN;
use crate::error::EntropyError;
use crate::support::test_utils::{MockEntropyBehaviour, MockEntropySource};
use crate::traits::EntropySource;

#[test]
fn test_counting_seeds_follow_draw_index() {
    let mock = MockEntropySource::new(MockEntropyBehaviour::Counting);
    let mut seed = [0u8; SEED_LEN];

    for nth in 1..=3u8 {
        mock.fill_seed(&mut seed).expect("Failed to fill_seed(..)");
        assert_eq!(seed, [nth; SEED_LEN]);
    }

    assert_eq!(mock.seeds_drawn(), 3);
}

#[test]
fn test_fail_at_nth_seed_fails_once() {
    let mock = MockEntropySource::new(MockEntropyBehaviour::FailAtNthSeed(2));
    let mut seed = [0u8; SEED_LEN];

    assert!(mock.fill_seed(&mut seed).is_ok());
    assert_eq!(mock.fill_seed(&mut seed), Err(EntropyError::Exhausted));
    assert!(mock.fill_seed(&mut seed).is_ok());
    assert_eq!(mock.seeds_drawn(), 3);
}

#[test]
fn test_set_behaviour_keeps_counting() {
    let mut mock = MockEntropySource::new(MockEntropyBehaviour::Constant(0x3C));
    let mut seed = [0u8; SEED_LEN];

    mock.fill_seed(&mut seed).expect("Failed to fill_seed(..)");
    assert_eq!(seed, [0x3C; SEED_LEN]);

    mock.set_behaviour(MockEntropyBehaviour::FailAlways);
    assert_eq!(mock.fill_seed(&mut seed), Err(EntropyError::Exhausted));

    assert_eq!(mock.seeds_drawn(), 2);
}
