//! Card pool reuse tests.

use matchit::cards::{CardPool, CardState, Placement};
use matchit::core::{CardHandle, EventQueue, FaceAsset, PairId};

/// Releasing and re-acquiring hands back the same instances without
/// building new ones.
#[test]
fn test_reuse_is_flat() {
    let mut pool = CardPool::new();
    pool.preload(4);

    let first: Vec<CardHandle> = (0..6).map(|_| pool.acquire()).collect();
    assert_eq!(pool.constructed(), 6);
    assert_eq!(pool.active(), 6);

    for &handle in &first {
        pool.release(handle);
    }
    assert_eq!(pool.active(), 0);
    assert_eq!(pool.available(), 6);

    let mut second: Vec<CardHandle> = (0..6).map(|_| pool.acquire()).collect();
    assert_eq!(pool.constructed(), 6);

    let mut first = first;
    first.sort_by_key(|h| h.0);
    second.sort_by_key(|h| h.0);
    assert_eq!(first, second);
}

/// A recycled card comes back face down, unmatched and with a new lease.
#[test]
fn test_release_resets_card() {
    let mut pool = CardPool::new();
    let mut events = EventQueue::new();
    let handle = pool.acquire();

    {
        let card = pool.get_mut(handle).unwrap();
        card.initialize(PairId::new(3), Some(FaceAsset::new(3))).unwrap();
        card.request_flip(true, &mut events);
        card.set_matched(true, &mut events);
        assert_eq!(card.state(), CardState::Matched);
    }
    let lease = pool.get(handle).unwrap().lease();

    pool.release(handle);
    assert_eq!(pool.get(handle).unwrap().placement(), Placement::Pooled);

    let again = pool.acquire();
    assert_eq!(again, handle);
    let card = pool.get(again).unwrap();
    assert_eq!(card.state(), CardState::FaceDown);
    assert_eq!(card.active_flip(), None);
    assert_eq!(card.lease(), lease + 1);
}

/// Releasing twice or releasing an unknown handle changes nothing.
#[test]
fn test_double_release_is_noop() {
    let mut pool = CardPool::new();
    let handle = pool.acquire();

    pool.release(handle);
    pool.release(handle);
    pool.release(CardHandle::new(99));

    assert_eq!(pool.available(), 1);
    assert_eq!(pool.constructed(), 1);
}
