//! Property-based tests for the recency list and the cache
//!
//! Each operation sequence runs against a `VecDeque` model ordered from least
//! to most recently used; after every step the structure must match it.

use std::collections::VecDeque;

use proptest::prelude::*;

use crate::cache::LruCache;
use crate::list::{NodeId, RecencyList};

// == Strategies ==
#[derive(Debug, Clone)]
enum CacheOp {
    Set { key: u8, value: u16 },
    Get { key: u8 },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        (0..12u8, any::<u16>()).prop_map(|(key, value)| CacheOp::Set { key, value }),
        (0..12u8).prop_map(|key| CacheOp::Get { key }),
    ]
}

#[derive(Debug, Clone)]
enum ListOp {
    AddHead(u32),
    AddTail(u32),
    RemoveHead,
    RemoveTail,
    MoveToHead(usize),
    MoveToTail(usize),
    Remove(usize),
    InsertAfter(usize, u32),
    InsertBefore(usize, u32),
}

fn list_op_strategy() -> impl Strategy<Value = ListOp> {
    prop_oneof![
        any::<u32>().prop_map(ListOp::AddHead),
        any::<u32>().prop_map(ListOp::AddTail),
        Just(ListOp::RemoveHead),
        Just(ListOp::RemoveTail),
        any::<usize>().prop_map(ListOp::MoveToHead),
        any::<usize>().prop_map(ListOp::MoveToTail),
        any::<usize>().prop_map(ListOp::Remove),
        (any::<usize>(), any::<u32>()).prop_map(|(pos, v)| ListOp::InsertAfter(pos, v)),
        (any::<usize>(), any::<u32>()).prop_map(|(pos, v)| ListOp::InsertBefore(pos, v)),
    ]
}

/// Apply `op` to the cache and to the model, returning the key evicted, if any
fn apply(
    cache: &mut LruCache<u8, u16>,
    model: &mut VecDeque<(u8, u16)>,
    capacity: usize,
    op: &CacheOp,
) -> Option<u8> {
    match *op {
        CacheOp::Set { key, value } => {
            let mut evicted = None;
            if let Some(pos) = model.iter().position(|(k, _)| *k == key) {
                model.remove(pos);
            } else if model.len() == capacity {
                evicted = model.pop_front().map(|(k, _)| k);
            }
            model.push_back((key, value));
            cache.set(key, value);
            evicted
        }
        CacheOp::Get { key } => {
            let expected = model.iter().position(|(k, _)| *k == key).map(|pos| {
                let entry = model.remove(pos).unwrap();
                model.push_back(entry);
                entry.1
            });
            assert_eq!(cache.get(&key).copied(), expected);
            None
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    // Capacity, ordering and eviction all follow the LRU model.
    #[test]
    fn prop_cache_matches_lru_model(
        capacity in 1..6usize,
        ops in prop::collection::vec(cache_op_strategy(), 1..80),
    ) {
        let mut cache = LruCache::new(capacity).unwrap();
        let mut model = VecDeque::new();

        for op in &ops {
            let before: Vec<u8> = cache.iter().map(|(k, _)| *k).collect();
            let evicted = apply(&mut cache, &mut model, capacity, op);

            prop_assert!(cache.len() <= capacity);
            if let Some(evicted) = evicted {
                // Oldest entry before the call is the one that went
                prop_assert_eq!(before.first().copied(), Some(evicted));
                prop_assert!(!cache.contains(&evicted));
            }

            let actual: Vec<(u8, u16)> = cache.iter().map(|(k, v)| (*k, *v)).collect();
            let expected: Vec<(u8, u16)> = model.iter().copied().collect();
            prop_assert_eq!(actual, expected);
            cache.debug_validate_invariants();
        }
    }

    // Overwriting an existing key never changes the size.
    #[test]
    fn prop_overwrite_keeps_len(
        keys in prop::collection::vec(0..8u8, 1..20),
        value in any::<u16>(),
    ) {
        let mut cache = LruCache::new(8).unwrap();
        for key in &keys {
            cache.set(*key, 0);
        }
        let len = cache.len();

        for key in &keys {
            cache.set(*key, value);
            prop_assert_eq!(cache.len(), len);
            prop_assert_eq!(cache.get(key), Some(&value));
        }
    }

    // A miss changes neither size nor order.
    #[test]
    fn prop_miss_is_side_effect_free(
        keys in prop::collection::vec(0..50u8, 1..20),
        missing in 100..200u8,
    ) {
        let mut cache = LruCache::new(10).unwrap();
        for key in &keys {
            cache.set(*key, u16::from(*key));
        }
        let before: Vec<u8> = cache.iter().map(|(k, _)| *k).collect();

        prop_assert_eq!(cache.get(&missing), None);

        let after: Vec<u8> = cache.iter().map(|(k, _)| *k).collect();
        prop_assert_eq!(before, after);
    }

    // Repeated gets keep the key at the MRU end.
    #[test]
    fn prop_repeated_get_stays_mru(
        keys in prop::collection::vec(0..20u8, 1..20),
        pick in any::<prop::sample::Index>(),
        repeats in 1..5usize,
    ) {
        let mut cache = LruCache::new(32).unwrap();
        for key in &keys {
            cache.set(*key, 0);
        }
        let key = keys[pick.index(keys.len())];
        let len = cache.len();

        for _ in 0..repeats {
            cache.get(&key);
            prop_assert_eq!(cache.iter().next_back().map(|(k, _)| *k), Some(key));
            prop_assert_eq!(cache.len(), len);
        }
    }

    // Every list operation keeps the link invariants and the model order.
    #[test]
    fn prop_list_matches_model(ops in prop::collection::vec(list_op_strategy(), 1..100)) {
        let mut list = RecencyList::new();
        let mut model: VecDeque<(NodeId, u32)> = VecDeque::new();

        for op in ops {
            match op {
                ListOp::AddHead(v) => {
                    let id = list.add_to_head(v);
                    model.push_front((id, v));
                }
                ListOp::AddTail(v) => {
                    let id = list.add_to_tail(v);
                    model.push_back((id, v));
                }
                ListOp::RemoveHead => {
                    prop_assert_eq!(list.remove_from_head(), model.pop_front().map(|(_, v)| v));
                }
                ListOp::RemoveTail => {
                    prop_assert_eq!(list.remove_from_tail(), model.pop_back().map(|(_, v)| v));
                }
                ListOp::MoveToHead(pos) if !model.is_empty() => {
                    let entry = model.remove(pos % model.len()).unwrap();
                    prop_assert!(list.move_to_head(entry.0));
                    model.push_front(entry);
                }
                ListOp::MoveToTail(pos) if !model.is_empty() => {
                    let entry = model.remove(pos % model.len()).unwrap();
                    prop_assert!(list.move_to_tail(entry.0));
                    model.push_back(entry);
                }
                ListOp::Remove(pos) if !model.is_empty() => {
                    let (id, v) = model.remove(pos % model.len()).unwrap();
                    prop_assert_eq!(list.remove(id), Some(v));
                    prop_assert!(!list.contains(id));
                }
                ListOp::InsertAfter(pos, v) if !model.is_empty() => {
                    let pos = pos % model.len();
                    let id = list.insert_after(model[pos].0, v).unwrap();
                    model.insert(pos + 1, (id, v));
                }
                ListOp::InsertBefore(pos, v) if !model.is_empty() => {
                    let pos = pos % model.len();
                    let id = list.insert_before(model[pos].0, v).unwrap();
                    model.insert(pos, (id, v));
                }
                _ => {}
            }

            list.debug_validate_invariants();
            prop_assert_eq!(list.len(), model.len());
            let actual: Vec<u32> = list.iter().copied().collect();
            let expected: Vec<u32> = model.iter().map(|(_, v)| *v).collect();
            prop_assert_eq!(actual, expected);
            prop_assert_eq!(list.max(), model.iter().map(|(_, v)| v).max());
        }
    }
}
