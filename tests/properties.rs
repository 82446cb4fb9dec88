//! Property-based tests using proptest
//!
//! Random operation sequences are run against a `PairingHeap` and a plain
//! sorted `Vec` model, comparing what both report after every step.

use itertools::Itertools;
use pairing_pq::{ByKey, Error, Handle, MinFirst, PairingHeap, PriorityQueue};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::cmp::Reverse;

type Task = (&'static str, u32);

#[derive(Debug, Clone)]
enum Op {
    Push(i32),
    Pop,
    Update(usize, i32),
    Scramble(i32),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => any::<i16>().prop_map(|v| Op::Push(v as i32)),
        2 => Just(Op::Pop),
        3 => (any::<usize>(), 1..1000i32).prop_map(|(i, d)| Op::Update(i, d)),
        1 => any::<i16>().prop_map(|s| Op::Scramble(s as i32)),
    ]
}

/// Drains a generic priority queue.
fn drain_all<Q: PriorityQueue<i32>>(queue: &mut Q) -> Vec<i32> {
    let mut out = Vec::with_capacity(queue.len());
    while let Some(value) = queue.pop() {
        out.push(value);
    }
    out
}

proptest! {
    #[test]
    fn operations_match_model(ops in prop::collection::vec(op(), 0..200)) {
        let mut heap = PairingHeap::new();
        // (handle, current value) of every live element
        let mut live: Vec<(Handle, i32)> = Vec::new();
        let mut pushes = 0usize;
        let mut pops = 0usize;

        for op in ops {
            match op {
                Op::Push(value) => {
                    live.push((heap.add_node(value), value));
                    pushes += 1;
                }
                Op::Pop => {
                    let expected = live.iter().map(|&(_, v)| v).max();
                    let popped = heap.pop();
                    prop_assert_eq!(popped, expected);
                    if let Some(value) = popped {
                        pops += 1;
                        // any element equal to the maximum may have been removed
                        let idx = live
                            .iter()
                            .position(|&(h, v)| v == value && !heap.contains(h))
                            .expect("popped element must have been live");
                        live.swap_remove(idx);
                    }
                }
                Op::Update(idx, delta) => {
                    if live.is_empty() {
                        continue;
                    }
                    let idx = idx % live.len();
                    let (handle, old) = live[idx];
                    let new = old.saturating_add(delta);
                    prop_assert_eq!(heap.update_elt(handle, new), Ok(()));
                    prop_assert_eq!(heap.update_elt(handle, new), Err(Error::NotMoreExtreme));
                    live[idx].1 = new;
                }
                Op::Scramble(seed) => {
                    for (handle, value) in live.iter_mut() {
                        *value = value.wrapping_mul(31).wrapping_add(seed) % 10_000;
                        heap[*handle] = *value;
                    }
                    heap.update_priorities();
                }
            }

            prop_assert_eq!(heap.len(), pushes - pops);
            prop_assert_eq!(heap.len(), live.len());
            prop_assert_eq!(heap.top().copied(), live.iter().map(|&(_, v)| v).max());
            for &(handle, value) in &live {
                prop_assert_eq!(heap.get(handle), Some(&value));
            }
        }

        let expected: Vec<i32> = live.iter().map(|&(_, v)| v).sorted().rev().collect();
        prop_assert_eq!(drain_all(&mut heap), expected);
    }

    #[test]
    fn extraction_order_min_first(values in prop::collection::vec(any::<i32>(), 0..300)) {
        let heap = PairingHeap::from_iter_with_compare(values.iter().copied(), MinFirst);
        itertools::assert_equal(heap.drain(), values.iter().copied().sorted());
    }

    #[test]
    fn update_priorities_round_trip(
        values in prop::collection::vec(any::<i32>(), 1..300),
        seed in any::<u64>(),
    ) {
        let mut heap = PairingHeap::new();
        let handles: Vec<Handle> = values.iter().map(|&v| heap.add_node(v)).collect();

        let mut rng = StdRng::seed_from_u64(seed);
        let mut expected = Vec::with_capacity(values.len());
        for &handle in &handles {
            let value = rng.gen::<i32>();
            *heap.get_mut(handle).unwrap() = value;
            expected.push(value);
        }
        heap.update_priorities();

        prop_assert_eq!(heap.len(), values.len());
        for (&handle, value) in handles.iter().zip(expected.iter()) {
            prop_assert_eq!(heap.get(handle), Some(value));
        }
        expected.sort_by(|a, b| b.cmp(a));
        prop_assert_eq!(heap.into_sorted_vec(), expected);
    }

    #[test]
    fn clone_is_independent(values in prop::collection::vec(any::<i32>(), 1..100)) {
        let original: PairingHeap<i32> = values.iter().copied().collect();
        let mut copy = original.clone();
        prop_assert_eq!(copy.len(), original.len());
        prop_assert_eq!(copy.top(), original.top());

        let top = original.top().copied();
        copy.pop();
        copy.push(i32::MIN);
        copy.push(i32::MAX);
        prop_assert_eq!(original.len(), values.len());
        prop_assert_eq!(original.top().copied(), top);
        let expected: Vec<i32> = values.iter().copied().sorted().rev().collect();
        prop_assert_eq!(original.into_sorted_vec(), expected);
    }
}

#[test]
fn pops_in_descending_order() {
    let mut heap: PairingHeap<i32> = vec![5, 1, 9, 3].into_iter().collect();
    for &expected in &[9, 5, 3, 1] {
        assert_eq!(heap.top(), Some(&expected));
        heap.pop();
    }
    assert!(heap.is_empty());
}

#[test]
fn update_elt_example() {
    let mut heap = PairingHeap::new();
    let handle = heap.add_node(10);
    heap.push(20);
    heap.update_elt(handle, 25).unwrap();
    assert_eq!(heap.top(), Some(&25));
}

#[test]
fn shuffled_pushes_pop_sorted() {
    let mut values: Vec<u32> = (0..10_000).collect();
    values.shuffle(&mut StdRng::seed_from_u64(42));
    let heap = PairingHeap::from_iter_with_compare(values, MinFirst);
    assert!(heap.drain().eq(0..10_000));
}

#[test]
fn degenerate_chain_survives() {
    // ascending pushes into a max-heap build a single chain of nodes
    let mut heap: PairingHeap<u32> = (0..200_000).collect();
    heap.update_priorities();
    let copy = heap.clone();
    assert_eq!(copy.len(), 200_000);
    assert_eq!(heap.pop(), Some(199_999));
    drop(heap);
    assert_eq!(copy.top(), Some(&199_999));
}

#[test]
fn by_key_tasks() {
    let mut tasks = PairingHeap::with_compare(ByKey(|task: &Task| Reverse(task.1)));
    let write = tasks.add_node(("write", 30));
    tasks.push(("read", 10));
    tasks.push(("sleep", 50));
    assert_eq!(tasks.top(), Some(&("read", 10)));

    tasks.update_elt(write, ("write", 5)).unwrap();
    assert_eq!(
        tasks.drain().map(|(name, _)| name).collect::<Vec<_>>(),
        vec!["write", "read", "sleep"]
    );
}

#[test]
fn stale_handle_is_rejected() {
    let mut heap = PairingHeap::new();
    let handle = heap.add_node(1);
    heap.pop();
    heap.push(2);
    assert_eq!(heap.update_elt(handle, 3), Err(Error::InvalidHandle));
    assert_eq!(heap.get(handle), None);
    assert_eq!(heap.len(), 1);
}
