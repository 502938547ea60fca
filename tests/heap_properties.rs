//! Structural properties of heaps built from arbitrary inputs, at arbitrary
//! offsets.

use itertools::Itertools;
use offset_heap::offset_indexable::OffsetIndexable;
use offset_heap::{HeapError, OffsetHeap};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_vec(size: usize, seed: u64) -> Vec<i64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..size).map(|_| rng.gen_range(-50..50)).collect()
}

/// Checks every parent against its children, directly on the storage.
fn assert_heap_order(heap: &OffsetHeap<i64>) {
    let storage = heap.storage();
    let (start, end) = (heap.offset(), heap.offset() + heap.size());

    for i in start..end {
        for child in [i.left_child(start), i.right_child(start)] {
            if child < end {
                assert!(
                    storage[i] <= storage[child],
                    "storage[{}] = {} > storage[{}] = {}",
                    i,
                    storage[i],
                    child,
                    storage[child]
                );
            }
        }
    }
}

#[test]
fn heap_property_holds_for_random_inputs() {
    for size in (0..70).chain([255, 256, 257, 1000]) {
        for offset in [0, 1, 3, 8, 17] {
            let values = random_vec(size, (size * 31 + offset) as u64);
            let heap = OffsetHeap::from_slice_with_offset(&values, offset).unwrap();

            assert_heap_order(&heap);
            assert!(heap.is_heap());
        }
    }
}

#[test]
fn root_is_the_minimum() {
    for seed in 0..20 {
        let values = random_vec(300, seed);
        let heap = OffsetHeap::from_slice_with_offset(&values, seed as usize).unwrap();

        assert_eq!(heap.top(), Ok(*values.iter().min().unwrap()));
    }
}

#[test]
fn heapify_only_reorders() {
    for seed in 0..10 {
        let values = random_vec(513, seed);
        let heap = OffsetHeap::from_slice_with_offset(&values, 5).unwrap();

        assert_eq!(
            heap.window().iter().sorted().collect::<Vec<_>>(),
            values.iter().sorted().collect::<Vec<_>>()
        );
    }
}

#[test]
fn every_offset_agrees_on_the_minimum() {
    let values = random_vec(1000, 42);
    let expected = OffsetHeap::from_slice(&values).top().unwrap();

    for offset in 0..=16 {
        let heap = OffsetHeap::from_slice_with_offset(&values, offset).unwrap();

        assert_eq!(heap.size(), values.len());
        assert_eq!(heap.offset(), offset);
        assert_eq!(heap.capacity(), values.len() + offset);
        assert_eq!(heap.top(), Ok(expected));
        assert_heap_order(&heap);
    }
}

#[test]
fn reheapify_at_same_offset_changes_nothing() {
    let values = random_vec(777, 9);
    let mut heap = OffsetHeap::from_slice_with_offset(&values, 4).unwrap();
    let before = heap.storage().to_vec();

    heap.set_offset(4).unwrap();

    assert_eq!(heap.storage(), before.as_slice());
}

#[test]
fn descending_five() {
    let heap = OffsetHeap::from_slice_with_offset(&[5, 4, 3, 2, 1], 0).unwrap();

    assert_eq!(heap.top(), Ok(1));
    assert_eq!(heap.window().iter().sorted().collect::<Vec<_>>(), vec![&1, &2, &3, &4, &5]);
}

#[test]
fn small_heaps() {
    let single = OffsetHeap::from_slice_with_offset(&[7], 3).unwrap();
    assert_eq!(single.top(), Ok(7));

    let empty = OffsetHeap::<i64>::from_slice_with_offset(&[], 3).unwrap();
    assert_eq!(empty.size(), 0);
    assert_eq!(empty.top(), Err(HeapError::EmptyHeap));
}

#[test]
fn set_offset_rebuilds_over_the_new_window() {
    let mut buffer = random_vec(64, 5);
    buffer.extend(random_vec(64, 6));
    let mut heap = OffsetHeap::from_buffer(buffer, 64).unwrap();

    for offset in [10, 64, 0, 33] {
        heap.set_offset(offset).unwrap();

        assert_eq!(heap.offset(), offset);
        assert_eq!(heap.size(), 64);
        assert_heap_order(&heap);
        assert_eq!(heap.top(), Ok(*heap.window().iter().min().unwrap()));
    }
}

#[test]
fn set_offset_past_the_storage_is_rejected() {
    let values = random_vec(10, 1);
    let mut heap = OffsetHeap::from_slice_with_offset(&values, 2).unwrap();
    let before = heap.storage().to_vec();

    assert_eq!(
        heap.set_offset(3),
        Err(HeapError::OffsetOutOfRange {
            offset: 3,
            size: 10,
            capacity: 12
        })
    );
    assert_eq!(heap.offset(), 2);
    assert_eq!(heap.storage(), before.as_slice());

    assert!(heap.set_offset(usize::MAX).is_err());
}

#[test]
fn size_only_construction_over_a_short_buffer_is_rejected() {
    assert_eq!(
        OffsetHeap::from_buffer(vec![1i64, 2], 3).unwrap_err(),
        HeapError::CapacityMismatch {
            size: 3,
            capacity: 2
        }
    );
}
