//! Tests for sequence and bounded-sequence operations

use rstest::rstest;

use dsviz::domain::sequence::{
    access_at, delete_at, insert_at, pop, push, search, sort_ascending,
};
use dsviz::domain::{Bounded, DomainError};

// ============================================================
// Sequence Tests
// ============================================================

#[test]
fn given_empty_sequence_when_popping_repeatedly_then_stays_empty() {
    let empty: Vec<i64> = Vec::new();
    let mut current = empty.clone();
    for _ in 0..3 {
        current = pop(&current);
        assert_eq!(current, empty);
    }
}

#[test]
fn given_any_valid_index_when_deleting_then_reinserting_then_restores_sequence() {
    let original = vec![4, 8, 15, 16, 23, 42];
    for index in 0..original.len() {
        let value = original[index];
        let removed = delete_at(&original, index).unwrap();
        assert_eq!(removed.len(), original.len() - 1);
        let restored = insert_at(&removed, index, value).unwrap();
        assert_eq!(restored, original, "round trip failed at index {}", index);
    }
}

#[test]
fn given_sequences_up_to_100_when_pushing_then_last_element_is_pushed_value() {
    let mut seq: Vec<i64> = Vec::new();
    for len in 0..=100 {
        assert_eq!(seq.len(), len);
        let value = (len as i64) * 7 - 50;
        seq = push(&seq, value);
        assert_eq!(access_at(&seq, seq.len() - 1), Ok(&value));
    }
}

#[rstest]
#[case(vec![], 0)]
#[case(vec![1], 1)]
#[case(vec![1, 2, 3], 3)]
fn given_index_at_or_past_len_when_accessing_then_invalid_index(
    #[case] seq: Vec<i64>,
    #[case] index: usize,
) {
    assert_eq!(
        access_at(&seq, index),
        Err(DomainError::InvalidIndex {
            index,
            len: seq.len()
        })
    );
}

#[test]
fn given_failed_insert_when_checking_input_then_unchanged() {
    let seq = vec![1, 2, 3];
    assert!(insert_at(&seq, 4, 9).is_err());
    assert!(delete_at(&seq, 3).is_err());
    assert_eq!(seq, vec![1, 2, 3]);
}

#[rstest]
#[case(vec![3, 1, 2])]
#[case(vec![5, -1, 5, 0, 5])]
#[case(vec![])]
#[case(vec![9, 8, 7, 6, 5, 4, 3, 2, 1])]
fn given_sequence_when_sorting_then_sorted_permutation_and_idempotent(#[case] seq: Vec<i64>) {
    let sorted = sort_ascending(&seq);
    assert!(sorted.windows(2).all(|w| w[0] <= w[1]));

    let mut expected = seq.clone();
    expected.sort_unstable();
    assert_eq!(sorted, expected, "same multiset");

    assert_eq!(sort_ascending(&sorted), sorted);
}

#[test]
fn given_duplicates_when_searching_then_first_index() {
    assert_eq!(search(&[3, 9, 9], &9), Ok(1));
    assert!(matches!(search(&[3, 9], &4), Err(DomainError::NotFound(_))));
}

// ============================================================
// Bounded Sequence Tests
// ============================================================

#[rstest]
#[case(1)]
#[case(5)]
#[case(8)]
fn given_capacity_c_when_pushing_c_plus_one_then_capacity_exceeded_and_unchanged(
    #[case] capacity: usize,
) {
    let mut stack = Bounded::new(capacity);
    for value in 0..capacity as i64 {
        stack = stack.push(value).unwrap();
    }
    assert!(stack.is_full());

    let before = stack.clone();
    assert_eq!(
        stack.push(99),
        Err(DomainError::CapacityExceeded { capacity })
    );
    assert_eq!(stack, before);
}

#[rstest]
#[case(1)]
#[case(5)]
fn given_full_queue_when_enqueueing_then_capacity_exceeded(#[case] capacity: usize) {
    let queue = Bounded::with_items(vec![0; capacity], capacity).unwrap();
    assert_eq!(
        queue.enqueue(1),
        Err(DomainError::CapacityExceeded { capacity })
    );
}

#[test]
fn given_empty_bounded_when_dequeue_or_pop_then_idempotent() {
    let empty: Bounded<i64> = Bounded::new(5);
    assert_eq!(empty.dequeue(), empty);
    assert_eq!(empty.dequeue().dequeue(), empty);
    assert_eq!(empty.pop().pop(), empty);
}

#[test]
fn given_queue_when_dequeueing_then_fifo_order() {
    let queue = Bounded::with_items(vec![10, 20, 30], 5).unwrap();
    let queue = queue.enqueue(40).unwrap().dequeue();
    assert_eq!(queue.items(), &[20, 30, 40]);
}

#[test]
fn given_stack_when_popping_then_lifo_order() {
    let stack = Bounded::with_items(vec![1, 2, 3], 5).unwrap();
    let stack = stack.push(4).unwrap().pop().pop();
    assert_eq!(stack.items(), &[1, 2]);
}
