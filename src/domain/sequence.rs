//! Pure operations on ordered sequences.
//!
//! Every function borrows the current sequence and returns a fresh one, so a
//! failed call leaves the caller's value untouched.

use tracing::{instrument, trace};

use crate::domain::error::{DomainError, DomainResult};

/// Append `value` at the end.
pub fn push<T: Clone>(seq: &[T], value: T) -> Vec<T> {
    let mut next = Vec::with_capacity(seq.len() + 1);
    next.extend_from_slice(seq);
    next.push(value);
    next
}

/// Remove the last element. An empty sequence is returned unchanged.
pub fn pop<T: Clone>(seq: &[T]) -> Vec<T> {
    match seq.split_last() {
        Some((_, rest)) => rest.to_vec(),
        None => Vec::new(),
    }
}

/// Insert `value` at `index`, shifting later elements right.
///
/// `index == len` appends.
#[instrument(level = "trace", skip(seq, value))]
pub fn insert_at<T: Clone>(seq: &[T], index: usize, value: T) -> DomainResult<Vec<T>> {
    if index > seq.len() {
        return Err(DomainError::InvalidIndex {
            index,
            len: seq.len(),
        });
    }
    let mut next = seq.to_vec();
    next.insert(index, value);
    Ok(next)
}

/// Remove the element at `index`.
#[instrument(level = "trace", skip(seq))]
pub fn delete_at<T: Clone>(seq: &[T], index: usize) -> DomainResult<Vec<T>> {
    check_index(seq, index)?;
    let mut next = seq.to_vec();
    next.remove(index);
    Ok(next)
}

/// Element at `index`.
pub fn access_at<T>(seq: &[T], index: usize) -> DomainResult<&T> {
    seq.get(index).ok_or(DomainError::InvalidIndex {
        index,
        len: seq.len(),
    })
}

/// Index of the first element equal to `value`.
pub fn search<T: PartialEq + std::fmt::Debug>(seq: &[T], value: &T) -> DomainResult<usize> {
    let found = seq.iter().position(|item| item == value);
    trace!(?value, ?found, "linear search");
    found.ok_or_else(|| DomainError::not_found(format!("value {:?}", value)))
}

/// Stable ascending sort by natural ordering.
pub fn sort_ascending<T: Clone + Ord>(seq: &[T]) -> Vec<T> {
    let mut next = seq.to_vec();
    next.sort();
    next
}

/// Prepend `value` (linked-list head insertion).
pub fn insert_at_head<T: Clone>(seq: &[T], value: T) -> Vec<T> {
    let mut next = Vec::with_capacity(seq.len() + 1);
    next.push(value);
    next.extend_from_slice(seq);
    next
}

/// Remove the first element. An empty sequence is returned unchanged.
pub fn delete_head<T: Clone>(seq: &[T]) -> Vec<T> {
    match seq.split_first() {
        Some((_, rest)) => rest.to_vec(),
        None => Vec::new(),
    }
}

/// Remove the last element. Alias of [`pop`] under linked-list naming.
pub fn delete_tail<T: Clone>(seq: &[T]) -> Vec<T> {
    pop(seq)
}

/// Swap the element at `index` with its predecessor.
///
/// Index 0 is returned unchanged since there is nothing above it.
pub fn move_up<T: Clone>(seq: &[T], index: usize) -> DomainResult<Vec<T>> {
    check_index(seq, index)?;
    let mut next = seq.to_vec();
    if index > 0 {
        next.swap(index - 1, index);
    }
    Ok(next)
}

/// Swap the element at `index` with its successor.
///
/// The last index is returned unchanged.
pub fn move_down<T: Clone>(seq: &[T], index: usize) -> DomainResult<Vec<T>> {
    check_index(seq, index)?;
    let mut next = seq.to_vec();
    if index + 1 < next.len() {
        next.swap(index, index + 1);
    }
    Ok(next)
}

fn check_index<T>(seq: &[T], index: usize) -> DomainResult<()> {
    if index >= seq.len() {
        return Err(DomainError::InvalidIndex {
            index,
            len: seq.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_then_access_last() {
        let seq = push(&[1, 2, 3], 4);
        assert_eq!(access_at(&seq, seq.len() - 1), Ok(&4));
    }

    #[test]
    fn test_pop_empty_is_noop() {
        let empty: Vec<i64> = Vec::new();
        assert!(pop(&empty).is_empty());
        assert!(pop(&pop(&empty)).is_empty());
    }

    #[test]
    fn test_insert_at_len_appends() {
        assert_eq!(insert_at(&[1, 2], 2, 3).unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_insert_past_len_rejected() {
        assert_eq!(
            insert_at(&[1, 2], 3, 9),
            Err(DomainError::InvalidIndex { index: 3, len: 2 })
        );
    }

    #[test]
    fn test_delete_at_len_rejected() {
        assert_eq!(
            delete_at(&[1, 2], 2),
            Err(DomainError::InvalidIndex { index: 2, len: 2 })
        );
    }

    #[test]
    fn test_search_returns_first_match() {
        assert_eq!(search(&[5, 7, 5], &5), Ok(0));
        assert!(matches!(search(&[5, 7], &8), Err(DomainError::NotFound(_))));
    }

    #[test]
    fn test_move_up_at_top_unchanged() {
        assert_eq!(move_up(&["a", "b"], 0).unwrap(), vec!["a", "b"]);
        assert_eq!(move_up(&["a", "b"], 1).unwrap(), vec!["b", "a"]);
    }

    #[test]
    fn test_move_down_at_bottom_unchanged() {
        assert_eq!(move_down(&["a", "b"], 1).unwrap(), vec!["a", "b"]);
        assert_eq!(move_down(&["a", "b"], 0).unwrap(), vec!["b", "a"]);
    }

    #[test]
    fn test_head_operations() {
        assert_eq!(insert_at_head(&[2, 3], 1), vec![1, 2, 3]);
        assert_eq!(delete_head(&[1, 2, 3]), vec![2, 3]);
        assert_eq!(delete_tail(&[1, 2, 3]), vec![1, 2]);
        let empty: Vec<i64> = Vec::new();
        assert!(delete_head(&empty).is_empty());
    }
}
