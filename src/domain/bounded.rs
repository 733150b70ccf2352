//! Capacity-limited stacks and queues.
//!
//! Both wrap a plain sequence and reject insertion once `capacity` is
//! reached instead of truncating. Removal from an empty structure is a no-op.

use std::fmt;

use itertools::Itertools;
use tracing::debug;

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::sequence;

/// Capacity used by the demos when nothing else is configured.
pub const DEFAULT_CAPACITY: usize = 5;

/// Sequence with a fixed maximum length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bounded<T> {
    items: Vec<T>,
    capacity: usize,
}

impl<T: Clone> Bounded<T> {
    /// Create an empty bounded sequence.
    pub fn new(capacity: usize) -> Self {
        Self {
            items: Vec::new(),
            capacity,
        }
    }

    /// Create a bounded sequence from seed values.
    ///
    /// Fails with `CapacityExceeded` when the seed does not fit.
    pub fn with_items(items: Vec<T>, capacity: usize) -> DomainResult<Self> {
        if items.len() > capacity {
            return Err(DomainError::CapacityExceeded { capacity });
        }
        Ok(Self { items, capacity })
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    /// Append at the back; shared by stack push and queue enqueue.
    fn append(&self, value: T) -> DomainResult<Self> {
        if self.is_full() {
            debug!(capacity = self.capacity, "rejecting insert into full structure");
            return Err(DomainError::CapacityExceeded {
                capacity: self.capacity,
            });
        }
        Ok(Self {
            items: sequence::push(&self.items, value),
            capacity: self.capacity,
        })
    }

    /// LIFO insert.
    pub fn push(&self, value: T) -> DomainResult<Self> {
        self.append(value)
    }

    /// LIFO removal: drops the most recently pushed element.
    pub fn pop(&self) -> Self {
        Self {
            items: sequence::pop(&self.items),
            capacity: self.capacity,
        }
    }

    /// FIFO insert.
    pub fn enqueue(&self, value: T) -> DomainResult<Self> {
        self.append(value)
    }

    /// FIFO removal: drops the oldest element.
    pub fn dequeue(&self) -> Self {
        Self {
            items: sequence::delete_head(&self.items),
            capacity: self.capacity,
        }
    }

    /// Most recently pushed element.
    pub fn top(&self) -> Option<&T> {
        self.items.last()
    }

    /// Oldest element.
    pub fn front(&self) -> Option<&T> {
        self.items.first()
    }
}

impl<T: fmt::Display> fmt::Display for Bounded<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] ({}/{})",
            self.items.iter().join(", "),
            self.items.len(),
            self.capacity
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_pop_is_lifo() {
        let stack = Bounded::new(3).push(1).unwrap().push(2).unwrap();
        assert_eq!(stack.top(), Some(&2));
        assert_eq!(stack.pop().items(), &[1]);
    }

    #[test]
    fn test_enqueue_dequeue_is_fifo() {
        let queue = Bounded::new(3).enqueue(1).unwrap().enqueue(2).unwrap();
        assert_eq!(queue.front(), Some(&1));
        assert_eq!(queue.dequeue().items(), &[2]);
    }

    #[test]
    fn test_full_rejects_and_keeps_items() {
        let queue = Bounded::with_items(vec![1, 2], 2).unwrap();
        assert_eq!(
            queue.enqueue(3),
            Err(DomainError::CapacityExceeded { capacity: 2 })
        );
        assert_eq!(queue.items(), &[1, 2]);
    }

    #[test]
    fn test_seed_larger_than_capacity_rejected() {
        assert!(Bounded::with_items(vec![1, 2, 3], 2).is_err());
    }

    #[test]
    fn test_display_shows_fill_level() {
        let stack = Bounded::with_items(vec![1, 2], 5).unwrap();
        assert_eq!(stack.to_string(), "[1, 2] (2/5)");
        assert_eq!(Bounded::<i64>::new(3).to_string(), "[] (0/3)");
    }
}
