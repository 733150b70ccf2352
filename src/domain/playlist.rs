//! Cursor-bearing sequences: a circular playlist and the auto-advancing
//! play queue.

use std::time::{Duration, Instant};

use tracing::{debug, trace};

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::sequence;

/// Delay before the play queue drops the item that is playing.
pub const DEFAULT_ADVANCE_DELAY: Duration = Duration::from_millis(3000);

/// Items plus the index of the one currently selected.
///
/// The cursor is 0 for an empty playlist and otherwise always points at an
/// item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playlist<T> {
    items: Vec<T>,
    current: usize,
}

impl<T> Default for Playlist<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            current: 0,
        }
    }
}

impl<T: Clone> Playlist<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self { items, current: 0 }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current(&self) -> Option<&T> {
        self.items.get(self.current)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn add(&self, item: T) -> Self {
        Self {
            items: sequence::push(&self.items, item),
            current: self.current,
        }
    }

    /// Select the next item, wrapping to the first.
    pub fn next(&self) -> Self {
        let current = if self.current + 1 < self.items.len() {
            self.current + 1
        } else {
            0
        };
        Self {
            items: self.items.clone(),
            current,
        }
    }

    /// Select the previous item, wrapping to the last.
    pub fn previous(&self) -> Self {
        let current = if self.current > 0 {
            self.current - 1
        } else {
            self.items.len().saturating_sub(1)
        };
        Self {
            items: self.items.clone(),
            current,
        }
    }

    /// Remove the item at `index`.
    ///
    /// Removing an item before the cursor shifts the cursor back with it;
    /// removing the last item while it is current selects the new last one.
    pub fn remove(&self, index: usize) -> DomainResult<Self> {
        let items = sequence::delete_at(&self.items, index)?;
        let mut current = self.current;
        if index < current || current >= items.len() {
            current = current.saturating_sub(1);
        }
        Ok(Self { items, current })
    }

    /// Remove the current item; the next one becomes current, wrapping to
    /// the first when the removed item was last.
    pub fn remove_current(&self) -> Self {
        if self.items.is_empty() {
            return self.clone();
        }
        let mut items = self.items.clone();
        items.remove(self.current);
        let current = if self.current >= items.len() {
            0
        } else {
            self.current
        };
        Self { items, current }
    }

    /// Swap `index` with its predecessor; the cursor follows its item.
    pub fn move_up(&self, index: usize) -> DomainResult<Self> {
        let items = sequence::move_up(&self.items, index)?;
        let mut current = self.current;
        if index > 0 {
            if index == current {
                current -= 1;
            } else if index - 1 == current {
                current += 1;
            }
        }
        Ok(Self { items, current })
    }

    /// Swap `index` with its successor; the cursor follows its item.
    pub fn move_down(&self, index: usize) -> DomainResult<Self> {
        let items = sequence::move_down(&self.items, index)?;
        let mut current = self.current;
        if index + 1 < items.len() {
            if index == current {
                current += 1;
            } else if index + 1 == current {
                current -= 1;
            }
        }
        Ok(Self { items, current })
    }

    /// Select `index` directly.
    pub fn select(&self, index: usize) -> DomainResult<Self> {
        if index >= self.items.len() {
            return Err(DomainError::InvalidIndex {
                index,
                len: self.items.len(),
            });
        }
        Ok(Self {
            items: self.items.clone(),
            current: index,
        })
    }
}

/// Single-shot timer that drops the playing item after a delay.
///
/// At most one advance is pending at any time: [`AutoAdvance::arm`] replaces
/// the previous deadline. Time comes from the caller, so the owner decides
/// when to poll. Dropping the value cancels whatever is pending.
#[derive(Debug)]
pub struct AutoAdvance {
    delay: Duration,
    deadline: Option<Instant>,
    playing: bool,
}

impl AutoAdvance {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
            playing: true,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Re-arm after a state change. Nothing is armed while paused or when
    /// the playlist is empty.
    pub fn arm<T: Clone>(&mut self, playlist: &Playlist<T>, now: Instant) {
        self.deadline = if self.playing && !playlist.is_empty() {
            Some(now + self.delay)
        } else {
            None
        };
        trace!(pending = self.deadline.is_some(), "auto-advance armed");
    }

    pub fn cancel(&mut self) {
        if self.deadline.take().is_some() {
            debug!("auto-advance cancelled");
        }
    }

    pub fn pause(&mut self) {
        self.playing = false;
        self.cancel();
    }

    pub fn resume<T: Clone>(&mut self, playlist: &Playlist<T>, now: Instant) {
        self.playing = true;
        self.arm(playlist, now);
    }

    /// Fire the pending advance if its deadline has passed.
    ///
    /// Returns the next playlist when the timer fired, re-arming for the
    /// following item; returns None otherwise.
    pub fn poll<T: Clone>(&mut self, playlist: &Playlist<T>, now: Instant) -> Option<Playlist<T>> {
        let deadline = self.deadline?;
        if now < deadline {
            return None;
        }
        self.deadline = None;
        let next = playlist.remove_current();
        debug!(remaining = next.len(), "auto-advance fired");
        self.arm(&next, now);
        Some(next)
    }
}

impl Default for AutoAdvance {
    fn default() -> Self {
        Self::new(DEFAULT_ADVANCE_DELAY)
    }
}

impl Drop for AutoAdvance {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn songs() -> Playlist<&'static str> {
        Playlist::new(vec!["a", "b", "c"])
    }

    #[test]
    fn test_next_wraps_to_first() {
        let list = songs().next().next().next();
        assert_eq!(list.current(), Some(&"a"));
    }

    #[test]
    fn test_previous_wraps_to_last() {
        assert_eq!(songs().previous().current(), Some(&"c"));
    }

    #[test]
    fn test_remove_before_cursor_keeps_item_selected() {
        let list = songs().select(2).unwrap().remove(0).unwrap();
        assert_eq!(list.current(), Some(&"c"));
    }

    #[test]
    fn test_remove_last_current_selects_new_last() {
        let list = songs().select(2).unwrap().remove(2).unwrap();
        assert_eq!(list.current(), Some(&"b"));
    }

    #[test]
    fn test_move_keeps_cursor_on_item() {
        let list = songs().select(1).unwrap().move_up(1).unwrap();
        assert_eq!(list.items(), &["b", "a", "c"]);
        assert_eq!(list.current(), Some(&"b"));
        let list = list.move_down(1).unwrap();
        assert_eq!(list.current(), Some(&"b"));
    }

    #[test]
    fn test_remove_current_wraps() {
        let list = songs().select(2).unwrap().remove_current();
        assert_eq!(list.items(), &["a", "b"]);
        assert_eq!(list.current_index(), 0);
    }

    #[test]
    fn test_empty_playlist_navigation() {
        let list: Playlist<u8> = Playlist::default();
        assert_eq!(list.next().current_index(), 0);
        assert_eq!(list.previous().current_index(), 0);
        assert!(list.remove_current().is_empty());
    }
}
