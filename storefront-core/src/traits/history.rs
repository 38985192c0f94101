//! Navigation history abstract Trait

use std::sync::{Mutex, PoisonError};

use tokio::sync::watch;

use crate::types::Location;

/// Navigation history Trait
///
/// The observable "address bar" every listing view reads its state from.
/// Mutations notify subscribers through a `watch` channel; a subscriber sees the
/// latest location, intermediate ones may be skipped.
pub trait History: Send + Sync {
    /// Location of the current entry
    fn current(&self) -> Location;

    /// Add a new entry after the current one, dropping any forward entries
    fn push(&self, location: Location);

    /// Overwrite the current entry without adding a new one
    fn replace(&self, location: Location);

    /// Step back one entry. Returns `false` at the first entry.
    fn back(&self) -> bool;

    /// Step forward one entry. Returns `false` at the last entry.
    fn forward(&self) -> bool;

    /// Receiver that is notified after every navigation
    fn subscribe(&self) -> watch::Receiver<Location>;
}

struct Stack {
    entries: Vec<Location>,
    index: usize,
}

impl Stack {
    fn current(&self) -> Location {
        self.entries.get(self.index).cloned().unwrap_or_default()
    }
}

/// In-memory history
///
/// Default implementation, used by the terminal front end and tests.
pub struct InMemoryHistory {
    stack: Mutex<Stack>,
    sender: watch::Sender<Location>,
}

impl InMemoryHistory {
    #[must_use]
    pub fn new(initial: Location) -> Self {
        let (sender, _) = watch::channel(initial.clone());
        Self {
            stack: Mutex::new(Stack {
                entries: vec![initial],
                index: 0,
            }),
            sender,
        }
    }

    /// Number of entries, including forward entries.
    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Position of the current entry.
    pub fn index(&self) -> usize {
        self.lock().index
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Stack> {
        self.stack.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn notify(&self, location: Location) {
        log::debug!("navigate -> {location}");
        self.sender.send_replace(location);
    }
}

impl Default for InMemoryHistory {
    fn default() -> Self {
        Self::new(Location::default())
    }
}

impl History for InMemoryHistory {
    fn current(&self) -> Location {
        self.lock().current()
    }

    fn push(&self, location: Location) {
        {
            let mut stack = self.lock();
            let keep = stack.index + 1;
            stack.entries.truncate(keep);
            stack.entries.push(location.clone());
            stack.index = keep;
        }
        self.notify(location);
    }

    fn replace(&self, location: Location) {
        {
            let mut stack = self.lock();
            let index = stack.index;
            match stack.entries.get_mut(index) {
                Some(entry) => *entry = location.clone(),
                None => stack.entries.push(location.clone()),
            }
        }
        self.notify(location);
    }

    fn back(&self) -> bool {
        let location = {
            let mut stack = self.lock();
            if stack.index == 0 {
                return false;
            }
            stack.index -= 1;
            stack.current()
        };
        self.notify(location);
        true
    }

    fn forward(&self) -> bool {
        let location = {
            let mut stack = self.lock();
            if stack.index + 1 >= stack.entries.len() {
                return false;
            }
            stack.index += 1;
            stack.current()
        };
        self.notify(location);
        true
    }

    fn subscribe(&self) -> watch::Receiver<Location> {
        self.sender.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc(link: &str) -> Location {
        Location::parse(link).unwrap()
    }

    #[test]
    fn push_back_forward() {
        let history = InMemoryHistory::new(loc("/"));
        history.push(loc("/all-products?page=1"));
        history.push(loc("/all-products?page=2"));
        assert_eq!(history.len(), 3);

        assert!(history.back());
        assert_eq!(history.current(), loc("/all-products?page=1"));
        assert!(history.forward());
        assert_eq!(history.current(), loc("/all-products?page=2"));
        assert!(!history.forward());
    }

    #[test]
    fn back_stops_at_first_entry() {
        let history = InMemoryHistory::default();
        assert!(!history.back());
        assert_eq!(history.current(), Location::default());
    }

    #[test]
    fn replace_does_not_add_entries() {
        let history = InMemoryHistory::new(loc("/all-products"));
        history.replace(loc("/all-products?page=1"));
        assert_eq!(history.len(), 1);
        assert_eq!(history.current(), loc("/all-products?page=1"));
    }

    #[test]
    fn push_after_back_drops_forward_entries() {
        let history = InMemoryHistory::new(loc("/"));
        history.push(loc("/a"));
        history.push(loc("/b"));
        history.back();
        history.push(loc("/c"));
        assert_eq!(history.len(), 3);
        assert!(!history.forward());
        assert_eq!(history.current(), loc("/c"));
    }

    #[tokio::test]
    async fn subscribers_see_navigation() {
        let history = InMemoryHistory::new(loc("/"));
        let mut rx = history.subscribe();

        history.push(loc("/all-products?page=3"));
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), loc("/all-products?page=3"));

        history.back();
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), loc("/"));
    }
}
