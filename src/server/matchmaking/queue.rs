//! FIFO queue of players waiting for an opponent.
//!
//! Holds at most one entry per identity. Pairing always takes the two longest-waiting
//! entries, in enqueue order.

use std::collections::VecDeque;
use std::time::Instant;

use super::types::{Identity, PlayerInfo};

#[derive(Debug, Clone)]
pub struct WaitingEntry<C> {
    pub info: PlayerInfo,
    pub connection: C,
    pub enqueued_at: Instant,
}

#[derive(Debug)]
pub struct MatchQueue<C> {
    entries: VecDeque<WaitingEntry<C>>,
}

impl<C> MatchQueue<C> {
    pub fn new() -> Self {
        Self { entries: VecDeque::new() }
    }

    /// Append to the tail unless already queued. Returns the 1-based position either way.
    pub fn enqueue(&mut self, info: PlayerInfo, connection: C) -> usize {
        if let Some(position) = self.position(&info.id) {
            return position;
        }
        self.entries.push_back(WaitingEntry {
            info,
            connection,
            enqueued_at: Instant::now(),
        });
        self.entries.len()
    }

    /// Dequeue the two oldest entries, if there are at least two.
    pub fn try_pair(&mut self) -> Option<(WaitingEntry<C>, WaitingEntry<C>)> {
        if self.entries.len() < 2 {
            return None;
        }
        let first = self.entries.pop_front()?;
        let second = self.entries.pop_front()?;
        Some((first, second))
    }

    /// Idempotent removal.
    pub fn remove(&mut self, identity: &str) -> Option<WaitingEntry<C>> {
        let index = self.entries.iter().position(|e| e.info.id == identity)?;
        self.entries.remove(index)
    }

    pub fn position(&self, identity: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.info.id == identity).map(|i| i + 1)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Waiting identities, oldest first.
    pub fn identities(&self) -> Vec<Identity> {
        self.entries.iter().map(|e| e.info.id.clone()).collect()
    }
}

impl<C> Default for MatchQueue<C> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(id: &str) -> PlayerInfo {
        PlayerInfo { id: id.to_string(), username: id.to_uppercase() }
    }

    #[test]
    fn test_enqueue_is_idempotent() {
        let mut queue = MatchQueue::new();
        assert_eq!(queue.enqueue(info("a"), ()), 1);
        assert_eq!(queue.enqueue(info("b"), ()), 2);
        assert_eq!(queue.enqueue(info("a"), ()), 1);
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn test_pairs_oldest_two_in_order() {
        let mut queue = MatchQueue::new();
        for id in ["a", "b", "c"] {
            queue.enqueue(info(id), ());
        }
        let (first, second) = queue.try_pair().expect("two players waiting");
        assert_eq!(first.info.id, "a");
        assert_eq!(second.info.id, "b");
        assert!(first.enqueued_at <= second.enqueued_at);
        assert!(queue.try_pair().is_none());
        assert_eq!(queue.identities(), vec!["c".to_string()]);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut queue = MatchQueue::new();
        queue.enqueue(info("a"), ());
        queue.enqueue(info("b"), ());
        assert!(queue.remove("a").is_some());
        assert!(queue.remove("a").is_none());
        assert_eq!(queue.position("a"), None);
        assert_eq!(queue.position("b"), Some(1));
    }

    #[test]
    fn test_single_entry_never_pairs() {
        let mut queue = MatchQueue::new();
        queue.enqueue(info("a"), ());
        assert!(queue.try_pair().is_none());
        assert!(!queue.is_empty());
    }
}
