//! Identity -> display name and connection mapping.
//!
//! A connection is only trusted if it is the one currently registered for the identity;
//! stale connections (replaced by a reconnect) are ignored.

use std::collections::HashMap;
use std::hash::Hash;

use crate::server::matchmaking::types::{Identity, PlayerInfo};

/// Generic check that `addr` is the address registered under `key`.
pub fn is_addr_valid<K, V, A>(
    map: &HashMap<K, V>,
    key: &K,
    addr: &A,
    addr_extractor: impl Fn(&V) -> &A,
) -> bool
where
    K: Eq + Hash,
    A: PartialEq,
{
    map.get(key).is_some_and(|value| addr_extractor(value) == addr)
}

/// A registered client.
#[derive(Debug, Clone)]
pub struct Connection<C> {
    pub info: PlayerInfo,
    pub addr: C,
}

#[derive(Debug)]
pub struct ConnectionDirectory<C> {
    players: HashMap<Identity, Connection<C>>,
}

impl<C: PartialEq> ConnectionDirectory<C> {
    pub fn new() -> Self {
        Self { players: HashMap::new() }
    }

    /// Register or refresh an identity.
    ///
    /// Returns the previous entry when it belonged to a different connection.
    pub fn register(&mut self, info: PlayerInfo, addr: C) -> Option<Connection<C>> {
        let replaced = self.players.get(&info.id).is_some_and(|existing| existing.addr != addr);
        let previous = self.players.insert(info.id.clone(), Connection { info, addr });
        if replaced { previous } else { None }
    }

    pub fn get(&self, identity: &str) -> Option<&Connection<C>> {
        self.players.get(identity)
    }

    pub fn is_current(&self, identity: &str, addr: &C) -> bool {
        is_addr_valid(&self.players, &identity.to_string(), addr, |c| &c.addr)
    }

    /// Remove the entry only if `addr` is still the registered connection.
    pub fn remove_if_current(&mut self, identity: &str, addr: &C) -> Option<Connection<C>> {
        if self.is_current(identity, addr) {
            self.players.remove(identity)
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }
}

impl<C: PartialEq> Default for ConnectionDirectory<C> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(id: &str, name: &str) -> PlayerInfo {
        PlayerInfo { id: id.to_string(), username: name.to_string() }
    }

    #[test]
    fn test_register_same_connection_refreshes_name() {
        let mut directory = ConnectionDirectory::new();
        assert!(directory.register(info("a", "Alice"), 1).is_none());
        assert!(directory.register(info("a", "Alicia"), 1).is_none());
        assert_eq!(directory.get("a").map(|c| c.info.username.as_str()), Some("Alicia"));
        assert_eq!(directory.len(), 1);
    }

    #[test]
    fn test_reconnect_returns_replaced_connection() {
        let mut directory = ConnectionDirectory::new();
        directory.register(info("a", "Alice"), 1);
        let previous = directory.register(info("a", "Alice"), 2).expect("old connection");
        assert_eq!(previous.addr, 1);
        assert!(directory.is_current("a", &2));
        assert!(!directory.is_current("a", &1));
    }

    #[test]
    fn test_stale_connection_cannot_remove() {
        let mut directory = ConnectionDirectory::new();
        directory.register(info("a", "Alice"), 1);
        directory.register(info("a", "Alice"), 2);
        assert!(directory.remove_if_current("a", &1).is_none());
        assert!(directory.remove_if_current("a", &2).is_some());
        assert!(directory.get("a").is_none());
        assert!(directory.remove_if_current("a", &2).is_none());
    }
}
