//! Live sessions keyed by id, plus the reverse index identity -> session.

use std::collections::HashMap;

use crate::game::state::SessionId;
use crate::server::matchmaking::types::Identity;

#[derive(Debug, Clone)]
pub struct SessionEntry<H> {
    pub handle: H,
    pub participants: [Identity; 2],
}

#[derive(Debug)]
pub struct SessionRegistry<H> {
    sessions: HashMap<SessionId, SessionEntry<H>>,
    by_identity: HashMap<Identity, SessionId>,
}

impl<H> SessionRegistry<H> {
    pub fn new() -> Self {
        Self {
            sessions: HashMap::new(),
            by_identity: HashMap::new(),
        }
    }

    pub fn insert(&mut self, id: SessionId, handle: H, participants: [Identity; 2]) {
        for identity in &participants {
            self.by_identity.insert(identity.clone(), id);
        }
        self.sessions.insert(id, SessionEntry { handle, participants });
    }

    pub fn get(&self, id: &SessionId) -> Option<&SessionEntry<H>> {
        self.sessions.get(id)
    }

    pub fn session_of(&self, identity: &str) -> Option<SessionId> {
        self.by_identity.get(identity).copied()
    }

    /// Purge a session and its reverse index entries.
    pub fn remove(&mut self, id: &SessionId) -> Option<SessionEntry<H>> {
        let entry = self.sessions.remove(id)?;
        for identity in &entry.participants {
            if self.by_identity.get(identity) == Some(id) {
                self.by_identity.remove(identity);
            }
        }
        Some(entry)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }
}

impl<H> Default for SessionRegistry<H> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_remove_clears_reverse_index() {
        let mut registry = SessionRegistry::new();
        let id = Uuid::new_v4();
        registry.insert(id, (), ["a".to_string(), "b".to_string()]);
        assert_eq!(registry.session_of("b"), Some(id));

        assert!(registry.remove(&id).is_some());
        assert_eq!(registry.session_of("a"), None);
        assert_eq!(registry.session_of("b"), None);
        assert!(registry.remove(&id).is_none());
        assert_eq!(registry.len(), 0);
    }
}
