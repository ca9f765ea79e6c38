use serde::{Serialize, Deserialize};

use crate::config::matchmaking::{DEFAULT_USERNAME_PREFIX, DEFAULT_USERNAME_SUFFIX_LEN};

/// Opaque identity chosen by the client (anonymous, no account behind it).
pub type Identity = String;

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct PlayerInfo {
    pub id: Identity,
    pub username: String,
}

/// Display name given to players who did not choose one: `Player_` + last characters of the identity.
pub fn default_username(identity: &str) -> String {
    let chars: Vec<char> = identity.chars().collect();
    let start = chars.len().saturating_sub(DEFAULT_USERNAME_SUFFIX_LEN);
    let suffix: String = chars[start..].iter().collect();
    format!("{}{}", DEFAULT_USERNAME_PREFIX, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_username_uses_identity_tail() {
        assert_eq!(default_username("user-9f2c"), "Player_9f2c");
        assert_eq!(default_username("ab"), "Player_ab");
    }
}
