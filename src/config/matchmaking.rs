/// Matchmaking configuration constants.
/// 
/// This module defines parameters for player registration, such as username bounds
/// and the default display name given to players who do not pick one.
pub const MIN_USERNAME_LEN: usize = 2;

/// Maximum length (in characters) of a display name.
pub const MAX_USERNAME_LEN: usize = 50;

/// Prefix of the generated display name ("Player_a1b2").
pub const DEFAULT_USERNAME_PREFIX: &str = "Player_";

/// Number of trailing identity characters appended to the generated display name.
pub const DEFAULT_USERNAME_SUFFIX_LEN: usize = 4;
