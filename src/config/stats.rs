/// Statistics configuration constants.
///
/// Number of entries returned by the leaderboard endpoint.
pub const LEADERBOARD_SIZE: usize = 20;
