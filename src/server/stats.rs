//! In-memory statistics aggregator.
//!
//! Receives one outcome per player per finished game and keeps wins, losses, draws and
//! streaks keyed by identity. Nothing is persisted; the actor is the stand-in for an
//! external statistics store.

use actix::prelude::*;
use serde::{Serialize, Deserialize};
use std::collections::HashMap;
use log::debug;

use crate::config::stats::LEADERBOARD_SIZE;
use crate::game::types::Outcome;
use crate::server::matchmaking::types::{default_username, Identity};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct PlayerStats {
    pub username: String,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    pub current_streak: u32,
    pub best_streak: u32,
}

impl PlayerStats {
    pub fn new(username: String) -> Self {
        Self {
            username,
            wins: 0,
            losses: 0,
            draws: 0,
            current_streak: 0,
            best_streak: 0,
        }
    }

    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Won => {
                self.wins += 1;
                self.current_streak += 1;
                self.best_streak = self.best_streak.max(self.current_streak);
            }
            Outcome::Lost => {
                self.losses += 1;
                self.current_streak = 0;
            }
            Outcome::Draw => {
                self.draws += 1;
                self.current_streak = 0;
            }
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct LeaderboardEntry {
    pub rank: usize,
    pub identity: Identity,
    pub username: String,
    pub wins: u32,
    pub losses: u32,
    pub current_streak: u32,
}

/// Message: one player's result for a finished game.
#[derive(Message, Clone, Debug)]
#[rtype(result = "()")]
pub struct RecordOutcome {
    pub identity: Identity,
    pub username: String,
    pub outcome: Outcome,
}

/// Message: stats of one player (zeroed if never seen).
#[derive(Message)]
#[rtype(result = "PlayerStats")]
pub struct GetPlayerStats {
    pub identity: Identity,
}

/// Message: top players by wins.
#[derive(Message)]
#[rtype(result = "Vec<LeaderboardEntry>")]
pub struct GetLeaderboard;

#[derive(Default)]
pub struct StatsAggregator {
    players: HashMap<Identity, PlayerStats>,
}

impl StatsAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    fn leaderboard(&self) -> Vec<LeaderboardEntry> {
        let mut ranked: Vec<(&Identity, &PlayerStats)> = self.players.iter().collect();
        ranked.sort_by(|(id_a, a), (id_b, b)| b.wins.cmp(&a.wins).then_with(|| id_a.cmp(id_b)));
        ranked
            .into_iter()
            .take(LEADERBOARD_SIZE)
            .enumerate()
            .map(|(i, (identity, stats))| LeaderboardEntry {
                rank: i + 1,
                identity: identity.clone(),
                username: stats.username.clone(),
                wins: stats.wins,
                losses: stats.losses,
                current_streak: stats.current_streak,
            })
            .collect()
    }
}

impl Actor for StatsAggregator {
    type Context = Context<Self>;
}

impl Handler<RecordOutcome> for StatsAggregator {
    type Result = ();

    fn handle(&mut self, msg: RecordOutcome, _ctx: &mut Self::Context) -> Self::Result {
        let stats = self
            .players
            .entry(msg.identity.clone())
            .or_insert_with(|| PlayerStats::new(msg.username.clone()));
        stats.username = msg.username;
        stats.record(msg.outcome);
        debug!("[Stats] {} recorded {:?} (streak={})", msg.identity, msg.outcome, stats.current_streak);
    }
}

impl Handler<GetPlayerStats> for StatsAggregator {
    type Result = MessageResult<GetPlayerStats>;

    fn handle(&mut self, msg: GetPlayerStats, _ctx: &mut Self::Context) -> Self::Result {
        let stats = self
            .players
            .get(&msg.identity)
            .cloned()
            .unwrap_or_else(|| PlayerStats::new(default_username(&msg.identity)));
        MessageResult(stats)
    }
}

impl Handler<GetLeaderboard> for StatsAggregator {
    type Result = MessageResult<GetLeaderboard>;

    fn handle(&mut self, _msg: GetLeaderboard, _ctx: &mut Self::Context) -> Self::Result {
        MessageResult(self.leaderboard())
    }
}
