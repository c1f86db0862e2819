//! Persistence collaborator: the contract the organizer relies on and two implementations.

mod json_file;
mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

use crate::logic::apply_result;
use crate::models::{
    MatchHistoryRecord, MatchReport, PlayerId, PlayerRecord, StoreError, TeamGenerationRecord,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Where players, match history and team generations are kept between runs.
///
/// Every call either succeeds completely or reports an error with stored data unchanged.
#[async_trait]
pub trait PlayerStore: Send + Sync {
    /// All stored players, oldest first.
    async fn load_players(&self) -> Result<Vec<PlayerRecord>, StoreError>;

    /// Insert new players; for existing names only the nicknames are updated.
    async fn save_players(&self, players: &[PlayerRecord]) -> Result<(), StoreError>;

    async fn delete_player(&self, name: &str) -> Result<(), StoreError>;

    async fn clear_all_players(&self) -> Result<(), StoreError>;

    /// Add every participant's kills/deaths to the stored totals and append the match to history.
    async fn save_match_result(&self, report: &MatchReport) -> Result<(), StoreError>;

    /// All stored players, best K/D first.
    async fn load_leaderboard(&self) -> Result<Vec<PlayerRecord>, StoreError>;

    /// Record a team generation; returns its history id.
    async fn save_team_generation(
        &self,
        team_a: &[PlayerId],
        team_b: &[PlayerId],
    ) -> Result<Uuid, StoreError>;

    /// Most recent finalized matches, newest first.
    async fn load_match_history(&self, limit: usize) -> Result<Vec<MatchHistoryRecord>, StoreError>;
}

/// Everything a store keeps. Both implementations share this layout.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreData {
    #[serde(default)]
    pub players: Vec<PlayerRecord>,
    #[serde(default)]
    pub match_history: Vec<MatchHistoryRecord>,
    #[serde(default)]
    pub team_history: Vec<TeamGenerationRecord>,
}

impl StoreData {
    fn upsert_players(&mut self, players: &[PlayerRecord]) {
        for incoming in players {
            match self.players.iter_mut().find(|p| p.name == incoming.name) {
                Some(existing) => {
                    existing.nicknames = incoming.nicknames.clone();
                    existing.active_nickname = incoming.active_nickname.clone();
                }
                None => self.players.push(incoming.clone()),
            }
        }
    }

    fn delete_player(&mut self, name: &str) {
        self.players.retain(|p| p.name != name);
    }

    fn apply_match(&mut self, report: &MatchReport) -> Result<(), StoreError> {
        for r in &report.player_results {
            let Some(record) = self.players.iter_mut().find(|p| p.name == r.name) else {
                log::warn!("Player {} not found in store, skipping stats update", r.name);
                continue;
            };
            let stats = apply_result(&record.stats(), i64::from(r.kills), i64::from(r.deaths))
                .map_err(|e| StoreError::RejectedStats(format!("stats for {}: {}", r.name, e)))?;
            record.set_stats(stats);
        }
        self.match_history.push(MatchHistoryRecord::from_report(report));
        Ok(())
    }

    fn leaderboard(&self) -> Vec<PlayerRecord> {
        let mut ranked = self.players.clone();
        ranked.sort_by(|a, b| b.stats().average_kd().total_cmp(&a.stats().average_kd()));
        ranked
    }

    fn recent_matches(&self, limit: usize) -> Vec<MatchHistoryRecord> {
        // appended in play order
        self.match_history.iter().rev().take(limit).cloned().collect()
    }

    fn add_team_generation(&mut self, team_a: &[PlayerId], team_b: &[PlayerId]) -> Uuid {
        let record = TeamGenerationRecord::new(team_a, team_b);
        let id = record.id;
        self.team_history.push(record);
        id
    }
}
