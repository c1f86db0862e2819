//! In-memory store: used when no data file is configured. Lost on restart.

use super::{PlayerStore, StoreData};
use crate::models::{MatchHistoryRecord, MatchReport, PlayerId, PlayerRecord, StoreError};
use async_trait::async_trait;
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;

#[derive(Debug, Default)]
pub struct MemoryStore {
    data: Mutex<StoreData>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-filled with the given players.
    pub fn with_players(players: Vec<PlayerRecord>) -> Self {
        Self {
            data: Mutex::new(StoreData {
                players,
                ..StoreData::default()
            }),
        }
    }

    /// Copy of everything stored (for inspection).
    pub fn snapshot(&self) -> Result<StoreData, StoreError> {
        Ok(self.lock()?.clone())
    }

    fn lock(&self) -> Result<MutexGuard<'_, StoreData>, StoreError> {
        self.data
            .lock()
            .map_err(|_| StoreError::Corrupt("memory store lock poisoned".to_string()))
    }
}

#[async_trait]
impl PlayerStore for MemoryStore {
    async fn load_players(&self) -> Result<Vec<PlayerRecord>, StoreError> {
        let mut players = self.lock()?.players.clone();
        players.sort_by_key(|p| p.created_at);
        Ok(players)
    }

    async fn save_players(&self, players: &[PlayerRecord]) -> Result<(), StoreError> {
        self.lock()?.upsert_players(players);
        log::info!("Saved {} player(s) in memory", players.len());
        Ok(())
    }

    async fn delete_player(&self, name: &str) -> Result<(), StoreError> {
        self.lock()?.delete_player(name);
        log::info!("Deleted player {} from memory", name);
        Ok(())
    }

    async fn clear_all_players(&self) -> Result<(), StoreError> {
        self.lock()?.players.clear();
        log::info!("Cleared all players from memory");
        Ok(())
    }

    async fn save_match_result(&self, report: &MatchReport) -> Result<(), StoreError> {
        let mut data = self.lock()?;
        let mut next = data.clone();
        next.apply_match(report)?;
        *data = next;
        log::info!("Match results saved in memory");
        Ok(())
    }

    async fn load_leaderboard(&self) -> Result<Vec<PlayerRecord>, StoreError> {
        Ok(self.lock()?.leaderboard())
    }

    async fn save_team_generation(
        &self,
        team_a: &[PlayerId],
        team_b: &[PlayerId],
    ) -> Result<Uuid, StoreError> {
        let id = self.lock()?.add_team_generation(team_a, team_b);
        log::info!("Team generation {} saved in memory", id);
        Ok(id)
    }

    async fn load_match_history(&self, limit: usize) -> Result<Vec<MatchHistoryRecord>, StoreError> {
        Ok(self.lock()?.recent_matches(limit))
    }
}
