//! JSON file store: the whole store is one JSON document, rewritten on every change.

use super::{PlayerStore, StoreData};
use crate::models::{MatchHistoryRecord, MatchReport, PlayerId, PlayerRecord, StoreError};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use uuid::Uuid;

#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    /// Serializes read-modify-write cycles on the file.
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    /// Store backed by `path`. The file is created on first write; a missing file reads as empty.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read(&self) -> Result<StoreData, StoreError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(text) if text.trim().is_empty() => Ok(StoreData::default()),
            Ok(text) => Ok(serde_json::from_str(&text)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(StoreData::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Write to a sibling temp file, then rename over the real one.
    async fn write(&self, data: &StoreData) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(dir).await?;
        }
        let json = serde_json::to_vec_pretty(data)?;
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        tokio::fs::write(&tmp, json).await?;
        if let Err(e) = tokio::fs::rename(&tmp, &self.path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(e.into());
        }
        Ok(())
    }

    /// Load, change, and write back while holding the write lock.
    async fn update<T>(
        &self,
        change: impl FnOnce(&mut StoreData) -> Result<T, StoreError> + Send,
    ) -> Result<T, StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut data = self.read().await?;
        let out = change(&mut data)?;
        self.write(&data).await?;
        Ok(out)
    }
}

#[async_trait]
impl PlayerStore for JsonFileStore {
    async fn load_players(&self) -> Result<Vec<PlayerRecord>, StoreError> {
        let mut players = self.read().await?.players;
        players.sort_by_key(|p| p.created_at);
        Ok(players)
    }

    async fn save_players(&self, players: &[PlayerRecord]) -> Result<(), StoreError> {
        self.update(|data| {
            data.upsert_players(players);
            Ok(())
        })
        .await?;
        log::info!("Saved {} player(s) to {}", players.len(), self.path.display());
        Ok(())
    }

    async fn delete_player(&self, name: &str) -> Result<(), StoreError> {
        self.update(|data| {
            data.delete_player(name);
            Ok(())
        })
        .await?;
        log::info!("Deleted player {} from {}", name, self.path.display());
        Ok(())
    }

    async fn clear_all_players(&self) -> Result<(), StoreError> {
        self.update(|data| {
            data.players.clear();
            Ok(())
        })
        .await?;
        log::info!("Cleared all players from {}", self.path.display());
        Ok(())
    }

    async fn save_match_result(&self, report: &MatchReport) -> Result<(), StoreError> {
        self.update(|data| data.apply_match(report)).await?;
        log::info!("Match results saved to {}", self.path.display());
        Ok(())
    }

    async fn load_leaderboard(&self) -> Result<Vec<PlayerRecord>, StoreError> {
        Ok(self.read().await?.leaderboard())
    }

    async fn save_team_generation(
        &self,
        team_a: &[PlayerId],
        team_b: &[PlayerId],
    ) -> Result<Uuid, StoreError> {
        let id = self
            .update(|data| Ok(data.add_team_generation(team_a, team_b)))
            .await?;
        log::info!("Team generation {} saved to {}", id, self.path.display());
        Ok(id)
    }

    async fn load_match_history(&self, limit: usize) -> Result<Vec<MatchHistoryRecord>, StoreError> {
        Ok(self.read().await?.recent_matches(limit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn failed_rename_removes_temp_file() {
        let dir = std::env::temp_dir().join(format!("team_balancer_rename_{}", Uuid::new_v4()));
        // a directory sitting where the file should go makes the rename fail
        let path = dir.join("store.json");
        std::fs::create_dir_all(path.join("occupied")).unwrap();
        let store = JsonFileStore::new(path.clone());

        let err = store.write(&StoreData::default()).await.unwrap_err();
        assert!(matches!(err, StoreError::Io(_)));
        assert!(!dir.join("store.json.tmp").exists());
        assert!(path.is_dir());

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
