//! Integration tests for the persistence collaborators and store sync.

use async_trait::async_trait;
use std::path::PathBuf;
use team_balancer_web::{
    load_session, sync_with_store, JsonFileStore, MatchHistoryRecord, MatchReport, MemoryStore,
    Player, PlayerId, PlayerRecord, PlayerResult, PlayerStats, PlayerStore, Session, SquadError,
    StoreError, SyncOutcome, Team,
};
use uuid::Uuid;

fn record(name: &str, kills: u32, deaths: u32, games: u32) -> PlayerRecord {
    PlayerRecord::from_player(&Player::new(name).with_stats(PlayerStats::new(kills, deaths, games)))
}

fn report(results: &[(&str, u32, u32)], winner: Team) -> MatchReport {
    let names: Vec<String> = results.iter().map(|r| r.0.to_string()).collect();
    let half = names.len() / 2;
    MatchReport {
        team_a: names[..half].to_vec(),
        team_b: names[half..].to_vec(),
        player_results: results
            .iter()
            .map(|&(name, kills, deaths)| PlayerResult { name: name.into(), kills, deaths })
            .collect(),
        winner,
    }
}

fn temp_path() -> PathBuf {
    std::env::temp_dir()
        .join(format!("team_balancer_test_{}", Uuid::new_v4()))
        .join("store.json")
}

/// Store that fails every call.
struct BrokenStore;

fn broken() -> StoreError {
    StoreError::Io(std::io::Error::new(std::io::ErrorKind::Other, "backend down"))
}

#[async_trait]
impl PlayerStore for BrokenStore {
    async fn load_players(&self) -> Result<Vec<PlayerRecord>, StoreError> {
        Err(broken())
    }
    async fn save_players(&self, _: &[PlayerRecord]) -> Result<(), StoreError> {
        Err(broken())
    }
    async fn delete_player(&self, _: &str) -> Result<(), StoreError> {
        Err(broken())
    }
    async fn clear_all_players(&self) -> Result<(), StoreError> {
        Err(broken())
    }
    async fn save_match_result(&self, _: &MatchReport) -> Result<(), StoreError> {
        Err(broken())
    }
    async fn load_leaderboard(&self) -> Result<Vec<PlayerRecord>, StoreError> {
        Err(broken())
    }
    async fn save_team_generation(&self, _: &[PlayerId], _: &[PlayerId]) -> Result<Uuid, StoreError> {
        Err(broken())
    }
    async fn load_match_history(&self, _: usize) -> Result<Vec<MatchHistoryRecord>, StoreError> {
        Err(broken())
    }
}

#[tokio::test]
async fn save_players_inserts_and_only_updates_nicknames() {
    let store = MemoryStore::new();
    store.save_players(&[record("NiKo", 10, 5, 1)]).await.unwrap();

    let mut changed = Player::new("NiKo");
    changed.add_nickname("Nikola").unwrap();
    changed.set_active_nickname("Nikola").unwrap();
    store
        .save_players(&[PlayerRecord::from_player(&changed), record("jks", 3, 3, 1)])
        .await
        .unwrap();

    let players = store.load_players().await.unwrap();
    assert_eq!(players.len(), 2);
    assert_eq!(players[0].name, "NiKo");
    assert_eq!(players[0].total_kills, 10);
    assert_eq!(players[0].nicknames, vec!["NiKo".to_string(), "Nikola".to_string()]);
    assert_eq!(players[0].active_nickname.as_deref(), Some("Nikola"));
    assert_eq!(players[1].name, "jks");
}

#[tokio::test]
async fn save_match_result_updates_stats_and_history() {
    let store = MemoryStore::with_players(vec![record("a", 10, 5, 2), record("b", 0, 0, 0)]);
    store
        .save_match_result(&report(&[("a", 5, 5), ("ghost", 9, 9), ("b", 4, 0)], Team::B))
        .await
        .unwrap();

    let players = store.load_players().await.unwrap();
    let a = players.iter().find(|p| p.name == "a").unwrap();
    assert_eq!((a.total_kills, a.total_deaths, a.games_played), (15, 10, 3));
    assert_eq!(a.average_kd, 1.5);
    let b = players.iter().find(|p| p.name == "b").unwrap();
    assert_eq!(b.average_kd, 4.0);
    assert!(players.iter().all(|p| p.name != "ghost"));

    let history = store.load_match_history(10).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].winner, Team::B);
    assert_eq!(history[0].player_stats.len(), 3);
}

#[tokio::test]
async fn history_is_newest_first_and_limited() {
    let store = MemoryStore::with_players(vec![record("a", 0, 0, 0), record("b", 0, 0, 0)]);
    for kills in 1..=3 {
        store
            .save_match_result(&report(&[("a", kills, 1), ("b", 0, 1)], Team::A))
            .await
            .unwrap();
    }
    let history = store.load_match_history(2).await.unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].player_stats[0].kills, 3);
    assert_eq!(history[1].player_stats[0].kills, 2);
}

#[tokio::test]
async fn leaderboard_orders_by_kd() {
    let store = MemoryStore::with_players(vec![
        record("low", 5, 10, 1),
        record("top", 30, 10, 1),
        record("mid", 12, 10, 1),
    ]);
    let board: Vec<String> = store
        .load_leaderboard()
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.name)
        .collect();
    assert_eq!(board, ["top", "mid", "low"].map(String::from));
}

#[tokio::test]
async fn delete_and_clear_players() {
    let store = MemoryStore::with_players(vec![record("a", 0, 0, 0), record("b", 0, 0, 0)]);
    store.delete_player("a").await.unwrap();
    assert_eq!(store.load_players().await.unwrap().len(), 1);
    store.clear_all_players().await.unwrap();
    assert!(store.load_players().await.unwrap().is_empty());
}

#[tokio::test]
async fn overflowing_stats_are_rejected_without_changes() {
    let store = MemoryStore::with_players(vec![record("a", u32::MAX, 5, 2), record("b", 1, 1, 1)]);
    let before = store.snapshot().unwrap();
    let err = store
        .save_match_result(&report(&[("b", 3, 0), ("a", 1, 0)], Team::A))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::RejectedStats(_)));
    assert!(err.to_string().starts_with("stats update rejected"));

    assert_eq!(store.snapshot().unwrap(), before);
}

#[tokio::test]
async fn team_generation_is_recorded() {
    let store = MemoryStore::new();
    let id = store
        .save_team_generation(&["a".to_string()], &["b".to_string()])
        .await
        .unwrap();
    let snapshot = store.snapshot().unwrap();
    assert_eq!(snapshot.team_history.len(), 1);
    assert_eq!(snapshot.team_history[0].id, id);
}

#[tokio::test]
async fn json_store_persists_across_instances() {
    let path = temp_path();
    let store = JsonFileStore::new(&path);
    assert!(store.load_players().await.unwrap().is_empty());

    store.save_players(&[record("ZywOo", 289, 211, 14)]).await.unwrap();
    store
        .save_match_result(&report(&[("ZywOo", 11, 9)], Team::A))
        .await
        .unwrap();

    let reopened = JsonFileStore::new(&path);
    let players = reopened.load_players().await.unwrap();
    assert_eq!(players.len(), 1);
    assert_eq!(players[0].stats(), PlayerStats::new(300, 220, 15));
    assert_eq!(reopened.load_match_history(10).await.unwrap().len(), 1);

    let _ = std::fs::remove_dir_all(path.parent().unwrap());
}

#[tokio::test]
async fn json_store_delete_clear_and_team_history() {
    let path = temp_path();
    let store = JsonFileStore::new(&path);
    store
        .save_players(&[record("a", 0, 0, 0), record("b", 0, 0, 0)])
        .await
        .unwrap();
    store.delete_player("a").await.unwrap();
    assert_eq!(store.load_players().await.unwrap().len(), 1);

    let id = store
        .save_team_generation(&["b".to_string()], &["c".to_string()])
        .await
        .unwrap();
    store.clear_all_players().await.unwrap();

    let reopened = JsonFileStore::new(&path);
    assert!(reopened.load_players().await.unwrap().is_empty());
    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains(&id.to_string()));
    assert!(!path.with_extension("json.tmp").exists());

    let _ = std::fs::remove_dir_all(path.parent().unwrap());
}

#[tokio::test]
async fn json_store_reports_corrupt_file() {
    let path = temp_path();
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "{ not json").unwrap();

    let store = JsonFileStore::new(&path);
    assert!(matches!(store.load_players().await, Err(StoreError::Corrupt(_))));
    assert!(store.save_players(&[record("a", 0, 0, 0)]).await.is_err());
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "{ not json");

    let _ = std::fs::remove_dir_all(path.parent().unwrap());
}

#[tokio::test]
async fn load_session_selects_stored_players_or_demo() {
    let store = MemoryStore::with_players(vec![record("a", 2, 1, 1), record("b", 1, 1, 1)]);
    let session = load_session(&store, true).await.unwrap();
    assert_eq!(session.roster(), ["a", "b"].map(String::from));
    assert_eq!(session.player("a").unwrap().stats, PlayerStats::new(2, 1, 1));

    let session = load_session(&MemoryStore::new(), true).await.unwrap();
    assert_eq!(session.roster().len(), 10);
    assert_eq!(session.player("NiKo").unwrap().nicknames().len(), 2);
    assert!(MemoryStore::new().load_players().await.unwrap().is_empty());

    let session = load_session(&MemoryStore::new(), false).await.unwrap();
    assert!(session.roster().is_empty());
}

#[tokio::test]
async fn sync_downloads_when_store_has_players() {
    let store = MemoryStore::with_players(vec![record("x", 9, 3, 2)]);
    let mut session = Session::new();
    session.add_player("local").unwrap();

    let outcome = sync_with_store(&mut session, &store).await.unwrap();
    assert_eq!(outcome, SyncOutcome::Downloaded(1));
    assert_eq!(session.roster(), ["x".to_string()]);
    assert_eq!(session.player("x").unwrap().stats.total_kills, 9);
}

#[tokio::test]
async fn sync_uploads_when_store_is_empty() {
    let store = MemoryStore::new();
    let mut session = Session::new();
    assert_eq!(sync_with_store(&mut session, &store).await.unwrap(), SyncOutcome::Nothing);

    session.select_players(["a", "b"]);
    assert_eq!(
        sync_with_store(&mut session, &store).await.unwrap(),
        SyncOutcome::Uploaded(2)
    );
    assert_eq!(store.load_players().await.unwrap().len(), 2);
}

#[tokio::test]
async fn failed_sync_leaves_session_unchanged() {
    let mut session = Session::new();
    session.add_player("keep").unwrap();
    let err = sync_with_store(&mut session, &BrokenStore).await.unwrap_err();
    assert!(matches!(err, SquadError::PersistenceFailure(_)));
    assert_eq!(session.roster(), ["keep".to_string()]);
}
