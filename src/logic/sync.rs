//! Loading the session from the store at startup, and on-demand sync.

use crate::logic::demo::demo_roster;
use crate::models::{PlayerRecord, Session, SquadError};
use crate::store::PlayerStore;
use serde::Serialize;

/// What a sync did.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(tag = "direction", content = "players", rename_all = "snake_case")]
pub enum SyncOutcome {
    /// The roster was replaced by this many stored players.
    Downloaded(usize),
    /// The store was empty; this many roster players were uploaded.
    Uploaded(usize),
    /// Both sides were empty.
    Nothing,
}

/// Build the startup session: every stored player is known and selected.
/// With an empty store and `demo` set, the demo roster is used instead (not saved).
pub async fn load_session(store: &dyn PlayerStore, demo: bool) -> Result<Session, SquadError> {
    let records = store.load_players().await?;
    if records.is_empty() && demo {
        log::info!("Store is empty, loaded demo roster");
        return Ok(Session::with_players(demo_roster()));
    }
    log::info!("Loaded {} player(s) from store", records.len());
    Ok(Session::with_players(
        records.iter().map(PlayerRecord::to_player).collect(),
    ))
}

/// Stored players win when there are any; otherwise the roster is uploaded.
/// On failure the session is left as it was.
pub async fn sync_with_store(
    session: &mut Session,
    store: &dyn PlayerStore,
) -> Result<SyncOutcome, SquadError> {
    let records = store.load_players().await?;
    if !records.is_empty() {
        session.merge_records(&records);
        session.replace_roster(records.iter().map(|r| r.name.as_str()));
        return Ok(SyncOutcome::Downloaded(records.len()));
    }
    let roster = session.roster_records();
    if roster.is_empty() {
        return Ok(SyncOutcome::Nothing);
    }
    store.save_players(&roster).await?;
    Ok(SyncOutcome::Uploaded(roster.len()))
}
