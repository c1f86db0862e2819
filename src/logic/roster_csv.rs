//! CSV roster import and leaderboard export.

use crate::models::{PlayerRecord, Session, SquadError};
use serde::{Deserialize, Serialize};

/// One line of an imported roster: `name` plus optional `|`-separated aliases.
#[derive(Debug, Deserialize)]
struct RosterRow {
    name: String,
    #[serde(default)]
    nicknames: Option<String>,
}

#[derive(Debug, Serialize)]
struct LeaderboardRow<'a> {
    rank: usize,
    player: &'a str,
    games: u32,
    kills: u32,
    deaths: u32,
    kd: String,
}

/// Bulk-select players from CSV text with a `name` header column.
///
/// Names already on the roster are left alone (their aliases are still merged).
/// Returns the number of newly selected players.
pub fn import_roster_csv(session: &mut Session, text: &str) -> Result<usize, SquadError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut added = 0;
    for row in reader.deserialize::<RosterRow>() {
        let row = row?;
        let name = row.name.trim();
        if name.is_empty() {
            continue;
        }
        if !session.is_selected(name) {
            session.add_player(name)?;
            added += 1;
        }
        let aliases = row.nicknames.unwrap_or_default();
        for nick in aliases.split('|').map(str::trim).filter(|n| !n.is_empty()) {
            match session.add_nickname(name, nick) {
                Ok(()) | Err(SquadError::DuplicateNickname(_)) => {}
                Err(e) => return Err(e),
            }
        }
    }
    Ok(added)
}

/// Render leaderboard records (already ordered) as CSV with a header line.
pub fn leaderboard_csv(records: &[PlayerRecord]) -> Result<String, csv::Error> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer.write_record(["rank", "player", "games", "kills", "deaths", "kd"])?;
    for (idx, r) in records.iter().enumerate() {
        writer.serialize(LeaderboardRow {
            rank: idx + 1,
            player: &r.name,
            games: r.games_played,
            kills: r.total_kills,
            deaths: r.total_deaths,
            kd: r.stats().kd_display(),
        })?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))?;
    String::from_utf8(bytes)
        .map_err(|e| csv::Error::from(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}
