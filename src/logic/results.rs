//! Match results: per-player stat aggregation, result entry, and finalizing the current match.

use crate::models::{
    KillsDeaths, MatchReport, PlayerResult, PlayerStats, Session, SquadError, Team,
};

/// Add one match to a player's running totals.
///
/// Negative counts, or totals that no longer fit, are rejected with `InvalidStat`.
pub fn apply_result(stats: &PlayerStats, kills: i64, deaths: i64) -> Result<PlayerStats, SquadError> {
    let kd = validate_kills_deaths(kills, deaths)?;
    Ok(PlayerStats {
        total_kills: stats
            .total_kills
            .checked_add(kd.kills)
            .ok_or(SquadError::InvalidStat)?,
        total_deaths: stats
            .total_deaths
            .checked_add(kd.deaths)
            .ok_or(SquadError::InvalidStat)?,
        games_played: stats
            .games_played
            .checked_add(1)
            .ok_or(SquadError::InvalidStat)?,
    })
}

/// Convert raw user input into a kills/deaths pair.
pub fn validate_kills_deaths(kills: i64, deaths: i64) -> Result<KillsDeaths, SquadError> {
    let kills = u32::try_from(kills).map_err(|_| SquadError::InvalidStat)?;
    let deaths = u32::try_from(deaths).map_err(|_| SquadError::InvalidStat)?;
    Ok(KillsDeaths { kills, deaths })
}

/// Choose the winning team of the current match.
pub fn select_winner(session: &mut Session, team: Team) -> Result<(), SquadError> {
    let current = session
        .current_match
        .as_mut()
        .ok_or(SquadError::NoActiveMatch)?;
    current.winner = Some(team);
    Ok(())
}

/// Enter (or overwrite) one player's kills and deaths for the current match.
pub fn record_result(session: &mut Session, name: &str, kills: i64, deaths: i64) -> Result<(), SquadError> {
    let current = session
        .current_match
        .as_mut()
        .ok_or(SquadError::NoActiveMatch)?;
    if current.lineup.team_of(name).is_none() {
        return Err(SquadError::PlayerNotInMatch(name.to_string()));
    }
    let kd = validate_kills_deaths(kills, deaths)?;
    current.results.insert(name.to_string(), kd);
    Ok(())
}

/// Discard the current match without recording anything.
pub fn cancel_match(session: &mut Session) -> Result<(), SquadError> {
    session
        .current_match
        .take()
        .map(|_| ())
        .ok_or(SquadError::NoActiveMatch)
}

/// Build the report for the current match. Players without an entry count as 0/0.
///
/// Does not change the session; pair with [`commit_report`] once the report is persisted.
pub fn prepare_report(session: &Session) -> Result<MatchReport, SquadError> {
    let current = session
        .current_match
        .as_ref()
        .ok_or(SquadError::NoActiveMatch)?;
    let winner = current.winner.ok_or(SquadError::WinnerNotSelected)?;
    let player_results = current
        .lineup
        .all_players()
        .map(|name| PlayerResult::new(name.clone(), current.result_for(name)))
        .collect();
    Ok(MatchReport {
        team_a: current.lineup.team_a.clone(),
        team_b: current.lineup.team_b.clone(),
        player_results,
        winner,
    })
}

/// Apply a finalized report to the local records and close the current match.
///
/// Every player in the report must have a record; nothing is changed otherwise.
pub fn commit_report(session: &mut Session, report: &MatchReport) -> Result<(), SquadError> {
    let mut updated = Vec::with_capacity(report.player_results.len());
    for r in &report.player_results {
        let player = session
            .player(&r.name)
            .ok_or_else(|| SquadError::PlayerNotFound(r.name.clone()))?;
        let stats = apply_result(&player.stats, i64::from(r.kills), i64::from(r.deaths))?;
        updated.push((r.name.clone(), stats));
    }
    for (name, stats) in updated {
        if let Some(p) = session.player_mut(&name) {
            p.stats = stats;
        }
    }
    session.current_match = None;
    Ok(())
}
