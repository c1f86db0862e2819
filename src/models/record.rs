//! Typed payloads exchanged with the persistence collaborator.

use crate::models::game::{KillsDeaths, Team};
use crate::models::player::{Player, PlayerId, PlayerStats};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored player row.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub name: PlayerId,
    #[serde(default)]
    pub nicknames: Vec<String>,
    #[serde(default)]
    pub active_nickname: Option<String>,
    #[serde(default)]
    pub total_kills: u32,
    #[serde(default)]
    pub total_deaths: u32,
    #[serde(default)]
    pub games_played: u32,
    /// Full precision; recomputed from the totals on every stats change.
    #[serde(default)]
    pub average_kd: f64,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl PlayerRecord {
    pub fn from_player(p: &Player) -> Self {
        Self {
            name: p.name.clone(),
            nicknames: p.nicknames().to_vec(),
            active_nickname: Some(p.active_nickname().to_string()),
            total_kills: p.stats.total_kills,
            total_deaths: p.stats.total_deaths,
            games_played: p.stats.games_played,
            average_kd: p.average_kd(),
            created_at: Utc::now(),
        }
    }

    pub fn stats(&self) -> PlayerStats {
        PlayerStats::new(self.total_kills, self.total_deaths, self.games_played)
    }

    /// Overwrite the totals and the derived K/D together.
    pub fn set_stats(&mut self, stats: PlayerStats) {
        self.total_kills = stats.total_kills;
        self.total_deaths = stats.total_deaths;
        self.games_played = stats.games_played;
        self.average_kd = stats.average_kd();
    }

    pub fn to_player(&self) -> Player {
        Player::from_parts(
            self.name.clone(),
            self.nicknames.clone(),
            self.active_nickname.clone(),
            self.stats(),
        )
    }
}

/// One player's line in a submitted match.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PlayerResult {
    pub name: PlayerId,
    pub kills: u32,
    pub deaths: u32,
}

impl PlayerResult {
    pub fn new(name: impl Into<String>, kd: KillsDeaths) -> Self {
        Self {
            name: name.into(),
            kills: kd.kills,
            deaths: kd.deaths,
        }
    }
}

/// Everything needed to finalize a match.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchReport {
    pub team_a: Vec<PlayerId>,
    pub team_b: Vec<PlayerId>,
    pub player_results: Vec<PlayerResult>,
    pub winner: Team,
}

/// A finalized match as kept in history.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchHistoryRecord {
    pub id: Uuid,
    pub team_a: Vec<PlayerId>,
    pub team_b: Vec<PlayerId>,
    pub player_stats: Vec<PlayerResult>,
    pub winner: Team,
    pub played_at: DateTime<Utc>,
}

impl MatchHistoryRecord {
    pub fn from_report(report: &MatchReport) -> Self {
        Self {
            id: Uuid::new_v4(),
            team_a: report.team_a.clone(),
            team_b: report.team_b.clone(),
            player_stats: report.player_results.clone(),
            winner: report.winner,
            played_at: Utc::now(),
        }
    }
}

/// A team generation as kept in history.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TeamGenerationRecord {
    pub id: Uuid,
    pub team_a: Vec<PlayerId>,
    pub team_b: Vec<PlayerId>,
    pub generated_at: DateTime<Utc>,
}

impl TeamGenerationRecord {
    pub fn new(team_a: &[PlayerId], team_b: &[PlayerId]) -> Self {
        Self {
            id: Uuid::new_v4(),
            team_a: team_a.to_vec(),
            team_b: team_b.to_vec(),
            generated_at: Utc::now(),
        }
    }
}
