//! Match, Team and the per-player results submitted for it.

use crate::models::player::PlayerId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Which side of a match.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Team {
    A,
    B,
}

/// Kills and deaths one player scored in one match.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct KillsDeaths {
    pub kills: u32,
    pub deaths: u32,
}

/// The two teams produced by the balancer, in ranked order.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Lineup {
    pub team_a: Vec<PlayerId>,
    pub team_b: Vec<PlayerId>,
}

impl Lineup {
    pub fn team(&self, team: Team) -> &[PlayerId] {
        match team {
            Team::A => &self.team_a,
            Team::B => &self.team_b,
        }
    }

    /// Which team the player is on, if any.
    pub fn team_of(&self, name: &str) -> Option<Team> {
        if self.team_a.iter().any(|p| p == name) {
            Some(Team::A)
        } else if self.team_b.iter().any(|p| p == name) {
            Some(Team::B)
        } else {
            None
        }
    }

    /// Team A followed by team B.
    pub fn all_players(&self) -> impl Iterator<Item = &PlayerId> {
        self.team_a.iter().chain(self.team_b.iter())
    }
}

/// The current match: generated teams, the chosen winner, and results entered so far.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GameMatch {
    pub lineup: Lineup,
    /// None until the winning team is chosen.
    pub winner: Option<Team>,
    /// Results entered so far; players without an entry count as 0/0.
    pub results: HashMap<PlayerId, KillsDeaths>,
    /// Team-generation history record, when the store saved one.
    pub history_id: Option<Uuid>,
}

impl GameMatch {
    pub fn new(lineup: Lineup) -> Self {
        Self {
            lineup,
            winner: None,
            results: HashMap::new(),
            history_id: None,
        }
    }

    pub fn result_for(&self, name: &str) -> KillsDeaths {
        self.results.get(name).copied().unwrap_or_default()
    }
}
