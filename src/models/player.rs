//! Player, PlayerStats and the per-player nickname registry.

use crate::models::error::SquadError;
use serde::{Deserialize, Serialize};

/// Unique identifier for a player: the (case-sensitive) name it was added with.
pub type PlayerId = String;

/// Cumulative statistics of a player. K/D is always derived from the totals.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub total_kills: u32,
    pub total_deaths: u32,
    pub games_played: u32,
}

impl PlayerStats {
    pub fn new(total_kills: u32, total_deaths: u32, games_played: u32) -> Self {
        Self {
            total_kills,
            total_deaths,
            games_played,
        }
    }

    /// Kills per death; with no deaths the kill count itself.
    pub fn average_kd(&self) -> f64 {
        if self.total_deaths > 0 {
            f64::from(self.total_kills) / f64::from(self.total_deaths)
        } else {
            f64::from(self.total_kills)
        }
    }

    /// K/D rounded to two decimals, as shown to users.
    pub fn kd_display(&self) -> String {
        format!("{:.2}", self.average_kd())
    }
}

/// A player known to the session: identity, aliases and running stats.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Player {
    pub name: PlayerId,
    nicknames: Vec<String>,
    active_nickname: String,
    pub stats: PlayerStats,
}

impl Player {
    /// Create a new player. The name is the first (and active) nickname.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            nicknames: vec![name.clone()],
            active_nickname: name.clone(),
            name,
            stats: PlayerStats::default(),
        }
    }

    /// Rebuild a player from stored parts, repairing nickname data that breaks
    /// the registry rules (empty list, active alias not in the list).
    pub fn from_parts(
        name: impl Into<String>,
        nicknames: Vec<String>,
        active_nickname: Option<String>,
        stats: PlayerStats,
    ) -> Self {
        let name = name.into();
        let mut clean: Vec<String> = Vec::with_capacity(nicknames.len() + 1);
        for nick in nicknames {
            let nick = nick.trim().to_string();
            if !nick.is_empty() && !clean.contains(&nick) {
                clean.push(nick);
            }
        }
        if clean.is_empty() {
            clean.push(name.clone());
        }
        let active_nickname = match active_nickname {
            Some(active) if clean.contains(&active) => active,
            _ => clean[0].clone(),
        };
        Self {
            name,
            nicknames: clean,
            active_nickname,
            stats,
        }
    }

    pub fn with_stats(mut self, stats: PlayerStats) -> Self {
        self.stats = stats;
        self
    }

    pub fn nicknames(&self) -> &[String] {
        &self.nicknames
    }

    pub fn active_nickname(&self) -> &str {
        &self.active_nickname
    }

    pub fn average_kd(&self) -> f64 {
        self.stats.average_kd()
    }

    /// Register another alias for this player.
    pub fn add_nickname(&mut self, nickname: &str) -> Result<(), SquadError> {
        let nickname = nickname.trim();
        if nickname.is_empty() {
            return Err(SquadError::InvalidNickname);
        }
        if self.nicknames.iter().any(|n| n == nickname) {
            return Err(SquadError::DuplicateNickname(nickname.to_string()));
        }
        self.nicknames.push(nickname.to_string());
        Ok(())
    }

    /// Make an already registered alias the displayed one.
    pub fn set_active_nickname(&mut self, nickname: &str) -> Result<(), SquadError> {
        let nickname = nickname.trim();
        let found = self
            .nicknames
            .iter()
            .find(|n| n.as_str() == nickname)
            .cloned()
            .ok_or_else(|| SquadError::UnknownNickname(nickname.to_string()))?;
        self.active_nickname = found;
        Ok(())
    }

    /// Drop an alias. The last alias cannot be removed; removing the active one
    /// makes the first remaining alias active.
    pub fn remove_nickname(&mut self, nickname: &str) -> Result<(), SquadError> {
        let nickname = nickname.trim();
        let idx = self
            .nicknames
            .iter()
            .position(|n| n == nickname)
            .ok_or_else(|| SquadError::UnknownNickname(nickname.to_string()))?;
        if self.nicknames.len() == 1 {
            return Err(SquadError::LastNicknameError);
        }
        self.nicknames.remove(idx);
        if self.active_nickname == nickname {
            self.active_nickname = self.nicknames[0].clone();
        }
        Ok(())
    }
}
