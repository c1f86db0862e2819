//! Session: the roster, the known players' stats, and the current match.

use crate::models::error::SquadError;
use crate::models::game::GameMatch;
use crate::models::player::{Player, PlayerId};
use crate::models::record::PlayerRecord;

/// All mutable state of one organizer: created at startup, passed by reference.
#[derive(Clone, Debug, Default)]
pub struct Session {
    /// Every player with a stats record, in the order they became known.
    players: Vec<Player>,
    /// Currently selected players, in insertion order.
    roster: Vec<PlayerId>,
    /// The match generated from the roster, until submitted or cancelled.
    pub current_match: Option<GameMatch>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Session with every given player known and selected.
    pub fn with_players(players: Vec<Player>) -> Self {
        let mut session = Self::new();
        for p in players {
            if !session.is_selected(&p.name) {
                session.roster.push(p.name.clone());
            }
            session.upsert_player(p);
        }
        session
    }

    pub fn player(&self, name: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.name == name)
    }

    pub fn player_mut(&mut self, name: &str) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.name == name)
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn roster(&self) -> &[PlayerId] {
        &self.roster
    }

    pub fn is_selected(&self, name: &str) -> bool {
        self.roster.iter().any(|n| n == name)
    }

    /// Records of the selected players, in roster order.
    pub fn roster_players(&self) -> impl Iterator<Item = &Player> {
        self.roster.iter().filter_map(|name| self.player(name))
    }

    /// Selected players ordered by K/D, best first (ties keep roster order).
    pub fn ranked_players(&self) -> Vec<&Player> {
        let mut ranked: Vec<&Player> = self.roster_players().collect();
        ranked.sort_by(|a, b| b.average_kd().total_cmp(&a.average_kd()));
        ranked
    }

    /// Select a player by name, creating a fresh record for unknown names.
    /// Names are trimmed and compared case-sensitively.
    pub fn add_player(&mut self, name: &str) -> Result<(), SquadError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SquadError::EmptyPlayerName);
        }
        if self.is_selected(name) {
            return Err(SquadError::DuplicatePlayer(name.to_string()));
        }
        if self.player(name).is_none() {
            self.players.push(Player::new(name));
        }
        self.roster.push(name.to_string());
        Ok(())
    }

    /// Bulk selection: add every name not yet selected, skipping blanks and
    /// names already on the roster. Returns how many were added.
    pub fn select_players<I, S>(&mut self, names: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        names
            .into_iter()
            .filter(|name| self.add_player(name.as_ref()).is_ok())
            .count()
    }

    /// Deselect a player. The stats record is kept. A current match that
    /// includes the player is cancelled.
    pub fn remove_player(&mut self, name: &str) -> Result<(), SquadError> {
        let name = name.trim();
        let idx = self
            .roster
            .iter()
            .position(|n| n == name)
            .ok_or_else(|| SquadError::PlayerNotFound(name.to_string()))?;
        self.roster.remove(idx);
        let in_match = self
            .current_match
            .as_ref()
            .is_some_and(|m| m.lineup.team_of(name).is_some());
        if in_match {
            self.current_match = None;
        }
        Ok(())
    }

    /// Empty the roster and drop the current match.
    pub fn clear_all(&mut self) {
        self.roster.clear();
        self.current_match = None;
    }

    pub fn add_nickname(&mut self, name: &str, nickname: &str) -> Result<(), SquadError> {
        self.known_player_mut(name)?.add_nickname(nickname)
    }

    pub fn set_active_nickname(&mut self, name: &str, nickname: &str) -> Result<(), SquadError> {
        self.known_player_mut(name)?.set_active_nickname(nickname)
    }

    pub fn remove_nickname(&mut self, name: &str, nickname: &str) -> Result<(), SquadError> {
        self.known_player_mut(name)?.remove_nickname(nickname)
    }

    /// Display name: the active nickname, or the raw name for unknown players.
    pub fn display_name<'a>(&'a self, name: &'a str) -> &'a str {
        self.player(name).map_or(name, Player::active_nickname)
    }

    /// Insert or replace a player record (matched by name). Does not touch the roster.
    pub fn upsert_player(&mut self, player: Player) {
        match self.player_mut(&player.name) {
            Some(existing) => *existing = player,
            None => self.players.push(player),
        }
    }

    /// Take stored records as the truth for the players they describe.
    pub fn merge_records(&mut self, records: &[PlayerRecord]) {
        for r in records {
            self.upsert_player(r.to_player());
        }
    }

    /// Replace the roster with the given names (unknown names get fresh records).
    pub fn replace_roster<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.clear_all();
        self.select_players(names);
    }

    /// Persistence records for the named players that have one.
    pub fn records_for<'a, I>(&self, names: I) -> Vec<PlayerRecord>
    where
        I: IntoIterator<Item = &'a PlayerId>,
    {
        names
            .into_iter()
            .filter_map(|name| self.player(name))
            .map(PlayerRecord::from_player)
            .collect()
    }

    /// Persistence records for the whole roster.
    pub fn roster_records(&self) -> Vec<PlayerRecord> {
        self.records_for(self.roster.iter())
    }

    fn known_player_mut(&mut self, name: &str) -> Result<&mut Player, SquadError> {
        let name = name.trim();
        self.player_mut(name)
            .ok_or_else(|| SquadError::PlayerNotFound(name.to_string()))
    }
}
