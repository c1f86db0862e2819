//! Errors surfaced by roster, balancing, match and persistence operations.

use crate::models::player::PlayerId;
use std::fmt;

/// Failure reported by a persistence collaborator.
#[derive(Debug)]
pub enum StoreError {
    /// Reading or writing the backing storage failed.
    Io(std::io::Error),
    /// Stored data could not be (de)serialized.
    Corrupt(String),
    /// A stats update was refused (the totals would no longer fit).
    RejectedStats(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "storage I/O error: {}", e),
            StoreError::Corrupt(msg) => write!(f, "stored data is corrupt: {}", msg),
            StoreError::RejectedStats(msg) => write!(f, "stats update rejected: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io(e) => Some(e),
            StoreError::Corrupt(_) | StoreError::RejectedStats(_) => None,
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Io(e)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Corrupt(e.to_string())
    }
}

/// Errors that can occur while managing the roster and matches. All recoverable.
#[derive(Debug)]
pub enum SquadError {
    /// Fewer than 2 players selected for team generation.
    InsufficientPlayers,
    /// Kills/deaths negative or too large.
    InvalidStat,
    /// The player already has this nickname.
    DuplicateNickname(String),
    /// The player has no such nickname.
    UnknownNickname(String),
    /// A player must keep at least one nickname.
    LastNicknameError,
    /// Nickname is blank.
    InvalidNickname,
    /// Player name is blank.
    EmptyPlayerName,
    /// The player is already on the roster.
    DuplicatePlayer(PlayerId),
    /// No such player on the roster.
    PlayerNotFound(PlayerId),
    /// No teams have been generated (or the match was cancelled).
    NoActiveMatch,
    /// The player is on neither team of the current match.
    PlayerNotInMatch(PlayerId),
    /// Results cannot be submitted before a winner is chosen.
    WinnerNotSelected,
    /// Roster import data could not be read.
    InvalidImport(String),
    /// The persistence collaborator failed; local state is unchanged.
    PersistenceFailure(StoreError),
}

impl fmt::Display for SquadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SquadError::InsufficientPlayers => write!(f, "Need at least 2 players to generate teams"),
            SquadError::InvalidStat => write!(f, "Kills and deaths must be non-negative whole numbers"),
            SquadError::DuplicateNickname(nick) => write!(f, "Nickname \"{}\" already exists", nick),
            SquadError::UnknownNickname(nick) => write!(f, "Nickname \"{}\" not found in list", nick),
            SquadError::LastNicknameError => write!(f, "Cannot remove last nickname"),
            SquadError::InvalidNickname => write!(f, "Nickname cannot be empty"),
            SquadError::EmptyPlayerName => write!(f, "Please enter a player name"),
            SquadError::DuplicatePlayer(name) => write!(f, "Player \"{}\" is already added", name),
            SquadError::PlayerNotFound(name) => write!(f, "Player \"{}\" not found", name),
            SquadError::NoActiveMatch => write!(f, "No active match"),
            SquadError::PlayerNotInMatch(name) => {
                write!(f, "Player \"{}\" is not playing in the current match", name)
            }
            SquadError::WinnerNotSelected => write!(f, "Please select the winning team"),
            SquadError::InvalidImport(msg) => write!(f, "Could not import roster: {}", msg),
            SquadError::PersistenceFailure(e) => write!(f, "Persistence failed: {}", e),
        }
    }
}

impl std::error::Error for SquadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SquadError::PersistenceFailure(e) => Some(e),
            _ => None,
        }
    }
}

impl From<StoreError> for SquadError {
    fn from(e: StoreError) -> Self {
        SquadError::PersistenceFailure(e)
    }
}

impl From<csv::Error> for SquadError {
    fn from(e: csv::Error) -> Self {
        SquadError::InvalidImport(e.to_string())
    }
}
