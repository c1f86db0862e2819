//! Data structures for the organizer: players, matches, session state, persistence payloads.

mod error;
mod game;
mod player;
mod record;
mod session;

pub use error::{SquadError, StoreError};
pub use game::{GameMatch, KillsDeaths, Lineup, Team};
pub use player::{Player, PlayerId, PlayerStats};
pub use record::{MatchHistoryRecord, MatchReport, PlayerRecord, PlayerResult, TeamGenerationRecord};
pub use session::Session;
