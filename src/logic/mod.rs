//! Organizer business logic: balancing, match results, roster import, store sync.

mod balance;
mod demo;
mod results;
mod roster_csv;
mod sync;
mod teams;

pub use balance::{balance, team_strength};
pub use demo::demo_roster;
pub use results::{
    apply_result, cancel_match, commit_report, prepare_report, record_result, select_winner,
    validate_kills_deaths,
};
pub use roster_csv::{import_roster_csv, leaderboard_csv};
pub use sync::{load_session, sync_with_store, SyncOutcome};
pub use teams::generate_teams;
