//! Team balancer web app: library with models, business logic, persistence and config.

pub mod config;
pub mod logic;
pub mod models;
pub mod store;

pub use config::AppConfig;
pub use logic::{
    apply_result, balance, cancel_match, commit_report, demo_roster, generate_teams,
    import_roster_csv, leaderboard_csv, load_session, prepare_report, record_result,
    select_winner, sync_with_store, team_strength, validate_kills_deaths, SyncOutcome,
};
pub use models::{
    GameMatch, KillsDeaths, Lineup, MatchHistoryRecord, MatchReport, Player, PlayerId,
    PlayerRecord, PlayerResult, PlayerStats, Session, SquadError, StoreError, Team,
    TeamGenerationRecord,
};
pub use store::{JsonFileStore, MemoryStore, PlayerStore, StoreData};
