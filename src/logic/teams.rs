//! Team generation for the current roster.

use crate::logic::balance::balance;
use crate::models::{GameMatch, Player, Session, SquadError};

/// Balance the roster into two teams and make them the current match.
/// Replaces any match that was still open.
pub fn generate_teams(session: &mut Session) -> Result<&GameMatch, SquadError> {
    let players: Vec<Player> = session.roster_players().cloned().collect();
    let lineup = balance(&players)?;
    Ok(&*session.current_match.insert(GameMatch::new(lineup)))
}
