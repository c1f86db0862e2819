//! Team balancing: rank by K/D, alternate picks, then even out each group of four.

use crate::models::{Lineup, Player, SquadError};

/// Split `roster` into two teams.
///
/// 1. Stable sort by K/D, best first (ties keep roster order).
/// 2. Even ranks go to team A, odd ranks to team B.
/// 3. For every complete group of 4 ranked players, the two team A picks of that
///    group trade places (team A positions `2i` and `2i + 1`).
///
/// Deterministic and pure; every player ends up on exactly one team.
pub fn balance(roster: &[Player]) -> Result<Lineup, SquadError> {
    if roster.len() < 2 {
        return Err(SquadError::InsufficientPlayers);
    }

    let mut ranked: Vec<&Player> = roster.iter().collect();
    ranked.sort_by(|a, b| b.average_kd().total_cmp(&a.average_kd()));

    let mut team_a = Vec::with_capacity(ranked.len() / 2 + 1);
    let mut team_b = Vec::with_capacity(ranked.len() / 2);
    for (idx, p) in ranked.iter().enumerate() {
        if idx % 2 == 0 {
            team_a.push(p.name.clone());
        } else {
            team_b.push(p.name.clone());
        }
    }

    for group in 0..ranked.len() / 4 {
        let start = group * 2;
        // team A holds ceil(n / 2) players, always more than 2 * (n / 4)
        team_a.swap(start, start + 1);
    }

    Ok(Lineup { team_a, team_b })
}

/// Sum of the members' K/D, used to show how even the teams are.
pub fn team_strength<'a>(players: impl IntoIterator<Item = &'a Player>) -> f64 {
    players.into_iter().map(Player::average_kd).sum()
}
