//! Ten well-known pros with plausible stats, for trying the app with an empty store.

use crate::models::{Player, PlayerStats};

const DEMO_PLAYERS: [(&str, &str, u32, u32, u32); 10] = [
    ("NiKo", "Nikola", 245, 198, 12),
    ("s1mple", "Sasha", 312, 205, 15),
    ("ZywOo", "Mathieu", 289, 211, 14),
    ("device", "dev1ce", 198, 187, 10),
    ("electronic", "Denis", 221, 203, 11),
    ("m0NESY", "Ilya", 267, 189, 13),
    ("Twistzz", "Russel", 234, 201, 12),
    ("ropz", "Robin", 210, 195, 11),
    ("frozen", "David", 188, 176, 10),
    ("jks", "Justin", 203, 198, 11),
];

pub fn demo_roster() -> Vec<Player> {
    DEMO_PLAYERS
        .iter()
        .map(|&(name, alias, kills, deaths, games)| {
            Player::from_parts(
                name,
                vec![name.to_string(), alias.to_string()],
                None,
                PlayerStats::new(kills, deaths, games),
            )
        })
        .collect()
}
