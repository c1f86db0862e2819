//! Integration tests for CSV roster import and leaderboard export.

use team_balancer_web::{
    import_roster_csv, leaderboard_csv, Player, PlayerRecord, PlayerStats, Session, SquadError,
};

#[test]
fn import_selects_players_and_merges_aliases() {
    let mut s = Session::new();
    s.add_player("ropz").unwrap();
    let csv = "name,nicknames\nropz,Robin\n s1mple , Sasha|Oleksandr \n,ignored\nfrozen,\n";

    let added = import_roster_csv(&mut s, csv).unwrap();
    assert_eq!(added, 2);
    assert_eq!(s.roster(), ["ropz", "s1mple", "frozen"].map(String::from));
    assert_eq!(
        s.player("s1mple").unwrap().nicknames(),
        ["s1mple", "Sasha", "Oleksandr"].map(String::from)
    );
    assert_eq!(s.player("ropz").unwrap().nicknames().len(), 2);
}

#[test]
fn import_without_nickname_column() {
    let mut s = Session::new();
    assert_eq!(import_roster_csv(&mut s, "name\na\nb\na\n").unwrap(), 2);
}

#[test]
fn import_without_name_column_fails() {
    let mut s = Session::new();
    let err = import_roster_csv(&mut s, "player\na\n").unwrap_err();
    assert!(matches!(err, SquadError::InvalidImport(_)));
}

#[test]
fn leaderboard_csv_has_header_and_rounded_kd() {
    let records = vec![
        PlayerRecord::from_player(&Player::new("s1mple").with_stats(PlayerStats::new(312, 205, 15))),
        PlayerRecord::from_player(&Player::new("jks").with_stats(PlayerStats::new(203, 198, 11))),
    ];
    let text = leaderboard_csv(&records).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "rank,player,games,kills,deaths,kd");
    assert_eq!(lines[1], "1,s1mple,15,312,205,1.52");
    assert_eq!(lines[2], "2,jks,11,203,198,1.03");

    assert_eq!(leaderboard_csv(&[]).unwrap().trim(), "rank,player,games,kills,deaths,kd");
}
