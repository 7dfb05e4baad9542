use super::*;
use crate::roster::create_initial_teams;
use crate::types::Score;

fn played(id: u32, team1: TeamId, team2: TeamId, s1: u8, s2: u8) -> Match {
    Match::new(id, 1, id, team1, team2).with_scores(Score::new(s1), Score::new(s2))
}

fn roster() -> Vec<Team> {
    create_initial_teams(&["A", "B", "C", "D"])
}

fn ids(table: &[Team]) -> Vec<TeamId> {
    table.iter().map(|t| t.id).collect()
}

#[test]
fn test_no_matches_orders_by_id() {
    let mut teams = roster();
    teams.reverse();
    let table = leaderboard(&teams, &[]);
    assert_eq!(ids(&table), vec![1, 2, 3, 4]);
    assert!(table.iter().all(|t| t.standing_points == 0 && t.point_diff == 0));
}

#[test]
fn test_win_awards_three_points() {
    let table = leaderboard(&roster(), &[played(1, 1, 2, 13, 5)]);
    let a = &table[0];
    assert_eq!(a.id, 1);
    assert_eq!(
        (a.matches_won, a.points_for, a.points_against, a.point_diff, a.standing_points),
        (1, 13, 5, 8, 3)
    );

    let b = table.iter().find(|t| t.id == 2).unwrap();
    assert_eq!(
        (b.matches_won, b.points_for, b.points_against, b.point_diff, b.standing_points),
        (0, 5, 13, -8, 0)
    );
}

#[test]
fn test_point_diff_breaks_tie() {
    // A beats B 13-5, C beats D 13-0: C ranks above A on difference
    let table = leaderboard(&roster(), &[played(1, 1, 2, 13, 5), played(2, 3, 4, 13, 0)]);
    assert_eq!(ids(&table), vec![3, 1, 2, 4]);
}

#[test]
fn test_points_for_breaks_equal_difference() {
    // Both win by 5; B scored more
    let table = leaderboard(&roster(), &[played(1, 1, 3, 10, 5), played(2, 2, 4, 13, 8)]);
    assert_eq!(ids(&table)[..2], [2, 1]);
}

#[test]
fn test_tie_is_excluded() {
    let table = leaderboard(&roster(), &[played(1, 1, 2, 7, 7)]);
    for team in &table {
        assert_eq!(
            (team.matches_won, team.points_for, team.points_against, team.standing_points),
            (0, 0, 0, 0)
        );
    }
}

#[test]
fn test_partial_and_bye_matches_ignored() {
    let partial = Match::new(1, 1, 1, 1, 2).with_scores(Score::new(13), None);
    let bye = Match::bye(2, 1, 2, 3);
    let table = leaderboard(&roster(), &[partial, bye]);
    assert!(table.iter().all(|t| t.points_for == 0 && t.matches_won == 0));
    assert_eq!(ids(&table), vec![1, 2, 3, 4]);
}

#[test]
fn test_unknown_team_skipped() {
    let table = leaderboard(&roster(), &[played(1, 1, 99, 13, 0), played(2, 2, 3, 13, 12)]);
    assert_eq!(table.len(), 4);
    assert_eq!(table[0].id, 2);
    let a = table.iter().find(|t| t.id == 1).unwrap();
    assert_eq!(a.points_for, 0);
}

#[test]
fn test_stale_records_are_recomputed() {
    let mut teams = roster();
    teams[3].standing_points = 90;
    teams[3].points_for = 500;
    let table = leaderboard(&teams, &[played(1, 1, 2, 13, 1)]);
    assert_eq!(table[0].id, 1);
    let d = table.iter().find(|t| t.id == 4).unwrap();
    assert_eq!((d.standing_points, d.points_for), (0, 0));
}

#[test]
fn test_points_are_zero_sum() {
    let matches = vec![
        played(1, 1, 2, 13, 5),
        played(2, 3, 4, 11, 13),
        played(3, 1, 3, 4, 13),
        played(4, 2, 4, 13, 12),
        played(5, 1, 4, 9, 9),
    ];
    let table = leaderboard(&roster(), &matches);
    let scored: u32 = table.iter().map(|t| t.points_for).sum();
    let conceded: u32 = table.iter().map(|t| t.points_against).sum();
    assert_eq!(scored, conceded);
    assert_eq!(table.iter().map(|t| t.point_diff).sum::<i32>(), 0);
    assert_eq!(table.iter().map(|t| t.matches_won).sum::<u32>(), 4);
}

#[test]
fn test_ordering_ignores_roster_order() {
    let matches = vec![played(1, 1, 2, 13, 11), played(2, 3, 4, 13, 11)];
    let forward = leaderboard(&roster(), &matches);
    let mut reversed_roster = roster();
    reversed_roster.reverse();
    let backward = leaderboard(&reversed_roster, &matches);

    assert_eq!(forward, backward);
    assert_eq!(ids(&forward), vec![1, 3, 2, 4]);
}
