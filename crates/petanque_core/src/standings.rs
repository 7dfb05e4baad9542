//! Leaderboard computation from match results.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::types::{Match, Team, TeamId, POINTS_PER_WIN};

/// Rank the roster over the given matches.
///
/// Records are rebuilt from zero on every call; whatever record fields the
/// input teams carry are ignored. Only decisive results between two known
/// teams count: unscored, half-scored and tied matches, byes, and matches
/// naming a team outside the roster contribute nothing.
///
/// Ordering is descending by standing points, matches won, point difference
/// and points for, then ascending by team id.
pub fn leaderboard(teams: &[Team], matches: &[Match]) -> Vec<Team> {
    let mut table: Vec<Team> = teams.iter().map(Team::without_record).collect();
    let index: HashMap<TeamId, usize> = table.iter().enumerate().map(|(i, t)| (t.id, i)).collect();

    for result in matches.iter().filter_map(Match::result) {
        let (Some(&winner), Some(&loser)) = (index.get(&result.winner), index.get(&result.loser))
        else {
            continue;
        };

        let winner_score = u32::from(result.winner_score);
        let loser_score = u32::from(result.loser_score);

        let w = &mut table[winner];
        w.points_for += winner_score;
        w.points_against += loser_score;
        w.matches_won += 1;
        w.standing_points += POINTS_PER_WIN;

        let l = &mut table[loser];
        l.points_for += loser_score;
        l.points_against += winner_score;
    }

    for team in &mut table {
        team.point_diff = team.points_for as i32 - team.points_against as i32;
    }

    table.sort_by(compare_standing);
    table
}

/// Leaderboard order: better record first, lower id on a full tie.
pub fn compare_standing(a: &Team, b: &Team) -> Ordering {
    b.standing_points
        .cmp(&a.standing_points)
        .then_with(|| b.matches_won.cmp(&a.matches_won))
        .then_with(|| b.point_diff.cmp(&a.point_diff))
        .then_with(|| b.points_for.cmp(&a.points_for))
        .then_with(|| a.id.cmp(&b.id))
}

#[cfg(test)]
#[path = "standings_tests.rs"]
mod standings_tests;
