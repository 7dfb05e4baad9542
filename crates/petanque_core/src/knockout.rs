//! Single-elimination bracket seeding.

use rand::Rng;
use tracing::debug;

use crate::shuffle::shuffle;
use crate::types::{Match, MatchId, Round, Team, TeamId};

/// First knockout round from the advancing teams.
///
/// The teams are shuffled, then paired in order on courts 1, 2, ... with
/// match ids restarting at 1. An odd team out gets no match; callers are
/// expected to pass an even count.
pub fn knockout_matches<R: Rng + ?Sized>(teams: &[Team], rng: &mut R) -> Vec<Match> {
    if teams.len() < 2 {
        return Vec::new();
    }

    let mut seeded: Vec<TeamId> = teams.iter().map(|t| t.id).collect();
    shuffle(&mut seeded, rng);

    let matches = pair_in_order(&seeded, 1, 1);
    debug!(teams = teams.len(), matches = matches.len(), "seeded knockout bracket");
    matches
}

/// Next knockout round from the winners of `round`, in bracket order.
///
/// The winner on court 1 meets the winner on court 2, and so on. Returns an
/// empty list while any match is undecided, or once only one winner is left.
pub fn next_knockout_round(round: &Round) -> Vec<Match> {
    let Some(winners) = round.winners().into_iter().collect::<Option<Vec<TeamId>>>() else {
        return Vec::new();
    };
    if winners.len() < 2 {
        return Vec::new();
    }

    let first_id = round.matches.iter().map(|m| m.id).max().unwrap_or(0) + 1;
    pair_in_order(&winners, round.id + 1, first_id)
}

/// Display name for a knockout round with `teams` participants.
pub fn knockout_round_name(teams: usize) -> String {
    match teams {
        2 => "Final".to_string(),
        n => format!("Round of {}", n),
    }
}

fn pair_in_order(teams: &[TeamId], round: u32, first_id: MatchId) -> Vec<Match> {
    teams
        .chunks_exact(2)
        .enumerate()
        .map(|(i, pair)| {
            let slot = i as u32;
            Match::new(first_id + slot, round, slot + 1, pair[0], pair[1])
        })
        .collect()
}
