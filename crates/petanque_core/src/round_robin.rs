//! Round-robin schedule generation (circle method).
//!
//! The shuffled teams are laid out in a list of even length, padded with a
//! bye slot when the count is odd. Each round pairs the list end-to-end
//! (first with last, second with second-to-last, ...) and then rotates every
//! element except the first one position to the right. After `len - 1`
//! rounds every pair has met exactly once.

use std::collections::BTreeMap;

use rand::Rng;
use tracing::debug;

use crate::shuffle::shuffle;
use crate::types::{Match, MatchId, Round, Team, TeamId};

/// Generate the full schedule as a flat list of matches.
///
/// Match ids run from 1 across the whole schedule. `court` is the pairing
/// slot within its round, so the same court number holds different pairs
/// from round to round. Fewer than two teams gives an empty schedule.
pub fn round_robin_matches<R: Rng + ?Sized>(teams: &[Team], rng: &mut R) -> Vec<Match> {
    if teams.len() < 2 {
        return Vec::new();
    }

    // None marks the bye slot
    let mut slots: Vec<Option<TeamId>> = teams.iter().map(|t| Some(t.id)).collect();
    shuffle(&mut slots, rng);
    if slots.len() % 2 != 0 {
        slots.push(None);
    }

    let slot_count = slots.len();
    let rounds = slot_count - 1;
    let mut matches = Vec::with_capacity(rounds * slot_count / 2);
    let mut next_id: MatchId = 1;

    for round in 0..rounds {
        let round_number = round as u32 + 1;
        for i in 0..slot_count / 2 {
            let court = i as u32 + 1;
            let game = match (slots[i], slots[slot_count - 1 - i]) {
                (Some(team1), Some(team2)) => {
                    Match::new(next_id, round_number, court, team1, team2)
                }
                (Some(team), None) | (None, Some(team)) => {
                    Match::bye(next_id, round_number, court, team)
                }
                (None, None) => continue,
            };
            matches.push(game);
            next_id += 1;
        }

        // Position 0 is the pivot; the tail rotates around it
        if let Some(last) = slots.pop() {
            slots.insert(1, last);
        }
    }

    debug!(
        teams = teams.len(),
        rounds,
        matches = matches.len(),
        "generated round-robin schedule"
    );
    matches
}

/// Group a flat schedule into rounds, ordered by round number.
///
/// Match order inside a round is preserved.
pub fn into_rounds(matches: Vec<Match>) -> Vec<Round> {
    let mut by_round: BTreeMap<u32, Vec<Match>> = BTreeMap::new();
    for game in matches {
        by_round.entry(game.round).or_default().push(game);
    }

    by_round
        .into_iter()
        .map(|(number, matches)| Round::new(number, format!("Round {}", number), matches))
        .collect()
}

#[cfg(test)]
#[path = "round_robin_tests.rs"]
mod round_robin_tests;
