//! Competition lifecycle: starting, scoring, finishing rounds and building
//! the knockout stage.
//!
//! A [`Competition`] bundles the two pieces of saved state: the tournament
//! itself and the initial team roster the standings are computed against.
//! Every operation takes `&self` and returns a new value on success.

use petanque_core::{
    create_initial_teams, into_rounds, knockout_matches, knockout_round_name, leaderboard,
    next_knockout_round, round_robin_matches, MatchId, Phase, PhaseKind, Round, Score, Team, TeamId,
    Tournament,
};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::TournamentError;

/// Knockout stage sizes offered once the group stage is over
pub const DEFAULT_KNOCKOUT_SIZES: [usize; 5] = [2, 4, 8, 16, 32];

/// Saved state of a running competition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Competition {
    /// Current competition state
    pub tournament: Tournament,
    /// Initial team roster, with zeroed records
    pub roster: Vec<Team>,
}

/// What finishing a round led to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundOutcome {
    /// The phase holding the round is now complete
    pub phase_complete: bool,
    /// Knockout round appended from the winners, if any
    pub next_round: Option<u32>,
    /// A knockout stage can now be created from the standings
    pub knockout_available: bool,
}

impl Competition {
    pub fn new(tournament: Tournament, roster: Vec<Team>) -> Self {
        Self { tournament, roster }
    }

    /// Start a competition with a full round-robin group stage.
    ///
    /// Blank team names are dropped before ids are assigned.
    pub fn start<S: AsRef<str>, R: Rng + ?Sized>(
        name: &str,
        team_names: &[S],
        rng: &mut R,
    ) -> Result<Self, TournamentError> {
        let names: Vec<&str> = team_names
            .iter()
            .map(|n| n.as_ref())
            .filter(|n| !n.trim().is_empty())
            .collect();
        if names.len() < 2 {
            return Err(TournamentError::NotEnoughTeams(names.len()));
        }
        let name = name.trim();
        if name.is_empty() {
            return Err(TournamentError::EmptyName);
        }

        let roster = create_initial_teams(&names);
        let rounds = into_rounds(round_robin_matches(&roster, rng));
        info!(
            competition = name,
            teams = roster.len(),
            rounds = rounds.len(),
            "tournament started"
        );

        let phase = Phase::new(1, name, PhaseKind::RoundRobin, rounds, roster.clone());
        Ok(Self::new(Tournament::new(vec![phase]), roster))
    }

    pub fn active_phase(&self) -> Option<&Phase> {
        self.tournament.active_phase()
    }

    fn active(&self) -> Result<(usize, &Phase), TournamentError> {
        let index = self
            .tournament
            .active_index()
            .ok_or(TournamentError::NotStarted)?;
        Ok((index, &self.tournament.phases[index]))
    }

    fn with_phase(&self, index: usize, phase: Phase) -> Self {
        Self::new(self.tournament.with_phase(index, phase), self.roster.clone())
    }

    pub fn team(&self, id: TeamId) -> Option<&Team> {
        self.roster.iter().find(|t| t.id == id)
    }

    /// Standings of the roster over every match of the active phase.
    pub fn leaderboard(&self) -> Vec<Team> {
        let matches = self
            .active_phase()
            .map(Phase::matches)
            .unwrap_or_default();
        leaderboard(&self.roster, &matches)
    }

    /// Set (or clear, with `None`) the scores of one match in the active phase.
    pub fn record_score(
        &self,
        round_id: u32,
        match_id: MatchId,
        score1: Option<Score>,
        score2: Option<Score>,
    ) -> Result<Self, TournamentError> {
        let (index, phase) = self.active()?;
        let round = phase
            .round(round_id)
            .ok_or(TournamentError::RoundNotFound(round_id))?;
        if round.is_complete {
            return Err(TournamentError::RoundLocked(round_id));
        }
        let game = round
            .find_match(match_id)
            .ok_or(TournamentError::MatchNotFound {
                round: round_id,
                match_id,
            })?;
        if game.is_bye() {
            return Err(TournamentError::ByeMatch(match_id));
        }

        let round = round.with_match(game.with_scores(score1, score2));
        Ok(self.with_phase(index, phase.with_round(round)))
    }

    /// Close a round once every match in it has a winner.
    ///
    /// In a knockout phase the next round is drawn from the winners right
    /// away; the phase ends after the final.
    pub fn finish_round(&self, round_id: u32) -> Result<(Self, RoundOutcome), TournamentError> {
        let (index, phase) = self.active()?;
        let round = phase
            .round(round_id)
            .ok_or(TournamentError::RoundNotFound(round_id))?;
        if round.is_complete {
            return Err(TournamentError::RoundLocked(round_id));
        }
        if !round.is_decided() {
            return Err(TournamentError::RoundUndecided(round_id));
        }

        let mut updated = phase.with_round(round.completed());
        let mut next_round = None;

        if phase.kind == PhaseKind::Knockout && phase.round(round_id + 1).is_none() {
            let next = next_knockout_round(round);
            if !next.is_empty() {
                let number = round_id + 1;
                let name = knockout_round_name(next.len() * 2);
                updated = updated.with_appended_round(Round::new(number, name, next));
                next_round = Some(number);
            }
        }
        if updated.all_rounds_complete() {
            updated = updated.completed();
        }

        let outcome = RoundOutcome {
            phase_complete: updated.is_complete,
            next_round,
            knockout_available: updated.is_complete && phase.kind == PhaseKind::RoundRobin,
        };
        info!(
            phase = phase.id,
            round = round_id,
            phase_complete = outcome.phase_complete,
            "round finished"
        );

        Ok((self.with_phase(index, updated), outcome))
    }

    /// Even sizes from `candidates` that the roster is large enough for.
    pub fn knockout_sizes(&self, candidates: &[usize]) -> Vec<usize> {
        candidates
            .iter()
            .copied()
            .filter(|&n| n >= 2 && n % 2 == 0 && n <= self.roster.len())
            .collect()
    }

    /// Append a knockout phase seeded from the top `size` teams of the
    /// finished group stage.
    pub fn create_knockout<R: Rng + ?Sized>(
        &self,
        size: usize,
        candidates: &[usize],
        rng: &mut R,
    ) -> Result<Self, TournamentError> {
        let last = self
            .tournament
            .last_phase()
            .ok_or(TournamentError::NotStarted)?;
        if !last.is_complete {
            return Err(TournamentError::PhaseIncomplete(last.id));
        }
        if last.kind != PhaseKind::RoundRobin {
            return Err(TournamentError::NotGroupStage(last.id));
        }
        let allowed = self.knockout_sizes(candidates);
        if !allowed.contains(&size) {
            return Err(TournamentError::InvalidKnockoutSize {
                requested: size,
                allowed,
            });
        }

        let advancing: Vec<Team> = leaderboard(&last.teams, &last.matches())
            .into_iter()
            .take(size)
            .map(|t| t.without_record())
            .collect();
        let first_round = Round::new(
            1,
            knockout_round_name(size),
            knockout_matches(&advancing, rng),
        );

        let id = self.tournament.phases.len() as u32 + 1;
        let phase = Phase::new(
            id,
            format!("Knockout Stage - {} teams", size),
            PhaseKind::Knockout,
            vec![first_round],
            advancing,
        );
        info!(phase = id, teams = size, "knockout stage created");

        Ok(Self::new(
            self.tournament.with_appended_phase(phase),
            self.roster.clone(),
        ))
    }

    /// Winner of the final, once the last phase is a finished knockout.
    pub fn champion(&self) -> Option<&Team> {
        let last = self.tournament.last_phase()?;
        if last.kind != PhaseKind::Knockout || !last.is_complete {
            return None;
        }
        let final_match = last.last_round()?.matches.first()?;
        self.team(final_match.decided_winner()?)
    }
}

#[cfg(test)]
#[path = "competition_tests.rs"]
mod competition_tests;
