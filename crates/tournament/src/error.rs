//! Errors raised by caller-level operations.

use petanque_core::MatchId;
use thiserror::Error;

/// Rejected tournament operation. The competition is left unchanged.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TournamentError {
    #[error("at least 2 teams are required, got {0}")]
    NotEnoughTeams(usize),

    #[error("competition name must not be empty")]
    EmptyName,

    #[error("no tournament has been started")]
    NotStarted,

    #[error("round {0} not found in the active phase")]
    RoundNotFound(u32),

    #[error("no match on court {court} in round {round}")]
    CourtNotFound { round: u32, court: u32 },

    #[error("scores {score1}-{score2} are outside 0-13")]
    ScoreOutOfRange { score1: u8, score2: u8 },

    #[error("match {match_id} not found in round {round}")]
    MatchNotFound { round: u32, match_id: MatchId },

    #[error("match {0} is a bye and takes no score")]
    ByeMatch(MatchId),

    #[error("round {0} is already finished")]
    RoundLocked(u32),

    #[error("round {0} still has undecided matches")]
    RoundUndecided(u32),

    #[error("phase {0} is not finished yet")]
    PhaseIncomplete(u32),

    #[error("phase {0} is not a round-robin group stage")]
    NotGroupStage(u32),

    #[error("cannot create a knockout stage of {requested} teams (allowed: {allowed:?})")]
    InvalidKnockoutSize { requested: usize, allowed: Vec<usize> },
}
