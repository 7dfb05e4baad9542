//! Tournament data model: teams, matches, rounds and phases.
//!
//! Every value here is treated as immutable once built. Updates go through
//! the `with_*` helpers, which return a fresh copy and leave the original
//! untouched, so a caller holding an older `Tournament` can compare it
//! against the new one.

use serde::{Deserialize, Serialize};

/// Stable team identifier, assigned from 1 in roster order
pub type TeamId = u32;

/// Match identifier, unique within one generated schedule or bracket
pub type MatchId = u32;

/// Highest score a petanque game can end on
pub const MAX_SCORE: u8 = 13;

/// Standing points for a win (a loss, bye or unplayed match is worth 0)
pub const POINTS_PER_WIN: u32 = 3;

// =============================================================================
// Score
// =============================================================================

/// A legal game score, always in `0..=MAX_SCORE`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Score(u8);

impl Score {
    /// Returns `None` for values above [`MAX_SCORE`].
    pub fn new(value: u8) -> Option<Self> {
        (value <= MAX_SCORE).then_some(Self(value))
    }

    /// Clamp an arbitrary entry into the legal range (negative becomes 0).
    pub fn clamped(value: i64) -> Self {
        Self(value.clamp(0, MAX_SCORE as i64) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Score {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Score::new(value).ok_or_else(|| format!("score {} exceeds maximum {}", value, MAX_SCORE))
    }
}

impl From<Score> for u8 {
    fn from(score: Score) -> u8 {
        score.0
    }
}

impl std::fmt::Display for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Team
// =============================================================================

/// A team and its record, as derived from a set of matches.
///
/// The record fields are only meaningful on a leaderboard entry; the stored
/// roster always carries zeroes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub matches_won: u32,
    pub points_for: u32,
    pub points_against: u32,
    /// Always `points_for - points_against`
    pub point_diff: i32,
    pub standing_points: u32,
}

impl Team {
    pub fn new(id: TeamId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            matches_won: 0,
            points_for: 0,
            points_against: 0,
            point_diff: 0,
            standing_points: 0,
        }
    }

    /// Same identity with a zeroed record.
    pub fn without_record(&self) -> Self {
        Self::new(self.id, self.name.clone())
    }
}

// =============================================================================
// Match
// =============================================================================

/// The second slot of a match: a real opponent or a bye.
///
/// Stored as an optional team id, `null` meaning bye.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<TeamId>", into = "Option<TeamId>")]
pub enum Opponent {
    Team(TeamId),
    Bye,
}

impl Opponent {
    pub fn team(self) -> Option<TeamId> {
        match self {
            Opponent::Team(id) => Some(id),
            Opponent::Bye => None,
        }
    }
}

impl From<Option<TeamId>> for Opponent {
    fn from(slot: Option<TeamId>) -> Self {
        slot.map_or(Opponent::Bye, Opponent::Team)
    }
}

impl From<Opponent> for Option<TeamId> {
    fn from(opponent: Opponent) -> Self {
        opponent.team()
    }
}

/// A decisive result between two real teams.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MatchResult {
    pub winner: TeamId,
    pub loser: TeamId,
    pub winner_score: u8,
    pub loser_score: u8,
}

/// A single game on one court in one round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    /// 1-based round number within the phase
    pub round: u32,
    /// 1-based pairing slot within the round, used to match scanned sheets
    pub court: u32,
    pub team1: TeamId,
    pub team2: Opponent,
    pub score1: Option<Score>,
    pub score2: Option<Score>,
    pub winner: Option<TeamId>,
}

impl Match {
    /// An unplayed game between two teams.
    pub fn new(id: MatchId, round: u32, court: u32, team1: TeamId, team2: TeamId) -> Self {
        Self {
            id,
            round,
            court,
            team1,
            team2: Opponent::Team(team2),
            score1: None,
            score2: None,
            winner: None,
        }
    }

    /// A bye: `team` has no opponent and is credited the slot.
    pub fn bye(id: MatchId, round: u32, court: u32, team: TeamId) -> Self {
        Self {
            id,
            round,
            court,
            team1: team,
            team2: Opponent::Bye,
            score1: None,
            score2: None,
            winner: Some(team),
        }
    }

    pub fn is_bye(&self) -> bool {
        self.team2 == Opponent::Bye
    }

    /// Both scores entered and equal. Ties are never legal.
    pub fn is_tie(&self) -> bool {
        matches!((self.score1, self.score2), (Some(a), Some(b)) if a == b)
    }

    /// The decisive result, if both teams are real and the scores differ.
    pub fn result(&self) -> Option<MatchResult> {
        let team2 = self.team2.team()?;
        let (s1, s2) = (self.score1?.value(), self.score2?.value());
        if s1 > s2 {
            Some(MatchResult {
                winner: self.team1,
                loser: team2,
                winner_score: s1,
                loser_score: s2,
            })
        } else if s2 > s1 {
            Some(MatchResult {
                winner: team2,
                loser: self.team1,
                winner_score: s2,
                loser_score: s1,
            })
        } else {
            None
        }
    }

    /// Winner implied by the match state: the byeing team, or the higher scorer.
    pub fn decided_winner(&self) -> Option<TeamId> {
        match self.team2 {
            Opponent::Bye => Some(self.team1),
            Opponent::Team(_) => self.result().map(|r| r.winner),
        }
    }

    /// Byes always count as decided; real games need two different scores.
    pub fn is_decided(&self) -> bool {
        self.decided_winner().is_some()
    }

    pub fn involves(&self, team: TeamId) -> bool {
        self.team1 == team || self.team2 == Opponent::Team(team)
    }

    /// Copy with new scores and a recomputed winner. Byes are returned unchanged.
    pub fn with_scores(&self, score1: Option<Score>, score2: Option<Score>) -> Self {
        if self.is_bye() {
            return self.clone();
        }
        let mut updated = Self {
            score1,
            score2,
            winner: None,
            ..self.clone()
        };
        updated.winner = updated.decided_winner();
        updated
    }
}

// =============================================================================
// Round, Phase, Tournament
// =============================================================================

/// Matches sharing a round number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    /// Equal to the round number of its matches
    pub id: u32,
    pub name: String,
    pub matches: Vec<Match>,
    /// Set by the caller once every match is decided
    pub is_complete: bool,
}

impl Round {
    pub fn new(id: u32, name: impl Into<String>, matches: Vec<Match>) -> Self {
        Self {
            id,
            name: name.into(),
            matches,
            is_complete: false,
        }
    }

    /// Every match has a winner. Ties and missing scores block this.
    pub fn is_decided(&self) -> bool {
        self.matches.iter().all(Match::is_decided)
    }

    pub fn find_match(&self, id: MatchId) -> Option<&Match> {
        self.matches.iter().find(|m| m.id == id)
    }

    pub fn match_on_court(&self, court: u32) -> Option<&Match> {
        self.matches.iter().find(|m| m.court == court)
    }

    /// Winners in court order, `None` for undecided matches.
    pub fn winners(&self) -> Vec<Option<TeamId>> {
        self.matches.iter().map(Match::decided_winner).collect()
    }

    /// Copy with the match of the same id replaced.
    pub fn with_match(&self, updated: Match) -> Self {
        let matches = self
            .matches
            .iter()
            .map(|m| if m.id == updated.id { updated.clone() } else { m.clone() })
            .collect();
        Self {
            matches,
            ..self.clone()
        }
    }

    pub fn completed(&self) -> Self {
        Self {
            is_complete: true,
            ..self.clone()
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PhaseKind {
    RoundRobin,
    Knockout,
}

impl std::fmt::Display for PhaseKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PhaseKind::RoundRobin => write!(f, "round-robin"),
            PhaseKind::Knockout => write!(f, "knockout"),
        }
    }
}

/// A named stage of the competition with its own rounds and teams.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phase {
    pub id: u32,
    pub name: String,
    pub kind: PhaseKind,
    pub rounds: Vec<Round>,
    pub teams: Vec<Team>,
    pub is_complete: bool,
}

impl Phase {
    pub fn new(
        id: u32,
        name: impl Into<String>,
        kind: PhaseKind,
        rounds: Vec<Round>,
        teams: Vec<Team>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            rounds,
            teams,
            is_complete: false,
        }
    }

    pub fn round(&self, id: u32) -> Option<&Round> {
        self.rounds.iter().find(|r| r.id == id)
    }

    pub fn last_round(&self) -> Option<&Round> {
        self.rounds.last()
    }

    /// All matches of every round, in round order.
    pub fn matches(&self) -> Vec<Match> {
        self.rounds.iter().flat_map(|r| r.matches.iter().cloned()).collect()
    }

    pub fn all_rounds_complete(&self) -> bool {
        !self.rounds.is_empty() && self.rounds.iter().all(|r| r.is_complete)
    }

    /// Copy with the round of the same id replaced.
    pub fn with_round(&self, updated: Round) -> Self {
        let rounds = self
            .rounds
            .iter()
            .map(|r| if r.id == updated.id { updated.clone() } else { r.clone() })
            .collect();
        Self {
            rounds,
            ..self.clone()
        }
    }

    pub fn with_appended_round(&self, round: Round) -> Self {
        let mut rounds = self.rounds.clone();
        rounds.push(round);
        Self {
            rounds,
            ..self.clone()
        }
    }

    pub fn completed(&self) -> Self {
        Self {
            is_complete: true,
            ..self.clone()
        }
    }
}

/// The whole competition: phases in the order they were created.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tournament {
    pub phases: Vec<Phase>,
}

impl Tournament {
    pub fn new(phases: Vec<Phase>) -> Self {
        Self { phases }
    }

    /// Index of the first incomplete phase, or of the last phase.
    pub fn active_index(&self) -> Option<usize> {
        self.phases
            .iter()
            .position(|p| !p.is_complete)
            .or_else(|| self.phases.len().checked_sub(1))
    }

    pub fn active_phase(&self) -> Option<&Phase> {
        self.active_index().map(|i| &self.phases[i])
    }

    pub fn last_phase(&self) -> Option<&Phase> {
        self.phases.last()
    }

    /// Copy with the phase at `index` replaced. Out-of-range indices change nothing.
    pub fn with_phase(&self, index: usize, phase: Phase) -> Self {
        let phases = self
            .phases
            .iter()
            .enumerate()
            .map(|(i, p)| if i == index { phase.clone() } else { p.clone() })
            .collect();
        Self { phases }
    }

    pub fn with_appended_phase(&self, phase: Phase) -> Self {
        let mut phases = self.phases.clone();
        phases.push(phase);
        Self { phases }
    }
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod types_tests;
