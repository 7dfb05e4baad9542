//! Applying scanned score sheets to a competition.
//!
//! A recognizer reads score sheets and hands back court/score lines; this
//! module matches them to existing matches by `(round, court)` within the
//! active phase. Lines that match nothing are counted and skipped, so an
//! import that updates zero matches is still a successful import.

use petanque_core::{MatchId, Score};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::competition::Competition;
use crate::error::TournamentError;

/// One recognized result: the court it was played on and both scores
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreLine {
    pub court: u32,
    pub score1: u8,
    pub score2: u8,
}

/// Recognized results for one round of a full competition sheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSheet {
    pub round: u32,
    pub matches: Vec<ScoreLine>,
}

/// Counts of applied and skipped lines
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub updated: usize,
    pub unmatched: usize,
}

impl ImportSummary {
    fn merge(self, other: ImportSummary) -> Self {
        Self {
            updated: self.updated + other.updated,
            unmatched: self.unmatched + other.unmatched,
        }
    }
}

fn scores(score1: u8, score2: u8) -> Option<(Score, Score)> {
    Some((Score::new(score1)?, Score::new(score2)?))
}

impl Competition {
    /// Apply a single recognized pair to a known match.
    ///
    /// Out-of-range scores leave the competition unchanged and are reported
    /// as unmatched; a bad target is an error, as with manual entry.
    pub fn import_match(
        &self,
        round_id: u32,
        match_id: MatchId,
        score1: u8,
        score2: u8,
    ) -> Result<(Self, ImportSummary), TournamentError> {
        let Some((s1, s2)) = scores(score1, score2) else {
            warn!(round = round_id, match_id, score1, score2, "recognized scores out of range");
            return Ok((self.clone(), ImportSummary { updated: 0, unmatched: 1 }));
        };
        let updated = self.record_score(round_id, match_id, Some(s1), Some(s2))?;
        Ok((updated, ImportSummary { updated: 1, unmatched: 0 }))
    }

    /// Apply every line of one round's sheet, matching by court.
    pub fn import_round(&self, round_id: u32, lines: &[ScoreLine]) -> (Self, ImportSummary) {
        let mut current = self.clone();
        let mut summary = ImportSummary::default();

        for line in lines {
            match current.apply_line(round_id, line) {
                Ok(next) => {
                    current = next;
                    summary.updated += 1;
                }
                Err(reason) => {
                    warn!(round = round_id, court = line.court, %reason, "score line skipped");
                    summary.unmatched += 1;
                }
            }
        }

        info!(
            round = round_id,
            updated = summary.updated,
            unmatched = summary.unmatched,
            "round sheet imported"
        );
        (current, summary)
    }

    /// Apply a whole-competition sheet, round by round.
    pub fn import_sheet(&self, sheets: &[RoundSheet]) -> (Self, ImportSummary) {
        sheets
            .iter()
            .fold((self.clone(), ImportSummary::default()), |(current, total), sheet| {
                let (next, summary) = current.import_round(sheet.round, &sheet.matches);
                (next, total.merge(summary))
            })
    }

    fn apply_line(&self, round_id: u32, line: &ScoreLine) -> Result<Self, TournamentError> {
        let round = self
            .active_phase()
            .ok_or(TournamentError::NotStarted)?
            .round(round_id)
            .ok_or(TournamentError::RoundNotFound(round_id))?;
        let game = round
            .match_on_court(line.court)
            .ok_or(TournamentError::CourtNotFound {
                round: round_id,
                court: line.court,
            })?;
        let (s1, s2) =
            scores(line.score1, line.score2).ok_or(TournamentError::ScoreOutOfRange {
                score1: line.score1,
                score2: line.score2,
            })?;

        self.record_score(round_id, game.id, Some(s1), Some(s2))
    }
}

#[cfg(test)]
#[path = "import_tests.rs"]
mod import_tests;
