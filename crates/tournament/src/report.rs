//! Plain-text reports for the terminal

use petanque_core::{Match, Opponent, Phase, Team, TeamId};

use crate::competition::Competition;

/// Ranked table, one line per team.
pub fn leaderboard_report(table: &[Team]) -> String {
    let mut report = String::new();
    report.push_str(&format!(
        "{:<4} {:<24} {:>3} {:>4} {:>4} {:>5} {:>4}\n",
        "#", "Team", "W", "PF", "PA", "Diff", "Pts"
    ));
    report.push_str(&"-".repeat(54));
    report.push('\n');

    for (rank, team) in table.iter().enumerate() {
        report.push_str(&format!(
            "{:<4} {:<24} {:>3} {:>4} {:>4} {:>+5} {:>4}\n",
            rank + 1,
            team.name,
            team.matches_won,
            team.points_for,
            team.points_against,
            team.point_diff,
            team.standing_points
        ));
    }

    report
}

fn team_name(roster: &[Team], id: TeamId) -> String {
    roster
        .iter()
        .find(|t| t.id == id)
        .map(|t| t.name.clone())
        .unwrap_or_else(|| format!("#{}", id))
}

fn score_text(game: &Match) -> String {
    match (game.score1, game.score2) {
        (Some(a), Some(b)) if a == b => format!("{}-{} (tie)", a, b),
        (Some(a), Some(b)) => format!("{}-{}", a, b),
        (Some(a), None) => format!("{}-?", a),
        (None, Some(b)) => format!("?-{}", b),
        (None, None) => "-".to_string(),
    }
}

fn match_line(game: &Match, roster: &[Team]) -> String {
    let team1 = team_name(roster, game.team1);
    match game.team2 {
        Opponent::Bye => format!("  [{}] court {:>2}: {} (bye)\n", game.id, game.court, team1),
        Opponent::Team(id) => format!(
            "  [{}] court {:>2}: {:<20} vs {:<20} {}\n",
            game.id,
            game.court,
            team1,
            team_name(roster, id),
            score_text(game)
        ),
    }
}

/// Every round of a phase with its matches and scores.
pub fn phase_report(phase: &Phase, roster: &[Team]) -> String {
    let mut report = format!("=== {} ({}) ===\n", phase.name, phase.kind);
    for round in &phase.rounds {
        let status = if round.is_complete {
            "finished"
        } else if round.is_decided() {
            "ready to finish"
        } else {
            "in progress"
        };
        report.push_str(&format!("\n{} [round {}, {}]\n", round.name, round.id, status));
        for game in &round.matches {
            report.push_str(&match_line(game, roster));
        }
    }
    report
}

/// Active phase followed by its standings.
pub fn competition_report(competition: &Competition) -> String {
    let Some(phase) = competition.active_phase() else {
        return "No tournament in progress.\n".to_string();
    };

    let mut report = phase_report(phase, &competition.roster);
    report.push_str("\nStandings:\n");
    report.push_str(&leaderboard_report(&competition.leaderboard()));
    if let Some(champion) = competition.champion() {
        report.push_str(&format!("\nChampion: {}\n", champion.name));
    }
    report
}
