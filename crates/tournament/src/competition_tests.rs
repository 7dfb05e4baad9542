use super::*;
use petanque_core::{Match, Opponent};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn started(names: &[&str]) -> Competition {
    Competition::start("Spring Cup", names, &mut rng()).unwrap()
}

fn score(v: u8) -> Option<Score> {
    Score::new(v)
}

/// Decide every real match of a round in favour of the lower team id.
fn decide_round(competition: &Competition, round_id: u32) -> Competition {
    let phase = competition.active_phase().unwrap();
    let games: Vec<Match> = phase.round(round_id).unwrap().matches.clone();
    games
        .iter()
        .filter(|m| !m.is_bye())
        .fold(competition.clone(), |current, game| {
            let Opponent::Team(other) = game.team2 else {
                unreachable!()
            };
            let (s1, s2) = if game.team1 < other { (13, 4) } else { (4, 13) };
            current
                .record_score(round_id, game.id, score(s1), score(s2))
                .unwrap()
        })
}

fn play_phase(competition: &Competition) -> Competition {
    let round_ids: Vec<u32> = competition
        .active_phase()
        .unwrap()
        .rounds
        .iter()
        .map(|r| r.id)
        .collect();
    round_ids.into_iter().fold(competition.clone(), |current, id| {
        let decided = decide_round(&current, id);
        decided.finish_round(id).unwrap().0
    })
}

#[test]
fn test_start_builds_group_stage() {
    let competition = started(&["A", "B", "C", "D", "E"]);
    assert_eq!(competition.roster.len(), 5);

    let phase = competition.active_phase().unwrap();
    assert_eq!(phase.id, 1);
    assert_eq!(phase.name, "Spring Cup");
    assert_eq!(phase.kind, PhaseKind::RoundRobin);
    assert_eq!(phase.rounds.len(), 5);
    assert_eq!(phase.teams, competition.roster);
    assert!(!phase.is_complete);
}

#[test]
fn test_start_drops_blank_names() {
    let competition = started(&["A", "  ", "", "B"]);
    let names: Vec<&str> = competition.roster.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["A", "B"]);
    assert_eq!(competition.roster[1].id, 2);
}

#[test]
fn test_start_validation() {
    assert_eq!(
        Competition::start("Cup", &["A", " "], &mut rng()).unwrap_err(),
        TournamentError::NotEnoughTeams(1)
    );
    assert_eq!(
        Competition::start("  ", &["A", "B"], &mut rng()).unwrap_err(),
        TournamentError::EmptyName
    );
}

#[test]
fn test_record_score_is_copy_on_write() {
    let competition = started(&["A", "B", "C", "D"]);
    let game = competition.active_phase().unwrap().rounds[0].matches[0].clone();

    let updated = competition
        .record_score(1, game.id, score(13), score(2))
        .unwrap();

    let stored = updated.active_phase().unwrap().rounds[0]
        .find_match(game.id)
        .unwrap();
    assert_eq!(stored.winner, Some(game.team1));
    assert_eq!(
        competition.active_phase().unwrap().rounds[0].matches[0],
        game
    );
    // Other rounds untouched
    assert_eq!(
        updated.active_phase().unwrap().rounds[1..],
        competition.active_phase().unwrap().rounds[1..]
    );
}

#[test]
fn test_record_score_errors() {
    let competition = started(&["A", "B", "C"]);
    let round = competition.active_phase().unwrap().rounds[0].clone();
    let bye = round.matches.iter().find(|m| m.is_bye()).unwrap();

    assert_eq!(
        competition.record_score(9, 1, score(1), score(2)).unwrap_err(),
        TournamentError::RoundNotFound(9)
    );
    assert_eq!(
        competition.record_score(1, 99, score(1), score(2)).unwrap_err(),
        TournamentError::MatchNotFound {
            round: 1,
            match_id: 99
        }
    );
    assert_eq!(
        competition.record_score(1, bye.id, score(13), score(0)).unwrap_err(),
        TournamentError::ByeMatch(bye.id)
    );
}

#[test]
fn test_finish_round_requires_decisions() {
    let competition = started(&["A", "B", "C", "D"]);
    assert_eq!(
        competition.finish_round(1).unwrap_err(),
        TournamentError::RoundUndecided(1)
    );

    // A tie still blocks the round
    let game = competition.active_phase().unwrap().rounds[0].matches[0].clone();
    let tied = decide_round(&competition, 1)
        .record_score(1, game.id, score(9), score(9))
        .unwrap();
    assert_eq!(
        tied.finish_round(1).unwrap_err(),
        TournamentError::RoundUndecided(1)
    );
}

#[test]
fn test_finished_round_is_read_only() {
    let competition = decide_round(&started(&["A", "B", "C", "D"]), 1);
    let (finished, outcome) = competition.finish_round(1).unwrap();
    assert!(!outcome.phase_complete);
    assert!(finished.active_phase().unwrap().rounds[0].is_complete);

    let game_id = finished.active_phase().unwrap().rounds[0].matches[0].id;
    assert_eq!(
        finished.record_score(1, game_id, None, None).unwrap_err(),
        TournamentError::RoundLocked(1)
    );
    assert_eq!(
        finished.finish_round(1).unwrap_err(),
        TournamentError::RoundLocked(1)
    );
}

#[test]
fn test_bye_only_rounds_still_need_the_real_match() {
    // Three teams: each round has one real match and one bye
    let competition = started(&["A", "B", "C"]);
    assert!(competition.finish_round(1).is_err());
    let decided = decide_round(&competition, 1);
    assert!(decided.finish_round(1).is_ok());
}

#[test]
fn test_last_round_completes_phase() {
    let competition = started(&["A", "B", "C", "D"]);
    let before_last = (1..=2).fold(competition, |c, id| {
        decide_round(&c, id).finish_round(id).unwrap().0
    });

    let (done, outcome) = decide_round(&before_last, 3).finish_round(3).unwrap();
    assert!(outcome.phase_complete);
    assert!(outcome.knockout_available);
    assert_eq!(outcome.next_round, None);
    assert!(done.tournament.phases[0].is_complete);
}

#[test]
fn test_leaderboard_follows_results() {
    let done = play_phase(&started(&["A", "B", "C", "D"]));
    let ids: Vec<u32> = done.leaderboard().iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4]);
    assert_eq!(done.leaderboard()[0].standing_points, 9);
}

#[test]
fn test_knockout_sizes_fit_roster() {
    let competition = started(&["A", "B", "C", "D", "E", "F"]);
    assert_eq!(competition.knockout_sizes(&DEFAULT_KNOCKOUT_SIZES), vec![2, 4]);
}

#[test]
fn test_knockout_requires_finished_phase() {
    let competition = started(&["A", "B", "C", "D"]);
    assert_eq!(
        competition
            .create_knockout(4, &DEFAULT_KNOCKOUT_SIZES, &mut rng())
            .unwrap_err(),
        TournamentError::PhaseIncomplete(1)
    );
}

#[test]
fn test_knockout_rejects_unknown_size() {
    let done = play_phase(&started(&["A", "B", "C", "D", "E"]));
    assert_eq!(
        done.create_knockout(3, &DEFAULT_KNOCKOUT_SIZES, &mut rng())
            .unwrap_err(),
        TournamentError::InvalidKnockoutSize {
            requested: 3,
            allowed: vec![2, 4]
        }
    );
}

#[test]
fn test_knockout_sizes_skip_odd_entries() {
    let done = play_phase(&started(&["A", "B", "C", "D", "E", "F"]));
    assert_eq!(done.knockout_sizes(&[0, 1, 3, 4, 5, 6]), vec![4, 6]);
    assert_eq!(
        done.create_knockout(3, &[3, 6], &mut rng()).unwrap_err(),
        TournamentError::InvalidKnockoutSize {
            requested: 3,
            allowed: vec![6]
        }
    );
}

#[test]
fn test_knockout_only_follows_group_stage() {
    let done = play_phase(&started(&["A", "B", "C", "D", "E", "F", "G", "H"]));
    let final_stage = done
        .create_knockout(2, &DEFAULT_KNOCKOUT_SIZES, &mut rng())
        .unwrap();
    let (finished, outcome) = decide_round(&final_stage, 1).finish_round(1).unwrap();
    assert!(outcome.phase_complete);
    assert!(!outcome.knockout_available);

    assert_eq!(
        finished
            .create_knockout(8, &DEFAULT_KNOCKOUT_SIZES, &mut rng())
            .unwrap_err(),
        TournamentError::NotGroupStage(2)
    );
    assert_eq!(finished.tournament.phases.len(), 2);
}

#[test]
fn test_knockout_teams_come_from_the_group_stage() {
    let done = play_phase(&started(&["A", "B", "C", "D", "E", "F"]));
    let knockout = done
        .create_knockout(4, &DEFAULT_KNOCKOUT_SIZES, &mut rng())
        .unwrap();
    let group = &knockout.tournament.phases[0];
    let phase = knockout.active_phase().unwrap();
    assert!(phase
        .teams
        .iter()
        .all(|t| group.teams.iter().any(|g| g.id == t.id)));
    assert_eq!(knockout.team(1).map(|t| t.name.as_str()), Some("A"));
}

#[test]
fn test_knockout_takes_top_of_table() {
    let done = play_phase(&started(&["A", "B", "C", "D", "E", "F"]));
    let knockout = done
        .create_knockout(4, &DEFAULT_KNOCKOUT_SIZES, &mut rng())
        .unwrap();

    assert_eq!(knockout.tournament.phases.len(), 2);
    let phase = knockout.active_phase().unwrap();
    assert_eq!(phase.id, 2);
    assert_eq!(phase.kind, PhaseKind::Knockout);
    assert_eq!(phase.name, "Knockout Stage - 4 teams");

    let mut seeded: Vec<u32> = phase.teams.iter().map(|t| t.id).collect();
    seeded.sort_unstable();
    assert_eq!(seeded, vec![1, 2, 3, 4]);
    assert!(phase.teams.iter().all(|t| t.standing_points == 0));

    assert_eq!(phase.rounds.len(), 1);
    assert_eq!(phase.rounds[0].name, "Round of 4");
    assert_eq!(phase.rounds[0].matches.len(), 2);
}

#[test]
fn test_knockout_runs_to_a_champion() {
    let done = play_phase(&started(&["A", "B", "C", "D", "E", "F", "G", "H"]));
    let knockout = done
        .create_knockout(8, &DEFAULT_KNOCKOUT_SIZES, &mut rng())
        .unwrap();

    let (semis, outcome) = decide_round(&knockout, 1).finish_round(1).unwrap();
    assert_eq!(outcome.next_round, Some(2));
    assert!(!outcome.phase_complete);
    assert!(!outcome.knockout_available);
    let round = semis.active_phase().unwrap().round(2).unwrap();
    assert_eq!(round.name, "Round of 4");
    assert_eq!(round.matches.len(), 2);
    assert!(semis.champion().is_none());

    let (final_stage, outcome) = decide_round(&semis, 2).finish_round(2).unwrap();
    assert_eq!(outcome.next_round, Some(3));
    assert_eq!(
        final_stage.active_phase().unwrap().round(3).unwrap().name,
        "Final"
    );

    let (finished, outcome) = decide_round(&final_stage, 3).finish_round(3).unwrap();
    assert!(outcome.phase_complete);
    assert_eq!(outcome.next_round, None);
    assert!(!outcome.knockout_available);
    // Lower id always wins, so team 1 takes the title
    assert_eq!(finished.champion().map(|t| t.id), Some(1));
}

#[test]
fn test_not_started() {
    let empty = Competition::new(Tournament::default(), Vec::new());
    assert!(empty.active_phase().is_none());
    assert!(empty.leaderboard().is_empty());
    assert_eq!(
        empty.finish_round(1).unwrap_err(),
        TournamentError::NotStarted
    );
}
