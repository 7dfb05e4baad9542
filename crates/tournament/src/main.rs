//! Tournament CLI
//!
//! Run a petanque competition from the terminal. Every command loads the
//! saved state, applies one change, saves, and prints the current phase.

use anyhow::{bail, Context, Result};
use petanque_core::{PhaseKind, Score};
use rand::thread_rng;
use serde::Deserialize;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use tournament::{
    competition_report, leaderboard_report, Competition, RoundSheet, Settings, StateError,
    StateStore,
};
use tracing::warn;
use tracing_subscriber::EnvFilter;

fn print_usage() {
    println!("Petanque Tournament Runner");
    println!();
    println!("Usage:");
    println!("  tournament [--config FILE] <command>");
    println!();
    println!("Commands:");
    println!("  start <name> <team> <team> [team...]  - Start a round-robin group stage");
    println!("  show                                  - Show the active phase and standings");
    println!("  leaderboard                           - Show the standings only");
    println!("  score <round> <match> <s1> <s2>       - Enter a result (scores 0-13)");
    println!("  clear <round> <match>                 - Remove a result");
    println!("  finish <round>                        - Close a fully decided round");
    println!("  knockout <teams>                      - Seed a knockout stage from the top teams");
    println!("  import <sheet.json>                   - Apply a scanned score sheet");
    println!("  reset                                 - Discard the saved competition");
    println!();
    println!("Examples:");
    println!("  tournament start \"Spring Cup\" Carreau Pointeurs Tireurs Boules");
    println!("  tournament score 1 2 13 9");
    println!("  tournament knockout 4");
}

/// Scanned sheet file: one round, or a list of rounds for the whole competition
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SheetFile {
    Competition(Vec<RoundSheet>),
    Round(RoundSheet),
}

fn parse_arg<T: FromStr>(args: &[String], index: usize, what: &str) -> Result<T> {
    let raw = args
        .get(index)
        .with_context(|| format!("missing {}", what))?;
    raw.parse()
        .map_err(|_| anyhow::anyhow!("invalid {}: {}", what, raw))
}

/// Remove `--flag VALUE` from the argument list.
fn take_option(args: &mut Vec<String>, flag: &str) -> Result<Option<String>> {
    let Some(index) = args.iter().position(|a| a == flag) else {
        return Ok(None);
    };
    args.remove(index);
    if index >= args.len() {
        bail!("missing value for {}", flag);
    }
    Ok(Some(args.remove(index)))
}

fn init_logging(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load(store: &StateStore) -> Result<Option<Competition>> {
    match store.load() {
        Ok(competition) => Ok(competition),
        Err(e @ StateError::Parse { .. }) => {
            warn!(error = %e, "saved state is unreadable, clearing it");
            store.clear()?;
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

fn require(store: &StateStore) -> Result<Competition> {
    load(store)?.context("no tournament in progress, run `tournament start` first")
}

fn save_and_show(store: &StateStore, competition: &Competition) -> Result<()> {
    store.save(competition)?;
    println!("{}", competition_report(competition));
    Ok(())
}

fn run_start(store: &StateStore, args: &[String]) -> Result<()> {
    if args.len() < 3 {
        bail!("start requires a competition name and at least two team names");
    }
    if load(store)?.is_some() {
        warn!("replacing the saved tournament");
    }

    let competition = Competition::start(&args[0], &args[1..], &mut thread_rng())?;
    save_and_show(store, &competition)
}

fn run_score(store: &StateStore, args: &[String]) -> Result<()> {
    let round: u32 = parse_arg(args, 0, "round")?;
    let match_id: u32 = parse_arg(args, 1, "match")?;
    // Entries outside 0-13 are pulled back into range
    let score1 = Score::clamped(parse_arg(args, 2, "score 1")?);
    let score2 = Score::clamped(parse_arg(args, 3, "score 2")?);
    if score1 == score2 {
        println!("Warning: tied scores do not decide a match");
    }

    let competition = require(store)?.record_score(round, match_id, Some(score1), Some(score2))?;
    save_and_show(store, &competition)
}

fn run_clear(store: &StateStore, args: &[String]) -> Result<()> {
    let round: u32 = parse_arg(args, 0, "round")?;
    let match_id: u32 = parse_arg(args, 1, "match")?;

    let competition = require(store)?.record_score(round, match_id, None, None)?;
    save_and_show(store, &competition)
}

fn run_finish(store: &StateStore, settings: &Settings, args: &[String]) -> Result<()> {
    let round: u32 = parse_arg(args, 0, "round")?;

    let (competition, outcome) = require(store)?.finish_round(round)?;
    save_and_show(store, &competition)?;

    if let Some(next) = outcome.next_round {
        println!("Round {} drawn from the winners.", next);
    }
    if outcome.knockout_available {
        let sizes = competition.knockout_sizes(&settings.knockout_sizes);
        if sizes.is_empty() {
            println!("Group stage complete. Not enough teams for a knockout stage.");
        } else {
            println!(
                "Group stage complete. Create a knockout stage with: tournament knockout <{}>",
                sizes
                    .iter()
                    .map(|n| n.to_string())
                    .collect::<Vec<_>>()
                    .join("|")
            );
        }
    }
    Ok(())
}

fn run_knockout(store: &StateStore, settings: &Settings, args: &[String]) -> Result<()> {
    let size: usize = parse_arg(args, 0, "number of teams")?;

    let competition =
        require(store)?.create_knockout(size, &settings.knockout_sizes, &mut thread_rng())?;
    save_and_show(store, &competition)
}

fn run_import(store: &StateStore, args: &[String]) -> Result<()> {
    let path = args.first().context("import requires a sheet file")?;
    let contents =
        std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path))?;
    let sheet: SheetFile =
        serde_json::from_str(&contents).with_context(|| format!("failed to parse {}", path))?;

    let current = require(store)?;
    let (competition, summary, rounds) = match sheet {
        SheetFile::Round(round) => {
            let (next, summary) = current.import_round(round.round, &round.matches);
            (next, summary, 1)
        }
        SheetFile::Competition(rounds) => {
            let (next, summary) = current.import_sheet(&rounds);
            (next, summary, rounds.len())
        }
    };

    if summary.updated == 0 {
        println!("No results on the sheet matched a match in the active phase.");
        return Ok(());
    }
    save_and_show(store, &competition)?;
    println!(
        "{} result(s) imported from {} round(s), {} line(s) skipped.",
        summary.updated, rounds, summary.unmatched
    );
    Ok(())
}

fn show_leaderboard(store: &StateStore) -> Result<()> {
    let competition = require(store)?;
    if let Some(phase) = competition.active_phase() {
        let title = match phase.kind {
            PhaseKind::RoundRobin => "Standings",
            PhaseKind::Knockout => "Knockout standings",
        };
        println!("=== {}: {} ===", title, phase.name);
    }
    println!("{}", leaderboard_report(&competition.leaderboard()));
    Ok(())
}

fn run() -> Result<()> {
    let mut args: Vec<String> = env::args().skip(1).collect();
    let config_path = take_option(&mut args, "--config")?.map(PathBuf::from);
    let settings = Settings::load_or_default(config_path.as_deref())?;
    init_logging(&settings.log_filter);

    let Some(command) = args.first() else {
        print_usage();
        return Ok(());
    };
    let store = StateStore::new(&settings.state_dir);
    let rest = &args[1..];

    match command.as_str() {
        "start" => run_start(&store, rest),
        "show" => {
            match load(&store)? {
                Some(competition) => println!("{}", competition_report(&competition)),
                None => println!("No tournament data found. Start one first!"),
            }
            Ok(())
        }
        "leaderboard" | "standings" => show_leaderboard(&store),
        "score" => run_score(&store, rest),
        "clear" => run_clear(&store, rest),
        "finish" => run_finish(&store, &settings, rest),
        "knockout" => run_knockout(&store, &settings, rest),
        "import" => run_import(&store, rest),
        "reset" => {
            store.clear()?;
            println!("Saved tournament discarded.");
            Ok(())
        }
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        other => {
            eprintln!("Unknown command: {}", other);
            print_usage();
            Ok(())
        }
    }
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
