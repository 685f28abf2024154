//! probdist report
//!
//! Reads championship standings for two consecutive races and prints, per
//! team, the chance of winning both races, at least one, and both given at
//! least one.

use std::path::{Path, PathBuf};

use tracing::warn;
use tracing_subscriber::EnvFilter;

use probdist::{
    at_least_one, both, both_given_at_least_one, Distribution, JsonFileSource, Percent,
    ProbConfig, WeightSource, WeightTable,
};

/// Where the standings before the first race come from
enum Baseline {
    /// Standings file
    Before(PathBuf),
    /// Points gained in the first race, subtracted from `after`
    Gained(PathBuf),
}

/// Report configuration
struct Config {
    /// Standings after the first race
    after: PathBuf,
    /// Standings before the first race
    baseline: Baseline,
    /// Teams to report on; all teams when empty
    teams: Vec<String>,
    /// Optional JSON file with library settings
    settings: Option<PathBuf>,
}

fn take_value(args: &[String], i: usize, flag: &str) -> String {
    if i + 1 < args.len() {
        args[i + 1].clone()
    } else {
        eprintln!("error: {flag} requires a value");
        std::process::exit(1);
    }
}

fn parse_args() -> Config {
    let args: Vec<String> = std::env::args().collect();
    let mut after = None;
    let mut before = None;
    let mut gained = None;
    let mut teams = Vec::new();
    let mut settings = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--after" | "-a" => {
                after = Some(PathBuf::from(take_value(&args, i, "--after")));
                i += 2;
            }
            "--before" | "-b" => {
                before = Some(PathBuf::from(take_value(&args, i, "--before")));
                i += 2;
            }
            "--gained" | "-g" => {
                gained = Some(PathBuf::from(take_value(&args, i, "--gained")));
                i += 2;
            }
            "--team" | "-t" => {
                teams.push(take_value(&args, i, "--team"));
                i += 2;
            }
            "--config" | "-c" => {
                settings = Some(PathBuf::from(take_value(&args, i, "--config")));
                i += 2;
            }
            "--help" | "-h" => {
                println!("probdist-report - two-race standings report");
                println!();
                println!("USAGE:");
                println!("    probdist-report --after <FILE> (--before <FILE> | --gained <FILE>) [OPTIONS]");
                println!();
                println!("OPTIONS:");
                println!("    -a, --after <FILE>     Standings after the first race (JSON object)");
                println!("    -b, --before <FILE>    Standings before the first race (JSON object)");
                println!("    -g, --gained <FILE>    Points gained in the first race (JSON object)");
                println!("    -t, --team <NAME>      Team to report on (repeatable) [default: all]");
                println!("    -c, --config <FILE>    Library settings (JSON)");
                println!("    -h, --help             Print help information");
                std::process::exit(0);
            }
            arg => {
                eprintln!("error: unknown argument: {arg}");
                std::process::exit(1);
            }
        }
    }

    let Some(after) = after else {
        eprintln!("error: --after is required");
        std::process::exit(1);
    };
    let baseline = match (before, gained) {
        (Some(path), None) => Baseline::Before(path),
        (None, Some(path)) => Baseline::Gained(path),
        _ => {
            eprintln!("error: pass exactly one of --before or --gained");
            std::process::exit(1);
        }
    };

    Config {
        after,
        baseline,
        teams,
        settings,
    }
}

/// Standings for one race, loaded independently of every other race.
struct RaceStandings {
    label: &'static str,
    distribution: Distribution,
}

fn load(path: &Path) -> Result<WeightTable, Box<dyn std::error::Error>> {
    Ok(JsonFileSource::new(path).load()?)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = parse_args();
    let settings = match &config.settings {
        Some(path) => ProbConfig::from_json_str(
            &path.display().to_string(),
            &std::fs::read_to_string(path)?,
        )?,
        None => ProbConfig::default(),
    };

    let after = load(&config.after)?;
    let before = match &config.baseline {
        Baseline::Before(path) => load(path)?,
        Baseline::Gained(path) => after.difference(&load(path)?),
    };

    let races = [
        RaceStandings {
            label: "first race",
            distribution: before.to_distribution()?,
        },
        RaceStandings {
            label: "second race",
            distribution: after.to_distribution()?,
        },
    ];
    for race in &races {
        if !settings.accepts(&race.distribution) {
            warn!(
                race = race.label,
                total = race.distribution.total_mass(),
                tolerance = settings.tolerance,
                "standings do not sum to 1 within tolerance"
            );
            return Err(format!(
                "{} standings sum to {}, outside tolerance {}",
                race.label,
                race.distribution.total_mass(),
                settings.tolerance
            )
            .into());
        }
    }
    let [first, second] = &races;

    println!("probdist report v{}", env!("CARGO_PKG_VERSION"));
    for race in &races {
        println!("{}: {}", race.label, race.distribution);
    }
    println!();

    let teams: Vec<String> = if config.teams.is_empty() {
        first.distribution.outcomes().map(|o| o.as_str().to_string()).collect()
    } else {
        config.teams.clone()
    };

    let pct = |value: f64| Percent::new(value, settings.percent_decimals);

    for team in &teams {
        println!("{team}");
        println!("  wins both:                 {}", pct(both(&first.distribution, &second.distribution, team)));
        println!("  wins at least one:         {}", pct(at_least_one(&first.distribution, &second.distribution, team)));
        match both_given_at_least_one(&first.distribution, &second.distribution, team) {
            Ok(value) => println!("  both given at least one:   {}", pct(value)),
            Err(e) => println!("  both given at least one:   n/a ({e})"),
        }
    }

    Ok(())
}
