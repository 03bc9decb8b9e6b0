use anyhow::{Context, Result, anyhow};
use clap::Parser;
use log::{info, warn};
use rover_sim_core::{Scenario, ScenarioError, ScenarioSpec, parse_scenario};
use std::{
    fs, io,
    path::{Path, PathBuf},
    time::Duration,
};

mod prompt;
mod watch;

use prompt::Prompter;

#[derive(Parser, Debug)]
#[command(version, about = "Drive a rover across a grid with obstacles", long_about = None)]
struct Args {
    /// Scenario file to load (`.ron`, or whitespace-separated tokens otherwise)
    #[arg(short, long, value_name = "SCENARIO_FILE", conflicts_with = "random")]
    scenario: Option<PathBuf>,

    /// Generate a random scenario instead of prompting for one
    #[arg(long)]
    random: bool,

    /// Grid width for --random
    #[arg(long, default_value_t = 10)]
    width: i32,

    /// Grid height for --random
    #[arg(long, default_value_t = 10)]
    height: i32,

    /// Number of obstacles for --random
    #[arg(long, default_value_t = 10)]
    obstacles: usize,

    /// Number of commands for --random
    #[arg(long, default_value_t = 20)]
    commands: usize,

    /// Seed for --random
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Replay the run in the terminal before printing the status
    #[arg(short, long)]
    watch: bool,

    /// Milliseconds per command during --watch
    #[arg(long, default_value_t = 250)]
    tick_ms: u64,

    /// Print the resolved scenario as RON before running it
    #[arg(long)]
    dump_ron: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let scenario = load_scenario(&args)?;
    info!(
        "Scenario: {}x{} grid, {} obstacle(s), rover at {} facing {}, {} command(s)",
        scenario.width,
        scenario.height,
        scenario.obstacles.len(),
        scenario.start,
        scenario.heading,
        scenario.commands.len()
    );

    if !scenario.start_is_open() {
        warn!(
            "Rover starts at {}, which is outside the grid or on an obstacle",
            scenario.start
        );
    }

    if args.dump_ron {
        println!("{}", scenario.to_ron()?);
    }

    let trace = scenario.run();
    info!(
        "{} move(s) succeeded, {} blocked",
        trace.moved_count(),
        trace.blocked_count()
    );

    if args.watch {
        watch::run(scenario.grid(), &trace, Duration::from_millis(args.tick_ms))?;
    }

    println!("{}", trace.status());
    Ok(())
}

/// Resolves the scenario from a file, the generator or the interactive prompts.
fn load_scenario(args: &Args) -> Result<Scenario> {
    if let Some(path) = &args.scenario {
        if !path.exists() {
            return Err(anyhow!("Scenario file does not exist: {}", path.display()));
        }
        let source = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        return parse_source(path, &source)
            .with_context(|| format!("Failed to load {}", path.display()));
    }

    if args.random {
        let spec = ScenarioSpec {
            width: args.width,
            height: args.height,
            obstacles: args.obstacles,
            commands: args.commands,
        };
        info!("Generating scenario with seed {}", args.seed);
        return Ok(Scenario::random(spec, args.seed)?);
    }

    let stdin = io::stdin();
    Prompter::new(stdin.lock(), io::stdout()).read_scenario()
}

/// Parses `source` as RON when `path` ends in `.ron`, as tokens otherwise.
fn parse_source(path: &Path, source: &str) -> Result<Scenario, ScenarioError> {
    let is_ron = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("ron"));
    if is_ron {
        Scenario::from_ron(source)
    } else {
        parse_scenario(source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOKENS: &str = "3 3 1 1 0 0 0 E M";
    const RON: &str = "(width: 3, height: 3, obstacles: [(x: 1, y: 0)], \
                       start: (x: 0, y: 0), heading: E, commands: [Move])";

    #[test]
    fn ron_extension_selects_ron() {
        let from_ron = parse_source(Path::new("scenarios/boulder.ron"), RON).unwrap();
        let upper = parse_source(Path::new("BOULDER.RON"), RON).unwrap();
        let from_tokens = parse_source(Path::new("a.txt"), TOKENS).unwrap();
        assert_eq!(from_ron, from_tokens);
        assert_eq!(upper, from_tokens);
    }

    #[test]
    fn other_extensions_use_tokens() {
        for name in ["a.txt", "mission", "a.ron.txt"] {
            assert!(parse_source(Path::new(name), TOKENS).is_ok(), "{}", name);
            assert!(matches!(
                parse_source(Path::new(name), RON),
                Err(ScenarioError::InvalidNumber { .. })
            ));
        }
    }

    #[test]
    fn ron_file_with_token_content_fails() {
        assert!(matches!(
            parse_source(Path::new("a.ron"), TOKENS),
            Err(ScenarioError::Ron(_))
        ));
    }

    #[test]
    fn bundled_scenarios_load() {
        let text = include_str!("../../scenarios/open_field.txt");
        let ron = include_str!("../../scenarios/boulder.ron");
        assert!(parse_source(Path::new("open_field.txt"), text).is_ok());
        assert!(parse_source(Path::new("boulder.ron"), ron).is_ok());
    }
}
