use std::str::{FromStr, SplitWhitespace};

use log::debug;
use rand::{Rng, SeedableRng, rngs::StdRng, seq::index};
use serde::{Deserialize, Serialize};

use crate::{
    Coordinate,
    command::{Command, parse_commands},
    grid::Grid,
    heading::{Heading, HeadingParseError},
    rover::Rover,
    simulator::{Simulator, Trace},
};

/// Represents errors that can occur while loading or generating a scenario.
#[derive(Debug, thiserror::Error)]
pub enum ScenarioError {
    #[error("Missing value for {field}")]
    MissingValue { field: &'static str },
    #[error("Invalid number '{token}' for {field}")]
    InvalidNumber { field: &'static str, token: String },
    #[error("Obstacle count cannot be negative, got {0}")]
    NegativeObstacleCount(i64),
    #[error(transparent)]
    InvalidHeading(#[from] HeadingParseError),
    #[error("Failed to parse RON scenario: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("Failed to write RON scenario: {0}")]
    RonWrite(#[from] ron::Error),
    #[error("Cannot generate a scenario on a {width}x{height} grid")]
    EmptyGrid { width: i32, height: i32 },
    #[error("{requested} obstacles plus the rover do not fit in {cells} cells")]
    TooManyObstacles { requested: usize, cells: u64 },
}

/// All inputs needed for one simulation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub width: i32,
    pub height: i32,
    pub obstacles: Vec<Coordinate>,
    pub start: Coordinate,
    pub heading: Heading,
    pub commands: Vec<Command>,
}

/// Parameters for [`Scenario::random`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScenarioSpec {
    pub width: i32,
    pub height: i32,
    pub obstacles: usize,
    pub commands: usize,
}

impl Scenario {
    /// Builds the grid described by this scenario.
    pub fn grid(&self) -> Grid {
        Grid::new(self.width, self.height, self.obstacles.iter().copied())
    }

    /// True if the start cell is inside the grid and obstacle free.
    ///
    /// Runs still proceed from a blocked start; the rover stays there until
    /// its first successful move.
    pub fn start_is_open(&self) -> bool {
        self.grid().is_open(self.start)
    }

    /// Runs the command list on a fresh rover and returns the trace.
    pub fn run(&self) -> Trace {
        let grid = self.grid();
        let mut rover = Rover::new(self.start, self.heading, &grid);
        debug!(
            "Running {} command(s) on a {}x{} grid with {} obstacle(s)",
            self.commands.len(),
            grid.width(),
            grid.height(),
            grid.obstacle_count()
        );
        Simulator::run_traced(&mut rover, &self.commands)
    }

    pub fn from_ron(source: &str) -> Result<Self, ScenarioError> {
        Ok(ron::from_str(source)?)
    }

    pub fn to_ron(&self) -> Result<String, ScenarioError> {
        Ok(ron::ser::to_string_pretty(
            self,
            ron::ser::PrettyConfig::default(),
        )?)
    }

    /// Generates a reproducible scenario from `seed`.
    ///
    /// The start cell and the obstacles are distinct cells inside the grid, so
    /// the rover never starts on an obstacle.
    pub fn random(spec: ScenarioSpec, seed: u64) -> Result<Self, ScenarioError> {
        if spec.width <= 0 || spec.height <= 0 {
            return Err(ScenarioError::EmptyGrid {
                width: spec.width,
                height: spec.height,
            });
        }
        let cells = spec.width as u64 * spec.height as u64;
        let length = usize::try_from(cells).unwrap_or(usize::MAX);
        if spec.obstacles >= length {
            return Err(ScenarioError::TooManyObstacles {
                requested: spec.obstacles,
                cells,
            });
        }

        let width = spec.width as usize;
        let to_coordinate =
            |i: usize| Coordinate::new((i % width) as i32, (i / width) as i32);

        let mut rng = StdRng::seed_from_u64(seed);
        let start_index = rng.random_range(0..length);
        // Sample from every cell except the start by shifting indices past it.
        let obstacles = index::sample(&mut rng, length - 1, spec.obstacles)
            .into_iter()
            .map(|i| if i >= start_index { i + 1 } else { i })
            .map(to_coordinate)
            .collect();
        let heading = Heading::ALL[rng.random_range(0..Heading::ALL.len())];
        let commands = (0..spec.commands)
            .map(|_| Command::ALL[rng.random_range(0..Command::ALL.len())])
            .collect();

        Ok(Scenario {
            width: spec.width,
            height: spec.height,
            obstacles,
            start: to_coordinate(start_index),
            heading,
            commands,
        })
    }
}

struct Tokens<'a> {
    inner: SplitWhitespace<'a>,
}

impl<'a> Tokens<'a> {
    fn next(&mut self, field: &'static str) -> Result<&'a str, ScenarioError> {
        self.inner
            .next()
            .ok_or(ScenarioError::MissingValue { field })
    }

    fn number<T: FromStr>(&mut self, field: &'static str) -> Result<T, ScenarioError> {
        let token = self.next(field)?;
        token.parse().map_err(|_| ScenarioError::InvalidNumber {
            field,
            token: token.to_string(),
        })
    }
}

/// Loads a scenario from whitespace-separated tokens.
///
/// Tokens appear in this order:
///
/// ```text
/// width height obstacle_count
/// x y                      (repeated obstacle_count times)
/// start_x start_y heading
/// command*                 (M, L or R; ends at the first other token)
/// ```
///
/// Line breaks carry no meaning, and anything after the command list is
/// ignored.
pub fn parse_scenario(source: &str) -> Result<Scenario, ScenarioError> {
    let mut tokens = Tokens {
        inner: source.split_whitespace(),
    };

    let width = tokens.number("grid width")?;
    let height = tokens.number("grid height")?;
    let count: i64 = tokens.number("obstacle count")?;
    if count < 0 {
        return Err(ScenarioError::NegativeObstacleCount(count));
    }

    let mut obstacles = Vec::new();
    for _ in 0..count {
        let x = tokens.number("obstacle x")?;
        let y = tokens.number("obstacle y")?;
        obstacles.push(Coordinate { x, y });
    }

    let x = tokens.number("start x")?;
    let y = tokens.number("start y")?;
    let heading: Heading = tokens.next("start heading")?.parse()?;
    let commands = parse_commands(tokens.inner);

    Ok(Scenario {
        width,
        height,
        obstacles,
        start: Coordinate { x, y },
        heading,
        commands,
    })
}
