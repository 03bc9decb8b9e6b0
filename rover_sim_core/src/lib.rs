use std::fmt;

use serde::{Deserialize, Serialize};

pub mod command;
pub mod grid;
pub mod heading;
pub mod rover;
pub mod scenario;
pub mod simulator;

pub use command::{Command, parse_commands};
pub use grid::Grid;
pub use heading::{Heading, HeadingParseError};
pub use rover::{MoveOutcome, Rover};
pub use scenario::{Scenario, ScenarioError, ScenarioSpec, parse_scenario};
pub use simulator::{Simulator, Step, StepOutcome, Trace};

/// Represents a 2D coordinate on the grid.
///
/// Used both for the rover position and for obstacle identity, so equality
/// and hashing are structural.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: i32,
    pub y: i32,
}

impl Coordinate {
    pub fn new(x: i32, y: i32) -> Self {
        Coordinate { x, y }
    }

    /// Returns the coordinate shifted by `(dx, dy)`.
    ///
    /// Returns `None` if either axis overflows `i32`.
    #[inline]
    pub fn offset(self, dx: i32, dy: i32) -> Option<Coordinate> {
        Some(Coordinate {
            x: self.x.checked_add(dx)?,
            y: self.y.checked_add(dy)?,
        })
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
