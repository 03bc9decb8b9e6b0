use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Error returned when a string does not name a heading.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid heading '{0}': expected one of N, E, S, W")]
pub struct HeadingParseError(pub String);

/// Compass direction the rover is facing.
///
/// Variants are declared in clockwise order; rotation and movement deltas are
/// lookups into tables indexed by that order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Heading {
    N,
    E,
    S,
    W,
}

/// Movement delta per heading, indexed by `Heading::index`.
const DELTAS: [(i32, i32); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

const NAMES: [&str; 4] = ["North", "East", "South", "West"];

impl Heading {
    /// All headings in clockwise order starting from north.
    pub const ALL: [Heading; 4] = [Heading::N, Heading::E, Heading::S, Heading::W];

    #[inline]
    fn index(self) -> usize {
        match self {
            Heading::N => 0,
            Heading::E => 1,
            Heading::S => 2,
            Heading::W => 3,
        }
    }

    /// Rotates 90 degrees counter-clockwise.
    #[inline]
    pub fn turn_left(self) -> Heading {
        Self::ALL[(self.index() + 3) % 4]
    }

    /// Rotates 90 degrees clockwise.
    #[inline]
    pub fn turn_right(self) -> Heading {
        Self::ALL[(self.index() + 1) % 4]
    }

    /// Returns the `(dx, dy)` of one step forward. North is `+y`.
    #[inline]
    pub fn delta(self) -> (i32, i32) {
        DELTAS[self.index()]
    }

    /// Single upper-case letter used in reports and input.
    pub fn letter(self) -> char {
        match self {
            Heading::N => 'N',
            Heading::E => 'E',
            Heading::S => 'S',
            Heading::W => 'W',
        }
    }

    /// Full compass name, e.g. `"North"`.
    pub fn name(self) -> &'static str {
        NAMES[self.index()]
    }
}

impl fmt::Display for Heading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

impl FromStr for Heading {
    type Err = HeadingParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "N" => Ok(Heading::N),
            "E" => Ok(Heading::E),
            "S" => Ok(Heading::S),
            "W" => Ok(Heading::W),
            _ => Err(HeadingParseError(s.to_string())),
        }
    }
}
