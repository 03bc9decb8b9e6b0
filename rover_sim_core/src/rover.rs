use crate::{Coordinate, grid::Grid, heading::Heading};

/// Represents the outcome of a forward move attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved,
    /// The target cell holds an obstacle. The rover did not move.
    BlockedByObstacle,
    /// The target cell lies outside the grid. The rover did not move.
    OutOfBounds,
}

impl MoveOutcome {
    pub fn is_moved(self) -> bool {
        matches!(self, MoveOutcome::Moved)
    }
}

/// A rover driving on a borrowed [`Grid`].
///
/// The start position is taken as given, even if it is out of bounds or on an
/// obstacle. Every later position was open at the time the rover entered it.
#[derive(Debug, Clone)]
pub struct Rover<'g> {
    position: Coordinate,
    heading: Heading,
    grid: &'g Grid,
}

impl<'g> Rover<'g> {
    pub fn new(position: Coordinate, heading: Heading, grid: &'g Grid) -> Self {
        Rover {
            position,
            heading,
            grid,
        }
    }

    #[inline]
    pub fn position(&self) -> Coordinate {
        self.position
    }

    #[inline]
    pub fn heading(&self) -> Heading {
        self.heading
    }

    /// Attempts to drive one cell along the current heading.
    ///
    /// The bounds check runs before the obstacle check. On anything other
    /// than [`MoveOutcome::Moved`] position and heading are left untouched.
    pub fn move_forward(&mut self) -> MoveOutcome {
        let (dx, dy) = self.heading.delta();
        let target = match self.position.offset(dx, dy) {
            Some(target) if self.grid.contains(target) => target,
            _ => return MoveOutcome::OutOfBounds,
        };
        if self.grid.has_obstacle(target.x, target.y) {
            return MoveOutcome::BlockedByObstacle;
        }
        self.position = target;
        MoveOutcome::Moved
    }

    pub fn turn_left(&mut self) {
        self.heading = self.heading.turn_left();
    }

    pub fn turn_right(&mut self) {
        self.heading = self.heading.turn_right();
    }

    /// Renders position and heading as the fixed-format status line.
    ///
    /// The obstacle sentence is static text and does not reflect blocked
    /// moves.
    pub fn status_report(&self) -> String {
        format!(
            "Rover is at {} facing {}. No Obstacles detected.",
            self.position, self.heading
        )
    }
}
