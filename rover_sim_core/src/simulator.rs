use log::{debug, trace};

use crate::{
    Coordinate,
    command::Command,
    heading::Heading,
    rover::{MoveOutcome, Rover},
};

/// Represents the outcome of applying a single command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Moved,
    BlockedByObstacle,
    OutOfBounds,
    Turned,
}

impl StepOutcome {
    pub fn is_blocked(self) -> bool {
        matches!(
            self,
            StepOutcome::BlockedByObstacle | StepOutcome::OutOfBounds
        )
    }
}

impl From<MoveOutcome> for StepOutcome {
    fn from(outcome: MoveOutcome) -> Self {
        match outcome {
            MoveOutcome::Moved => StepOutcome::Moved,
            MoveOutcome::BlockedByObstacle => StepOutcome::BlockedByObstacle,
            MoveOutcome::OutOfBounds => StepOutcome::OutOfBounds,
        }
    }
}

/// One executed command and the rover state it left behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    /// Position of the command in the input sequence.
    pub index: usize,
    pub command: Command,
    pub outcome: StepOutcome,
    pub position: Coordinate,
    pub heading: Heading,
}

/// Record of a complete run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trace {
    start: Coordinate,
    start_heading: Heading,
    steps: Vec<Step>,
    status: String,
}

impl Trace {
    /// Position before the first command.
    pub fn start(&self) -> Coordinate {
        self.start
    }

    pub fn start_heading(&self) -> Heading {
        self.start_heading
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Rover state after the last command, or the start state if no commands ran.
    pub fn final_state(&self) -> (Coordinate, Heading) {
        self.steps
            .last()
            .map(|s| (s.position, s.heading))
            .unwrap_or((self.start, self.start_heading))
    }

    pub fn moved_count(&self) -> usize {
        self.steps
            .iter()
            .filter(|s| s.outcome == StepOutcome::Moved)
            .count()
    }

    pub fn blocked_count(&self) -> usize {
        self.steps.iter().filter(|s| s.outcome.is_blocked()).count()
    }

    /// The status report produced at the end of the run.
    pub fn status(&self) -> &str {
        &self.status
    }
}

/// Drives a rover through a command sequence.
pub struct Simulator;

impl Simulator {
    /// Applies a single command to the rover.
    pub fn apply(rover: &mut Rover, command: Command) -> StepOutcome {
        match command {
            Command::Move => rover.move_forward().into(),
            Command::TurnLeft => {
                rover.turn_left();
                StepOutcome::Turned
            }
            Command::TurnRight => {
                rover.turn_right();
                StepOutcome::Turned
            }
        }
    }

    /// Applies every command in order and returns the final status report.
    ///
    /// Blocked moves leave the rover where it is and execution continues with
    /// the next command.
    pub fn run(rover: &mut Rover, commands: &[Command]) -> String {
        Self::run_traced(rover, commands).status
    }

    /// Same as [`Simulator::run`] but keeps a per-command record.
    pub fn run_traced(rover: &mut Rover, commands: &[Command]) -> Trace {
        let start = rover.position();
        let start_heading = rover.heading();
        let mut steps = Vec::with_capacity(commands.len());

        for (index, &command) in commands.iter().enumerate() {
            let before = rover.position();
            let outcome = Self::apply(rover, command);
            match outcome {
                StepOutcome::BlockedByObstacle => {
                    debug!(
                        "Command {} ({}) blocked by obstacle ahead of {} facing {}",
                        index,
                        command,
                        before,
                        rover.heading()
                    );
                }
                StepOutcome::OutOfBounds => {
                    debug!(
                        "Command {} ({}) would leave the grid from {} facing {}",
                        index,
                        command,
                        before,
                        rover.heading()
                    );
                }
                StepOutcome::Moved | StepOutcome::Turned => {}
            }
            let step = Step {
                index,
                command,
                outcome,
                position: rover.position(),
                heading: rover.heading(),
            };
            trace!("{:?}", step);
            steps.push(step);
        }

        Trace {
            start,
            start_heading,
            steps,
            status: rover.status_report(),
        }
    }
}
