use std::{
    collections::VecDeque,
    io::{BufRead, Write},
    str::FromStr,
};

use anyhow::{Result, anyhow};
use log::debug;
use rover_sim_core::{Command, Coordinate, Heading, Scenario};

const INVALID_NUMBER: &str = "Invalid number. Please enter a whole number.";
const INVALID_HEADING: &str = "Invalid direction. Please enter N, E, S, or W.";

/// Asks for scenario inputs one value at a time.
///
/// Input is consumed as whitespace-separated tokens, so several values may be
/// typed on one line. Invalid values are reported and asked for again.
pub struct Prompter<R, W> {
    input: R,
    output: W,
    pending: VecDeque<String>,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            pending: VecDeque::new(),
        }
    }

    /// Returns the next token, or `None` at end of input.
    fn next_token(&mut self) -> Result<Option<String>> {
        while self.pending.is_empty() {
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            self.pending
                .extend(line.split_whitespace().map(str::to_string));
        }
        Ok(self.pending.pop_front())
    }

    fn say(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{}", text)?;
        self.output.flush()?;
        Ok(())
    }

    /// Reads tokens until one parses as `T`, repeating `prompt` after each
    /// rejected token.
    fn read<T: FromStr>(&mut self, prompt: &str, retry: &str) -> Result<T> {
        loop {
            let token = self
                .next_token()?
                .ok_or_else(|| anyhow!("Input ended while waiting for: {}", prompt))?;
            match token.parse() {
                Ok(value) => return Ok(value),
                Err(_) => {
                    debug!("Rejected input '{}'", token);
                    self.say(retry)?;
                    self.say(prompt)?;
                }
            }
        }
    }

    fn ask<T: FromStr>(&mut self, prompt: &str, retry: &str) -> Result<T> {
        self.say(prompt)?;
        self.read(prompt, retry)
    }

    /// Reads a full scenario in the same order as the text format.
    ///
    /// The command list ends at the first non-command token or at end of
    /// input.
    pub fn read_scenario(&mut self) -> Result<Scenario> {
        let width = self.ask("Enter grid width:", INVALID_NUMBER)?;
        let height = self.ask("Enter grid height:", INVALID_NUMBER)?;

        let count: usize = self.ask("Enter number of obstacles:", INVALID_NUMBER)?;
        // The count is untrusted, so the list grows as coordinates arrive.
        let mut obstacles = Vec::new();
        for i in 0..count {
            let prompt = format!("Enter obstacle {} coordinates (x y):", i + 1);
            let x = self.ask(&prompt, INVALID_NUMBER)?;
            let y = self.read(&prompt, INVALID_NUMBER)?;
            obstacles.push(Coordinate::new(x, y));
        }

        let x = self.ask("Enter rover starting x position:", INVALID_NUMBER)?;
        let y = self.ask("Enter rover starting y position:", INVALID_NUMBER)?;
        let heading: Heading = self.ask(
            "Enter rover starting direction (N, E, S, W):",
            INVALID_HEADING,
        )?;

        self.say(
            "Enter commands (M for move, L for turn left, R for turn right), \
             end with a non-command character:",
        )?;
        let mut commands = Vec::new();
        while let Some(token) = self.next_token()? {
            match Command::from_token(&token) {
                Some(command) => commands.push(command),
                None => break,
            }
        }

        Ok(Scenario {
            width,
            height,
            obstacles,
            start: Coordinate::new(x, y),
            heading,
            commands,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn read(input: &str) -> (Result<Scenario>, String) {
        let mut output = Vec::new();
        let result = Prompter::new(Cursor::new(input), &mut output).read_scenario();
        (result, String::from_utf8(output).unwrap())
    }

    #[test]
    fn reads_values_across_lines() {
        let (scenario, transcript) = read("5\n5\n1\n1 0\n0\n0\ne\nM m R q M\n");
        let scenario = scenario.unwrap();
        assert_eq!(scenario.width, 5);
        assert_eq!(scenario.obstacles, vec![Coordinate::new(1, 0)]);
        assert_eq!(scenario.heading, Heading::E);
        assert_eq!(
            scenario.commands,
            vec![Command::Move, Command::Move, Command::TurnRight]
        );
        assert!(transcript.contains("Enter obstacle 1 coordinates (x y):"));
    }

    #[test]
    fn retries_invalid_heading() {
        let (scenario, transcript) = read("3 3 0 1 1 X up W M");
        let scenario = scenario.unwrap();
        assert_eq!(scenario.heading, Heading::W);
        assert_eq!(scenario.commands, vec![Command::Move]);
        assert_eq!(transcript.matches(INVALID_HEADING).count(), 2);
    }

    #[test]
    fn retries_invalid_numbers() {
        let (scenario, transcript) = read("wide 4 4 -2 0 0 0 N");
        let scenario = scenario.unwrap();
        assert_eq!((scenario.width, scenario.height), (4, 4));
        assert!(scenario.obstacles.is_empty());
        assert_eq!(transcript.matches(INVALID_NUMBER).count(), 2);
    }

    #[test]
    fn end_of_input_finishes_command_list() {
        let (scenario, _) = read("2 2 0 0 0 N\nM R M");
        assert_eq!(scenario.unwrap().commands.len(), 3);
    }

    #[test]
    fn obstacle_prompt_is_shown_once_per_obstacle() {
        let (scenario, transcript) = read("4 4 2\n1 1\n2 2\n0 0 N\n");
        assert_eq!(scenario.unwrap().obstacles.len(), 2);
        assert_eq!(transcript.matches("Enter obstacle 1 coordinates").count(), 1);
        assert_eq!(transcript.matches("Enter obstacle 2 coordinates").count(), 1);
    }

    #[test]
    fn bad_obstacle_y_repeats_the_prompt() {
        let (scenario, transcript) = read("4 4 1\n1 up 3\n0 0 N\n");
        assert_eq!(scenario.unwrap().obstacles, vec![Coordinate::new(1, 3)]);
        assert_eq!(transcript.matches("Enter obstacle 1 coordinates").count(), 2);
    }

    #[test]
    fn huge_obstacle_count_fails_at_end_of_input() {
        let (result, _) = read("3 3 18446744073709551615\n");
        assert!(result.is_err());
        let (result, _) = read("3 3 1000000000000\n1 1\n");
        assert!(result.is_err());
    }

    #[test]
    fn end_of_input_before_heading_is_an_error() {
        let (result, _) = read("2 2 0 0 0");
        assert!(result.is_err());
    }
}
