use std::fmt;

use serde::{Deserialize, Serialize};

/// An instruction the rover can execute.
///
/// Commands carry no data, so a single command list can drive any number of
/// rovers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    /// Drive one cell forward along the current heading.
    Move,
    TurnLeft,
    TurnRight,
}

impl Command {
    pub const ALL: [Command; 3] = [Command::Move, Command::TurnLeft, Command::TurnRight];

    /// Maps a single input token to a command.
    ///
    /// Accepts `M`, `L` and `R` in either case. Returns `None` for anything
    /// else, including multi-letter tokens such as `"MM"`.
    pub fn from_token(token: &str) -> Option<Command> {
        match token.trim() {
            "M" | "m" => Some(Command::Move),
            "L" | "l" => Some(Command::TurnLeft),
            "R" | "r" => Some(Command::TurnRight),
            _ => None,
        }
    }

    pub fn letter(self) -> char {
        match self {
            Command::Move => 'M',
            Command::TurnLeft => 'L',
            Command::TurnRight => 'R',
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Converts a token stream into an ordered command list.
///
/// Tokens are consumed in order until the first one that is not a command;
/// that token and everything after it are discarded.
pub fn parse_commands<'a, I>(tokens: I) -> Vec<Command>
where
    I: IntoIterator<Item = &'a str>,
{
    tokens.into_iter().map_while(Command::from_token).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_map_to_commands() {
        assert_eq!(Command::from_token("M"), Some(Command::Move));
        assert_eq!(Command::from_token("l"), Some(Command::TurnLeft));
        assert_eq!(Command::from_token(" r\n"), Some(Command::TurnRight));
        assert_eq!(Command::from_token("MM"), None);
        assert_eq!(Command::from_token("x"), None);
        assert_eq!(Command::from_token(""), None);
    }

    #[test]
    fn parsing_stops_at_first_unknown_token() {
        let commands = parse_commands("M m R x L L".split_whitespace());
        assert_eq!(
            commands,
            vec![Command::Move, Command::Move, Command::TurnRight]
        );
    }

    #[test]
    fn empty_and_immediately_terminated_input() {
        assert!(parse_commands(std::iter::empty()).is_empty());
        assert!(parse_commands(["Q", "M"]).is_empty());
    }

    #[test]
    fn letters_round_out_display() {
        let letters: String = Command::ALL.iter().map(|c| c.to_string()).collect();
        assert_eq!(letters, "MLR");
        for command in Command::ALL {
            assert_eq!(
                Command::from_token(&command.letter().to_string()),
                Some(command)
            );
        }
    }
}
