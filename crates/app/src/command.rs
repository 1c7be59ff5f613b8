//! Text commands typed at the prompt.

use std::error;
use std::fmt;

use ladder_core::Action;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Select(u8),
    LockIn,
    Next,
    FiftyFifty,
    Poll,
    Switch,
    WalkAway,
    Reset,
    /// Blank line: redraw only, but still lets the clock run.
    Refresh,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    Unknown(String),
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown(input) => write!(f, "unknown command '{input}' (type 'help')"),
        }
    }
}

impl error::Error for CommandError {}

pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let input = line.trim().to_ascii_lowercase();
    let command = match input.as_str() {
        "" => Command::Refresh,
        "a" => Command::Select(0),
        "b" => Command::Select(1),
        "c" => Command::Select(2),
        "d" => Command::Select(3),
        "lock" | "l" => Command::LockIn,
        "next" | "n" => Command::Next,
        "50" | "50:50" | "fifty" => Command::FiftyFifty,
        "poll" | "p" => Command::Poll,
        "switch" | "s" => Command::Switch,
        "walk" | "w" => Command::WalkAway,
        "reset" => Command::Reset,
        "help" | "?" | "h" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        _ => return Err(CommandError::Unknown(line.trim().to_string())),
    };
    Ok(command)
}

impl Command {
    /// The action this command dispatches, if any.
    pub fn action(self) -> Option<Action> {
        match self {
            Self::Select(index) => Some(Action::SelectChoice { index }),
            Self::LockIn => Some(Action::LockIn),
            Self::Next => Some(Action::Next),
            Self::FiftyFifty => Some(Action::UseFiftyFifty),
            Self::Poll => Some(Action::UseAudiencePoll),
            Self::Switch => Some(Action::UseSwitchQuestion),
            Self::WalkAway => Some(Action::WalkAway),
            Self::Reset => Some(Action::Reset),
            Self::Refresh | Self::Help | Self::Quit => None,
        }
    }
}

pub const HELP_TEXT: &str =
    "a-d select  lock  next  50 (fifty-fifty)  poll  switch  walk  reset  quit";
