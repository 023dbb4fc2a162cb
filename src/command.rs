//! Parsing of single command lines.
//!
//! A line is `ACTION [ARG1] [ARG2]`, split on whitespace. Actions form a
//! closed, case-sensitive set; paths are taken verbatim with no quoting.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The command keywords understood by the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Create,
    List,
    Delete,
    Move,
}

impl Action {
    pub const ALL: [Action; 4] = [Action::Create, Action::List, Action::Delete, Action::Move];

    /// Keyword as written on a command line.
    pub fn keyword(self) -> &'static str {
        match self {
            Action::Create => "CREATE",
            Action::List => "LIST",
            Action::Delete => "DELETE",
            Action::Move => "MOVE",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown action: {0:?}")]
pub struct UnknownAction(pub String);

impl FromStr for Action {
    type Err = UnknownAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .into_iter()
            .find(|action| action.keyword() == s)
            .ok_or_else(|| UnknownAction(s.to_string()))
    }
}

/// A fully specified command, borrowing its paths from the input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command<'a> {
    Create { path: &'a str },
    List,
    Delete { path: &'a str },
    Move { source: &'a str, destination: &'a str },
}

/// Outcome of parsing one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedLine<'a> {
    /// Blank line or a first token outside the action set.
    Invalid,
    /// Known action without the operands it needs. Such lines are skipped
    /// without any output.
    Malformed(Action),
    Recognized(Command<'a>),
}

/// Split `line` into an action and its operands. Surplus operands are ignored.
pub fn parse_line(line: &str) -> ParsedLine<'_> {
    let mut tokens = line.split_whitespace();
    let action = match tokens.next().map(str::parse::<Action>) {
        Some(Ok(action)) => action,
        Some(Err(err)) => {
            tracing::debug!(%err, "rejecting line");
            return ParsedLine::Invalid;
        }
        None => return ParsedLine::Invalid,
    };

    let command = match action {
        Action::Create => tokens.next().map(|path| Command::Create { path }),
        Action::List => Some(Command::List),
        Action::Delete => tokens.next().map(|path| Command::Delete { path }),
        Action::Move => tokens
            .next()
            .zip(tokens.next())
            .map(|(source, destination)| Command::Move { source, destination }),
    };

    match command {
        Some(command) => ParsedLine::Recognized(command),
        None => ParsedLine::Malformed(action),
    }
}
