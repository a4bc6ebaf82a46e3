//! Line-oriented command parsing for the café CLI.
//!
//! ```text
//! CREATE <queue> <capacity>
//! ENQ <queue> <item>
//! SKIP <queue>
//! SETWEIGHT <queue> <weight>
//! SPECIAL <item> <prep_minutes> <uses>
//! SPECIAL <item> <prep_minutes> <start> <end>
//! RUN <steps>
//! RUN <quantum> <steps>
//! DRAIN [<quantum>]
//! MENU
//! STATUS
//! ```
//!
//! Command words are case-insensitive. The four-argument `SPECIAL` form
//! describes a window of resolutions and is read as `uses = end - start`.
//! `DRAIN` keeps rotating until every queue is empty and no skip is pending.

use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Create { queue: String, capacity: usize },
    Enqueue { queue: String, item: String },
    Skip { queue: String },
    SetWeight { queue: String, weight: i64 },
    Special { item: String, prep_minutes: i64, uses: i64 },
    Run { quantum: Option<u32>, steps: usize },
    Drain { quantum: Option<u32> },
    Menu,
    Status,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Wrong number or type of arguments for a known command
    BadArgs(String),
    UnknownCommand(String),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::BadArgs(cmd) => write!(f, "Bad arguments for {}", cmd),
            ParseError::UnknownCommand(cmd) => write!(f, "Unknown command: {}", cmd),
        }
    }
}

impl std::error::Error for ParseError {}

impl ParseError {
    pub fn reason(&self) -> &'static str {
        match self {
            ParseError::BadArgs(_) => "bad_args",
            ParseError::UnknownCommand(_) => "unknown_command",
        }
    }
}

/// Parse one input line.
///
/// Returns `None` for blank and `#` comment lines.
pub fn parse_command(line: &str) -> Option<Result<Command, ParseError>> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return None;
    }

    let mut parts = trimmed.split_whitespace();
    let word = parts.next()?.to_uppercase();
    let args: Vec<&str> = parts.collect();
    Some(parse_args(&word, &args))
}

fn parse_args(word: &str, args: &[&str]) -> Result<Command, ParseError> {
    let bad = || ParseError::BadArgs(word.to_string());
    match (word, args) {
        ("CREATE", [queue, capacity]) => Ok(Command::Create {
            queue: queue.to_string(),
            capacity: number(capacity).ok_or_else(bad)?,
        }),
        ("ENQ", [queue, item]) => Ok(Command::Enqueue {
            queue: queue.to_string(),
            item: item.to_string(),
        }),
        ("SKIP", [queue]) => Ok(Command::Skip {
            queue: queue.to_string(),
        }),
        ("SETWEIGHT", [queue, weight]) => Ok(Command::SetWeight {
            queue: queue.to_string(),
            weight: number(weight).ok_or_else(bad)?,
        }),
        ("SPECIAL", [item, prep, uses]) => Ok(Command::Special {
            item: item.to_string(),
            prep_minutes: number(prep).ok_or_else(bad)?,
            uses: number(uses).ok_or_else(bad)?,
        }),
        ("SPECIAL", [item, prep, start, end]) => {
            let start: i64 = number(start).ok_or_else(bad)?;
            let end: i64 = number(end).ok_or_else(bad)?;
            Ok(Command::Special {
                item: item.to_string(),
                prep_minutes: number(prep).ok_or_else(bad)?,
                uses: end.saturating_sub(start),
            })
        }
        ("RUN", [steps]) => Ok(Command::Run {
            quantum: None,
            steps: number(steps).ok_or_else(bad)?,
        }),
        ("RUN", [quantum, steps]) => Ok(Command::Run {
            quantum: Some(number(quantum).ok_or_else(bad)?),
            steps: number(steps).ok_or_else(bad)?,
        }),
        ("DRAIN", []) => Ok(Command::Drain { quantum: None }),
        ("DRAIN", [quantum]) => Ok(Command::Drain {
            quantum: Some(number(quantum).ok_or_else(bad)?),
        }),
        ("MENU", []) => Ok(Command::Menu),
        ("STATUS", []) => Ok(Command::Status),
        ("CREATE" | "ENQ" | "SKIP" | "SETWEIGHT" | "SPECIAL" | "RUN" | "DRAIN" | "MENU" | "STATUS", _) => {
            Err(bad())
        }
        _ => Err(ParseError::UnknownCommand(word.to_string())),
    }
}

fn number<T: FromStr>(raw: &str) -> Option<T> {
    raw.parse().ok()
}
