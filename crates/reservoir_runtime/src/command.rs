//! Shell command parsing.
//!
//! A command line is split on whitespace; double quotes group words so names
//! like `"Lake Superior"` stay one token. Lines starting with `#` are
//! comments.

use std::path::PathBuf;

use reservoir_foundation::{Error, Reservoir, Result};

/// Names of all shell commands, for help and completion.
pub const COMMAND_NAMES: &[&str] = &[
    "add",
    "remove",
    "list",
    "count",
    "compare",
    "save-text",
    "save-bin",
    "load-bin",
    "save",
    "load",
    "help",
    "quit",
    "exit",
];

/// A parsed shell command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Append a record.
    Add(Reservoir),
    /// Remove the record at an index (out-of-range is ignored).
    Remove(usize),
    /// Display every record.
    List,
    /// Report size and capacity.
    Count,
    /// Compare two records by index.
    Compare(usize, usize),
    /// Write a text dump.
    SaveText(PathBuf),
    /// Write a binary dump.
    SaveBinary(PathBuf),
    /// Replace the collection with a binary dump's contents.
    LoadBinary(PathBuf),
    /// Write a snapshot.
    Save(PathBuf),
    /// Replace the collection with a snapshot.
    Load(PathBuf),
    /// Show the command summary.
    Help,
    /// Leave the shell.
    Quit,
}

impl Command {
    /// Parses one input line.
    ///
    /// Returns `Ok(None)` for blank lines and comments.
    ///
    /// # Errors
    ///
    /// Returns `InvalidCommand` for unknown commands, wrong argument counts,
    /// unparsable numbers, and unterminated quotes.
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let tokens = tokenize(line)?;
        let Some((name, args)) = tokens.split_first() else {
            return Ok(None);
        };
        if name.starts_with('#') {
            return Ok(None);
        }

        let command = match name.as_str() {
            "add" => {
                let [name, width, length, depth, kind] = expect_args::<5>("add", args)?;
                Self::Add(Reservoir::new(
                    name.as_str(),
                    parse_number("width", width)?,
                    parse_number("length", length)?,
                    parse_number("depth", depth)?,
                    kind.as_str(),
                ))
            }
            "remove" => {
                let [index] = expect_args::<1>("remove", args)?;
                Self::Remove(parse_index(index)?)
            }
            "list" => no_args("list", args, Self::List)?,
            "count" => no_args("count", args, Self::Count)?,
            "compare" => {
                let [a, b] = expect_args::<2>("compare", args)?;
                Self::Compare(parse_index(a)?, parse_index(b)?)
            }
            "save-text" => Self::SaveText(single_path("save-text", args)?),
            "save-bin" => Self::SaveBinary(single_path("save-bin", args)?),
            "load-bin" => Self::LoadBinary(single_path("load-bin", args)?),
            "save" => Self::Save(single_path("save", args)?),
            "load" => Self::Load(single_path("load", args)?),
            "help" => no_args("help", args, Self::Help)?,
            "quit" | "exit" => no_args(name, args, Self::Quit)?,
            other => return Err(Error::invalid_command(format!("unknown command '{other}'"))),
        };
        Ok(Some(command))
    }
}

/// Splits a line into tokens, honoring double quotes.
///
/// # Errors
///
/// Returns `InvalidCommand` if a quote is left open.
pub fn tokenize(line: &str) -> Result<Vec<String>> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut in_quotes = false;

    for c in line.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                in_token = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            c => {
                current.push(c);
                in_token = true;
            }
        }
    }

    if in_quotes {
        return Err(Error::invalid_command("unterminated quote"));
    }
    if in_token {
        tokens.push(current);
    }
    Ok(tokens)
}

fn expect_args<'a, const N: usize>(command: &str, args: &'a [String]) -> Result<&'a [String; N]> {
    args.try_into().map_err(|_| {
        Error::invalid_command(format!(
            "'{command}' takes {N} argument(s), got {}",
            args.len()
        ))
    })
}

fn no_args(command: &str, args: &[String], parsed: Command) -> Result<Command> {
    expect_args::<0>(command, args)?;
    Ok(parsed)
}

fn single_path(command: &str, args: &[String]) -> Result<PathBuf> {
    let [path] = expect_args::<1>(command, args)?;
    Ok(PathBuf::from(path))
}

fn parse_number(field: &str, token: &str) -> Result<f64> {
    token
        .parse()
        .map_err(|_| Error::invalid_command(format!("{field} '{token}' is not a number")))
}

fn parse_index(token: &str) -> Result<usize> {
    token
        .parse()
        .map_err(|_| Error::invalid_command(format!("'{token}' is not an index")))
}
