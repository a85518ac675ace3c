//! Parse console lines into commands
//!
//! Grammar (whitespace separated, point lists as `(x,y)` groups):
//!
//! ```text
//! list | help | quit
//! author <author>
//! get <author> <name>
//! add <author> <name> (x,y) (x,y) ...
//! update <author> <name> (x,y) (x,y) ...
//! filter <ordinal> | filter <author> <name>
//! delete <author> <name>
//! ```

use nom::bytes::complete::take_till1;
use nom::character::complete::{char, i32 as parse_i32, multispace0};
use nom::combinator::all_consuming;
use nom::multi::many0;
use nom::sequence::{delimited, preceded, separated_pair, terminated};
use nom::{IResult, Parser};

use crate::core::error::{BlueprintError, Result};
use crate::core::types::Point;

/// A console request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    /// Summaries of the whole catalogue
    List,
    /// Every blueprint by one author
    Author(String),
    Get {
        author: String,
        name: String,
    },
    Add {
        author: String,
        name: String,
        points: Vec<Point>,
    },
    Update {
        author: String,
        name: String,
        points: Vec<Point>,
    },
    /// Filter by position in the key-ordered listing
    Filter(usize),
    FilterKey {
        author: String,
        name: String,
    },
    Delete {
        author: String,
        name: String,
    },
    Help,
    Quit,
}

/// Usage text shown by `help`
pub const USAGE: &str = "\
Commands:
  list                         - Summarize every blueprint
  author <a>                   - Show all blueprints by an author
  get <a> <n>                  - Show one blueprint
  add <a> <n> (x,y) ...        - Create a blueprint
  update <a> <n> (x,y) ...     - Replace a blueprint's points
  filter <i> | filter <a> <n>  - Reduce a blueprint's points
  delete <a> <n>               - Remove a blueprint
  quit / q                     - Exit";

fn point(input: &str) -> IResult<&str, Point> {
    let (input, (x, y)) = delimited(
        (char('('), multispace0),
        separated_pair(parse_i32, (multispace0, char(','), multispace0), parse_i32),
        (multispace0, char(')')),
    )
    .parse(input)?;
    Ok((input, Point::new(x, y)))
}

/// Parse a whitespace separated list of `(x,y)` points
pub fn parse_points(input: &str) -> Result<Vec<Point>> {
    all_consuming(terminated(many0(preceded(multispace0, point)), multispace0))
        .parse(input)
        .map(|(_, points)| points)
        .map_err(|e| {
            BlueprintError::Parse(format!("invalid point list '{}': {}", input.trim(), e))
        })
}

/// One whitespace-delimited word, leading whitespace skipped
fn word(input: &str) -> IResult<&str, &str> {
    preceded(multispace0, take_till1(|c: char| c.is_whitespace())).parse(input)
}

fn usage_error(usage: &str) -> BlueprintError {
    BlueprintError::Parse(format!("usage: {}", usage))
}

/// Run `parser` over the whole of `input`; trailing whitespace is allowed
fn complete<'a, O, P>(input: &'a str, parser: P, usage: &str) -> Result<O>
where
    P: Parser<&'a str, Output = O, Error = nom::error::Error<&'a str>>,
{
    all_consuming(terminated(parser, multispace0))
        .parse(input)
        .map(|(_, out)| out)
        .map_err(|_| usage_error(usage))
}

/// Read `<author> <name>` and return them with the remainder
fn author_and_name<'a>(input: &'a str, usage: &str) -> Result<(String, String, &'a str)> {
    let (rest, (author, name)) = (word, word).parse(input).map_err(|_| usage_error(usage))?;
    Ok((author.to_string(), name.to_string(), rest))
}

fn exact_key(input: &str, usage: &str) -> Result<(String, String)> {
    let (author, name) = complete(input, (word, word), usage)?;
    Ok((author.to_string(), name.to_string()))
}

/// Parse one console line
pub fn parse_command(line: &str) -> Result<ConsoleCommand> {
    let (rest, verb) =
        word(line).map_err(|_| BlueprintError::Parse("empty command".to_string()))?;

    match verb.to_lowercase().as_str() {
        "list" | "ls" => Ok(ConsoleCommand::List),
        "help" | "h" | "?" => Ok(ConsoleCommand::Help),
        "quit" | "q" | "exit" => Ok(ConsoleCommand::Quit),
        "author" => {
            let author = complete(rest, word, "author <a>")?;
            Ok(ConsoleCommand::Author(author.to_string()))
        }
        "get" => {
            let (author, name) = exact_key(rest, "get <a> <n>")?;
            Ok(ConsoleCommand::Get { author, name })
        }
        "delete" | "rm" => {
            let (author, name) = exact_key(rest, "delete <a> <n>")?;
            Ok(ConsoleCommand::Delete { author, name })
        }
        "add" => {
            let (author, name, points) = author_and_name(rest, "add <a> <n> (x,y) ...")?;
            Ok(ConsoleCommand::Add {
                author,
                name,
                points: parse_points(points)?,
            })
        }
        "update" => {
            let (author, name, points) = author_and_name(rest, "update <a> <n> (x,y) ...")?;
            Ok(ConsoleCommand::Update {
                author,
                name,
                points: parse_points(points)?,
            })
        }
        "filter" => {
            let usage = "filter <i> | filter <a> <n>";
            let words = complete(rest, many0(word), usage)?;
            match words.as_slice() {
                [ordinal] => ordinal
                    .parse::<usize>()
                    .map(ConsoleCommand::Filter)
                    .map_err(|_| {
                        BlueprintError::Parse(format!("'{}' is not a valid ordinal", ordinal))
                    }),
                [author, name] => Ok(ConsoleCommand::FilterKey {
                    author: author.to_string(),
                    name: name.to_string(),
                }),
                _ => Err(usage_error(usage)),
            }
        }
        other => Err(BlueprintError::Parse(format!(
            "unknown command '{}' (try 'help')",
            other
        ))),
    }
}
