//! Console command pipeline
//!
//! Text line -> `parse_command` -> `ConsoleCommand` -> `CommandExecutor` -> `ExecutionResult`

pub mod executor;
pub mod parser;

pub use executor::{CommandExecutor, ExecutionResult, Outcome};
pub use parser::{parse_command, parse_points, ConsoleCommand, USAGE};
