//! Command execution - runs console commands against a blueprint service

use crate::blueprints::{Blueprint, BlueprintService};
use crate::command::parser::{parse_command, ConsoleCommand, USAGE};
use crate::core::error::BlueprintError;

/// How a command ended, in request/response terms
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Read succeeded
    Ok,
    Created,
    Updated,
    Deleted,
    NotFound,
    /// Key already taken
    Conflict,
    /// Malformed command or out-of-range ordinal
    Invalid,
    /// Unexpected failure (I/O, serialization)
    Failed,
    /// Caller asked to leave
    Exit,
}

/// Result of executing a command
#[derive(Debug, Clone)]
pub struct ExecutionResult {
    pub outcome: Outcome,
    pub message: String,
}

impl ExecutionResult {
    fn new(outcome: Outcome, message: impl Into<String>) -> Self {
        Self {
            outcome,
            message: message.into(),
        }
    }

    fn from_error(err: BlueprintError) -> Self {
        let outcome = match &err {
            BlueprintError::NotFound(_) => Outcome::NotFound,
            BlueprintError::AlreadyExists(_) => Outcome::Conflict,
            BlueprintError::InvalidState(_) | BlueprintError::Parse(_) => Outcome::Invalid,
            BlueprintError::Io(_) | BlueprintError::Serialization(_) => Outcome::Failed,
        };
        if outcome == Outcome::Failed {
            tracing::warn!("Command failed: {}", err);
        }
        Self::new(outcome, err.to_string())
    }

    pub fn is_success(&self) -> bool {
        matches!(
            self.outcome,
            Outcome::Ok | Outcome::Created | Outcome::Updated | Outcome::Deleted | Outcome::Exit
        )
    }
}

/// Executes console commands against a service
pub struct CommandExecutor;

impl CommandExecutor {
    /// Parse and execute one console line
    pub fn execute_line(service: &BlueprintService, line: &str) -> ExecutionResult {
        match parse_command(line) {
            Ok(command) => Self::execute(service, command),
            Err(err) => ExecutionResult::from_error(err),
        }
    }

    /// Execute a parsed command
    pub fn execute(service: &BlueprintService, command: ConsoleCommand) -> ExecutionResult {
        match run(service, command) {
            Ok(result) => result,
            Err(err) => ExecutionResult::from_error(err),
        }
    }
}

fn run(
    service: &BlueprintService,
    command: ConsoleCommand,
) -> Result<ExecutionResult, BlueprintError> {
    let result = match command {
        ConsoleCommand::List => {
            let summaries = service.summaries();
            let message = if summaries.is_empty() {
                "No blueprints stored.".to_string()
            } else {
                summaries
                    .iter()
                    .enumerate()
                    .map(|(i, line)| format!("[{}] {}", i, line))
                    .collect::<Vec<_>>()
                    .join("\n")
            };
            ExecutionResult::new(Outcome::Ok, message)
        }
        ConsoleCommand::Author(author) => {
            let blueprints = service.get_blueprints_by_author(&author)?;
            ExecutionResult::new(Outcome::Ok, serde_json::to_string_pretty(&blueprints)?)
        }
        ConsoleCommand::Get { author, name } => {
            let blueprint = service.get_blueprint(&author, &name)?;
            ExecutionResult::new(Outcome::Ok, serde_json::to_string_pretty(&blueprint)?)
        }
        ConsoleCommand::Add {
            author,
            name,
            points,
        } => {
            let blueprint = Blueprint::new(author, name, points);
            let key = blueprint.key();
            service.add_new_blueprint(blueprint)?;
            ExecutionResult::new(Outcome::Created, format!("Created {}", key))
        }
        ConsoleCommand::Update {
            author,
            name,
            points,
        } => {
            let incoming = Blueprint::new(author.as_str(), name.as_str(), points);
            let written = service.update_blueprint(&author, &name, incoming)?;
            ExecutionResult::new(
                Outcome::Updated,
                format!("Updated {} to v{}", written.key(), written.version),
            )
        }
        ConsoleCommand::Filter(ordinal) => {
            let filtered = service.filter_blueprint(ordinal)?;
            ExecutionResult::new(Outcome::Updated, filtered.to_string())
        }
        ConsoleCommand::FilterKey { author, name } => {
            let filtered = service.filter_blueprint_by_key(&author, &name)?;
            ExecutionResult::new(Outcome::Updated, filtered.to_string())
        }
        ConsoleCommand::Delete { author, name } => {
            let removed = service.delete_blueprint(&author, &name)?;
            ExecutionResult::new(Outcome::Deleted, format!("Deleted {}", removed.key()))
        }
        ConsoleCommand::Help => ExecutionResult::new(Outcome::Ok, USAGE),
        ConsoleCommand::Quit => ExecutionResult::new(Outcome::Exit, "Goodbye."),
    };
    Ok(result)
}
