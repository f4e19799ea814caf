//! Board command scripts
//!
//! A script is a plain-text stream of board operations, one per line,
//! mirroring the engine API one to one. Blank lines and `#` comments
//! are skipped; double quotes group words into a single argument.
//!
//! ```text
//! # grocery run
//! add-task "Buy milk" low
//! add-column "Blocked"
//! drag-start task-1
//! drag-over task-1 task-5
//! drag-end task-1 task-5
//! ```
//!
//! CRUD commands take typed ids and fail loudly on malformed input;
//! the drag commands carry raw strings, matching the untyped gesture
//! boundary the engine exposes.

use std::str::FromStr;
use thiserror::Error;

use crate::domain::{ColumnId, IdError, Priority, PriorityParseError, TaskId};
use crate::engine::{BoardEngine, BoardError};

#[derive(Debug, Error, PartialEq)]
pub enum ScriptError {
    #[error("Line {line}: unterminated quoted string")]
    UnterminatedQuote { line: usize },

    #[error("Line {line}: unknown command '{command}'")]
    UnknownCommand { line: usize, command: String },

    #[error("Line {line}: '{command}' is missing its {argument} argument")]
    MissingArgument {
        line: usize,
        command: &'static str,
        argument: &'static str,
    },

    #[error("Line {line}: unexpected argument '{argument}'")]
    UnexpectedArgument { line: usize, argument: String },

    #[error("Line {line}: {source}")]
    InvalidPriority {
        line: usize,
        #[source]
        source: PriorityParseError,
    },

    #[error("Line {line}: {source}")]
    InvalidId {
        line: usize,
        #[source]
        source: IdError,
    },
}

/// One board operation, parsed from a script line
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptCommand {
    AddTask {
        content: String,
        priority: Priority,
        column: Option<ColumnId>,
    },
    DeleteTask {
        task: TaskId,
    },
    AddColumn {
        title: String,
    },
    DeleteColumn {
        column: ColumnId,
    },
    DragStart {
        task: String,
    },
    DragOver {
        task: String,
        over: Option<String>,
    },
    DragEnd {
        task: String,
        over: Option<String>,
    },
}

impl ScriptCommand {
    /// The command's script-level name
    pub fn name(&self) -> &'static str {
        match self {
            ScriptCommand::AddTask { .. } => "add-task",
            ScriptCommand::DeleteTask { .. } => "delete-task",
            ScriptCommand::AddColumn { .. } => "add-column",
            ScriptCommand::DeleteColumn { .. } => "delete-column",
            ScriptCommand::DragStart { .. } => "drag-start",
            ScriptCommand::DragOver { .. } => "drag-over",
            ScriptCommand::DragEnd { .. } => "drag-end",
        }
    }

    /// Applies this command to the engine
    ///
    /// Drag commands never fail: the engine absorbs unresolvable drag
    /// ids as benign no-ops, the same way it absorbs a stale gesture
    /// stream.
    pub fn apply(&self, engine: &mut BoardEngine) -> Result<(), BoardError> {
        match self {
            ScriptCommand::AddTask {
                content,
                priority,
                column,
            } => engine.add_task(content, *priority, column.as_ref()).map(|_| ()),
            ScriptCommand::DeleteTask { task } => engine.delete_task(task),
            ScriptCommand::AddColumn { title } => engine.add_column(title).map(|_| ()),
            ScriptCommand::DeleteColumn { column } => engine.delete_column(column),
            ScriptCommand::DragStart { task } => {
                engine.drag_start(task);
                Ok(())
            }
            ScriptCommand::DragOver { task, over } => {
                engine.drag_over(task, over.as_deref());
                Ok(())
            }
            ScriptCommand::DragEnd { task, over } => {
                engine.drag_end(task, over.as_deref());
                Ok(())
            }
        }
    }
}

/// Parses a whole script into (line number, command) pairs
pub fn parse(input: &str) -> Result<Vec<(usize, ScriptCommand)>, ScriptError> {
    let mut commands = Vec::new();
    for (index, raw_line) in input.lines().enumerate() {
        let line = index + 1;
        let trimmed = raw_line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let tokens = tokenize(trimmed, line)?;
        commands.push((line, parse_tokens(tokens, line)?));
    }
    Ok(commands)
}

/// Splits a line into whitespace-separated tokens, honoring double quotes
fn tokenize(line: &str, line_no: usize) -> Result<Vec<String>, ScriptError> {
    let mut tokens = Vec::new();
    let mut chars = line.chars().peekable();

    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }

        let mut token = String::new();
        if c == '"' {
            chars.next();
            let mut closed = false;
            for c in chars.by_ref() {
                if c == '"' {
                    closed = true;
                    break;
                }
                token.push(c);
            }
            if !closed {
                return Err(ScriptError::UnterminatedQuote { line: line_no });
            }
        } else {
            while let Some(&c) = chars.peek() {
                if c.is_whitespace() {
                    break;
                }
                token.push(c);
                chars.next();
            }
        }
        tokens.push(token);
    }

    Ok(tokens)
}

fn parse_tokens(tokens: Vec<String>, line: usize) -> Result<ScriptCommand, ScriptError> {
    let mut args = tokens.into_iter();
    let command = args.next().unwrap_or_default();

    let parsed = match command.as_str() {
        "add-task" => {
            let content = require(&mut args, line, "add-task", "content")?;
            let priority = match args.next() {
                Some(p) => Priority::from_str(&p)
                    .map_err(|source| ScriptError::InvalidPriority { line, source })?,
                None => Priority::default(),
            };
            let column = args
                .next()
                .map(|c| parse_id::<ColumnId>(&c, line))
                .transpose()?;
            ScriptCommand::AddTask {
                content,
                priority,
                column,
            }
        }
        "delete-task" => {
            let raw = require(&mut args, line, "delete-task", "task id")?;
            ScriptCommand::DeleteTask {
                task: parse_id(&raw, line)?,
            }
        }
        "add-column" => ScriptCommand::AddColumn {
            title: require(&mut args, line, "add-column", "title")?,
        },
        "delete-column" => {
            let raw = require(&mut args, line, "delete-column", "column id")?;
            ScriptCommand::DeleteColumn {
                column: parse_id(&raw, line)?,
            }
        }
        "drag-start" => ScriptCommand::DragStart {
            task: require(&mut args, line, "drag-start", "task id")?,
        },
        "drag-over" => ScriptCommand::DragOver {
            task: require(&mut args, line, "drag-over", "task id")?,
            over: args.next(),
        },
        "drag-end" => ScriptCommand::DragEnd {
            task: require(&mut args, line, "drag-end", "task id")?,
            over: args.next(),
        },
        _ => {
            return Err(ScriptError::UnknownCommand {
                line,
                command,
            })
        }
    };

    if let Some(extra) = args.next() {
        return Err(ScriptError::UnexpectedArgument {
            line,
            argument: extra,
        });
    }
    Ok(parsed)
}

fn require(
    args: &mut impl Iterator<Item = String>,
    line: usize,
    command: &'static str,
    argument: &'static str,
) -> Result<String, ScriptError> {
    args.next().ok_or(ScriptError::MissingArgument {
        line,
        command,
        argument,
    })
}

fn parse_id<T: FromStr<Err = IdError>>(raw: &str, line: usize) -> Result<T, ScriptError> {
    raw.parse()
        .map_err(|source| ScriptError::InvalidId { line, source })
}
