//! Script replay: drive the engine from a command script
//!
//! This is the host side of the engine boundary: it supplies the seed
//! board, feeds operations in, and prints the resulting snapshot. The
//! JSON snapshot printed by `run` and `sample` is itself a valid seed,
//! so replays compose.

use anyhow::{bail, Context, Result};
use std::fs;
use std::io::Read;
use std::path::Path;

use super::output::Output;
use super::script;
use crate::domain::Board;
use crate::engine::BoardEngine;

/// Replays a script against a seed board and prints the final snapshot
pub fn run(
    output: &Output,
    script_path: Option<&Path>,
    seed_path: Option<&Path>,
    strict: bool,
) -> Result<()> {
    let text = match script_path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("reading script {}", path.display()))?,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("reading script from stdin")?;
            buffer
        }
    };
    let commands = script::parse(&text)?;
    output.verbose_ctx("run", &format!("parsed {} command(s)", commands.len()));

    let board = match seed_path {
        Some(path) => load_board(path)?,
        None => Board::sample(),
    };
    let mut engine =
        BoardEngine::new(board).map_err(|violation| anyhow::anyhow!("invalid seed board: {violation}"))?;

    for (line, command) in commands {
        output.verbose_ctx("run", &format!("line {}: {}", line, command.name()));
        if let Err(refusal) = command.apply(&mut engine) {
            if strict {
                bail!("line {}: {}", line, refusal);
            }
            output.error(&format!("line {} ({}): {}", line, command.name(), refusal));
        }
    }

    output.verbose_ctx(
        "run",
        &format!("final board version {}", engine.version()),
    );
    print_board(output, &engine);
    Ok(())
}

/// Prints the built-in sample board
pub fn sample(output: &Output) -> Result<()> {
    let engine = BoardEngine::sample();
    print_board(output, &engine);
    Ok(())
}

/// Checks a board file against the board invariants
pub fn validate(output: &Output, board_path: &Path) -> Result<()> {
    let board = load_board(board_path)?;
    match board.validate() {
        Ok(()) => {
            output.success(&format!(
                "{} is a valid board ({} tasks, {} columns)",
                board_path.display(),
                board.task_count(),
                board.column_order().len()
            ));
            Ok(())
        }
        Err(violation) => bail!("{}: {}", board_path.display(), violation),
    }
}

fn load_board(path: &Path) -> Result<Board> {
    let text =
        fs::read_to_string(path).with_context(|| format!("reading board {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing board {}", path.display()))
}

/// Prints the board: JSON snapshot in JSON mode, a column listing otherwise
fn print_board(output: &Output, engine: &BoardEngine) {
    if output.is_json() {
        output.data(engine.board());
        return;
    }

    let board = engine.board();
    for column_id in board.column_order() {
        let Some(column) = board.column(column_id.as_str()) else {
            continue;
        };
        output.line(&format!("{} ({})", column.title, column.len()));
        for task_id in column.task_ids() {
            if let Some(task) = board.task(task_id.as_str()) {
                output.line(&format!(
                    "  [{}] {} {}",
                    task.priority.label(),
                    task.id,
                    task.content
                ));
            }
        }
        output.blank();
    }
}
