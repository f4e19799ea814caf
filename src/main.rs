//! Kanban CLI - scriptable harness over the board engine

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = kanban_cli::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
