//! # Command-Line Interface
//!
//! A scriptable harness around the board engine.
//!
//! ## Commands
//!
//! | Command | Purpose |
//! |---------|---------|
//! | `run` | Replay a command script against a seed board |
//! | `sample` | Print the built-in sample board |
//! | `validate` | Check a board JSON file against the invariants |
//!
//! ## Output Formats
//!
//! All commands support `--format`:
//! - `text` (default) - Human-readable column listing
//! - `json` - Machine-parseable board snapshot (itself a valid seed)
//!
//! ## Verbose Mode
//!
//! Use `--verbose` (or `-v`) for debug output:
//! ```bash
//! kanban --verbose run moves.kbs
//! ```
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod output;
mod replay;
mod script;

pub use app::{run, Cli, Commands};
pub use output::{Output, OutputFormat};
pub use script::{parse as parse_script, ScriptCommand, ScriptError};
