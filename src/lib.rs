//! redis-edit: edit a single Redis key in your favorite `$EDITOR`.
//!
//! The tool fetches one key, renders it as editable text, opens an external
//! editor on a scratch file, and writes the value back only if the operator
//! actually changed it.
//!
//! # Value kinds
//!
//! | Redis type | Editable form | Write |
//! |---|---|---|
//! | `string` | raw bytes | `SET` |
//! | `list` | JSON array of strings | `DEL` + `RPUSH` |
//! | `set` | JSON array of strings | `DEL` + `SADD` |
//! | `hash` | JSON object of strings | `DEL` + `HSET` |
//! | `zset` | JSON object of member to score | `DEL` + `ZADD` |
//!
//! Composite writes go out as one `MULTI`/`EXEC` pipeline. A string that
//! already holds a JSON object or array must stay valid JSON unless `--raw`
//! is given.
//!
//! # Examples
//!
//! ```bash
//! redis-edit session:42
//! redis-edit -h 10.0.0.5 -p 6380 -n 2 leaderboard
//! EDITOR="code --wait" redis-edit -s /run/redis.sock config:flags
//! ```
//!
//! # Crate Structure
//!
//! - [`accessors`]: per-kind codecs and fetch/validate/write
//! - [`registry`]: type name to accessor lookup
//! - [`core`]: store, editor, scratch file, config, logging, and the session

pub mod accessors;
pub mod cli;
pub mod core;
pub mod registry;

use crate::cli::Cli;
use crate::core::config::Config;
use crate::core::editor::ExternalEditor;
use crate::core::error::EditError;
use crate::core::logging;
use crate::core::redis_store::RedisStore;
use crate::core::session::{EditOutcome, EditSession};
use clap::Parser;
use colored::Colorize;
use tracing::debug;

pub fn run() -> Result<EditOutcome, EditError> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    run_with(&cli)
}

/// Run one session for already-parsed arguments.
pub fn run_with(cli: &Cli) -> Result<EditOutcome, EditError> {
    let config = Config::load(cli)?;
    // Resolve the editor before touching the store so a missing editor fails fast.
    let editor = ExternalEditor::resolve(config.editor.as_deref())?;
    debug!(editor = editor.program(), "editor resolved");

    let mut store =
        RedisStore::connect(&config.connection).map_err(EditError::StoreReadError)?;
    EditSession::new(&mut store, &editor)
        .raw(config.raw)
        .run(&cli.key)
}

/// One-line, colored summary for the terminal.
pub fn describe_outcome(outcome: &EditOutcome) -> String {
    match outcome {
        EditOutcome::Unchanged { key, kind } => format!(
            "{} {} ({}) unchanged, nothing written",
            "➖".dimmed(),
            key.bright_white(),
            kind
        ),
        EditOutcome::Written { key, kind, bytes } => format!(
            "{} {} ({}) written, {} bytes",
            "✓".bright_green(),
            key.bright_white(),
            kind,
            bytes
        ),
    }
}
