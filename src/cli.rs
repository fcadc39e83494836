//! CLI struct definitions for the redis-edit command-line interface.
//!
//! `-h` is the server hostname, as in `redis-cli`, so help is `--help` only.

use clap::{ArgAction, Parser};
use std::path::PathBuf;

pub const USAGE_NOTES: &str = "\
This Redis utility will get a key and open it in your favorite EDITOR, when
changes were made it will write the change back to the same Redis key.

For editing the environment variable EDITOR is used or a few defaulted editors
are tried (like nano).

To edit more complex data types redis-edit will convert the data into a JSON
representation which can be edited and is converted back when written to Redis.";

#[derive(Parser, Debug, Clone, Default)]
#[clap(
    name = "redis-edit",
    version = env!("CARGO_PKG_VERSION"),
    about = "Edit a single Redis key in your favorite EDITOR",
    after_help = USAGE_NOTES,
    disable_help_flag = true,
    disable_version_flag = true
)]
pub struct Cli {
    /// The redis key to edit. Supported types: string, list, set, hash, zset
    pub key: String,

    /// Server hostname [default: 127.0.0.1]
    #[clap(short = 'h', value_name = "hostname")]
    pub host: Option<String>,

    /// Server port [default: 6379]
    #[clap(short = 'p', value_name = "port")]
    pub port: Option<u16>,

    /// Server socket (overrides hostname and port)
    #[clap(short = 's', value_name = "socket")]
    pub socket: Option<PathBuf>,

    /// Password to use when connecting to the server
    #[clap(short = 'a', value_name = "password")]
    pub password: Option<String>,

    /// Database number [default: 0]
    #[clap(short = 'n', value_name = "db")]
    pub db: Option<i64>,

    /// Raw writes, don't validate edits (only for string)
    #[clap(short = 'r', long)]
    pub raw: bool,

    /// TOML config file with connection defaults (also read from $REDIS_EDIT_CONFIG)
    #[clap(short = 'c', long, value_name = "path")]
    pub config: Option<PathBuf>,

    /// Log every step to stderr
    #[clap(short = 'v', long)]
    pub verbose: bool,

    /// Show this screen.
    #[clap(long, action = ArgAction::Help)]
    pub help: Option<bool>,

    /// Show version.
    #[clap(long, action = ArgAction::Version)]
    pub version: Option<bool>,
}
