//! Layered configuration: command-line flags over config file over defaults.

use crate::cli::Cli;
use crate::core::error::EditError;
use crate::core::redis_store::{Address, ConnectionOptions, DEFAULT_HOST, DEFAULT_PORT};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

pub const CONFIG_ENV: &str = "REDIS_EDIT_CONFIG";

/// On-disk config file. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub socket: Option<PathBuf>,
    pub password: Option<String>,
    pub db: Option<i64>,
    pub raw: Option<bool>,
    pub editor: Option<String>,
}

impl ConfigFile {
    pub fn load(path: &Path) -> Result<Self, EditError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            EditError::ConfigError(format!("cannot read {}: {}", path.display(), e))
        })?;
        toml::from_str(&content)
            .map_err(|e| EditError::ConfigError(format!("invalid {}: {}", path.display(), e)))
    }
}

/// Fully resolved settings for one session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub connection: ConnectionOptions,
    pub raw: bool,
    pub editor: Option<String>,
}

impl Config {
    /// Read the config file named by `--config` or `$REDIS_EDIT_CONFIG`, if
    /// any, and merge it under the command-line flags.
    pub fn load(cli: &Cli) -> Result<Self, EditError> {
        let path = cli
            .config
            .clone()
            .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from));
        let file = match path {
            Some(path) => {
                debug!(path = %path.display(), "loading config");
                ConfigFile::load(&path)?
            }
            None => ConfigFile::default(),
        };
        Ok(Self::merge(cli, file))
    }

    pub fn merge(cli: &Cli, file: ConfigFile) -> Self {
        // The command line decides the transport whenever it names one; the
        // file's socket only applies when no address flag was given.
        let cli_names_tcp = cli.host.is_some() || cli.port.is_some();
        let socket = cli
            .socket
            .clone()
            .or_else(|| file.socket.clone().filter(|_| !cli_names_tcp));
        let address = match socket {
            Some(path) => Address::Unix(path),
            None => Address::Tcp {
                host: cli
                    .host
                    .clone()
                    .or(file.host)
                    .unwrap_or_else(|| DEFAULT_HOST.to_string()),
                port: cli.port.or(file.port).unwrap_or(DEFAULT_PORT),
            },
        };
        Self {
            connection: ConnectionOptions {
                address,
                password: cli.password.clone().or(file.password),
                db: cli.db.or(file.db).unwrap_or(0),
            },
            raw: cli.raw || file.raw.unwrap_or(false),
            editor: file.editor,
        }
    }
}
