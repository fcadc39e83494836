use crate::core::kind::ValueKind;
use crate::core::store::StoreError;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditError {
    #[error("redis type {0:?} not supported")]
    UnsupportedKind(String),
    #[error("unable to get key: {0}")]
    StoreReadError(#[source] StoreError),
    #[error("unable to write key: {0}")]
    StoreWriteError(#[source] StoreError),
    #[error("invalid {kind} edit: {source}")]
    MalformedEdit {
        kind: ValueKind,
        #[source]
        source: serde_json::Error,
    },
    #[error("an error occurred while editing: {0}")]
    EditorAborted(String),
    #[error("scratch file error: {0}")]
    ScratchFileError(#[source] io::Error),
    #[error("no EDITOR environment variable found and none of {0} is installed")]
    NoEditorFound(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("cannot represent {kind} value as JSON: {reason}")]
    EncodeError { kind: ValueKind, reason: String },
}

impl EditError {
    /// True when the failure happened before anything was sent to the store.
    pub fn store_untouched(&self) -> bool {
        !matches!(self, EditError::StoreWriteError(_))
    }
}
