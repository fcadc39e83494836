//! Store abstraction for the key being edited.
//!
//! The editor never talks to a server directly. Everything it needs from the
//! key-value store is expressed by the [`Store`] trait: one type probe, one
//! read primitive per value kind, a scalar overwrite, and an atomic batch of
//! [`WriteOp`]s used for the delete-then-recreate writes of composite kinds.
//!
//! Two implementations ship with the crate:
//! - [`crate::core::redis_store::RedisStore`]: a synchronous Redis connection
//! - [`crate::core::memory_store::MemoryStore`]: an in-process map used by tests

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("redis error: {0}")]
    Redis(#[from] redis::RedisError),
    #[error("WRONGTYPE operation against key {0:?} holding the wrong kind of value")]
    WrongType(String),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// One step of an atomic write batch.
///
/// Recreate steps carrying no elements are skipped by implementations, so
/// `[Delete, PushList(vec![])]` leaves the key absent.
#[derive(Debug, Clone, PartialEq)]
pub enum WriteOp {
    Delete,
    /// Append to the tail, preserving the given order.
    PushList(Vec<String>),
    AddSetMembers(Vec<String>),
    SetMapFields(Vec<(String, String)>),
    /// `(member, score)` pairs.
    AddScoredMembers(Vec<(String, f64)>),
}

impl WriteOp {
    pub fn is_empty_recreate(&self) -> bool {
        match self {
            WriteOp::Delete => false,
            WriteOp::PushList(items) | WriteOp::AddSetMembers(items) => items.is_empty(),
            WriteOp::SetMapFields(fields) => fields.is_empty(),
            WriteOp::AddScoredMembers(members) => members.is_empty(),
        }
    }
}

pub trait Store {
    /// Reported type name of `key`, or `None` when the key does not exist.
    fn kind_of(&mut self, key: &str) -> Result<Option<String>, StoreError>;

    fn get_scalar(&mut self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Full range, head to tail.
    fn get_list(&mut self, key: &str) -> Result<Vec<String>, StoreError>;

    fn get_set(&mut self, key: &str) -> Result<Vec<String>, StoreError>;

    fn get_map(&mut self, key: &str) -> Result<Vec<(String, String)>, StoreError>;

    /// Members in ascending score order.
    fn get_scored_set(&mut self, key: &str) -> Result<Vec<(String, f64)>, StoreError>;

    fn set_scalar(&mut self, key: &str, value: &[u8]) -> Result<(), StoreError>;

    /// Apply every op to `key` as one atomic pipeline: either all of them are
    /// committed or none are.
    fn apply_batch(&mut self, key: &str, ops: &[WriteOp]) -> Result<(), StoreError>;
}
